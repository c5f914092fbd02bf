//! View-local request state shared by every page.

use std::fmt::Display;

/// Result of the most recent read request a view issued.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T: Clone + Default> FetchState<T> {
    /// Loaded data, or the empty value when loading or failed.
    pub fn data_or_default(&self) -> T {
        self.data().cloned().unwrap_or_default()
    }
}

/// A user-triggered write (upload, bulk scan).
///
/// `Succeeded` and `Failed` are idle states that keep the last outcome on
/// screen until the next attempt replaces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActionState<T> {
    #[default]
    Idle,
    InFlight,
    Succeeded(T),
    Failed(String),
}

impl<T> ActionState<T> {
    /// Enters `InFlight`, dropping any previous outcome. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        *self = Self::InFlight;
        true
    }

    pub fn finish(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => Self::Succeeded(value),
            Err(err) => Self::Failed(err),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
