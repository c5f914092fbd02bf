//! Widget-free page logic: what each page fetches, derives and displays.
//!
//! The GTK layer in `ui` renders these and forwards user input back in.

pub mod analytics;
pub mod businesses;
pub mod campaigns;
pub mod dashboard;
pub mod scanner;
pub mod upload;

/// One summary card: headline figure plus a short caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub description: String,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl ToString, description: impl Into<String>) -> Self {
        Self {
            title,
            value: value.to_string(),
            description: description.into(),
        }
    }
}
