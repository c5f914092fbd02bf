use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use outreach_dashboard::api::ApiError;
use outreach_dashboard::state::FetchState;

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// One read resource of a page: current state plus a way to fetch it again.
///
/// Each page owns its own queries; nothing is shared or cached across pages.
/// A refetch does not cancel the one before it, whichever response lands last wins.
pub struct Query<T> {
    state: RefCell<FetchState<T>>,
    fetch: Box<dyn Fn() -> BoxFuture<T>>,
    listener: RefCell<Option<Box<dyn Fn(&FetchState<T>)>>>,
}

impl<T: Clone + Send + 'static> Query<T> {
    pub fn new<F, Fut>(fetch: F) -> Rc<Self>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Rc::new(Self {
            state: RefCell::new(FetchState::Loading),
            fetch: Box::new(move || -> BoxFuture<T> { Box::pin(fetch()) }),
            listener: RefCell::new(None),
        })
    }

    /// Registers the render callback, replacing any previous one.
    pub fn subscribe(&self, listener: impl Fn(&FetchState<T>) + 'static) {
        self.listener.replace(Some(Box::new(listener)));
    }

    pub fn refetch(self: &Rc<Self>) {
        self.state.replace(FetchState::Loading);
        self.notify();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main((self.fetch)(), move |result| {
            let Some(query) = weak.upgrade() else {
                return;
            };
            let state = FetchState::from_result(result);
            if let Some(err) = state.error() {
                log::error!("fetch failed: {err}");
            }
            query.state.replace(state);
            query.notify();
        });
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    fn notify(&self) {
        // Listeners may trigger another refetch, so never hand out a live borrow.
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }
}
