use std::future::Future;
use std::path::PathBuf;

use directories::{BaseDirs, UserDirs};
use glib::MainContext;
use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Runs `fut` on the Tokio runtime and hands its output to `on_done` on the calling thread's
/// main context, which is the GTK main loop everywhere outside tests.
pub fn run_async_to_main<T, Fut, C>(fut: Fut, on_done: C)
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    C: FnOnce(T) + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel::<T>();
    spawn_async(async move {
        let _ = tx.send(fut.await);
    });
    MainContext::ref_thread_default().spawn_local(async move {
        match rx.await {
            Ok(value) => on_done(value),
            Err(_) => log::warn!("background task dropped before completing"),
        }
    });
}

/// Where "downloads" land: the user's download dir, else home, else the working directory.
pub fn download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
