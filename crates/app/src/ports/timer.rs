//! Timer port: fixed delays on the event loop.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Suspends the current task without blocking the thread.
pub trait Timer {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()>;
}

impl<T: Timer> Timer for Rc<T> {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        (**self).sleep(delay)
    }
}
