use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Error;
use crate::models::DownloadEvent;

/// Durable string storage, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

/// The root markup element the theme is applied to.
pub trait RootElement {
    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    fn toggle_class(&self, class: &str, present: bool);
}

/// Live system color-scheme preference.
pub trait ColorSchemeQuery {
    fn prefers_dark(&self) -> bool;

    /// Registers `listener` for preference changes. The listener stays
    /// registered until the returned [`Subscription`] is dropped.
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

/// Releases an external registration when dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(dispose: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Update handle returned by a successful check.
#[async_trait(?Send)]
pub trait PendingUpdate {
    fn version(&self) -> &str;

    fn current_version(&self) -> &str;

    /// Downloads and installs the update, reporting progress through
    /// `on_event`. On most platforms the process is replaced before this
    /// returns.
    async fn download_and_install(
        &self,
        on_event: Box<dyn FnMut(DownloadEvent)>,
    ) -> Result<(), Error>;
}

/// The host updater plugin.
#[async_trait(?Send)]
pub trait UpdateSource {
    type Update: PendingUpdate;

    async fn check(&self) -> Result<Option<Self::Update>, Error>;

    /// Suspends for `duration` on the host event loop.
    async fn pause(&self, duration: Duration);
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_subscription_disposes_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            let _subscription = Subscription::new(move || count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscription_explicit_unsubscribe() {
        let count = Rc::new(Cell::new(0));
        let subscription = {
            let count = count.clone();
            Subscription::new(move || count.set(count.get() + 1))
        };
        subscription.unsubscribe();
        assert_eq!(count.get(), 1);
    }
}
