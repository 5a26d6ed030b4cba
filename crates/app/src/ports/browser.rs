//! Browser port: page-level effects the services trigger.

use std::rc::Rc;
use std::time::Duration;

/// Page-level side effects.
///
/// Every method is fire-and-forget except [`Browser::confirm`], which blocks
/// on the user like `window.confirm`.
pub trait Browser {
    /// Navigate to `url`.
    fn navigate(&self, url: &str);

    /// Reload the current page now.
    fn reload(&self);

    /// Reload the current page once `delay` has elapsed.
    fn reload_after(&self, delay: Duration);

    /// Hide the modal with the given element id.
    fn close_modal(&self, modal_id: &str);

    /// Show a blocking message.
    fn alert(&self, message: &str);

    /// Ask the user to confirm; `true` means proceed.
    fn confirm(&self, message: &str) -> bool;

    /// Whether the page shows a data table that a reload would refresh.
    fn has_data_table(&self) -> bool;

    /// Path of the current location.
    fn current_path(&self) -> String;
}

impl<T: Browser> Browser for Rc<T> {
    fn navigate(&self, url: &str) {
        (**self).navigate(url);
    }

    fn reload(&self) {
        (**self).reload();
    }

    fn reload_after(&self, delay: Duration) {
        (**self).reload_after(delay);
    }

    fn close_modal(&self, modal_id: &str) {
        (**self).close_modal(modal_id);
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn has_data_table(&self) -> bool {
        (**self).has_data_table()
    }

    fn current_path(&self) -> String {
        (**self).current_path()
    }
}
