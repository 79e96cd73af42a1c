//! NotificationSink adapter over the folio-notify center.

use crate::application_service::workflow_service::port::{NotificationSink, NotificationSinkError};
use folio_notify::{Notification, NotificationCenter};

/// Delivers engine notifications through an in-process
/// [`NotificationCenter`]. Publishing to a center with no subscribers
/// is fine; the notification is simply dropped.
pub struct NotificationCenterSink {
    center: NotificationCenter,
}

impl NotificationCenterSink {
    pub fn new(center: NotificationCenter) -> Self {
        Self { center }
    }
}

impl NotificationSink for NotificationCenterSink {
    fn deliver(&self, notification: Notification) -> Result<(), NotificationSinkError> {
        self.center.publish(&notification);
        Ok(())
    }
}
