pub mod center;
pub mod notification;

pub use center::{make_subscriber, NotificationCenter, Subscriber};
pub use notification::Notification;
