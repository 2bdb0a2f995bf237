pub mod aggregate;

pub use aggregate::{
    low_stock_notifications, mark_all_read, mark_read, relative_time, unread_count, Notification,
    NotificationKind,
};
