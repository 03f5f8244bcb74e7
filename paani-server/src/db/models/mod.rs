//! Database Models

pub mod customer;
pub mod delivery_request;
pub mod notification;

// Re-exports
pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use delivery_request::{
    DeliveryRequest, DeliveryRequestCreate, DeliveryRequestUpdate, DeliveryStatus, Priority,
};
pub use notification::{AdminNotification, NotificationCreate, NotificationType};
