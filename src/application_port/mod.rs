mod notification_service;
mod relationship_service;
mod user_service;

pub use notification_service::*;
pub use relationship_service::*;
pub use user_service::*;
