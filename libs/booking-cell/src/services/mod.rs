pub mod admission;
pub mod notification;
