pub mod dispatch;
pub mod error;
pub mod state;
pub mod template;
pub mod timestamp;
