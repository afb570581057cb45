// Service exports
pub mod sessions;

pub use sessions::{SessionHandle, SessionStore};
