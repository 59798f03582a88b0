pub mod contact_service;

pub use contact_service::{ContactError, ContactMessage, ContactRelay};
