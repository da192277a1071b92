pub mod errors;
pub mod event_handler;
pub mod session;
