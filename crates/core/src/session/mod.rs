//! Session token bookkeeping

pub mod manager;
pub mod ports;

pub use manager::SessionManager;
pub use ports::SessionStore;
