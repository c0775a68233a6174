//! Service layer: orchestration between handlers and persistence.

pub mod user_service;

pub use user_service::UserService;
