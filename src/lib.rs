//! # registro-gateway
//!
//! REST gateway for user registration backed by a pooled MySQL store.
//!
//! This crate exposes a single business endpoint, `POST /api/register`,
//! which validates a JSON body and persists one user record through a
//! bounded connection pool. All SQL goes through the persistence
//! layer's two primitives: direct statement execution and transactional
//! units of work.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── UserService (service/)
//!     │
//!     ├── Database (persistence/)
//!     │
//!     └── MySQL (usuarios table)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
pub mod service;
