//! Persistence layer: pooled MySQL access.
//!
//! Owns the bounded connection pool and provides the two execution
//! primitives every caller goes through: direct statement execution
//! and transactional units of work. The concrete implementation uses
//! `sqlx::MySqlPool` for async MySQL access.

pub mod models;
pub mod mysql;
