//! Data Transfer Objects for REST request/response serialization.

pub mod register_dto;

pub use register_dto::*;
