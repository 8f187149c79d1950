//! Core types for CodeBrew.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order;

pub use email::Email;
pub use id::UserId;
pub use order::{OrderItem, OrderList};
