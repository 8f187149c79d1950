//! CodeBrew Core - Shared domain types.
//!
//! This crate provides the types used by the CodeBrew Cafe storefront:
//! - identity of a signed-in customer ([`UserId`], [`Email`])
//! - the order a visitor accumulates while browsing ([`OrderItem`], [`OrderList`])
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no sessions, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user IDs, emails, and order items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
