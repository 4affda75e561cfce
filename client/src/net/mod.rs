//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles authenticated REST calls and `types` defines the wire schema
//! shared with the backend and identity provider.

pub mod api;
pub mod types;
