//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep decisions out of components so they can be tested
//! without a browser or reactive runtime.

pub mod auth;
