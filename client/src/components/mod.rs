//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_provider` installs the session and identity contexts; the other
//! components read them through its accessors.

pub mod config_notice;
pub mod login_button;
pub mod logout_button;
pub mod protected_route;
pub mod session_provider;
