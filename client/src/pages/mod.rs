//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page reduces the session to a small view enum with a pure function
//! (tested without a reactive runtime) and renders that enum.

pub mod dashboard;
pub mod home;
