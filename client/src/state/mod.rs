//! Shared client-side state.
//!
//! DESIGN
//! ======
//! The only shared state is the session. It is kept free of Leptos types so
//! its transitions can be driven directly in tests; the reactive wrapper
//! lives in `components::session_provider`.

pub mod session;
