//! Client-side session state.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `transcript`, `ui`) so views can
//! depend on small focused models. Only the session controller mutates
//! them; everything else reads snapshots.

pub mod session;
pub mod transcript;
pub mod ui;
