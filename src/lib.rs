//! Archviz Studio session engine.
//!
//! A single [`state::AppState`] per session, changed only by dispatching
//! [`action::Action`]s through the [`store::Store`]. Around it sit the prompt
//! generator, a simulated generation pipeline and `.avz` project files.
//! [`session::Session`] wires them together for a front-end host.

pub mod action;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod models;
pub mod project;
pub mod prompt;
pub mod reducer;
pub mod session;
pub mod state;
pub mod store;
pub mod styles;

pub use action::Action;
pub use config::StudioConfig;
pub use error::AppError;
pub use session::Session;
pub use state::AppState;
pub use store::Store;
