//! Terminal user interface built on ratatui.
//!
//! - [`app`]: the driver loop that owns the engine
//! - [`keys`]: key bindings
//! - [`view`]: stateless rendering from the engine's state

pub mod app;
pub mod keys;
pub mod view;

pub use app::{App, Control};
pub use keys::{action_for, Action};
