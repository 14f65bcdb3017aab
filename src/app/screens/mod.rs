//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod form;
pub mod quiz;
pub mod selection;

pub use form::FormScreen;
pub use quiz::render_quiz;
pub use selection::SelectionScreen;
