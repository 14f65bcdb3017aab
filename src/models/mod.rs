//! Data models module
//!
//! Contains the appeal type enumeration, the static card metadata shown
//! on the selection screen, and the static quiz questions.

pub mod appeal;
pub mod question;

// Re-export commonly used types
pub use appeal::{AppealType, AppealTypeCard, APPEAL_CARDS};
pub use question::{QuizStep, QUIZ_STEPS};
