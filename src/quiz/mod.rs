//! Appeal quiz decision tree
//!
//! Three ordered yes/no questions narrow the situation down to one appeal
//! type, or to a help state when the driver cannot tell whether the JARI
//! decided against them.

use crate::models::{AppealType, QuizStep, QUIZ_STEPS};
use tracing::{debug, warn};

/// Where the quiz currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the question at this index
    Asking(usize),
    /// The quiz recommended an appeal type
    Resolved(AppealType),
    /// The driver answered "don't know" on the last question
    HelpShown,
}

/// Quiz state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizEngine {
    current_step: usize,
    result: Option<AppealType>,
    show_help: bool,
}

impl QuizEngine {
    /// Create a quiz positioned at the first question
    pub fn new() -> Self {
        Self {
            current_step: 0,
            result: None,
            show_help: false,
        }
    }

    /// Current phase derived from the raw state
    pub fn phase(&self) -> QuizPhase {
        match (self.result, self.show_help) {
            (Some(result), _) => QuizPhase::Resolved(result),
            (None, true) => QuizPhase::HelpShown,
            (None, false) => QuizPhase::Asking(self.current_step),
        }
    }

    /// Index of the question being asked (or last asked)
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn result(&self) -> Option<AppealType> {
        self.result
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Number of questions in the quiz
    pub fn step_count(&self) -> usize {
        QUIZ_STEPS.len()
    }

    /// Question to display, `None` once the quiz has finished
    pub fn current_question(&self) -> Option<&'static QuizStep> {
        match self.phase() {
            QuizPhase::Asking(step) => QUIZ_STEPS.get(step),
            _ => None,
        }
    }

    /// Whether a result or the help branch has been reached
    pub fn is_finished(&self) -> bool {
        !matches!(self.phase(), QuizPhase::Asking(_))
    }

    /// Answer the current question and return the new phase.
    ///
    /// Answers given after the quiz has finished are ignored.
    pub fn answer(&mut self, yes: bool) -> QuizPhase {
        let step = match self.phase() {
            QuizPhase::Asking(step) => step,
            finished => return finished,
        };

        match (step, yes) {
            (0, false) => self.result = Some(AppealType::PriorDefense),
            (1, false) => self.result = Some(AppealType::FirstInstance),
            (2, true) => self.result = Some(AppealType::SecondInstance),
            (2, false) => self.show_help = true,
            (0, true) | (1, true) => self.current_step = step + 1,
            _ => {
                warn!(step, yes, "quiz step out of range, answer ignored");
                return self.phase();
            }
        }

        let phase = self.phase();
        debug!(step, yes, ?phase, "quiz answer");
        phase
    }

    /// Go back to the first question, clearing any result or help state
    pub fn restart(&mut self) {
        self.current_step = 0;
        self.result = None;
        self.show_help = false;
        debug!("quiz restarted");
    }

    /// Recommendation offered from the help state when the driver still
    /// cannot tell: the first instance appeal is the common default.
    pub fn use_default(&self) -> AppealType {
        AppealType::FirstInstance
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}
