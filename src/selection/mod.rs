//! Appeal type selection
//!
//! Radio-style choice between the appeal cards, with the quiz available as
//! an overlay. Confirming the choice reports `form_started` and asks the
//! host to open the appeal form.

use crate::events::{AnalyticsEvent, AnalyticsSink};
use crate::models::AppealType;
use crate::navigation::{Navigator, Route};
use crate::quiz::{QuizEngine, QuizPhase};
use tracing::{debug, info};

/// Selection state for one page lifetime
#[derive(Debug, Default)]
pub struct AppealSelection {
    selected_type: Option<AppealType>,
    /// Present while the quiz overlay is open
    quiz: Option<QuizEngine>,
    /// Set once the quiz supplied a result; never cleared
    used_quiz: bool,
}

impl AppealSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_type(&self) -> Option<AppealType> {
        self.selected_type
    }

    pub fn is_selected(&self, appeal_type: AppealType) -> bool {
        self.selected_type == Some(appeal_type)
    }

    pub fn quiz_open(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn used_quiz(&self) -> bool {
        self.used_quiz
    }

    /// Whether the continue action is enabled
    pub fn can_continue(&self) -> bool {
        self.selected_type.is_some()
    }

    pub fn quiz(&self) -> Option<&QuizEngine> {
        self.quiz.as_ref()
    }

    /// Pick a card, replacing any previous choice
    pub fn select_type(&mut self, appeal_type: AppealType) {
        debug!(appeal_type = %appeal_type, "appeal type selected");
        self.selected_type = Some(appeal_type);
    }

    /// Open the quiz overlay on a fresh quiz
    pub fn open_quiz(&mut self) {
        self.quiz = Some(QuizEngine::new());
        debug!("quiz opened");
    }

    /// Dismiss the quiz overlay without taking a result
    pub fn close_quiz(&mut self) {
        if self.quiz.take().is_some() {
            debug!("quiz closed");
        }
    }

    /// Take the quiz recommendation as the selection and close the overlay
    pub fn on_quiz_result(&mut self, appeal_type: AppealType) {
        info!(appeal_type = %appeal_type, "quiz recommended appeal type");
        self.used_quiz = true;
        self.selected_type = Some(appeal_type);
        self.quiz = None;
    }

    /// Answer the open quiz; a resolved quiz becomes the selection.
    ///
    /// Returns the quiz phase after the answer, or `None` when the quiz is
    /// not open.
    pub fn answer_quiz(&mut self, yes: bool) -> Option<QuizPhase> {
        let phase = self.quiz.as_mut()?.answer(yes);
        if let QuizPhase::Resolved(appeal_type) = phase {
            self.on_quiz_result(appeal_type);
        }
        Some(phase)
    }

    /// Restart the open quiz from its first question
    pub fn restart_quiz(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.restart();
        }
    }

    /// Accept the common default offered from the quiz help state
    pub fn use_quiz_default(&mut self) -> Option<AppealType> {
        let quiz = self.quiz.as_ref()?;
        if quiz.phase() != QuizPhase::HelpShown {
            return None;
        }
        let appeal_type = quiz.use_default();
        self.on_quiz_result(appeal_type);
        Some(appeal_type)
    }

    /// Report `form_started` and request the appeal form.
    ///
    /// Does nothing and returns `None` when no type is selected.
    pub fn continue_to_form(
        &self,
        analytics: &dyn AnalyticsSink,
        navigator: &mut dyn Navigator,
    ) -> Option<Route> {
        let appeal_type = self.selected_type?;

        analytics.emit(&AnalyticsEvent::FormStarted {
            appeal_type,
            used_quiz: self.used_quiz,
        });

        let route = Route::NewAppealForm { appeal_type };
        navigator.navigate(route.clone());
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemoryAnalytics;
    use crate::navigation::NavigationQueue;

    #[test]
    fn test_selection_creation() {
        let selection = AppealSelection::new();
        assert_eq!(selection.selected_type(), None);
        assert!(!selection.quiz_open());
        assert!(!selection.used_quiz());
        assert!(!selection.can_continue());
    }

    #[test]
    fn test_cards_are_mutually_exclusive() {
        let mut selection = AppealSelection::new();
        for chosen in AppealType::all() {
            selection.select_type(chosen);
            for other in AppealType::all() {
                assert_eq!(selection.is_selected(other), other == chosen);
            }
        }
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut selection = AppealSelection::new();
        selection.select_type(AppealType::PriorDefense);
        selection.select_type(AppealType::PriorDefense);
        assert_eq!(selection.selected_type(), Some(AppealType::PriorDefense));
    }

    #[test]
    fn test_reopening_quiz_starts_over() {
        let mut selection = AppealSelection::new();
        selection.open_quiz();
        selection.answer_quiz(true);
        assert_eq!(selection.quiz().map(|q| q.current_step()), Some(1));

        selection.close_quiz();
        assert!(!selection.quiz_open());
        assert!(!selection.used_quiz());

        selection.open_quiz();
        assert_eq!(selection.quiz().map(|q| q.phase()), Some(QuizPhase::Asking(0)));
    }

    #[test]
    fn test_quiz_result_selects_and_closes() {
        let mut selection = AppealSelection::new();
        selection.select_type(AppealType::SecondInstance);
        selection.open_quiz();

        let phase = selection.answer_quiz(false);
        assert_eq!(phase, Some(QuizPhase::Resolved(AppealType::PriorDefense)));
        assert_eq!(selection.selected_type(), Some(AppealType::PriorDefense));
        assert!(selection.used_quiz());
        assert!(!selection.quiz_open());
    }

    #[test]
    fn test_answer_without_open_quiz() {
        let mut selection = AppealSelection::new();
        assert_eq!(selection.answer_quiz(true), None);
        assert_eq!(selection.use_quiz_default(), None);
    }

    #[test]
    fn test_help_state_default() {
        let mut selection = AppealSelection::new();
        selection.open_quiz();
        assert_eq!(selection.use_quiz_default(), None);

        selection.answer_quiz(true);
        selection.answer_quiz(true);
        assert_eq!(selection.answer_quiz(false), Some(QuizPhase::HelpShown));
        assert!(selection.quiz_open());

        assert_eq!(selection.use_quiz_default(), Some(AppealType::FirstInstance));
        assert_eq!(selection.selected_type(), Some(AppealType::FirstInstance));
        assert!(selection.used_quiz());
        assert!(!selection.quiz_open());
    }

    #[test]
    fn test_continue_without_selection_is_inert() {
        let selection = AppealSelection::new();
        let analytics = MemoryAnalytics::new();
        let mut navigator = NavigationQueue::new();

        assert!(selection.continue_to_form(&analytics, &mut navigator).is_none());
        assert!(analytics.is_empty());
        assert!(navigator.is_empty());
    }

    #[test]
    fn test_continue_after_manual_pick() {
        let mut selection = AppealSelection::new();
        let analytics = MemoryAnalytics::new();
        let mut navigator = NavigationQueue::new();

        selection.select_type(AppealType::SecondInstance);
        let route = selection.continue_to_form(&analytics, &mut navigator);

        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::FormStarted {
                appeal_type: AppealType::SecondInstance,
                used_quiz: false,
            }]
        );
        assert_eq!(route.map(|r| r.appeal_type()), Some(AppealType::SecondInstance));
        assert_eq!(navigator.len(), 1);
    }

    #[test]
    fn test_used_quiz_survives_later_manual_pick() {
        let mut selection = AppealSelection::new();
        let analytics = MemoryAnalytics::new();
        let mut navigator = NavigationQueue::new();

        selection.open_quiz();
        selection.answer_quiz(false);
        selection.open_quiz();
        selection.restart_quiz();
        selection.close_quiz();
        selection.select_type(AppealType::SecondInstance);
        selection.continue_to_form(&analytics, &mut navigator);

        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::FormStarted {
                appeal_type: AppealType::SecondInstance,
                used_quiz: true,
            }]
        );
    }
}
