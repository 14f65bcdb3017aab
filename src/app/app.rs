//! Main application controller
//!
//! `Wizard` owns the screens and selection state and reacts to navigation
//! actions; `App` drives it from the terminal.

use crate::{
    app::{
        screens::{render_quiz, FormScreen, SelectionScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::WizardConfig,
    events::AnalyticsSink,
    models::{AppealType, APPEAL_CARDS},
    navigation::NavigationQueue,
    selection::AppealSelection,
    quiz::QuizPhase,
    Result, WizardError,
};
use tracing::{debug, info};

/// Screen state and input handling, independent of the terminal
pub struct Wizard {
    state_manager: StateManager,
    form_route: String,
    selection: AppealSelection,
    selection_screen: SelectionScreen,
    form_screen: FormScreen,
    analytics: Box<dyn AnalyticsSink>,
    navigator: NavigationQueue,
}

impl Wizard {
    pub fn new(config: &WizardConfig, analytics: Box<dyn AnalyticsSink>) -> Self {
        Self {
            state_manager: StateManager::new(),
            form_route: config.form_route.clone(),
            selection: AppealSelection::new(),
            selection_screen: SelectionScreen::new(),
            form_screen: FormScreen::new(),
            analytics,
            navigator: NavigationQueue::new(),
        }
    }

    pub fn current_state(&self) -> AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn selection(&self) -> &AppealSelection {
        &self.selection
    }

    pub fn form_screen(&self) -> &FormScreen {
        &self.form_screen
    }

    /// Start with a card already selected and focused
    pub fn preselect(&mut self, appeal_type: AppealType) {
        self.selection_screen.focus(appeal_type);
        self.selection.select_type(appeal_type);
    }

    /// Draw the current screen
    pub fn render(&self, f: &mut ratatui::Frame) {
        match self.state_manager.current_state() {
            AppState::Selection => {
                self.selection_screen.render(f, &self.selection);
                if let Some(quiz) = self.selection.quiz() {
                    render_quiz(f, quiz);
                }
            }
            AppState::Form => self.form_screen.render(f),
        }
    }

    /// React to one navigation action
    pub fn handle_action(&mut self, action: NavigationAction) {
        if action == NavigationAction::Quit {
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_state() {
            AppState::Selection if self.selection.quiz_open() => self.handle_quiz_action(action),
            AppState::Selection => self.handle_selection_action(action),
            AppState::Form => {
                if action == NavigationAction::Back {
                    self.state_manager.go_back();
                }
            }
        }

        self.process_navigation();
    }

    fn handle_selection_action(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Previous => self.selection_screen.focus_previous(),
            NavigationAction::Next => self.selection_screen.focus_next(),
            NavigationAction::Pick(index) => {
                if let Some(card) = APPEAL_CARDS.get(index) {
                    self.selection_screen.focus(card.appeal_type);
                    self.selection.select_type(card.appeal_type);
                }
            }
            NavigationAction::Select => {
                self.selection.select_type(self.selection_screen.focused_type());
            }
            NavigationAction::OpenQuiz => self.selection.open_quiz(),
            NavigationAction::Continue => {
                if self
                    .selection
                    .continue_to_form(self.analytics.as_ref(), &mut self.navigator)
                    .is_none()
                {
                    debug!("continue ignored, no appeal type selected");
                }
            }
            NavigationAction::Back => self.state_manager.go_back(),
            _ => {}
        }
    }

    fn handle_quiz_action(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Yes => self.answer_quiz(true),
            NavigationAction::No => self.answer_quiz(false),
            NavigationAction::Restart => self.selection.restart_quiz(),
            NavigationAction::UseDefault => {
                if let Some(appeal_type) = self.selection.use_quiz_default() {
                    self.selection_screen.focus(appeal_type);
                }
            }
            NavigationAction::Back => self.selection.close_quiz(),
            _ => {}
        }
    }

    fn answer_quiz(&mut self, yes: bool) {
        if let Some(QuizPhase::Resolved(appeal_type)) = self.selection.answer_quiz(yes) {
            self.selection_screen.focus(appeal_type);
        }
    }

    /// Act on navigation requests raised while handling input
    fn process_navigation(&mut self) {
        while let Some(route) = self.navigator.pop() {
            info!(url = %route.to_url(&self.form_route), "opening appeal form");
            self.form_screen.open(route, &self.form_route);
            self.state_manager.transition_to(AppState::Form);
        }
    }
}

/// TUI application controller
pub struct App {
    tui: Tui,
    wizard: Wizard,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &WizardConfig, analytics: Box<dyn AnalyticsSink>) -> Result<Self> {
        let tui = Tui::new(config.tick_rate())
            .map_err(|e| WizardError::TuiError(format!("Failed to create terminal: {}", e)))?;
        Ok(Self {
            tui,
            wizard: Wizard::new(config, analytics),
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| WizardError::TuiError(format!("Failed to initialize terminal: {}", e)))
    }

    /// Run the main application loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        while !self.wizard.should_quit() {
            let wizard = &self.wizard;
            self.tui.draw(|f| wizard.render(f))?;

            if let Some(key) = self.tui.next_key()? {
                self.wizard.handle_action(StateManager::key_to_navigation(key));
            }

            // Let the analytics delivery task make progress between polls
            tokio::task::yield_now().await;
        }
        self.tui.restore()?;
        Ok(())
    }

    pub fn preselect(&mut self, appeal_type: AppealType) {
        self.wizard.preselect(appeal_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AnalyticsEvent, MemoryAnalytics};

    fn wizard() -> (Wizard, MemoryAnalytics) {
        let analytics = MemoryAnalytics::new();
        let wizard = Wizard::new(&WizardConfig::default(), Box::new(analytics.clone()));
        (wizard, analytics)
    }

    #[test]
    fn test_pick_card_and_continue() {
        let (mut wizard, analytics) = wizard();

        wizard.handle_action(NavigationAction::Pick(2));
        assert_eq!(wizard.selection().selected_type(), Some(AppealType::SecondInstance));

        wizard.handle_action(NavigationAction::Continue);
        assert_eq!(wizard.current_state(), AppState::Form);
        assert_eq!(wizard.form_screen().url(), "/appeals/new?type=second_instance");
        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::FormStarted {
                appeal_type: AppealType::SecondInstance,
                used_quiz: false,
            }]
        );
    }

    #[test]
    fn test_continue_without_selection_stays() {
        let (mut wizard, analytics) = wizard();
        wizard.handle_action(NavigationAction::Continue);
        assert_eq!(wizard.current_state(), AppState::Selection);
        assert!(analytics.is_empty());
    }

    #[test]
    fn test_focus_then_select() {
        let (mut wizard, _) = wizard();
        wizard.handle_action(NavigationAction::Next);
        wizard.handle_action(NavigationAction::Select);
        assert_eq!(wizard.selection().selected_type(), Some(AppealType::FirstInstance));
    }

    #[test]
    fn test_quiz_keys_only_reach_open_quiz() {
        let (mut wizard, _) = wizard();
        wizard.handle_action(NavigationAction::No);
        assert_eq!(wizard.selection().selected_type(), None);

        wizard.handle_action(NavigationAction::OpenQuiz);
        // Card picks are ignored while the overlay is open
        wizard.handle_action(NavigationAction::Pick(0));
        assert_eq!(wizard.selection().selected_type(), None);

        wizard.handle_action(NavigationAction::No);
        assert!(!wizard.selection().quiz_open());
        assert_eq!(wizard.selection().selected_type(), Some(AppealType::PriorDefense));
        assert!(wizard.selection().used_quiz());
    }

    #[test]
    fn test_quiz_help_default_then_continue() {
        let (mut wizard, analytics) = wizard();
        wizard.handle_action(NavigationAction::OpenQuiz);
        wizard.handle_action(NavigationAction::Yes);
        wizard.handle_action(NavigationAction::Yes);
        wizard.handle_action(NavigationAction::No);
        assert!(wizard.selection().quiz_open());

        wizard.handle_action(NavigationAction::UseDefault);
        wizard.handle_action(NavigationAction::Continue);

        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::FormStarted {
                appeal_type: AppealType::FirstInstance,
                used_quiz: true,
            }]
        );
    }

    #[test]
    fn test_back_closes_quiz_then_quits() {
        let (mut wizard, _) = wizard();
        wizard.handle_action(NavigationAction::OpenQuiz);
        wizard.handle_action(NavigationAction::Back);
        assert!(!wizard.selection().quiz_open());
        assert!(!wizard.should_quit());

        wizard.handle_action(NavigationAction::Back);
        assert!(wizard.should_quit());
    }

    #[test]
    fn test_back_from_form_returns_to_selection() {
        let (mut wizard, _) = wizard();
        wizard.handle_action(NavigationAction::Pick(0));
        wizard.handle_action(NavigationAction::Continue);
        wizard.handle_action(NavigationAction::Back);
        assert_eq!(wizard.current_state(), AppState::Selection);
        assert_eq!(wizard.selection().selected_type(), Some(AppealType::PriorDefense));
    }

    #[test]
    fn test_preselected_card_continues_without_quiz() {
        let (mut wizard, analytics) = wizard();
        wizard.preselect(AppealType::PriorDefense);
        assert!(wizard.selection().is_selected(AppealType::PriorDefense));
        assert!(!wizard.selection().used_quiz());

        // Enter confirms the focused card, which is the preselected one
        wizard.handle_action(NavigationAction::Select);
        wizard.handle_action(NavigationAction::Continue);
        assert_eq!(wizard.form_screen().url(), "/appeals/new?type=prior_defense");
        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::FormStarted {
                appeal_type: AppealType::PriorDefense,
                used_quiz: false,
            }]
        );
    }

    #[test]
    fn test_quit_from_anywhere() {
        let (mut wizard, _) = wizard();
        wizard.handle_action(NavigationAction::OpenQuiz);
        wizard.handle_action(NavigationAction::Quit);
        assert!(wizard.should_quit());
    }
}
