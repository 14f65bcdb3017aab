//! Application state management
//!
//! Handles screen transitions and keyboard event processing for the TUI
//! application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Appeal type cards, with the quiz as an overlay
    #[default]
    Selection,
    /// Appeal form the wizard navigated to
    Form,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move focus to the previous card (arrow left/up, h, k)
    Previous,
    /// Move focus to the next card (arrow right/down, l, j, Tab)
    Next,
    /// Pick the card at this index directly (1-3)
    Pick(usize),
    /// Confirm the focused item (Enter, Space)
    Select,
    /// Answer "yes" in the quiz (y)
    Yes,
    /// Answer "no" in the quiz (n)
    No,
    /// Open the quiz overlay (?)
    OpenQuiz,
    /// Restart the quiz (r)
    Restart,
    /// Take the common default from the quiz help state (d)
    UseDefault,
    /// Continue to the appeal form (c)
    Continue,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the selection screen
    pub fn new() -> Self {
        Self {
            current_state: AppState::Selection,
            previous_state: None,
            should_quit: false,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise quit from the
    /// selection screen
    pub fn go_back(&mut self) {
        match self.previous_state.take() {
            Some(prev_state) => self.current_state = prev_state,
            None if self.current_state == AppState::Selection => self.should_quit = true,
            None => self.current_state = AppState::Selection,
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Card focus
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                NavigationAction::Previous
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                NavigationAction::Next
            }
            KeyCode::Tab => NavigationAction::Next,
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Char(c @ '1'..='3') => NavigationAction::Pick(c as usize - '1' as usize),

            // Quiz answers
            KeyCode::Char('y') | KeyCode::Char('Y') => NavigationAction::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => NavigationAction::No,
            KeyCode::Char('?') => NavigationAction::OpenQuiz,
            KeyCode::Char('r') | KeyCode::Char('R') => NavigationAction::Restart,
            KeyCode::Char('d') | KeyCode::Char('D') => NavigationAction::UseDefault,

            KeyCode::Char('c') | KeyCode::Char('C') => NavigationAction::Continue,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
