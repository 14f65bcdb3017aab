//! Integration tests for the selection screen and quiz overlay

use appeal_wizard::app::{AppState, NavigationAction, StateManager, Wizard};
use appeal_wizard::config::WizardConfig;
use appeal_wizard::events::{AnalyticsEvent, MemoryAnalytics};
use appeal_wizard::models::AppealType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn press(wizard: &mut Wizard, code: KeyCode) {
    let action = StateManager::key_to_navigation(KeyEvent::new(code, KeyModifiers::NONE));
    wizard.handle_action(action);
}

#[test]
fn test_keyboard_quiz_to_form() {
    let analytics = MemoryAnalytics::new();
    let config = WizardConfig::new().with_form_route("/recursos/novo");
    let mut wizard = Wizard::new(&config, Box::new(analytics.clone()));

    press(&mut wizard, KeyCode::Char('?'));
    press(&mut wizard, KeyCode::Char('y'));
    press(&mut wizard, KeyCode::Char('y'));
    press(&mut wizard, KeyCode::Char('y'));
    assert_eq!(wizard.selection().selected_type(), Some(AppealType::SecondInstance));

    press(&mut wizard, KeyCode::Char('c'));
    assert_eq!(wizard.current_state(), AppState::Form);
    assert_eq!(wizard.form_screen().url(), "/recursos/novo?type=second_instance");
    assert_eq!(
        analytics.events(),
        vec![AnalyticsEvent::FormStarted {
            appeal_type: AppealType::SecondInstance,
            used_quiz: true,
        }]
    );
}

#[test]
fn test_escape_closes_quiz_without_selecting() {
    let analytics = MemoryAnalytics::new();
    let mut wizard = Wizard::new(&WizardConfig::default(), Box::new(analytics.clone()));

    press(&mut wizard, KeyCode::Char('?'));
    press(&mut wizard, KeyCode::Char('y'));
    press(&mut wizard, KeyCode::Esc);
    assert!(!wizard.selection().quiz_open());
    assert_eq!(wizard.selection().selected_type(), None);

    // Reopening starts again from the first question
    press(&mut wizard, KeyCode::Char('?'));
    assert_eq!(wizard.selection().quiz().map(|q| q.current_step()), Some(0));

    press(&mut wizard, KeyCode::Char('q'));
    assert!(wizard.should_quit());
    assert!(analytics.is_empty());
}

#[test]
fn test_arrow_focus_and_enter() {
    let mut wizard = Wizard::new(&WizardConfig::default(), Box::new(MemoryAnalytics::new()));

    press(&mut wizard, KeyCode::Left);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.selection().selected_type(), Some(AppealType::SecondInstance));

    wizard.handle_action(NavigationAction::Pick(0));
    assert!(wizard.selection().is_selected(AppealType::PriorDefense));
    assert!(!wizard.selection().is_selected(AppealType::SecondInstance));
}
