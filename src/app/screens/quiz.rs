//! Quiz overlay
//!
//! Popup drawn over the selection screen while the quiz is open.

use crate::quiz::{QuizEngine, QuizPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the quiz popup in the middle of the screen
pub fn render_quiz(f: &mut Frame, quiz: &QuizEngine) {
    let area = centered_rect(70, 14, f.size());
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let lines = match quiz.phase() {
        QuizPhase::Asking(step) => {
            // Asking always has a question
            let Some(question) = quiz.current_question() else {
                return;
            };
            vec![
                Line::from(Span::styled(
                    format!("Question {} of {}", step + 1, quiz.step_count()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    question.question,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(question.hint, Style::default().fg(Color::Gray))),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[Y] ", key),
                    Span::raw(question.yes_label),
                    Span::raw("    "),
                    Span::styled("[N] ", key),
                    Span::raw(question.no_label),
                ]),
            ]
        }
        QuizPhase::HelpShown => vec![
            Line::from(Span::styled(
                "Not sure what the JARI decided?",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(
                "Look for the decision letter from the traffic authority or check its website with your vehicle plate.",
            ),
            Line::from(""),
            Line::from("If you still can't tell, the first instance appeal is the most common choice."),
            Line::from(""),
            Line::from(vec![
                Span::styled("[D] ", key),
                Span::raw("Use first instance appeal    "),
                Span::styled("[R] ", key),
                Span::raw("Start over"),
            ]),
        ],
        // The overlay closes as soon as a result is known
        QuizPhase::Resolved(_) => return,
    };

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Which appeal fits? (Esc to close) ")
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
