//! Selection screen implementation
//!
//! Shows the three appeal cards side by side with radio-style selection,
//! the current choice, and the continue action.

use crate::models::{AppealType, AppealTypeCard, APPEAL_CARDS};
use crate::selection::AppealSelection;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Selection screen component; tracks which card has keyboard focus
#[derive(Debug, Default)]
pub struct SelectionScreen {
    focused_index: usize,
}

impl SelectionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appeal type of the focused card
    pub fn focused_type(&self) -> AppealType {
        APPEAL_CARDS[self.focused_index].appeal_type
    }

    /// Move focus to the previous card, wrapping around
    pub fn focus_previous(&mut self) {
        if self.focused_index > 0 {
            self.focused_index -= 1;
        } else {
            self.focused_index = APPEAL_CARDS.len() - 1;
        }
    }

    /// Move focus to the next card, wrapping around
    pub fn focus_next(&mut self) {
        self.focused_index = (self.focused_index + 1) % APPEAL_CARDS.len();
    }

    /// Focus the card for a given appeal type
    pub fn focus(&mut self, appeal_type: AppealType) {
        if let Some(index) = APPEAL_CARDS.iter().position(|c| c.appeal_type == appeal_type) {
            self.focused_index = index;
        }
    }

    /// Render the selection screen
    pub fn render(&self, f: &mut Frame, selection: &AppealSelection) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(10),   // Cards
                Constraint::Length(3), // Current choice and continue
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        self.render_title(f, chunks[0]);
        self.render_cards(f, chunks[1], selection);
        self.render_status(f, chunks[2], selection);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("Traffic Penalty Appeal")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Which appeal do you want to file? Not sure? Press ? for a quick quiz.")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_cards(&self, f: &mut Frame, area: Rect, selection: &AppealSelection) {
        let card_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (i, card) in APPEAL_CARDS.iter().enumerate() {
            let selected = selection.is_selected(card.appeal_type);
            let focused = i == self.focused_index;
            f.render_widget(card_widget(i, card, selected, focused), card_chunks[i]);
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect, selection: &AppealSelection) {
        let line = match selection.selected_type() {
            Some(appeal_type) => Line::from(vec![
                Span::raw("Selected: "),
                Span::styled(
                    appeal_type.card().title,
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    "[C] Continue to form",
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ),
            ]),
            None => Line::from(vec![
                Span::raw("No appeal type selected   "),
                Span::styled(
                    "[C] Continue to form",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        };

        let status = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let help_text = Line::from(vec![
            Span::styled("←→", key),
            Span::raw(" Focus  "),
            Span::styled("Enter/1-3", key),
            Span::raw(" Select  "),
            Span::styled("?", key),
            Span::raw(" Quiz  "),
            Span::styled("C", key),
            Span::raw(" Continue  "),
            Span::styled("Q", key),
            Span::raw(" Quit"),
        ]);

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}

fn card_widget(index: usize, card: &AppealTypeCard, selected: bool, focused: bool) -> Paragraph<'static> {
    let radio = if selected { "(●)" } else { "( )" };
    let heading = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} {}. ", radio, index + 1)),
            Span::raw(card.emoji),
        ]),
        Line::from(Span::styled(card.title, heading)),
        Line::from(""),
        Line::from(card.description),
        Line::from(""),
        Line::from(Span::styled(card.deadline, Style::default().fg(Color::Yellow))),
    ];
    if card.most_common {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "★ Most common",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
    }

    let border_style = match (selected, focused) {
        (true, _) => Style::default().fg(Color::Green),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::White),
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_navigation_wraps() {
        let mut screen = SelectionScreen::new();
        assert_eq!(screen.focused_type(), AppealType::PriorDefense);

        screen.focus_next();
        assert_eq!(screen.focused_type(), AppealType::FirstInstance);
        screen.focus_next();
        screen.focus_next();
        assert_eq!(screen.focused_type(), AppealType::PriorDefense);

        screen.focus_previous();
        assert_eq!(screen.focused_type(), AppealType::SecondInstance);
    }

    #[test]
    fn test_focus_by_type() {
        let mut screen = SelectionScreen::new();
        screen.focus(AppealType::SecondInstance);
        assert_eq!(screen.focused_index, 2);
    }
}
