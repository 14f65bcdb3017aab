//! Appeal form screen
//!
//! Landing screen for the navigation request. The form itself belongs to
//! the host; this screen confirms which form was requested.

use crate::navigation::Route;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Default)]
pub struct FormScreen {
    route: Option<Route>,
    url: String,
}

impl FormScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the form for a navigation request
    pub fn open(&mut self, route: Route, form_route: &str) {
        self.url = route.to_url(form_route);
        self.route = Some(route);
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Render the form screen
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.size());

        let title = Paragraph::new("New Appeal")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.render_body(f, chunks[1]);

        let help = Paragraph::new("Esc: Back to appeal types | Q: Quit")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[2]);
    }

    fn render_body(&self, f: &mut Frame, area: Rect) {
        let lines = match &self.route {
            Some(route) => {
                let card = route.appeal_type().card();
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("{} {}", card.emoji, card.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(card.description),
                    Line::from(Span::styled(card.deadline, Style::default().fg(Color::Yellow))),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Form: "),
                        Span::styled(self.url.clone(), Style::default().fg(Color::Green)),
                    ]),
                ]
            }
            None => vec![Line::from("No appeal form requested")],
        };

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, area);
    }
}
