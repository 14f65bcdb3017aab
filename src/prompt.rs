//! Line-based prompt mode
//!
//! The same selection and quiz flow as the TUI, driven by plain lines of
//! input. Useful on terminals without raw mode and in scripts.

use std::io::{BufRead, Write};

use crate::events::{AnalyticsEvent, AnalyticsSink, RecordedEvent};
use crate::models::{AppealType, APPEAL_CARDS};
use crate::navigation::{NavigationQueue, Route};
use crate::quiz::QuizPhase;
use crate::selection::AppealSelection;
use crate::Result;

/// Run the wizard on `input`/`output` until the user continues to the form
/// or quits. Returns the navigation request, if any.
pub fn run_prompt<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    analytics: &dyn AnalyticsSink,
    form_route: &str,
    preselected: Option<AppealType>,
) -> Result<Option<Route>> {
    let mut selection = AppealSelection::new();
    if let Some(appeal_type) = preselected {
        selection.select_type(appeal_type);
    }
    let mut navigator = NavigationQueue::new();

    loop {
        print_cards(output, &selection)?;
        write!(output, "Choose 1-3, '?' for the quiz, 'c' to continue, 'q' to quit: ")?;
        output.flush()?;

        let Some(command) = read_command(&mut input)? else {
            return Ok(None);
        };

        match command.as_str() {
            "1" => selection.select_type(APPEAL_CARDS[0].appeal_type),
            "2" => selection.select_type(APPEAL_CARDS[1].appeal_type),
            "3" => selection.select_type(APPEAL_CARDS[2].appeal_type),
            "?" => {
                selection.open_quiz();
                if !run_quiz(&mut input, output, &mut selection)? {
                    return Ok(None);
                }
            }
            "c" => {
                if selection.continue_to_form(analytics, &mut navigator).is_none() {
                    writeln!(output, "Select an appeal type first.")?;
                }
                if let Some(route) = navigator.pop() {
                    writeln!(output, "Opening {}", route.to_url(form_route))?;
                    return Ok(Some(route));
                }
            }
            "q" => return Ok(None),
            other => writeln!(output, "Unknown option: {}", other)?,
        }
    }
}

/// Ask quiz questions until the quiz closes. Returns false on end of input.
fn run_quiz<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    selection: &mut AppealSelection,
) -> Result<bool> {
    while let Some(quiz) = selection.quiz() {
        match quiz.phase() {
            QuizPhase::Asking(step) => {
                let Some(question) = quiz.current_question() else {
                    break;
                };
                writeln!(output)?;
                writeln!(output, "Question {} of {}: {}", step + 1, quiz.step_count(), question.question)?;
                writeln!(output, "  {}", question.hint)?;
                write!(
                    output,
                    "  [y] {}  [n] {}  [x] close: ",
                    question.yes_label, question.no_label
                )?;
            }
            QuizPhase::HelpShown => {
                writeln!(output)?;
                writeln!(output, "Not sure what the JARI decided? Check the decision letter.")?;
                writeln!(output, "The first instance appeal is the most common choice.")?;
                write!(output, "  [d] use first instance  [r] start over  [x] close: ")?;
            }
            QuizPhase::Resolved(_) => break,
        }
        output.flush()?;

        let Some(command) = read_command(input)? else {
            selection.close_quiz();
            return Ok(false);
        };

        match command.as_str() {
            "y" | "n" => {
                if let Some(QuizPhase::Resolved(appeal_type)) = selection.answer_quiz(command == "y") {
                    print_recommendation(output, appeal_type)?;
                }
            }
            "d" => {
                if let Some(appeal_type) = selection.use_quiz_default() {
                    print_recommendation(output, appeal_type)?;
                }
            }
            "r" => selection.restart_quiz(),
            "x" => selection.close_quiz(),
            other => writeln!(output, "Unknown option: {}", other)?,
        }
    }
    Ok(true)
}

fn print_cards<W: Write>(output: &mut W, selection: &AppealSelection) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Which appeal do you want to file?")?;
    for (i, card) in APPEAL_CARDS.iter().enumerate() {
        let radio = if selection.is_selected(card.appeal_type) { "(*)" } else { "( )" };
        let badge = if card.most_common { "  [most common]" } else { "" };
        writeln!(output, "{} {}. {} {}{}", radio, i + 1, card.emoji, card.title, badge)?;
        writeln!(output, "       {}", card.description)?;
        writeln!(output, "       {}", card.deadline)?;
    }
    Ok(())
}

fn print_recommendation<W: Write>(output: &mut W, appeal_type: AppealType) -> Result<()> {
    writeln!(output, "Recommended: {}", appeal_type.card().title)?;
    Ok(())
}

/// Write recorded events one per line, oldest first
pub fn print_events<W: Write>(output: &mut W, events: &[RecordedEvent]) -> Result<()> {
    if events.is_empty() {
        writeln!(output, "No events recorded.")?;
        return Ok(());
    }
    for recorded in events {
        match &recorded.event {
            AnalyticsEvent::FormStarted {
                appeal_type,
                used_quiz,
            } => writeln!(
                output,
                "{}  {}  type={} used_quiz={}",
                recorded.timestamp.format("%Y-%m-%d %H:%M:%S"),
                recorded.event.name(),
                appeal_type,
                used_quiz
            )?,
        }
    }
    Ok(())
}

/// Next trimmed, lowercased line; `None` at end of input
fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
