use std::io::{stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveToNextLine, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;
use log::debug;

use askopt_core::error::Result;

use super::types::SelectAction;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// One single-select question: owns the highlight state for its lifetime.
///
/// A session is created when its question starts and dropped when it closes;
/// nothing about it outlives the question, so sessions can be run repeatedly
/// or concurrently in tests without cross-talk.
pub struct SelectorSession<'a> {
    question: &'a str,
    choices: &'a [String],
    selected_index: usize,
}

impl<'a> SelectorSession<'a> {
    #[must_use]
    pub fn new(question: &'a str, choices: &'a [String]) -> Self {
        Self {
            question,
            choices,
            selected_index: 0,
        }
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Decodes one keystroke against the fixed key table.
    ///
    /// Enter and Ctrl-C both submit the current highlight; there is no
    /// distinct cancel path. Anything unrecognized is a no-op.
    #[must_use]
    pub fn decode_key(key_event: &KeyEvent) -> Option<SelectAction> {
        match key_event.code {
            KeyCode::Enter => Some(SelectAction::Submit),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(SelectAction::Submit)
            }
            KeyCode::Up => Some(SelectAction::MoveUp),
            KeyCode::Down => Some(SelectAction::MoveDown),
            _ => None,
        }
    }

    /// Applies a movement action, clamping the highlight to the choice list.
    ///
    /// Returns whether the highlight actually moved (a clamped move at either
    /// end is a no-op and needs no repaint).
    pub fn apply_move(&mut self, action: SelectAction) -> bool {
        let previous = self.selected_index;
        match action {
            SelectAction::MoveUp => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            SelectAction::MoveDown => {
                if self.selected_index + 1 < self.choices.len() {
                    self.selected_index += 1;
                }
            }
            SelectAction::Submit => {}
        }
        previous != self.selected_index
    }

    /// Runs the session to completion and returns the chosen value.
    ///
    /// Raw terminal mode is held by a scope guard for the whole run, so it is
    /// released on every exit path, including render errors. Only the menu's
    /// own lines are ever repainted; surrounding output is preserved.
    pub fn run(&mut self) -> Result<String> {
        enable_raw_mode()?;
        let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled

        let mut stdout = stdout();
        queue!(stdout, Print(self.question), MoveToNextLine(1))?;
        render_choices(&mut stdout, self.choices, self.selected_index)?;
        stdout.flush()?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };

            match Self::decode_key(&key_event) {
                Some(SelectAction::Submit) => break,
                Some(action) => {
                    if self.apply_move(action) {
                        erase_choices(&mut stdout, self.choices.len())?;
                        render_choices(&mut stdout, self.choices, self.selected_index)?;
                        stdout.flush()?;
                    }
                }
                None => {}
            }
        }

        debug!(
            "select session closed at index {} of {}",
            self.selected_index,
            self.choices.len()
        );
        Ok(self
            .choices
            .get(self.selected_index)
            .cloned()
            .unwrap_or_default())
    }
}

/// Draws the choice list, marking and coloring the highlighted row.
///
/// Leaves the cursor at column 0 of the line below the menu.
fn render_choices(writer: &mut impl Write, choices: &[String], selected: usize) -> Result<()> {
    for (index, choice) in choices.iter().enumerate() {
        if index == selected {
            queue!(
                writer,
                SetForegroundColor(Color::Green),
                Print(format!("> {choice}")),
                ResetColor
            )?;
        } else {
            queue!(writer, Print(format!("  {choice}")))?;
        }
        queue!(writer, MoveToNextLine(1))?;
    }
    Ok(())
}

/// Erases exactly the `count` menu lines drawn by the last render.
///
/// Entire-line erase per row with a cursor-up between rows, then column
/// home; the cursor ends where the first menu line starts.
fn erase_choices(writer: &mut impl Write, count: usize) -> Result<()> {
    queue!(writer, MoveUp(1))?;
    for line in 0..count {
        queue!(writer, Clear(ClearType::CurrentLine))?;
        if line + 1 < count {
            queue!(writer, MoveUp(1))?;
        }
    }
    queue!(writer, MoveToColumn(0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use askopt_core::option_definitions::OptionDefinition;
    use askopt_core::pipeline::{resolve, RequiredRule};

    fn choices(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_decode_key_table() {
        assert_eq!(
            SelectorSession::decode_key(&key(KeyCode::Enter)),
            Some(SelectAction::Submit)
        );
        assert_eq!(
            SelectorSession::decode_key(&KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            )),
            Some(SelectAction::Submit)
        );
        assert_eq!(
            SelectorSession::decode_key(&key(KeyCode::Up)),
            Some(SelectAction::MoveUp)
        );
        assert_eq!(
            SelectorSession::decode_key(&key(KeyCode::Down)),
            Some(SelectAction::MoveDown)
        );
    }

    #[test]
    fn test_unrecognized_keys_are_a_no_op() {
        assert_eq!(SelectorSession::decode_key(&key(KeyCode::Esc)), None);
        assert_eq!(SelectorSession::decode_key(&key(KeyCode::Left)), None);
        assert_eq!(SelectorSession::decode_key(&key(KeyCode::Char('q'))), None);
        // A plain 'c' without the control modifier must not submit.
        assert_eq!(SelectorSession::decode_key(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_move_down_clamps_at_last_index() {
        let list = choices(&["a", "b", "c"]);
        let mut session = SelectorSession::new("pick?", &list);

        assert!(session.apply_move(SelectAction::MoveDown));
        assert!(session.apply_move(SelectAction::MoveDown));
        assert_eq!(session.selected_index(), 2);

        // Repeated Down at the last index is a no-op.
        assert!(!session.apply_move(SelectAction::MoveDown));
        assert_eq!(session.selected_index(), 2);
    }

    #[test]
    fn test_move_up_clamps_at_first_index() {
        let list = choices(&["a", "b"]);
        let mut session = SelectorSession::new("pick?", &list);

        // Repeated Up at index 0 is a no-op.
        assert!(!session.apply_move(SelectAction::MoveUp));
        assert_eq!(session.selected_index(), 0);

        session.apply_move(SelectAction::MoveDown);
        assert!(session.apply_move(SelectAction::MoveUp));
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn test_submit_does_not_move_the_highlight() {
        let list = choices(&["a", "b"]);
        let mut session = SelectorSession::new("pick?", &list);
        session.apply_move(SelectAction::MoveDown);
        assert!(!session.apply_move(SelectAction::Submit));
        assert_eq!(session.selected_index(), 1);
    }

    #[test]
    fn test_down_then_enter_resolves_second_choice() {
        let list = choices(&["a", "b"]);
        let mut session = SelectorSession::new("pick?", &list);

        let down = key(KeyCode::Down);
        session.apply_move(SelectorSession::decode_key(&down).unwrap());
        assert_eq!(
            SelectorSession::decode_key(&key(KeyCode::Enter)),
            Some(SelectAction::Submit)
        );

        let resolved = resolve(
            "letter",
            &list[session.selected_index()],
            &OptionDefinition::default(),
            RequiredRule::RejectEmpty,
        );
        assert_eq!(resolved.value, "b");
        assert_eq!(resolved.validation_msg, "");
    }

    #[test]
    fn test_ctrl_c_submits_the_current_highlight() {
        // There is deliberately no cancel path: Ctrl-C accepts, same as Enter.
        let list = choices(&["a", "b", "c"]);
        let mut session = SelectorSession::new("pick?", &list);
        session.apply_move(SelectAction::MoveDown);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            SelectorSession::decode_key(&ctrl_c),
            Some(SelectAction::Submit)
        );
        assert_eq!(list[session.selected_index()], "b");
    }

    #[test]
    fn test_render_marks_and_highlights_selected_row() {
        let list = choices(&["alpha", "beta"]);
        let mut rendered = Vec::new();
        render_choices(&mut rendered, &list, 1).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();

        assert!(rendered.contains("  alpha"));
        assert!(rendered.contains("> beta"));
        assert!(!rendered.contains("> alpha"));
    }

    #[test]
    fn test_erase_covers_exactly_the_drawn_lines() {
        let mut erased = Vec::new();
        erase_choices(&mut erased, 3).unwrap();
        let erased = String::from_utf8(erased).unwrap();

        assert_eq!(erased.matches("\x1b[2K").count(), 3);
        assert_eq!(erased.matches("\x1b[1A").count(), 3);
        assert!(erased.ends_with("\x1b[1G"));
    }
}
