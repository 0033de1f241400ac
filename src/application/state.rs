//! Application state management for the terminal calculator.
//!
//! This module contains the calculator state machine, the session state
//! around it and mode management for the terminal user interface.

use super::keypad::{BUTTON_GRID, CalculatorKey, GRID_COLS, GRID_ROWS};
use crate::domain::{
    CalculationRecord, ERROR_MARKER, EvaluationOutcome, ExpressionEvaluator, Session,
    full_expression,
};
use crate::infrastructure::{CalcConfig, ClipboardError, PersistenceError};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// What the user is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keypad input
    Normal,
    /// Help screen is displayed
    Help,
    /// Save dialog is open
    SaveAs,
    /// Load dialog is open
    LoadFile,
    /// Tape export dialog is open
    ExportTape,
}

/// Display, pending expression and carried-over result.
///
/// Transitions never mutate in place; [`CalculatorState::press`] returns the
/// next state.
///
/// # Examples
///
/// ```
/// use tcalc::application::{CalculatorKey, CalculatorState};
///
/// let state = CalculatorState::default();
/// let state = state.press(CalculatorKey::Digit(5)).state;
/// let state = state.press(CalculatorKey::from_char('+').unwrap()).state;
/// let state = state.press(CalculatorKey::Digit(3)).state;
/// let state = state.press(CalculatorKey::Equals).state;
///
/// assert_eq!(state.display, "8.00");
/// assert_eq!(state.previous_result.as_deref(), Some("8.00"));
/// assert!(state.expression.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    /// Text on the calculator display
    pub display: String,
    /// Characters entered since the last evaluation or clear
    pub expression: String,
    /// Last successful result, prefixed onto the next evaluation
    pub previous_result: Option<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            previous_result: None,
        }
    }
}

/// The state after a key press, and the calculation it produced if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: CalculatorState,
    pub record: Option<CalculationRecord>,
}

impl CalculatorState {
    /// Starts from a restored previous result with a fresh expression.
    pub fn with_previous_result(previous_result: Option<String>) -> Self {
        Self {
            display: previous_result.clone().unwrap_or_else(|| "0".to_string()),
            expression: String::new(),
            previous_result,
        }
    }

    pub fn press(&self, key: CalculatorKey) -> Transition {
        match key {
            CalculatorKey::Clear => Transition {
                state: Self::default(),
                record: None,
            },
            CalculatorKey::Equals => self.evaluate(),
            _ => Transition {
                state: self.append(key),
                record: None,
            },
        }
    }

    fn append(&self, key: CalculatorKey) -> Self {
        let mut next = self.clone();
        let label = key.label();
        if next.display == "0" || next.display == ERROR_MARKER {
            next.display = label.to_string();
        } else {
            next.display.push(label);
        }
        if let Some(ch) = key.expression_char() {
            next.expression.push(ch);
        }
        next
    }

    fn evaluate(&self) -> Transition {
        let previous = self.previous_result.as_deref();
        let outcome = ExpressionEvaluator::new().evaluate(&self.expression, previous);
        let record = CalculationRecord {
            expression: full_expression(&self.expression, previous),
            outcome: outcome.clone(),
        };

        Transition {
            state: Self {
                display: outcome.to_string(),
                expression: String::new(),
                previous_result: outcome.value().map(str::to_string),
            },
            record: Some(record),
        }
    }
}

/// Main application state containing the calculator and UI state.
///
/// # Examples
///
/// ```
/// use tcalc::application::App;
///
/// let app = App::default();
/// assert_eq!(app.calculator.display, "0");
/// assert!(app.tape.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    pub calculator: CalculatorState,
    /// Current application mode
    pub mode: AppMode,
    /// Completed calculations, oldest first
    pub tape: VecDeque<CalculationRecord>,
    /// Grid button highlighted for arrow-key navigation (row, col)
    pub focused_button: (usize, usize),
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the filename input, in characters
    pub cursor_position: usize,
    /// Session file last saved or loaded
    pub filename: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    pub config: CalcConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(CalcConfig::default())
    }
}

impl App {
    pub fn new(config: CalcConfig) -> Self {
        Self {
            calculator: CalculatorState::default(),
            mode: AppMode::Normal,
            tape: VecDeque::new(),
            focused_button: (0, 0),
            status_message: None,
            filename_input: String::new(),
            cursor_position: 0,
            filename: None,
            help_scroll: 0,
            config,
        }
    }

    /// Applies a key press to the calculator and records any evaluation.
    ///
    /// Returns the outcome when the key triggered an evaluation.
    pub fn press_key(&mut self, key: CalculatorKey) -> Option<EvaluationOutcome> {
        let Transition { state, record } = self.calculator.press(key);
        self.calculator = state;
        let record = record?;
        let outcome = record.outcome.clone();
        debug!(expression = %record.expression, result = %outcome, "evaluated");
        self.push_record(record);
        Some(outcome)
    }

    /// Presses the grid button that currently has focus.
    pub fn press_focused(&mut self) -> Option<EvaluationOutcome> {
        let (row, col) = self.focused_button;
        self.press_key(BUTTON_GRID[row][col])
    }

    pub fn focused_key(&self) -> CalculatorKey {
        let (row, col) = self.focused_button;
        BUTTON_GRID[row][col]
    }

    /// Moves the grid focus, stopping at the edges.
    pub fn move_focus(&mut self, d_row: isize, d_col: isize) {
        let (row, col) = self.focused_button;
        let row = row.saturating_add_signed(d_row).min(GRID_ROWS - 1);
        let col = col.saturating_add_signed(d_col).min(GRID_COLS - 1);
        self.focused_button = (row, col);
    }

    fn push_record(&mut self, record: CalculationRecord) {
        self.tape.push_back(record);
        while self.tape.len() > self.config.tape_limit {
            self.tape.pop_front();
        }
    }

    /// The most recent successful result still carried by the calculator.
    pub fn last_result(&self) -> Option<&str> {
        self.calculator.previous_result.as_deref()
    }

    /// Snapshot of what a saved session contains.
    pub fn session(&self) -> Session {
        Session {
            previous_result: self.calculator.previous_result.clone(),
            tape: self.tape.iter().cloned().collect(),
        }
    }

    /// Switches to save-as mode to prompt for a filename.
    pub fn start_save_as(&mut self) {
        self.start_filename_input(AppMode::SaveAs, self.default_session_file());
    }

    /// Switches to load-file mode to prompt for a filename.
    pub fn start_load_file(&mut self) {
        self.start_filename_input(AppMode::LoadFile, self.default_session_file());
    }

    /// Switches to tape export mode to prompt for a filename.
    pub fn start_tape_export(&mut self) {
        self.start_filename_input(AppMode::ExportTape, self.config.export_file.clone());
    }

    fn default_session_file(&self) -> String {
        self.filename.clone().unwrap_or_else(|| self.config.session_file.clone())
    }

    fn start_filename_input(&mut self, mode: AppMode, initial: String) {
        self.mode = mode;
        self.filename_input = initial;
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Byte offset in `filename_input` of the character at the cursor.
    pub fn cursor_byte_index(&self) -> usize {
        self.filename_input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.filename_input.len(), |(i, _)| i)
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.finish_filename_input();
    }

    fn finish_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Filename typed by the user, falling back to the default for the mode.
    pub fn entered_filename(&self) -> String {
        if !self.filename_input.trim().is_empty() {
            return self.filename_input.trim().to_string();
        }
        match self.mode {
            AppMode::ExportTape => self.config.export_file.clone(),
            _ => self.config.session_file.clone(),
        }
    }

    /// Processes the result of a save operation.
    pub fn set_save_result(&mut self, result: Result<String, PersistenceError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Saved to {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                warn!(%error, "save failed");
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }
        self.finish_filename_input();
    }

    /// Processes the result of a load operation.
    ///
    /// A loaded session replaces the tape and the carried-over result and
    /// discards any pending input.
    pub fn set_load_result(&mut self, result: Result<(Session, String), PersistenceError>) {
        match result {
            Ok((session, filename)) => {
                self.calculator = CalculatorState::with_previous_result(session.previous_result);
                self.tape = session.tape.into();
                while self.tape.len() > self.config.tape_limit {
                    self.tape.pop_front();
                }
                self.status_message = Some(format!("Loaded {}", filename));
                self.filename = Some(filename);
            }
            Err(error) => {
                warn!(%error, "load failed");
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }
        self.finish_filename_input();
    }

    /// Processes the result of a tape export.
    pub fn set_export_result(&mut self, result: Result<String, PersistenceError>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported {} calculations to {}", self.tape.len(), filename),
            Err(error) => {
                warn!(%error, "export failed");
                format!("Export failed: {}", error)
            }
        });
        self.finish_filename_input();
    }

    /// Processes the result of copying a value to the clipboard.
    pub fn set_copy_result(&mut self, value: &str, result: Result<(), ClipboardError>) {
        self.status_message = Some(match result {
            Ok(()) => format!("Copied {}", value),
            Err(error) => {
                warn!(%error, "copy failed");
                format!("Copy failed: {}", error)
            }
        });
    }
}
