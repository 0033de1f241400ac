use crate::application::{App, AppMode, CalculatorKey};
use crate::domain::EvaluationOutcome;
use crate::infrastructure::{FileRepository, copy_to_clipboard};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::SaveAs | AppMode::LoadFile | AppMode::ExportTape => {
                Self::handle_filename_input_mode(app, key)
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => app.start_save_as(),
                KeyCode::Char('o') => app.start_load_file(),
                KeyCode::Char('e') => app.start_tape_export(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up => app.move_focus(-1, 0),
            KeyCode::Down => app.move_focus(1, 0),
            KeyCode::Left => app.move_focus(0, -1),
            KeyCode::Right => app.move_focus(0, 1),
            KeyCode::Char(' ') => {
                let outcome = app.press_focused();
                Self::after_press(app, outcome);
            }
            KeyCode::Enter => {
                let outcome = app.press_key(CalculatorKey::Equals);
                Self::after_press(app, outcome);
            }
            KeyCode::Esc | KeyCode::Delete => {
                app.press_key(CalculatorKey::Clear);
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('y') => Self::copy_last_result(app),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            KeyCode::Char(ch) => {
                if let Some(calc_key) = CalculatorKey::from_char(ch) {
                    let outcome = app.press_key(calc_key);
                    Self::after_press(app, outcome);
                }
            }
            _ => {}
        }
    }

    fn after_press(app: &mut App, outcome: Option<EvaluationOutcome>) {
        if let Some(EvaluationOutcome::Success(value)) = outcome
            && app.config.copy_on_evaluate
        {
            let result = copy_to_clipboard(&value);
            app.set_copy_result(&value, result);
        }
    }

    fn copy_last_result(app: &mut App) {
        match app.last_result().map(str::to_string) {
            Some(value) => {
                let result = copy_to_clipboard(&value);
                app.set_copy_result(&value, result);
            }
            None => app.status_message = Some("Nothing to copy".to_string()),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.entered_filename();
                match app.mode {
                    AppMode::SaveAs => {
                        let result = FileRepository::save_session(&app.session(), &filename);
                        app.set_save_result(result);
                    }
                    AppMode::LoadFile => {
                        let result = FileRepository::load_session(&filename);
                        app.set_load_result(result);
                    }
                    AppMode::ExportTape => {
                        let tape: Vec<_> = app.tape.iter().cloned().collect();
                        let result = FileRepository::export_tape_csv(&tape, &filename);
                        app.set_export_result(result);
                    }
                    AppMode::Normal | AppMode::Help => {}
                }
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                    let index = app.cursor_byte_index();
                    app.filename_input.remove(index);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.chars().count() {
                    let index = app.cursor_byte_index();
                    app.filename_input.remove(index);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.chars().count();
            }
            KeyCode::Char(c) => {
                let index = app.cursor_byte_index();
                app.filename_input.insert(index, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}
