use crate::application::{App, AppMode, BUTTON_GRID, CalculatorKey};
use crate::domain::ERROR_MARKER;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(32)])
        .split(chunks[1]);

    let calculator = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(body[0]);

    render_display(f, app, calculator[0]);
    render_keypad(f, app, calculator[1]);
    render_tape(f, app, body[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let carried = app.last_result().unwrap_or("none");
    let header = Paragraph::new(format!("tcalc - Terminal Calculator | Carried: {}", carried))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_display(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.calculator.display == ERROR_MARKER {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(app.calculator.display.clone()).style(style),
        Line::from(format!("expr: {}", app.calculator.expression))
            .style(Style::default().fg(Color::DarkGray)),
    ];
    let display = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Display"));
    f.render_widget(display, area);
}

fn render_keypad(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Keypad");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, BUTTON_GRID.len() as u32); BUTTON_GRID.len()])
        .split(inner);

    for (row_index, (keys, row_area)) in BUTTON_GRID.iter().zip(rows.iter()).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, keys.len() as u32); BUTTON_GRID[0].len()])
            .split(*row_area);

        for (col_index, (key, cell)) in keys.iter().zip(cells.iter()).enumerate() {
            let focused = app.focused_button == (row_index, col_index);
            let button = Paragraph::new(key.label().to_string())
                .alignment(Alignment::Center)
                .style(button_style(*key, focused))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, *cell);
        }
    }
}

fn button_style(key: CalculatorKey, focused: bool) -> Style {
    if focused {
        return Style::default().bg(Color::LightBlue).fg(Color::Black);
    }
    match key {
        CalculatorKey::Digit(_) | CalculatorKey::Point => Style::default().fg(Color::White),
        CalculatorKey::Operator(_) => Style::default().fg(Color::Yellow),
        CalculatorKey::Clear => Style::default().fg(Color::Red),
        CalculatorKey::Equals => Style::default().fg(Color::Green),
    }
}

fn render_tape(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.tape.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .tape
        .iter()
        .skip(skip)
        .map(|record| {
            let style = if record.outcome.is_success() {
                Style::default()
            } else {
                Style::default().fg(Color::Red)
            };
            ListItem::new(format!("{} = {}", record.expression, record.outcome)).style(style)
        })
        .collect();

    let tape = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Tape ({})", app.tape.len())),
    );
    f.render_widget(tape, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                let filename = app.filename.as_deref().unwrap_or("unsaved");
                format!("Session: {} | Enter/=: evaluate | c/Esc: clear | y: copy | Ctrl+S: save | Ctrl+O: load | Ctrl+E: export | F1/?: help | q: quit", filename)
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::SaveAs => format!("Save session as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::LoadFile => format!("Load session: {} (Enter to load, Esc to cancel)", app.filename_input),
        AppMode::ExportTape => format!("Export tape as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::SaveAs | AppMode::LoadFile => Style::default().fg(Color::Yellow),
            AppMode::ExportTape => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tcalc Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"TCALC KEYPAD CALCULATOR

=== HOW IT WORKS ===
• Each calculation is one number, one operator, one number (5+3)
• Results always show two decimal places (8.00)
• After =, the result is carried: type +2 then = to get 10.00
• Typing a digit right after a result extends that number (8.002)
• Operands must be between -10000 and 10000
• Dividing by zero, a missing operand or a second operator shows Error
• After Error nothing is carried; start a new calculation
• A number cannot start with -, so negative results cannot be chained

=== OPERATORS ===
+       Addition                    5+3 → 8.00
-       Subtraction                 3-5 → -2.00
* or x  Multiplication              4x2.5 → 10.00
/       Division                    10/4 → 2.50

=== KEYS ===
0-9 .           Enter digits and decimal point
Enter or =      Evaluate
c, Esc, Delete  Clear display, expression and carried result
Arrow keys      Move focus on the keypad
Space           Press the focused keypad button
y               Copy the carried result to the clipboard
Ctrl+S          Save session (carried result and tape) as JSON
Ctrl+O          Load a saved session
Ctrl+E          Export the tape as CSV
F1 or ?         Show this help
q or Ctrl+C     Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_display_and_tape() {
        let mut app = App::default();
        for ch in "5+3=".chars() {
            app.press_key(CalculatorKey::from_char(ch).unwrap());
        }
        let text = rendered_text(&app);
        assert!(text.contains("Keypad"));
        assert!(text.contains("Tape (1)"));
        assert!(text.contains("5+3 = 8.00"));
        assert!(text.contains("Carried: 8.00"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = App::default();
        app.mode = AppMode::Help;
        let text = rendered_text(&app);
        assert!(text.contains("tcalc Help"));
    }
}
