//! TCALC - Terminal Calculator
//!
//! A keypad calculator for the terminal. Each calculation is a single binary
//! operation; a successful result carries over into the next one.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::info;

use tcalc::application::{App, AppMode};
use tcalc::domain::ExpressionEvaluator;
use tcalc::infrastructure::{CalcConfig, logging};
use tcalc::presentation::{InputHandler, render_ui};

#[derive(Parser, Debug)]
#[command(name = "tcalc", version, about = "A keypad calculator for the terminal")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one expression and print the result
    Eval {
        /// Expression such as "5+3" or "+2" with --previous.
        /// Operands are plain decimals; exponent forms like 1e3 are rejected
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Previous result to prefix onto the expression
        #[arg(long, value_name = "RESULT")]
        previous: Option<String>,
    },
}

/// Runs one `eval` or the interactive calculator.
///
/// `eval` exits with a failure code when the expression evaluates to Error.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the config file cannot
/// be read or parsed, or the terminal cannot be set up.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Eval { expression, previous }) => {
            logging::init_stderr()?;
            let outcome = ExpressionEvaluator::new().evaluate(&expression, previous.as_deref());
            println!("{outcome}");
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let config = CalcConfig::load(cli.config.as_deref()).context("failed to load config")?;
            if let Some(log_file) = &config.log_file {
                logging::init_file(log_file)?;
            }
            run_interactive(config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sets up the terminal, runs the event loop and restores the terminal
/// even when the loop fails.
///
/// # Arguments
///
/// * `config` - Settings for the session (tape limit, default filenames, clipboard)
///
/// # Errors
///
/// Returns an error if raw mode or the alternate screen cannot be entered or
/// left, or if the event loop fails.
fn run_interactive(config: CalcConfig) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("starting interactive session");
    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal error")
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode or Ctrl+C.
///
/// # Arguments
///
/// * `terminal` - Terminal to draw on
/// * `app` - Application state updated by each key press
///
/// # Errors
///
/// Returns an error if drawing or reading a terminal event fails.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            }
        }
    }
}
