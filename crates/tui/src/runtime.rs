//! Runtime: terminal lifecycle and the event loop.
//!
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel, so the async loop never blocks on the
//!   terminal.
//! - The loop waits on input, the session's next timer deadline and Ctrl+C,
//!   and redraws after each wake-up. With no timers pending it sleeps until
//!   input arrives.
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use sidenav_sidebar::PageSession;
use sidenav_sidebar::runtime::wait_for_deadline;
use tokio::{signal, sync::mpsc};

use crate::app::App;
use crate::input::TuiOptions;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if let Err(e) = sender.blocking_send(event) {
                        tracing::debug!("Input channel closed: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Term, app: &mut App) -> Result<()> {
    terminal.draw(|frame| app.render(frame))?;
    Ok(())
}

fn is_quit(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

async fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    render(terminal, app)?;

    loop {
        let deadline = app.next_deadline();
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if is_quit(&event) {
                    break;
                }
                app.handle_input(event);
            }
            _ = wait_for_deadline(deadline) => {
                app.run_due_timers();
            }
            _ = signal::ctrl_c() => { break; }
        }
        render(terminal, app)?;
    }
    Ok(())
}

/// Entry point for the TUI runtime: sets up the terminal, starts the page,
/// runs the event loop and always restores the terminal on the way out.
pub async fn run_app(session: PageSession, options: TuiOptions) -> Result<()> {
    let (columns, rows) = crossterm::terminal::size()?;
    let mut app = App::new(session, options);
    app.start(columns, rows);

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app).await;
    app.shutdown();
    cleanup_terminal(&mut terminal)?;
    outcome
}
