use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use sidenav_page::PageEvent;
use sidenav_sidebar::PageSession;
use tokio::time::Instant;
use tracing::debug;

use crate::input::{TuiOptions, map_key};
use crate::view::{self, HitMap};

/// Terminal host state: the page session plus what the last frame drew.
#[derive(Debug)]
pub struct App {
    session: PageSession,
    options: TuiOptions,
    hits: HitMap,
    /// Cell where the left button went down.
    press: Option<(u16, u16)>,
}

impl App {
    pub fn new(session: PageSession, options: TuiOptions) -> Self {
        Self {
            session,
            options,
            hits: HitMap::default(),
            press: None,
        }
    }

    /// Sizes the viewport to the terminal, then fires the page lifecycle
    /// events.
    pub fn start(&mut self, columns: u16, rows: u16) {
        let viewport = self.options.viewport(columns, rows);
        self.session.document_mut().set_viewport(viewport);
        self.session.dispatch(PageEvent::DomContentLoaded);
        self.session.dispatch(PageEvent::Load);
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let (key, shift) = map_key(key);
                self.session.key_down(key, shift);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                let viewport = self.options.viewport(columns, rows);
                self.session.resize(viewport.width, viewport.height);
            }
            _ => {}
        }
    }

    /// A press and release on the same cell is a tap and also clicks the
    /// element drawn there; anything else is only a touch gesture.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let screen_x = self.options.screen_x(mouse.column);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some((mouse.column, mouse.row));
                self.session.dispatch(PageEvent::TouchStart { screen_x });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.dispatch(PageEvent::TouchEnd { screen_x });
                if self.press.take() == Some((mouse.column, mouse.row))
                    && let Some(target) = self.hits.hit_test(mouse.column, mouse.row)
                {
                    debug!(column = mouse.column, row = mouse.row, "tap");
                    self.session.click(target);
                }
            }
            _ => {}
        }
    }

    pub fn run_due_timers(&mut self) -> usize {
        self.session.run_due_timers()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        view::render(frame, &self.session, &mut self.hits);
    }

    /// Releases the sidebar before the terminal goes away.
    pub fn shutdown(&mut self) {
        self.session.teardown();
    }
}
