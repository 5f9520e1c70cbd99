//! Draws the page and records where each clickable element landed.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use sidenav_page::{Document, ElementId, Selector};
use sidenav_sidebar::{PageSession, SidebarController, class, ids};

use crate::theme;

const SIDEBAR_WIDTH: u16 = 26;

/// Screen areas of clickable elements from the last frame. Later entries
/// were drawn on top of earlier ones.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    areas: Vec<(Rect, ElementId)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn push(&mut self, area: Rect, element: ElementId) {
        self.areas.push((area, element));
    }

    /// Topmost element drawn at the given cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        self.areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position::new(column, row)))
            .map(|(_, element)| *element)
    }

    pub fn area_of(&self, element: ElementId) -> Option<Rect> {
        self.areas.iter().rev().find(|(_, id)| *id == element).map(|(area, _)| *area)
    }
}

/// Text shown for an element: its text content, else its id, else its tag.
fn label(document: &Document, id: ElementId) -> String {
    document
        .element(id)
        .map(|element| {
            if !element.text().is_empty() {
                element.text().to_string()
            } else {
                element.id().unwrap_or(element.tag()).to_string()
            }
        })
        .unwrap_or_default()
}

pub fn render(frame: &mut Frame, session: &PageSession, hits: &mut HitMap) {
    hits.clear();
    let area = frame.area();
    frame.render_widget(Block::default().style(theme::text()), area);

    let [header, body, footer] = Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let document = session.document();

    let Some(sidebar) = session.sidebar() else {
        render_slide(frame, document, body, false);
        let notice = Paragraph::new("Sidebar unavailable: see log for details").style(theme::warning());
        frame.render_widget(notice, footer);
        return;
    };

    render_header(frame, document, sidebar, header, hits);

    let panel_open = document.has_class(sidebar.elements().sidebar, class::ACTIVE);
    let pushes_content = document.has_class(sidebar.elements().main_content, class::SIDEBAR_OPEN);
    let overlay_active = document.has_class(sidebar.elements().overlay, class::ACTIVE);

    if panel_open && pushes_content {
        let [panel, main] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
        render_slide(frame, document, main, false);
        render_panel(frame, document, sidebar, panel, hits);
    } else {
        render_slide(frame, document, body, overlay_active);
        if overlay_active {
            hits.push(body, sidebar.elements().overlay);
        }
        if panel_open {
            let [panel, _] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
            frame.render_widget(Clear, panel);
            render_panel(frame, document, sidebar, panel, hits);
        }
    }

    render_loading_screen(frame, document, area);
    render_status(frame, session, footer);
}

fn render_header(frame: &mut Frame, document: &Document, sidebar: &SidebarController, area: Rect, hits: &mut HitMap) {
    let toggle = sidebar.elements().toggle;
    let focused = document.active_element() == Some(toggle);
    let block = Block::default().borders(Borders::BOTTOM).border_style(theme::border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let caption = format!(" ☰ {} ", label(document, toggle));
    let width = u16::try_from(caption.chars().count()).unwrap_or(u16::MAX).min(inner.width);
    let button = Rect { width, height: 1, ..inner };
    frame.render_widget(Paragraph::new(caption).style(theme::item(sidebar.is_open(), focused)), button);
    hits.push(button, toggle);
}

fn render_panel(frame: &mut Frame, document: &Document, sidebar: &SidebarController, area: Rect, hits: &mut HitMap) {
    let panel_focused = document
        .active_element()
        .is_some_and(|active| document.contains(sidebar.elements().sidebar, active));
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(theme::border(panel_focused))
        .style(theme::text());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hits.push(area, sidebar.elements().sidebar);

    let links = &sidebar.elements().nav_links;
    let rows = Layout::vertical(vec![Constraint::Length(1); links.len()]).split(inner);
    for (link, row) in links.iter().zip(rows.iter()) {
        let active = document.has_class(*link, class::ACTIVE);
        let focused = document.active_element() == Some(*link);
        let marker = if active { "▸ " } else { "  " };
        let line = Line::from(vec![Span::raw(marker), Span::raw(label(document, *link))]);
        frame.render_widget(Paragraph::new(line).style(theme::item(active, focused)), *row);
        hits.push(*row, *link);
    }
}

fn render_slide(frame: &mut Frame, document: &Document, area: Rect, dimmed: bool) {
    let slide = document.query_selector(&Selector::Class(class::ACTIVE_SLIDE.to_string()));
    let title = slide
        .and_then(|slide| document.attribute(slide, "data-slide"))
        .map(|name| format!(" {name} "))
        .unwrap_or_default();
    let body = slide.map(|slide| label(document, slide)).unwrap_or_default();

    let style = if dimmed { theme::dimmed() } else { theme::text() };
    let block = Block::default().title(title).borders(Borders::ALL).border_style(theme::border(false));
    frame.render_widget(Paragraph::new(body).block(block).style(style).wrap(Wrap { trim: true }), area);
}

fn render_loading_screen(frame: &mut Frame, document: &Document, area: Rect) {
    let Some(screen) = document.get_element_by_id(ids::LOADING_SCREEN) else {
        return;
    };
    let [row] = Layout::vertical([Constraint::Length(3)]).flex(Flex::Center).areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(30)]).flex(Flex::Center).areas(row);
    let style = if document.has_class(screen, class::HIDDEN) { theme::muted() } else { theme::text() };

    frame.render_widget(Clear, popup);
    let block = Block::default().borders(Borders::ALL).border_style(theme::border(true));
    frame.render_widget(Paragraph::new(label(document, screen)).centered().block(block).style(style), popup);
}

fn render_status(frame: &mut Frame, session: &PageSession, area: Rect) {
    let Some(state) = session.state() else {
        return;
    };
    let tier = if state.viewport.is_mobile {
        "mobile"
    } else if state.viewport.is_tablet {
        "tablet"
    } else {
        "desktop"
    };
    let mut flags = vec![if state.is_open { "open" } else { "closed" }];
    if state.is_animating {
        flags.push("animating");
    }
    let status = format!(
        " {} | slide: {} | {}x{} {} | {}",
        flags.join(", "),
        state.active_slide,
        state.viewport.width,
        state.viewport.height,
        tier,
        session.document().location().as_str(),
    );
    let line = Line::from(vec![Span::styled(status, theme::muted()), Span::styled("  Ctrl+C quit", theme::muted())]);
    frame.render_widget(Paragraph::new(line), area);
}
