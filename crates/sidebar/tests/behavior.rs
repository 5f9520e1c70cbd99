use std::path::{Path, PathBuf};
use std::time::Duration;

use sidenav_page::{Document, ElementId, FixtureFormat, Key, PageEvent, Selector, Viewport, parse_fixture};
use sidenav_sidebar::runtime::settle;
use sidenav_sidebar::{PageSession, SessionFixture, SidebarConfig, SidebarController, SidebarError, attr, class, ids};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/page.yaml")
}

/// Loads the fixture page at `width` and fires `DomContentLoaded`.
fn session_at(width: u32) -> PageSession {
    let mut session = PageSession::load(&fixture_path()).unwrap();
    session.document_mut().set_viewport(Viewport::new(width, 800));
    session.dispatch(PageEvent::DomContentLoaded);
    session
}

fn sidebar(session: &PageSession) -> &SidebarController {
    session.sidebar().expect("sidebar initialized")
}

fn by_id(session: &PageSession, id: &str) -> ElementId {
    session.document().get_element_by_id(id).unwrap()
}

fn link(session: &PageSession, page: &str) -> ElementId {
    let selector = Selector::Attribute {
        name: attr::DATA_PAGE.into(),
        value: Some(page.into()),
    };
    session.document().query_selector(&selector).unwrap()
}

fn slide(session: &PageSession, name: &str) -> ElementId {
    let selector = Selector::Attribute {
        name: attr::DATA_SLIDE.into(),
        value: Some(name.into()),
    };
    session.document().query_selector(&selector).unwrap()
}

/// Every element's tag, classes and attributes in document order.
fn fingerprint(document: &Document) -> Vec<String> {
    document
        .document_order()
        .into_iter()
        .filter_map(|id| document.element(id))
        .map(|element| {
            let classes: Vec<_> = element.classes().collect();
            let attributes: Vec<_> = element.attributes().collect();
            format!("{} {classes:?} {attributes:?}", element.tag())
        })
        .collect()
}

fn is_open(session: &PageSession) -> bool {
    session.state().unwrap().is_open
}

#[tokio::test(start_paused = true)]
async fn viewport_tiers_follow_breakpoints() {
    for (width, mobile, tablet) in [
        (375, true, false),
        (768, true, false),
        (769, false, true),
        (1024, false, true),
        (1025, false, false),
    ] {
        let session = session_at(width);
        let state = session.state().unwrap();
        assert_eq!(state.viewport.is_mobile, mobile, "mobile at {width}");
        assert_eq!(state.viewport.is_tablet, tablet, "tablet at {width}");
    }
}

#[tokio::test(start_paused = true)]
async fn double_open_opens_once() {
    let mut session = session_at(1280);
    session.with_sidebar(|sidebar, document| {
        sidebar.open(document);
        sidebar.open(document);
    });

    let state = session.state().unwrap();
    assert!(state.is_open);
    assert!(state.is_animating);
    // loading fade, open animation, deferred focus
    assert_eq!(sidebar(&session).pending_timers(), 3);

    settle(&mut session, Duration::from_millis(300)).await;
    let state = session.state().unwrap();
    assert!(state.is_open);
    assert!(!state.is_animating);
}

#[tokio::test(start_paused = true)]
async fn closing_a_closed_sidebar_changes_nothing() {
    let mut session = session_at(1280);
    let before = fingerprint(session.document());
    let timers = sidebar(&session).pending_timers();

    session.with_sidebar(|sidebar, document| sidebar.close(document));

    assert_eq!(fingerprint(session.document()), before);
    assert_eq!(sidebar(&session).pending_timers(), timers);
    assert!(!session.state().unwrap().is_animating);
}

#[tokio::test(start_paused = true)]
async fn toggle_click_opens_and_updates_accessibility() {
    let mut session = session_at(1280);
    let toggle = by_id(&session, ids::TOGGLE);
    let panel = by_id(&session, ids::SIDEBAR);

    let outcome = session.click(toggle);
    assert!(outcome.default_prevented);
    assert!(is_open(&session));

    let document = session.document();
    assert!(document.has_class(panel, class::ACTIVE));
    assert!(document.has_class(document.body(), class::SIDEBAR_ACTIVE));
    assert_eq!(document.attribute(toggle, attr::ARIA_EXPANDED), Some("true"));
    assert_eq!(document.attribute(panel, attr::ARIA_HIDDEN), Some("false"));
    assert_eq!(document.attribute(link(&session, "home"), attr::TABINDEX), Some("0"));
    assert_eq!(document.attribute(link(&session, "about"), attr::TABINDEX), Some("-1"));

    settle(&mut session, Duration::from_millis(100)).await;
    assert_eq!(session.document().active_element(), Some(link(&session, "home")));
}

#[tokio::test(start_paused = true)]
async fn edge_swipe_opens_on_mobile() {
    let mut session = session_at(375);
    session.dispatch(PageEvent::TouchStart { screen_x: 10.0 });
    settle(&mut session, Duration::from_millis(100)).await;
    session.dispatch(PageEvent::TouchEnd { screen_x: 150.0 });
    assert!(is_open(&session));

    let mut session = session_at(375);
    session.dispatch(PageEvent::TouchStart { screen_x: 300.0 });
    settle(&mut session, Duration::from_millis(100)).await;
    session.dispatch(PageEvent::TouchEnd { screen_x: 440.0 });
    assert!(!is_open(&session));
}

#[tokio::test(start_paused = true)]
async fn slow_or_short_swipes_are_ignored() {
    let mut session = session_at(375);
    session.dispatch(PageEvent::TouchStart { screen_x: 10.0 });
    settle(&mut session, Duration::from_millis(300)).await;
    session.dispatch(PageEvent::TouchEnd { screen_x: 150.0 });
    assert!(!is_open(&session));

    session.dispatch(PageEvent::TouchStart { screen_x: 10.0 });
    session.dispatch(PageEvent::TouchEnd { screen_x: 90.0 });
    assert!(!is_open(&session));
}

#[tokio::test(start_paused = true)]
async fn leftward_swipe_closes_open_sidebar() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;

    session.dispatch(PageEvent::TouchStart { screen_x: 250.0 });
    settle(&mut session, Duration::from_millis(50)).await;
    session.dispatch(PageEvent::TouchEnd { screen_x: 100.0 });
    assert!(!is_open(&session));
}

#[tokio::test(start_paused = true)]
async fn slide_link_switches_slide_in_page() {
    let mut session = session_at(1280);
    let about = link(&session, "about");

    let outcome = session.click(about);
    assert!(outcome.default_prevented);

    let document = session.document();
    assert!(document.has_class(slide(&session, "about"), class::ACTIVE_SLIDE));
    assert!(!document.has_class(slide(&session, "home"), class::ACTIVE_SLIDE));
    assert!(!document.has_class(slide(&session, "contact"), class::ACTIVE_SLIDE));
    assert_eq!(document.last_scrolled_into_view(), Some(slide(&session, "about")));
    assert!(document.has_class(about, class::ACTIVE));
    assert_eq!(document.attribute(about, attr::ARIA_CURRENT), Some("page"));
    assert_eq!(document.location().hash(), "");
    assert_eq!(session.state().unwrap().active_slide, "about");
}

#[tokio::test(start_paused = true)]
async fn plain_nav_link_follows_href() {
    let mut session = session_at(1280);
    let blog = session
        .document()
        .query_selector_all(&Selector::Class(class::NAV_LINK.into()))
        .into_iter()
        .find(|id| session.document().attribute(*id, attr::HREF) == Some("/blog"))
        .unwrap();

    let outcome = session.click(blog);
    assert!(!outcome.default_prevented);
    assert_eq!(session.document().location().pathname(), "/blog");
    assert!(session.document().has_class(blog, class::ACTIVE));
    assert_eq!(session.state().unwrap().active_slide, "home");
}

#[tokio::test(start_paused = true)]
async fn mobile_navigation_closes_after_delay() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;

    session.click(link(&session, "contact"));
    assert_eq!(session.state().unwrap().active_slide, "contact");
    settle(&mut session, Duration::from_millis(149)).await;
    assert!(is_open(&session));

    settle(&mut session, Duration::from_millis(1)).await;
    assert!(!is_open(&session));
    settle(&mut session, Duration::from_millis(300)).await;
    assert_eq!(session.document().active_element(), Some(by_id(&session, ids::TOGGLE)));
}

#[tokio::test(start_paused = true)]
async fn desktop_navigation_keeps_sidebar_open() {
    let mut session = session_at(1280);
    session.click(by_id(&session, ids::TOGGLE));
    session.click(link(&session, "about"));
    settle(&mut session, Duration::from_millis(1000)).await;
    assert!(is_open(&session));
}

#[tokio::test(start_paused = true)]
async fn escape_closes_only_when_open() {
    let mut session = session_at(1280);
    let before = fingerprint(session.document());
    let outcome = session.key_down(Key::Escape, false);
    assert!(!outcome.default_prevented);
    assert_eq!(fingerprint(session.document()), before);

    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;
    let outcome = session.key_down(Key::Escape, false);
    assert!(outcome.default_prevented);
    assert!(!is_open(&session));

    settle(&mut session, Duration::from_millis(300)).await;
    assert_eq!(session.document().active_element(), Some(by_id(&session, ids::TOGGLE)));
}

#[tokio::test(start_paused = true)]
async fn overlay_click_closes() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    let overlay = by_id(&session, ids::OVERLAY);
    assert!(session.document().has_class(overlay, class::ACTIVE));

    session.click(overlay);
    assert!(!is_open(&session));
    assert!(!session.document().has_class(overlay, class::ACTIVE));
    assert!(!session.document().has_class(session.document().body(), class::NO_SCROLL));
}

#[tokio::test(start_paused = true)]
async fn tab_wraps_inside_open_mobile_sidebar() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;
    let trap = sidebar(&session).focus_trap().unwrap();
    assert_eq!(session.document().active_element(), Some(trap.first()));

    let outcome = session.key_down(Key::Tab, true);
    assert!(outcome.default_prevented);
    assert_eq!(session.document().active_element(), Some(trap.last()));

    let outcome = session.key_down(Key::Tab, false);
    assert!(outcome.default_prevented);
    assert_eq!(session.document().active_element(), Some(trap.first()));
}

#[tokio::test(start_paused = true)]
async fn tab_is_not_trapped_on_desktop() {
    let mut session = session_at(1280);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;
    let trap = sidebar(&session).focus_trap().unwrap();

    let outcome = session.key_down(Key::Tab, true);
    assert!(!outcome.default_prevented);
    assert_ne!(session.document().active_element(), Some(trap.last()));
}

#[tokio::test(start_paused = true)]
async fn keyboard_activation_of_nav_link() {
    let mut session = session_at(1280);
    let about = link(&session, "about");

    // focusing into a closed sidebar opens it
    session.focus(about);
    assert!(is_open(&session));

    let outcome = session.key_down(Key::Enter, false);
    assert!(outcome.default_prevented);
    assert_eq!(session.state().unwrap().active_slide, "about");

    session.focus(link(&session, "contact"));
    session.key_down(Key::Space, false);
    assert_eq!(session.state().unwrap().active_slide, "contact");
    assert_eq!(session.document().location().hash(), "");
}

#[tokio::test(start_paused = true)]
async fn resize_is_debounced_and_switches_presentation() {
    let mut session = session_at(1280);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(300)).await;
    let overlay = by_id(&session, ids::OVERLAY);
    let main = by_id(&session, ids::MAIN_CONTENT);
    assert!(session.document().has_class(main, class::SIDEBAR_OPEN));

    session.resize(375, 800);
    settle(&mut session, Duration::from_millis(200)).await;
    session.resize(380, 800);
    settle(&mut session, Duration::from_millis(249)).await;
    assert!(!session.document().has_class(overlay, class::ACTIVE));

    settle(&mut session, Duration::from_millis(1)).await;
    let document = session.document();
    assert!(document.has_class(overlay, class::ACTIVE));
    assert!(document.has_class(document.body(), class::NO_SCROLL));
    assert!(document.has_class(document.body(), class::WAS_MOBILE));
    assert!(!document.has_class(main, class::SIDEBAR_OPEN));
    assert!(is_open(&session));
}

#[tokio::test(start_paused = true)]
async fn sidebar_closed_on_mobile_stays_closed_on_desktop() {
    let mut session = session_at(375);
    assert!(session.document().has_class(session.document().body(), class::WAS_MOBILE));

    session.resize(1280, 800);
    settle(&mut session, Duration::from_millis(250)).await;
    assert!(!is_open(&session));
    assert!(!session.document().has_class(session.document().body(), class::WAS_MOBILE));
}

#[tokio::test(start_paused = true)]
async fn mobile_start_closes_silently() {
    let session = session_at(375);
    let state = session.state().unwrap();
    assert!(!state.is_open);
    assert!(!state.is_animating);

    let document = session.document();
    assert_eq!(document.attribute(by_id(&session, ids::TOGGLE), attr::ARIA_EXPANDED), Some("false"));
    assert_eq!(document.attribute(by_id(&session, ids::SIDEBAR), attr::ARIA_HIDDEN), Some("true"));
    assert_eq!(document.attribute(by_id(&session, ids::OVERLAY), attr::ARIA_HIDDEN), Some("true"));
    for nav_link in &sidebar(&session).elements().nav_links {
        assert_eq!(document.attribute(*nav_link, attr::TABINDEX), Some("-1"));
    }
}

#[tokio::test(start_paused = true)]
async fn loading_screen_fades_then_disappears() {
    let mut session = session_at(1280);
    let screen = by_id(&session, ids::LOADING_SCREEN);

    settle(&mut session, Duration::from_millis(1000)).await;
    assert!(session.document().has_class(screen, class::HIDDEN));
    assert!(session.document().is_connected(screen));

    settle(&mut session, Duration::from_millis(500)).await;
    assert!(!session.document().is_connected(screen));
    assert_eq!(session.document().get_element_by_id(ids::LOADING_SCREEN), None);
}

#[tokio::test(start_paused = true)]
async fn destroy_releases_listeners_and_timers() {
    let mut session = session_at(1280);
    let bound = session.document().listener_count();
    assert_eq!(bound, 7 + 2 * sidebar(&session).elements().nav_links.len());

    session.click(by_id(&session, ids::TOGGLE));
    session.with_sidebar(|sidebar, document| sidebar.destroy(document));
    assert_eq!(session.document().listener_count(), 0);
    assert_eq!(sidebar(&session).pending_timers(), 0);
    assert_eq!(session.next_deadline(), None);

    // nothing reacts any more
    let before = fingerprint(session.document());
    session.click(by_id(&session, ids::TOGGLE));
    session.key_down(Key::Escape, false);
    settle(&mut session, Duration::from_millis(1000)).await;
    assert_eq!(fingerprint(session.document()), before);

    session.with_sidebar(|sidebar, document| sidebar.init(document)).unwrap().unwrap();
    assert_eq!(session.document().listener_count(), bound);
}

#[tokio::test(start_paused = true)]
async fn close_cancels_stale_open_timers_instead_of_letting_them_fire() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    settle(&mut session, Duration::from_millis(50)).await;

    session.key_down(Key::Escape, false);
    assert!(!is_open(&session));

    // Transition timers are cancelled, not fire-and-forget: the open's
    // deferred focus (due at 100ms) must not pull focus back into a closed
    // sidebar.
    settle(&mut session, Duration::from_millis(60)).await;
    assert_eq!(session.document().active_element(), None);

    settle(&mut session, Duration::from_millis(300)).await;
    assert_eq!(session.document().active_element(), Some(by_id(&session, ids::TOGGLE)));
    assert!(!session.state().unwrap().is_animating);
}

#[tokio::test(start_paused = true)]
async fn missing_required_element_is_named() {
    let mut session = PageSession::load(&fixture_path()).unwrap();
    let main = by_id(&session, ids::MAIN_CONTENT);
    session.document_mut().remove(main);

    let error = SidebarController::new(session.document_mut(), SidebarConfig::default()).unwrap_err();
    assert!(matches!(error, SidebarError::MissingElement("mainContent")));
    assert_eq!(error.to_string(), "Required element 'mainContent' not found");
    assert_eq!(session.document().listener_count(), 0);

    session.dispatch(PageEvent::DomContentLoaded);
    assert!(session.sidebar().is_none());
}

#[tokio::test(start_paused = true)]
async fn fixture_sidebar_section_overrides_breakpoints() {
    let yaml = std::fs::read_to_string(fixture_path()).unwrap() + "sidebar:\n  breakpoints: { mobile: 640 }\n";
    let fixture: SessionFixture = parse_fixture(&yaml, FixtureFormat::Yaml).unwrap();
    assert_eq!(fixture.sidebar.breakpoints.mobile, 640);
    assert_eq!(fixture.sidebar.breakpoints.tablet, 1024);

    let mut session = PageSession::from_fixture(&fixture).unwrap();
    session.document_mut().set_viewport(Viewport::new(700, 800));
    session.dispatch(PageEvent::DomContentLoaded);
    let state = session.state().unwrap();
    assert!(!state.viewport.is_mobile);
    assert!(state.viewport.is_tablet);
}

#[tokio::test(start_paused = true)]
async fn invalid_config_is_rejected() {
    let mut session = PageSession::load(&fixture_path()).unwrap();
    let mut config = SidebarConfig::default();
    config.breakpoints.mobile = 1024;

    let error = SidebarController::new(session.document_mut(), config).unwrap_err();
    assert!(matches!(error, SidebarError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn state_serializes_for_hosts() {
    let mut session = session_at(375);
    session.click(by_id(&session, ids::TOGGLE));
    let value = serde_json::to_value(session.state().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "isOpen": true,
            "isAnimating": true,
            "activeSlide": "home",
            "viewport": { "isMobile": true, "isTablet": false, "width": 375, "height": 800 }
        })
    );
}
