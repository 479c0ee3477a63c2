//! Render Tests
//!
//! Drive the terminal surface through key, mouse and resize events against
//! a detached signal source, then inspect the composited frame.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;

use samvaad_tui::signals::{CellMetrics, TerminalSignals};
use samvaad_tui::App;
use shell_core::{CarouselConfig, IndexPolicy, MountMode, RenderMode, ShellConfig, SiteContent};

fn config() -> ShellConfig {
    ShellConfig {
        carousel: CarouselConfig {
            index_policy: IndexPolicy::Strict,
            ..CarouselConfig::default()
        },
        ..ShellConfig::default()
    }
}

fn mounted(cols: Option<u16>, size: (u16, u16), now: Instant) -> App {
    let signals = TerminalSignals::detached(cols, CellMetrics::default());
    let mut app = App::new(config(), SiteContent::default(), signals, size);
    app.mount(now);
    app.compose();
    app
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
        .collect()
}

fn frame_text(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| row_text(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_narrow_terminal_shows_hamburger() {
    let mut app = mounted(Some(60), (60, 24), Instant::now());
    let frame = app.compose();
    assert!(row_text(frame, 0).contains('≡'));
    assert!(!row_text(frame, 0).contains("Secretariat"));
}

#[test]
fn test_wide_terminal_shows_link_list() {
    let mut app = mounted(Some(140), (140, 24), Instant::now());
    assert_eq!(app.snapshot().render_mode, RenderMode::Desktop);
    let frame = app.compose();
    let header = row_text(frame, 0);
    assert!(header.contains("MUN Conference 2025"));
    assert!(header.contains("Committees"));
    assert!(header.contains("Contact"));
}

#[test]
fn test_menu_key_draws_dropdown_over_page() {
    let now = Instant::now();
    let mut app = mounted(Some(60), (60, 24), now);
    app.handle_key(press(KeyCode::Char('m')), now);

    let frame = app.compose();
    assert!(row_text(frame, 0).contains('✕'));
    assert!(row_text(frame, 2).contains("1  Home"));
    assert!(row_text(frame, 6).contains("5  Contact"));
}

#[test]
fn test_hamburger_click_and_link_click() {
    let now = Instant::now();
    let mut app = mounted(Some(60), (60, 24), now);

    app.handle_mouse(click(1, 0), now);
    app.compose();
    assert!(app.snapshot().nav.menu_open);

    // Third dropdown row is "Committees"
    app.handle_mouse(click(4, 4), now);
    assert!(!app.snapshot().nav.menu_open);
    assert!(!frame_text(app.compose()).contains("3  Committees"));
}

#[test]
fn test_scroll_hides_then_restores_header() {
    let now = Instant::now();
    let mut app = mounted(Some(120), (120, 12), now);

    app.handle_mouse(
        MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        },
        now,
    );
    app.handle_mouse(
        MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        },
        now,
    );
    assert!(!app.snapshot().nav.header_visible);
    assert_eq!(app.scroll_rows(), 6);
    assert!(!row_text(app.compose(), 0).contains("Contact"));

    app.handle_key(press(KeyCode::Up), now);
    assert!(app.snapshot().nav.header_visible);
    assert!(row_text(app.compose(), 0).contains("Contact"));
}

#[test]
fn test_resize_to_wide_closes_menu() {
    let now = Instant::now();
    let mut app = mounted(Some(60), (60, 24), now);
    app.handle_key(press(KeyCode::Char('m')), now);
    app.handle_resize(120, 24, now);
    assert_eq!(app.snapshot().render_mode, RenderMode::Desktop);
    assert!(!frame_text(app.compose()).contains("1  Home"));
}

#[test]
fn test_autoplay_advances_on_deadline() {
    let start = Instant::now();
    let mut app = mounted(Some(120), (120, 40), start);
    let deadline = app.shell().next_deadline().unwrap();
    assert_eq!(deadline, start + Duration::from_secs(3));

    app.poll_timers(deadline);
    assert_eq!(app.snapshot().carousel.active_index, 1);
}

#[test]
fn test_enter_reveals_active_card() {
    let now = Instant::now();
    let mut app = mounted(Some(120), (120, 40), now);
    app.handle_key(press(KeyCode::Tab), now);
    app.handle_key(press(KeyCode::Enter), now);
    assert_eq!(app.snapshot().carousel.revealed_index, Some(1));
    assert!(frame_text(app.compose()).contains("Human Rights Council"));
}

#[test]
fn test_secretariat_key_expands_members() {
    let now = Instant::now();
    let mut app = mounted(Some(120), (120, 80), now);
    assert!(!frame_text(app.compose()).contains("Secretary-General"));
    app.handle_key(press(KeyCode::Char('s')), now);
    assert!(app.snapshot().secretariat_expanded);
    assert!(frame_text(app.compose()).contains("Secretary-General"));
}

#[test]
fn test_unsized_terminal_renders_static_page() {
    let now = Instant::now();
    let mut app = mounted(None, (60, 24), now);
    assert!(!app.snapshot().interactive);
    assert_eq!(app.snapshot().render_mode, RenderMode::Desktop);

    app.handle_key(press(KeyCode::Char('m')), now);
    assert_eq!(app.snapshot().render_mode, RenderMode::Desktop);
    assert!(row_text(app.compose(), 0).contains("MUN Conference 2025"));
    assert_eq!(app.shell().next_deadline(), None);
}

#[test]
fn test_remount_after_unmount() {
    let now = Instant::now();
    let mut app = mounted(Some(80), (80, 24), now);
    app.unmount();
    assert!(!app.shell().is_mounted());
    assert_eq!(app.mount(now), MountMode::Interactive);
    assert!(app.shell().next_deadline().is_some());
}
