//! Main Application
//!
//! The App struct is a thin surface over the headless [`Shell`]:
//! - Converts terminal events to [`SurfaceEvent`]s
//! - Waits on the shell's autoplay deadline instead of polling
//! - Renders the latest [`ShellSnapshot`] through the compositor
//!
//! # Layers
//!
//! | Layer    | z  | Shown when                         |
//! |----------|----|------------------------------------|
//! | page     | 0  | always                             |
//! | header   | 10 | `header_visible`                   |
//! | dropdown | 20 | render mode is `CompactOpen`       |

use std::io;
use std::time::Instant;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use shell_core::{
    MountMode, PointerAction, Shell, ShellConfig, ShellSnapshot, SiteContent, SurfaceEvent,
};

use crate::compositor::{Compositor, LayerId};
use crate::signals::TerminalSignals;
use crate::view::{self, Page, PageInput, HEADER_ROWS};

/// Rows scrolled per mouse wheel notch
const WHEEL_ROWS: u16 = 3;

/// Layer IDs for page regions
#[derive(Debug)]
struct AppLayers {
    page: LayerId,
    header: LayerId,
    dropdown: LayerId,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// The headless page logic
    shell: Shell,
    /// The terminal as a signal source
    signals: TerminalSignals,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Last drawn page, for hit testing
    page: Option<Page>,

    // === Input State ===
    /// Page rows scrolled past the top of the viewport
    scroll_rows: u16,
    /// Whether the mouse is over the carousel
    pointer_over_carousel: bool,
    /// Left button went down on the carousel and is still held
    pointer_pressed: bool,
    /// Pause pinned from the keyboard
    pause_pinned: bool,

    // === Misc State ===
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create an unmounted app for a terminal of `size` columns and rows
    #[must_use]
    pub fn new(
        config: ShellConfig,
        content: SiteContent,
        signals: TerminalSignals,
        size: (u16, u16),
    ) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);

        let page = compositor.create_layer(area, 0);
        let header = compositor.create_opaque_layer(Rect::new(0, 0, size.0, HEADER_ROWS), 10);
        let dropdown = compositor.create_opaque_layer(
            Rect::new(0, HEADER_ROWS, size.0, view::dropdown_height(&content)),
            20,
        );
        compositor.set_visible(dropdown, false);

        Self {
            running: true,
            shell: Shell::new(config, content),
            signals,
            compositor,
            layers: AppLayers {
                page,
                header,
                dropdown,
            },
            page: None,
            scroll_rows: 0,
            pointer_over_carousel: false,
            pointer_pressed: false,
            pause_pinned: false,
            size,
        }
    }

    /// Attach to the terminal and classify it
    pub fn mount(&mut self, now: Instant) -> MountMode {
        self.signals.set_scroll_rows(self.scroll_rows);
        let mode = self.shell.mount(&mut self.signals, now);
        info!(?mode, cols = self.size.0, rows = self.size.1, "Terminal surface mounted");
        mode
    }

    /// Detach from the terminal
    pub fn unmount(&mut self) {
        self.shell.unmount(&mut self.signals);
    }

    /// Whether the event loop should keep going
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Latest shell state
    #[must_use]
    pub fn snapshot(&self) -> ShellSnapshot {
        self.shell.snapshot()
    }

    /// Page rows scrolled past the top
    #[must_use]
    pub fn scroll_rows(&self) -> u16 {
        self.scroll_rows
    }

    /// The shell behind this surface
    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.mount(Instant::now());
        self.render(terminal)?;

        while self.running {
            let deadline = self.shell.next_deadline();
            let autoplay = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event, Instant::now()),
                        Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                        None => self.running = false,
                    }
                }
                () = autoplay => self.poll_timers(Instant::now()),
            }

            self.render(terminal)?;
        }

        self.unmount();
        Ok(())
    }

    /// Fire autoplay if its deadline has passed
    pub fn poll_timers(&mut self, now: Instant) {
        if self.shell.poll_timers(now) {
            debug!(active = self.shell.carousel().active_index(), "Autoplay advanced");
        }
    }

    /// Dispatch one crossterm event
    pub fn handle_terminal_event(&mut self, event: Event, now: Instant) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(w, h) => self.handle_resize(w, h, now),
            _ => {}
        }
    }

    fn send(&mut self, event: SurfaceEvent, now: Instant) {
        debug!(event = event.name(), "Surface event");
        if let Err(e) = self.shell.handle_event(&event, now) {
            warn!(event = event.name(), error = %e, "Shell rejected event");
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Page scrolling
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1, now),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1, now),
            KeyCode::PageDown => self.scroll_by(i32::from(self.page_rows() / 2), now),
            KeyCode::PageUp => self.scroll_by(-i32::from(self.page_rows() / 2), now),

            // Navigation
            KeyCode::Char('m') => self.send(SurfaceEvent::HamburgerTapped, now),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.follow_link(index, now);
            }

            // Carousel
            KeyCode::Tab | KeyCode::Right => self.step_tab(1, now),
            KeyCode::BackTab | KeyCode::Left => self.step_tab(-1, now),
            KeyCode::Enter => {
                let index = self.shell.snapshot().carousel.active_index;
                self.send(SurfaceEvent::CardTapped { index }, now);
            }
            KeyCode::Char('p') => {
                self.pause_pinned = !self.pause_pinned;
                let action = if self.pause_pinned {
                    PointerAction::Enter
                } else {
                    PointerAction::Leave
                };
                self.send(SurfaceEvent::CarouselPointer { action }, now);
            }

            // Sections
            KeyCode::Char('s') => self.send(SurfaceEvent::SecretariatToggled, now),

            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(i32::from(WHEEL_ROWS), now),
            MouseEventKind::ScrollUp => self.scroll_by(-i32::from(WHEEL_ROWS), now),
            MouseEventKind::Moved => self.track_pointer(mouse.column, mouse.row, now),
            MouseEventKind::Down(MouseButton::Left) => {
                self.press_pointer(mouse.column, mouse.row, now);
                self.click(mouse.column, mouse.row, now);
            }
            MouseEventKind::Up(MouseButton::Left) => self.release_pointer(now),
            _ => {}
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));
        self.signals.set_cols(width);

        let px = self.signals.metrics().width_for_cols(width);
        self.send(SurfaceEvent::Resized { width: px }, now);
        self.clamp_scroll(now);
    }

    fn page_rows(&self) -> u16 {
        self.size.1
    }

    fn max_scroll(&self) -> u16 {
        self.page
            .as_ref()
            .map_or(0, |p| p.layout.total_rows.saturating_sub(self.page_rows()))
    }

    fn scroll_to(&mut self, rows: u16, now: Instant) {
        let rows = rows.min(self.max_scroll());
        self.scroll_rows = rows;
        self.signals.set_scroll_rows(rows);
        let offset = self.signals.metrics().offset_for_rows(rows);
        self.send(SurfaceEvent::Scrolled { offset }, now);
    }

    fn scroll_by(&mut self, delta: i32, now: Instant) {
        let target = (i32::from(self.scroll_rows) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll_to(u16::try_from(target).unwrap_or(0), now);
    }

    fn clamp_scroll(&mut self, now: Instant) {
        if self.scroll_rows > self.max_scroll() {
            self.scroll_to(self.max_scroll(), now);
        }
    }

    fn follow_link(&mut self, index: usize, now: Instant) {
        self.send(SurfaceEvent::NavLinkTapped { index }, now);
        let path = self.shell.nav_entries().get(index).map(|e| e.path.clone());
        let anchor = path.and_then(|p| self.page.as_ref().and_then(|page| page.layout.anchor(&p)));
        if let Some(row) = anchor {
            // Land the section just below the fixed header
            self.scroll_to(row.saturating_sub(HEADER_ROWS), now);
        }
    }

    fn step_tab(&mut self, step: isize, now: Instant) {
        let carousel = self.shell.snapshot().carousel;
        if carousel.len == 0 {
            return;
        }
        let index = carousel
            .active_index
            .checked_add_signed(step)
            .unwrap_or(carousel.len - 1)
            % carousel.len;
        self.select_tab(index, now);
    }

    fn select_tab(&mut self, index: usize, now: Instant) {
        self.send(SurfaceEvent::TabSelected { index }, now);
        // Terminal slides switch instantly, so they settle where requested
        self.send(SurfaceEvent::SlideSettled { index }, now);
    }

    /// Page row under a screen row
    fn page_row(&self, y: u16) -> u16 {
        self.scroll_rows.saturating_add(y)
    }

    fn over_carousel(&self, x: u16, y: u16) -> bool {
        self.compositor.layer_at(x, y) == Some(self.layers.page)
            && self
                .page
                .as_ref()
                .is_some_and(|p| p.layout.carousel_rows().contains(&self.page_row(y)))
    }

    fn press_pointer(&mut self, x: u16, y: u16, now: Instant) {
        if !self.over_carousel(x, y) {
            return;
        }
        self.pointer_pressed = true;
        if !self.pause_pinned {
            self.send(
                SurfaceEvent::CarouselPointer {
                    action: PointerAction::Down,
                },
                now,
            );
        }
    }

    /// A release anywhere ends a press that started on the carousel
    fn release_pointer(&mut self, now: Instant) {
        if !std::mem::take(&mut self.pointer_pressed) || self.pause_pinned {
            return;
        }
        self.send(
            SurfaceEvent::CarouselPointer {
                action: PointerAction::Up,
            },
            now,
        );
    }

    fn track_pointer(&mut self, x: u16, y: u16, now: Instant) {
        let over = self.over_carousel(x, y);
        if over == self.pointer_over_carousel {
            return;
        }
        self.pointer_over_carousel = over;
        if self.pause_pinned {
            return;
        }
        let action = if over {
            PointerAction::Enter
        } else {
            PointerAction::Leave
        };
        self.send(SurfaceEvent::CarouselPointer { action }, now);
    }

    fn click(&mut self, x: u16, y: u16, now: Instant) {
        let target = self.compositor.layer_at(x, y);

        if target == Some(self.layers.dropdown) {
            let top = self
                .compositor
                .bounds(self.layers.dropdown)
                .map_or(HEADER_ROWS, |b| b.y);
            let index = usize::from(y.saturating_sub(top));
            if index < self.shell.nav_entries().len() {
                self.follow_link(index, now);
            }
            return;
        }

        if target == Some(self.layers.header) {
            if self.shell.snapshot().render_mode.shows_hamburger()
                && y == 0
                && view::hamburger_columns().contains(&x)
            {
                self.send(SurfaceEvent::HamburgerTapped, now);
            }
            return;
        }

        let row = self.page_row(y);
        let Some(layout) = self.page.as_ref().map(|p| p.layout.clone()) else {
            return;
        };
        if row == layout.tabs_row {
            if let Some(index) = layout.tab_at(x) {
                self.select_tab(index, now);
                return;
            }
        }
        if layout.cards.contains(&row) {
            if let Some(index) = layout.card_at(x) {
                self.send(SurfaceEvent::CardTapped { index }, now);
                return;
            }
        }
        if row == layout.secretariat_button_row {
            self.send(SurfaceEvent::SecretariatToggled, now);
            return;
        }
        self.send(SurfaceEvent::OutsideTapped, now);
    }

    /// Draw every layer from the latest snapshot and composite them
    pub fn compose(&mut self) -> &Buffer {
        let snapshot = self.shell.snapshot();
        let (width, height) = self.size;
        let width_px = self.signals.metrics().width_for_cols(width);

        let visible: Vec<usize> = self.shell.carousel().visible_window(width_px).collect();
        let page = view::render_page(
            &PageInput {
                snapshot: &snapshot,
                content: self.shell.content(),
                visible_slides: &visible,
            },
            width,
        );

        // Page layer
        self.compositor
            .place_layer(self.layers.page, Rect::new(0, 0, width, height));
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.page) {
            buf.reset();
            page.blit_window(self.scroll_rows, buf);
        }
        self.page = Some(page);

        // Header layer
        self.compositor
            .place_layer(self.layers.header, Rect::new(0, 0, width, HEADER_ROWS));
        self.compositor
            .set_visible(self.layers.header, snapshot.nav.header_visible);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) {
            buf.reset();
            view::render_header(&snapshot, self.shell.content(), buf);
        }

        // Dropdown layer, anchored under the header
        let drop_height = view::dropdown_height(self.shell.content());
        self.compositor.place_layer(
            self.layers.dropdown,
            Rect::new(0, HEADER_ROWS, width, drop_height),
        );
        self.compositor.set_visible(
            self.layers.dropdown,
            snapshot.render_mode.shows_dropdown() && snapshot.nav.header_visible,
        );
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.dropdown) {
            buf.reset();
            view::render_dropdown(self.shell.content(), buf);
        }

        self.compositor.composite()
    }

    /// Render the UI
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let output = self.compose().clone();
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let (Some(src), Some(dst)) = (output.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }
}
