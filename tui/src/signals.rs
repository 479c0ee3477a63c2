//! Terminal Signal Source
//!
//! Exposes the terminal to the shell as a pixel-based environment. Columns
//! and rows are converted with [`CellMetrics`] so the shell's pixel
//! thresholds (breakpoint, scroll noise, near-top) keep their meaning.
//!
//! Registering a pointer listener turns on crossterm mouse capture;
//! removing it turns capture back off.

use std::collections::BTreeMap;
use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{debug, warn};

use shell_core::{
    EnvironmentProbe, ListenError, ListenerId, ListenerOptions, SignalKind, SignalSource,
};

/// Default pixel width of one terminal column
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

/// Default pixel height of one terminal row
pub const DEFAULT_CELL_HEIGHT_PX: u32 = 16;

/// Pixel size of one terminal cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetrics {
    /// Pixels per column
    pub width_px: u32,
    /// Pixels per row
    pub height_px: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_CELL_WIDTH_PX,
            height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl CellMetrics {
    /// Viewport width in pixels for a column count
    #[must_use]
    pub fn width_for_cols(self, cols: u16) -> u32 {
        u32::from(cols) * self.width_px
    }

    /// Scroll offset in pixels for a row count
    #[must_use]
    pub fn offset_for_rows(self, rows: u16) -> f64 {
        f64::from(u32::from(rows) * self.height_px)
    }
}

/// The terminal as a [`SignalSource`]
#[derive(Debug)]
pub struct TerminalSignals {
    metrics: CellMetrics,
    cols: Option<u16>,
    scroll_rows: u16,
    listeners: BTreeMap<ListenerId, SignalKind>,
    next_id: u64,
    capture_mouse: bool,
    mouse_captured: bool,
}

impl TerminalSignals {
    /// A source for a live terminal; pointer listeners toggle mouse capture
    #[must_use]
    pub fn new(cols: u16, metrics: CellMetrics) -> Self {
        Self {
            metrics,
            cols: Some(cols),
            scroll_rows: 0,
            listeners: BTreeMap::new(),
            next_id: 0,
            capture_mouse: true,
            mouse_captured: false,
        }
    }

    /// A source that never touches the real terminal
    #[must_use]
    pub fn detached(cols: Option<u16>, metrics: CellMetrics) -> Self {
        Self {
            cols,
            capture_mouse: false,
            ..Self::new(0, metrics)
        }
    }

    /// Cell metrics in use
    #[must_use]
    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Record a terminal resize
    pub fn set_cols(&mut self, cols: u16) {
        self.cols = Some(cols);
    }

    /// Record the page scroll position
    pub fn set_scroll_rows(&mut self, rows: u16) {
        self.scroll_rows = rows;
    }

    /// Number of live listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether mouse capture is currently on
    #[must_use]
    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    fn set_mouse_capture(&mut self, on: bool) -> io::Result<()> {
        if self.capture_mouse && self.mouse_captured != on {
            if on {
                execute!(io::stdout(), EnableMouseCapture)?;
            } else {
                execute!(io::stdout(), DisableMouseCapture)?;
            }
        }
        self.mouse_captured = on;
        Ok(())
    }
}

impl EnvironmentProbe for TerminalSignals {
    fn viewport_width(&self) -> Option<u32> {
        self.cols.map(|cols| self.metrics.width_for_cols(cols))
    }

    fn scroll_offset(&self) -> Option<f64> {
        self.cols
            .map(|_| self.metrics.offset_for_rows(self.scroll_rows))
    }
}

impl SignalSource for TerminalSignals {
    fn listen(
        &mut self,
        kind: SignalKind,
        options: ListenerOptions,
    ) -> Result<ListenerId, ListenError> {
        if self.cols.is_none() {
            return Err(ListenError::NoWindow(kind));
        }
        if kind == SignalKind::Pointer {
            self.set_mouse_capture(true)
                .map_err(|e| ListenError::Rejected {
                    kind,
                    reason: e.to_string(),
                })?;
        }

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, kind);
        debug!(?kind, passive = options.passive, id = id.0, "Terminal listener added");
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(kind) = self.listeners.remove(&id) else {
            return;
        };
        if kind == SignalKind::Pointer
            && !self.listeners.values().any(|k| *k == SignalKind::Pointer)
        {
            if let Err(e) = self.set_mouse_capture(false) {
                warn!(error = %e, "Failed to release mouse capture");
            }
        }
        debug!(?kind, id = id.0, "Terminal listener removed");
    }
}
