//! Page View
//!
//! Pure rendering of the landing page from a [`ShellSnapshot`] and the
//! static [`SiteContent`]. Nothing here reads or changes shell state.
//!
//! The page is drawn once into a tall buffer (one row per page line); the
//! app copies the rows under the viewport into the page layer. The fixed
//! header and the compact dropdown are drawn separately into their own
//! layers.
//!
//! ```text
//! row 0      ┌ header spacer ──────────────────────┐
//!            │ hero title                          │
//!            │ About Us / body                     │
//!            │ Committees / tabs / cards           │  <- carousel rows
//!            │ [ Meet the Secretariat ▼ ] / grid   │
//!            │ footer                              │
//! total_rows └─────────────────────────────────────┘
//! ```

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use unicode_width::UnicodeWidthStr;

use shell_core::{Chevron, Disclosure, RenderMode, ShellSnapshot, SiteContent};

use crate::theme;
use crate::widgets::TextBlock;

/// Rows taken by the fixed header (bar plus rule)
pub const HEADER_ROWS: u16 = 2;

/// Rows of one committee card
pub const CARD_ROWS: u16 = 5;

/// Columns between cards and between tabs
const GAP: u16 = 2;

/// A clickable horizontal span on one page row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// First column
    pub x: u16,
    /// Width in columns
    pub width: u16,
    /// Slide the span belongs to
    pub slide: usize,
}

impl Hit {
    fn contains(&self, x: u16) -> bool {
        x >= self.x && x < self.x.saturating_add(self.width)
    }
}

/// Where things ended up on the page
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Total page height in rows
    pub total_rows: u16,
    /// Row of the carousel tab strip
    pub tabs_row: u16,
    /// Tab spans on the tab row
    pub tabs: Vec<Hit>,
    /// Rows covered by the cards
    pub cards: Range<u16>,
    /// Card spans on the card rows
    pub card_hits: Vec<Hit>,
    /// Row of the secretariat toggle button
    pub secretariat_button_row: u16,
    /// Section anchors by route path
    pub anchors: Vec<(String, u16)>,
}

impl PageLayout {
    /// Rows that count as "over the carousel" for pointer pause
    #[must_use]
    pub fn carousel_rows(&self) -> Range<u16> {
        self.tabs_row..self.cards.end
    }

    /// Tab under a column on the tab row
    #[must_use]
    pub fn tab_at(&self, x: u16) -> Option<usize> {
        self.tabs.iter().find(|hit| hit.contains(x)).map(|hit| hit.slide)
    }

    /// Card under a column on the card rows
    #[must_use]
    pub fn card_at(&self, x: u16) -> Option<usize> {
        self.card_hits
            .iter()
            .find(|hit| hit.contains(x))
            .map(|hit| hit.slide)
    }

    /// Page row a route scrolls to
    #[must_use]
    pub fn anchor(&self, path: &str) -> Option<u16> {
        self.anchors
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, row)| *row)
    }
}

/// A fully drawn page
#[derive(Debug)]
pub struct Page {
    /// One row per page line
    pub buffer: Buffer,
    /// Positions of interactive elements
    pub layout: PageLayout,
}

impl Page {
    /// Copy the rows starting at `scroll` into `dst`
    pub fn blit_window(&self, scroll: u16, dst: &mut Buffer) {
        let area = dst.area;
        for y in 0..area.height {
            let src_y = scroll.saturating_add(y);
            if src_y >= self.layout.total_rows {
                break;
            }
            for x in 0..area.width.min(self.buffer.area.width) {
                if let (Some(src), Some(out)) = (
                    self.buffer.cell((x, src_y)),
                    dst.cell_mut((area.x + x, area.y + y)),
                ) {
                    *out = src.clone();
                }
            }
        }
    }
}

/// Everything the page needs besides the width
#[derive(Clone, Copy, Debug)]
pub struct PageInput<'a> {
    /// Latest shell state
    pub snapshot: &'a ShellSnapshot,
    /// Page content
    pub content: &'a SiteContent,
    /// Slides in view, in display order
    pub visible_slides: &'a [usize],
}

/// Chevron glyph
fn chevron_glyph(chevron: Chevron) -> &'static str {
    match chevron {
        Chevron::Down => "▼",
        Chevron::Up => "▲",
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

fn centered_x(width: u16, text: &str) -> u16 {
    width.saturating_sub(text_width(text)) / 2
}

/// Compute the layout without drawing
#[must_use]
pub fn layout_page(input: &PageInput<'_>, width: u16) -> PageLayout {
    let mut layout = PageLayout::default();
    let content = input.content;
    let mut row = HEADER_ROWS;

    layout.anchors.push(("/".to_string(), 0));

    // Hero
    row += 1 + TextBlock::new(&content.title).height(width) + 1;

    // About
    layout.anchors.push(("/about".to_string(), row));
    row += 1 + TextBlock::new(&content.about).height(width.saturating_sub(2)) + 1;

    // Committees
    layout.anchors.push(("/committees".to_string(), row));
    row += 1;
    if input.snapshot.carousel.is_renderable() {
        layout.tabs_row = row;
        let mut x = 1;
        for (slide, item) in content.committees.iter().enumerate() {
            let tab_width = text_width(&item.label) + 2;
            layout.tabs.push(Hit {
                x,
                width: tab_width,
                slide,
            });
            x = x.saturating_add(tab_width + GAP);
        }
        row += 2;

        let shown = u16::try_from(input.visible_slides.len().max(1)).unwrap_or(1);
        let usable = width.saturating_sub(2 + GAP * (shown - 1));
        let card_width = usable / shown;
        let mut x = 1;
        for &slide in input.visible_slides {
            layout.card_hits.push(Hit {
                x,
                width: card_width,
                slide,
            });
            x = x.saturating_add(card_width + GAP);
        }
        layout.cards = row..row + CARD_ROWS;
        row += CARD_ROWS;
    } else {
        layout.tabs_row = row;
        layout.cards = row..row;
    }
    row += 1;

    // Secretariat
    layout.anchors.push(("/secretariat".to_string(), row));
    layout.secretariat_button_row = row;
    row += 1;
    if input.snapshot.secretariat_expanded {
        row += 1 + u16::try_from(content.secretariat.len()).unwrap_or(u16::MAX);
    }
    row += 1;

    // Footer
    layout.anchors.push(("/contact".to_string(), row));
    row += 1;

    layout.total_rows = row;
    layout
}

/// Draw the whole page
#[must_use]
pub fn render_page(input: &PageInput<'_>, width: u16) -> Page {
    let layout = layout_page(input, width);
    let mut buf = Buffer::empty(Rect::new(0, 0, width, layout.total_rows));
    let content = input.content;
    let snapshot = input.snapshot;

    // Hero
    let mut row = HEADER_ROWS + 1;
    let title = TextBlock::new(&content.title).style(theme::heading()).centered();
    let title_rows = title.height(width);
    title.render(Rect::new(0, row, width, title_rows), &mut buf);
    row += title_rows + 1;

    // About
    buf.set_string(1, row, &content.about_heading, theme::heading());
    row += 1;
    let about = TextBlock::new(&content.about).style(theme::body());
    let about_rows = about.height(width.saturating_sub(2));
    about.render(Rect::new(1, row, width.saturating_sub(2), about_rows), &mut buf);
    row += about_rows + 1;

    // Committees
    buf.set_string(1, row, "Committees", theme::heading());
    if snapshot.carousel.is_renderable() {
        render_tabs(&mut buf, &layout, input);
        if snapshot.carousel.paused {
            let label = "❚❚ paused";
            buf.set_string(
                width.saturating_sub(text_width(label) + 1),
                layout.tabs_row,
                label,
                theme::muted(),
            );
        }
        render_cards(&mut buf, &layout, input);
    }

    // Secretariat
    let disclosure = Disclosure::from_expanded(snapshot.secretariat_expanded);
    let button = format!(
        " {} {} ",
        disclosure.button_label(),
        chevron_glyph(disclosure.chevron())
    );
    let button_row = layout.secretariat_button_row;
    buf.set_string(centered_x(width, &button), button_row, &button, theme::button());
    if disclosure.is_expanded() {
        for (i, member) in content.secretariat.iter().enumerate() {
            let y = button_row + 2 + u16::try_from(i).unwrap_or(u16::MAX);
            let line = format!("{}  ·  {}", member.name, member.position);
            buf.set_stringn(
                centered_x(width, &line),
                y,
                &line,
                usize::from(width),
                theme::body(),
            );
        }
    }

    // Footer
    let footer_row = layout.total_rows.saturating_sub(1);
    buf.set_style(Rect::new(0, footer_row, width, 1), theme::muted().bg(theme::SECTION_GRAY));
    buf.set_string(
        centered_x(width, &content.footer),
        footer_row,
        &content.footer,
        theme::muted().bg(theme::SECTION_GRAY),
    );

    Page { buffer: buf, layout }
}

fn render_tabs(buf: &mut Buffer, layout: &PageLayout, input: &PageInput<'_>) {
    let active = input.snapshot.carousel.active_index;
    for hit in &layout.tabs {
        let Some(item) = input.content.committees.get(hit.slide) else {
            continue;
        };
        let label = format!(" {} ", item.label);
        buf.set_stringn(
            hit.x,
            layout.tabs_row,
            &label,
            usize::from(hit.width),
            theme::tab(hit.slide == active),
        );
    }
}

fn render_cards(buf: &mut Buffer, layout: &PageLayout, input: &PageInput<'_>) {
    let revealed = input.snapshot.carousel.revealed_index;
    for hit in &layout.card_hits {
        let Some(item) = input.content.committees.get(hit.slide) else {
            continue;
        };
        if hit.width < 4 {
            continue;
        }
        let area = Rect::new(hit.x, layout.cards.start, hit.width, CARD_ROWS);
        let is_revealed = revealed == Some(hit.slide);
        let border = if is_revealed {
            theme::overlay()
        } else {
            Style::default().fg(theme::ACCENT_BLUE)
        };
        let block = Block::bordered().border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        if is_revealed {
            buf.set_style(inner, theme::overlay());
            TextBlock::new(&item.description)
                .style(theme::overlay())
                .centered()
                .render(inner, buf);
        } else {
            TextBlock::new(&item.label)
                .style(theme::heading())
                .centered()
                .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            TextBlock::new(&item.image_ref)
                .style(theme::muted())
                .centered()
                .render(
                    Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(2)),
                    buf,
                );
        }
    }
}

/// Draw the fixed header bar into a buffer of `HEADER_ROWS` rows
pub fn render_header(snapshot: &ShellSnapshot, content: &SiteContent, buf: &mut Buffer) {
    let area = buf.area;
    if area.height == 0 {
        return;
    }
    buf.set_style(area, theme::header());

    if snapshot.render_mode.shows_link_list() {
        buf.set_string(area.x + 1, area.y, &content.title, theme::header());
        let title_end = area.x + 1 + text_width(&content.title);

        let links: Vec<&str> = content.nav.iter().map(|e| e.label.as_str()).collect();
        let links_width = links.iter().map(|l| text_width(l)).sum::<u16>()
            + GAP * u16::try_from(links.len().saturating_sub(1)).unwrap_or(0);
        let mut x = area
            .right()
            .saturating_sub(links_width + 1)
            .max(title_end + GAP);
        for label in links {
            if x >= area.right() {
                break;
            }
            let (end, _) = buf.set_stringn(
                x,
                area.y,
                label,
                usize::from(area.right() - x),
                theme::link(),
            );
            x = end.saturating_add(GAP);
        }
    } else {
        let glyph = hamburger_glyph(snapshot.render_mode);
        buf.set_string(area.x + 1, area.y, glyph, theme::link());
        buf.set_string(
            area.x + centered_x(area.width, &content.title),
            area.y,
            &content.title,
            theme::header(),
        );
        buf.set_string(area.right().saturating_sub(2), area.y, "◉", theme::link());
    }

    if area.height > 1 {
        let rule = "─".repeat(usize::from(area.width));
        buf.set_string(area.x, area.y + 1, rule, theme::muted().bg(theme::SURFACE_WHITE));
    }
}

/// Hamburger glyph for a compact render mode
#[must_use]
pub fn hamburger_glyph(mode: RenderMode) -> &'static str {
    if mode.shows_dropdown() {
        "✕"
    } else {
        "≡"
    }
}

/// Columns of the hamburger hit area in the compact header
#[must_use]
pub fn hamburger_columns() -> Range<u16> {
    0..3
}

/// Rows the dropdown needs for a content's nav list
#[must_use]
pub fn dropdown_height(content: &SiteContent) -> u16 {
    u16::try_from(content.nav.len()).unwrap_or(u16::MAX).saturating_add(1)
}

/// Draw the compact dropdown panel
pub fn render_dropdown(content: &SiteContent, buf: &mut Buffer) {
    let area = buf.area;
    buf.set_style(area, theme::header());
    for (i, entry) in content.nav.iter().enumerate() {
        let y = area.y + u16::try_from(i).unwrap_or(u16::MAX);
        if y >= area.bottom().saturating_sub(1) {
            break;
        }
        let line = format!(" {}  {}", i + 1, entry.label);
        buf.set_stringn(area.x, y, &line, usize::from(area.width), theme::link());
    }
    let rule = "─".repeat(usize::from(area.width));
    buf.set_string(
        area.x,
        area.bottom().saturating_sub(1),
        rule,
        theme::muted().bg(theme::SURFACE_WHITE),
    );
}
