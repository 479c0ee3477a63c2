//! TextBlock Widget
//!
//! A borderless, wrapped text region. The page layout asks a block how many
//! rows it needs at a given width before it is drawn, so section positions
//! are known up front.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// A borderless, wrapped text block
#[derive(Clone, Debug)]
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
    centered: bool,
}

impl<'a> TextBlock<'a> {
    /// Create a block over some text
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            centered: false,
        }
    }

    /// Set the text style
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Center each line horizontally
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Lines after wrapping to `width` columns
    #[must_use]
    pub fn lines(&self, width: u16) -> Vec<String> {
        let width = usize::from(width.max(1));
        self.content
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.into_owned())
                        .collect()
                }
            })
            .collect()
    }

    /// Rows needed at `width` columns
    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        u16::try_from(self.lines(width).len()).unwrap_or(u16::MAX)
    }
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in (area.y..area.bottom()).zip(self.lines(area.width)) {
            let line_width = u16::try_from(line.width()).unwrap_or(area.width);
            let x = if self.centered {
                area.x + area.width.saturating_sub(line_width) / 2
            } else {
                area.x
            };
            buf.set_stringn(x, row, &line, usize::from(area.width), self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_follows_width() {
        let block = TextBlock::new("one two three four");
        assert_eq!(block.height(80), 1);
        assert_eq!(block.height(10), 2);
        assert_eq!(TextBlock::new("a\n\nb").height(10), 3);
    }

    #[test]
    fn test_centered_render() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 7, 1));
        TextBlock::new("abc").centered().render(buf.area, &mut buf);
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "a");
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_clips_to_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        TextBlock::new("alpha beta").render(buf.area, &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "a");
        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), "a");
    }
}
