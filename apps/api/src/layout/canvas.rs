//! Page-buffered drawing surface.
//!
//! The canvas keeps every page in memory as a list of draw operations until
//! the caller hands it to `pdf::write_pdf`. That lets the engine draw all
//! content first and then go back to stamp "Page i of N" once N is known.
//!
//! Coordinates are top-down (y grows towards the bottom of the page), matching
//! how the engine thinks about cursors. The flip to PDF's bottom-up space
//! happens at serialization time.

use super::error::RenderError;
use super::font_metrics::ASCENT_FACTOR;
use super::geometry::PageGeometry;
use super::style::{Rgb, TextStyle};
use super::wrap::{wrap_runs, Line, Run};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: TextStyle,
    },
    Stroke {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
}

/// A clickable rectangle pointing at an external URI.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    pub links: Vec<LinkArea>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Per-paragraph layout knobs.
#[derive(Debug, Clone, Default)]
pub struct TextOptions<'a> {
    /// Box width; defaults to the distance from the cursor to the right margin.
    pub width: Option<f32>,
    /// Shifts the whole paragraph right and narrows it by the same amount.
    pub indent: f32,
    /// Extra space after every line.
    pub line_gap: f32,
    /// Extra space after the paragraph.
    pub paragraph_gap: f32,
    pub link: Option<&'a str>,
    pub underline: bool,
    pub align: Align,
}

pub struct Canvas {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: usize,
    pub x: f32,
    pub y: f32,
}

impl Canvas {
    /// A canvas with one blank page and the cursor at the top-left margin.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            x: geometry.content_left(),
            y: geometry.content_top(),
            geometry,
            pages: vec![Page::default()],
            current: 0,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_parts(self) -> (PageGeometry, Vec<Page>) {
        (self.geometry, self.pages)
    }

    /// Makes an already-buffered page the drawing target. The cursor is left alone.
    pub fn switch_to_page(&mut self, index: usize) -> Result<(), RenderError> {
        if index >= self.pages.len() {
            return Err(RenderError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Advances the cursor by `lines` line heights at font `size`.
    pub fn move_down(&mut self, lines: f32, size: f32) {
        self.y += lines * super::font_metrics::line_height(size);
    }

    /// Continues at the top margin of the following page, appending one if needed.
    /// `x` is kept so a column flows into the same column on the next page.
    pub fn next_page(&mut self) {
        if self.current + 1 >= self.pages.len() {
            self.pages.push(Page::default());
        }
        self.current += 1;
        self.y = self.geometry.content_top();
    }

    /// Breaks to the next page unless `height` points fit above the bottom margin.
    pub fn ensure_space(&mut self, height: f32) {
        if self.y + height > self.geometry.content_bottom()
            && self.y > self.geometry.content_top()
        {
            self.next_page();
        }
    }

    /// Lays out a paragraph at the cursor, flowing onto following pages as needed.
    pub fn text(&mut self, runs: &[Run<'_>], opts: &TextOptions<'_>) -> Result<(), RenderError> {
        let x = self.x + opts.indent;
        let width = opts
            .width
            .unwrap_or(self.geometry.content_right() - self.x)
            - opts.indent;

        for line in wrap_runs(runs, width)? {
            self.ensure_space(line.height());
            self.draw_line(&line, x, width, opts);
            self.y += line.height() + opts.line_gap;
        }
        self.y += opts.paragraph_gap;
        Ok(())
    }

    /// Draws text at a fixed position without moving the cursor or paginating.
    pub fn stamp(
        &mut self,
        runs: &[Run<'_>],
        x: f32,
        y: f32,
        opts: &TextOptions<'_>,
    ) -> Result<(), RenderError> {
        let width = opts.width.unwrap_or(self.geometry.content_right() - x);
        let mut top = y;
        for line in wrap_runs(runs, width)? {
            let saved = self.y;
            self.y = top;
            self.draw_line(&line, x, width, opts);
            self.y = saved;
            top += line.height() + opts.line_gap;
        }
        Ok(())
    }

    pub fn stroke(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        self.pages[self.current].ops.push(DrawOp::Stroke {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_line(&mut self, line: &Line, x: f32, width: f32, opts: &TextOptions<'_>) {
        let left = match opts.align {
            Align::Left => x,
            Align::Center => x + ((width - line.width) / 2.0).max(0.0),
        };
        let top = self.y;
        let baseline = top + line.size * ASCENT_FACTOR;
        let page = &mut self.pages[self.current];

        for segment in &line.segments {
            page.ops.push(DrawOp::Text {
                x: left + segment.offset,
                baseline,
                text: segment.text.clone(),
                style: segment.style,
            });
        }

        if line.segments.is_empty() {
            return;
        }

        if opts.underline {
            let style = line.segments[0].style;
            let thickness = (style.size / 20.0).max(0.5);
            let y = baseline + style.size * 0.1;
            page.ops.push(DrawOp::Stroke {
                from: (left, y),
                to: (left + line.width, y),
                width: thickness,
                color: style.color,
            });
        }

        if let Some(uri) = opts.link {
            page.links.push(LinkArea {
                left,
                top,
                right: left + line.width,
                bottom: top + line.height(),
                uri: uri.to_string(),
            });
        }
    }
}

#[cfg(test)]
impl Page {
    /// All text drawn on the page, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Stroke { .. } => None,
            })
            .collect()
    }

    pub fn text_x(&self, needle: &str) -> Option<f32> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, x, .. } if text == needle => Some(*x),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::line_height;
    use crate::layout::geometry::default_page_geometry;
    use crate::layout::style::{BODY, FOOTER};

    fn canvas() -> Canvas {
        Canvas::new(default_page_geometry())
    }

    #[test]
    fn test_new_canvas_has_one_page_and_margin_cursor() {
        let c = canvas();
        assert_eq!(c.page_count(), 1);
        assert_eq!((c.x, c.y), (50.0, 50.0));
    }

    #[test]
    fn test_text_advances_cursor_by_line_height_and_gaps() {
        let mut c = canvas();
        let opts = TextOptions {
            line_gap: 3.0,
            paragraph_gap: 2.0,
            ..Default::default()
        };
        c.text(&[Run::new("hello", BODY)], &opts).unwrap();
        assert!((c.y - (50.0 + line_height(10.0) + 3.0 + 2.0)).abs() < 1e-4);
        assert_eq!(c.pages()[0].texts(), vec!["hello"]);
    }

    #[test]
    fn test_text_overflows_onto_new_page() {
        let mut c = canvas();
        c.move_to(50.0, 785.0);
        c.text(&[Run::new("spills", BODY)], &TextOptions::default())
            .unwrap();
        assert_eq!(c.page_count(), 2);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.pages()[1].texts(), vec!["spills"]);
        assert!((c.y - (50.0 + line_height(10.0))).abs() < 1e-4);
        assert_eq!(c.x, 50.0);
    }

    #[test]
    fn test_next_page_reuses_existing_pages() {
        let mut c = canvas();
        c.next_page();
        c.switch_to_page(0).unwrap();
        c.next_page();
        assert_eq!(c.page_count(), 2);
        assert_eq!(c.current_page(), 1);
    }

    #[test]
    fn test_switch_to_missing_page_fails() {
        let mut c = canvas();
        assert!(matches!(
            c.switch_to_page(3),
            Err(RenderError::PageOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_link_records_area_and_underline() {
        let mut c = canvas();
        c.text(
            &[Run::new("GitHub", BODY)],
            &TextOptions {
                link: Some("https://github.com/ada"),
                underline: true,
                ..Default::default()
            },
        )
        .unwrap();
        let page = &c.pages()[0];
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].uri, "https://github.com/ada");
        assert!(page.links[0].right > page.links[0].left);
        assert!(page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Stroke { .. })));
    }

    #[test]
    fn test_stamp_centers_without_moving_cursor() {
        let mut c = canvas();
        let before = (c.x, c.y);
        c.stamp(
            &[Run::new("Page 1 of 1", FOOTER)],
            50.0,
            811.89,
            &TextOptions {
                width: Some(495.28),
                align: Align::Center,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!((c.x, c.y), before);
        let x = c.pages()[0].text_x("Page 1 of 1").unwrap();
        assert!(x > 200.0 && x < 300.0, "footer should be centered, x = {x}");
        assert_eq!(c.page_count(), 1);
    }
}
