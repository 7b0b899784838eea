//! Column trackers for the two-column body.
//!
//! Each tracker remembers where its column currently ends, as a page index
//! plus a y offset. Sections are appended one after another, 10pt apart. The
//! floating Certifications section goes to whichever column ends higher up.

use super::canvas::Canvas;
use super::error::RenderError;

/// Vertical gap between consecutive sections in one column.
pub const SECTION_GAP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// A point in the flowing document: which page, how far down it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPosition {
    pub page: usize,
    pub y: f32,
}

impl FlowPosition {
    /// True when `self` comes strictly before `other` in reading order.
    pub fn is_above(&self, other: &FlowPosition) -> bool {
        self.page < other.page || (self.page == other.page && self.y < other.y)
    }
}

#[derive(Debug, Clone)]
pub struct ColumnTracker {
    pub column: Column,
    pub x: f32,
    pub width: f32,
    bottom: FlowPosition,
    sections: usize,
}

impl ColumnTracker {
    pub fn new(column: Column, x: f32, width: f32, top: FlowPosition) -> Self {
        Self {
            column,
            x,
            width,
            bottom: top,
            sections: 0,
        }
    }

    /// Where the column's content currently ends.
    pub fn current_height(&self) -> FlowPosition {
        self.bottom
    }

    /// Positions the canvas at the end of this column, lets `draw` render one
    /// section there, and records where the section ended.
    pub fn append<F>(&mut self, canvas: &mut Canvas, draw: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Canvas, f32) -> Result<(), RenderError>,
    {
        let gap = if self.sections == 0 { 0.0 } else { SECTION_GAP };
        canvas.switch_to_page(self.bottom.page)?;
        canvas.move_to(self.x, self.bottom.y + gap);
        draw(canvas, self.width)?;
        self.bottom = FlowPosition {
            page: canvas.current_page(),
            y: canvas.y,
        };
        self.sections += 1;
        Ok(())
    }
}

/// Picks the column with more room left. Ties go to the right column.
pub fn roomier<'a>(
    left: &'a mut ColumnTracker,
    right: &'a mut ColumnTracker,
) -> &'a mut ColumnTracker {
    if left.current_height().is_above(&right.current_height()) {
        left
    } else {
        right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::default_page_geometry;

    fn pos(page: usize, y: f32) -> FlowPosition {
        FlowPosition { page, y }
    }

    fn trackers(left: FlowPosition, right: FlowPosition) -> (ColumnTracker, ColumnTracker) {
        (
            ColumnTracker::new(Column::Left, 50.0, 230.0, left),
            ColumnTracker::new(Column::Right, 310.0, 230.0, right),
        )
    }

    #[test]
    fn test_is_above_compares_page_first() {
        assert!(pos(0, 700.0).is_above(&pos(1, 60.0)));
        assert!(pos(1, 60.0).is_above(&pos(1, 61.0)));
        assert!(!pos(1, 60.0).is_above(&pos(1, 60.0)));
    }

    #[test]
    fn test_roomier_prefers_shorter_column() {
        let (mut left, mut right) = trackers(pos(0, 300.0), pos(0, 500.0));
        assert_eq!(roomier(&mut left, &mut right).column, Column::Left);

        let (mut left, mut right) = trackers(pos(0, 500.0), pos(0, 300.0));
        assert_eq!(roomier(&mut left, &mut right).column, Column::Right);
    }

    #[test]
    fn test_roomier_tie_goes_right() {
        let (mut left, mut right) = trackers(pos(0, 400.0), pos(0, 400.0));
        assert_eq!(roomier(&mut left, &mut right).column, Column::Right);
    }

    #[test]
    fn test_roomier_counts_spilled_pages_as_fuller() {
        let (mut left, mut right) = trackers(pos(1, 120.0), pos(0, 700.0));
        assert_eq!(roomier(&mut left, &mut right).column, Column::Right);
    }

    #[test]
    fn test_append_applies_gap_after_first_section() {
        let mut canvas = Canvas::new(default_page_geometry());
        let mut column = ColumnTracker::new(Column::Right, 310.0, 230.0, pos(0, 200.0));

        column
            .append(&mut canvas, |c, width| {
                assert_eq!((c.x, c.y), (310.0, 200.0));
                assert_eq!(width, 230.0);
                c.y += 40.0;
                Ok(())
            })
            .unwrap();
        assert_eq!(column.current_height(), pos(0, 240.0));

        column
            .append(&mut canvas, |c, _| {
                assert_eq!(c.y, 250.0);
                Ok(())
            })
            .unwrap();
        assert_eq!(column.current_height(), pos(0, 250.0));
    }

    #[test]
    fn test_append_returns_to_the_column_page() {
        let mut canvas = Canvas::new(default_page_geometry());
        canvas.next_page();
        let mut column = ColumnTracker::new(Column::Left, 50.0, 230.0, pos(0, 100.0));
        column
            .append(&mut canvas, |c, _| {
                assert_eq!(c.current_page(), 0);
                Ok(())
            })
            .unwrap();
    }
}
