/// Physical page and column layout, in PDF points (1/72 in).
///
/// All vertical positions used by the canvas are measured from the top edge.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,
    pub left_column_x: f32,
    pub right_column_x: f32,
    pub column_width: f32,
    /// Widest line the professional summary may use.
    pub summary_width: f32,
    /// Distance of the footer line box from the bottom edge.
    pub footer_offset: f32,
}

/// ISO A4 portrait, 50pt margins, two 230pt columns with a 30pt gutter.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 50.0,
        left_column_x: 50.0,
        right_column_x: 310.0,
        column_width: 230.0,
        summary_width: 500.0,
        footer_offset: 30.0,
    }
}

impl PageGeometry {
    pub fn content_left(&self) -> f32 {
        self.margin
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.content_right() - self.content_left()
    }

    pub fn content_top(&self) -> f32 {
        self.margin
    }

    /// Lowest y a line box may reach before text moves to the next page.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_sit_inside_margins() {
        let g = default_page_geometry();
        assert_eq!(g.left_column_x, g.content_left());
        assert_eq!(g.left_column_x + g.column_width, 280.0);
        assert_eq!(g.right_column_x + g.column_width, 540.0);
        assert!(g.right_column_x + g.column_width <= g.content_right());
    }

    #[test]
    fn test_default_is_a4() {
        let g = default_page_geometry();
        assert!((g.width - 595.28).abs() < 1e-3);
        assert!((g.height - 841.89).abs() < 1e-3);
        assert!((g.content_bottom() - 791.89).abs() < 1e-3);
    }
}
