// Resume layout: page-buffered canvas, two-column engine, PDF serialization.
// Rendering is CPU-bound; async callers go through `render_resume_blocking`,
// which runs it inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod columns;
pub mod engine;
pub mod error;
pub mod font_metrics;
pub mod geometry;
pub mod pdf;
pub mod style;
pub mod wrap;

// Re-export the public API consumed by other modules (handlers, main).
pub use engine::{render_resume, RenderedDocument};
pub use error::RenderError;
pub use geometry::{default_page_geometry, PageGeometry};

use crate::models::resume::ResumeRecord;

/// Renders on the blocking pool so the request executor stays free.
///
/// Each call owns its record and canvas; nothing is shared between renders.
pub async fn render_resume_blocking(
    record: ResumeRecord,
    geometry: PageGeometry,
) -> Result<RenderedDocument, RenderError> {
    tokio::task::spawn_blocking(move || render_resume(&record, &geometry))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blocking_render_produces_pdf() {
        let record = ResumeRecord::default();
        let rendered = render_resume_blocking(record, default_page_geometry())
            .await
            .unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(rendered.page_count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_renders_are_independent() {
        let a = ResumeRecord::default();
        let mut b = ResumeRecord::default();
        b.personal.name = Some("Grace Hopper".to_string());

        let (ra, rb, ra2) = tokio::join!(
            render_resume_blocking(a.clone(), default_page_geometry()),
            render_resume_blocking(b, default_page_geometry()),
            render_resume_blocking(a, default_page_geometry()),
        );
        let (ra, rb, ra2) = (ra.unwrap(), rb.unwrap(), ra2.unwrap());
        assert_eq!(ra.bytes, ra2.bytes);
        assert_ne!(ra.bytes, rb.bytes);
    }
}
