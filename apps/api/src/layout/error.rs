use thiserror::Error;

/// Everything that can go wrong between a resume record and PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("page {index} out of range ({count} pages buffered)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("render task failed: {0}")]
    Task(String),
}
