use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only after startup. Every render builds its own canvas from `geometry`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page size, margins and column positions for every rendered resume.
    pub geometry: PageGeometry,
}
