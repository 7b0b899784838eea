// Resume generation: request normalization and the HTTP handler that drives the
// layout engine. All rendering goes through crate::layout.

pub mod handlers;
pub mod skills;
