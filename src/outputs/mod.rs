//! Output handoff for external collaborators.
//!
//! The pipeline's only output obligation is a data handoff: the scored table
//! (one row per article, `{outlet, title, text, sentiment}`) that an external
//! visualizer turns into a grouped box plot (continuous scores) or count plot
//! (discrete labels). Rendering is not this crate's concern and a failed
//! write is logged, never fatal.

pub mod json;
