//! Per-order production tracking: the canonical step catalog, the timeline
//! state machine, and client-facing progress updates.

pub mod domain;
pub mod progress;
pub mod timeline;

pub use domain::{OrderStatus, ProductionStep, TimelineStep};
pub use progress::{ProgressUpdate, ShareKey};
pub use timeline::ProductionTimeline;
