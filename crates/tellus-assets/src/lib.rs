//! Remote texture pipeline: ordered HTTPS fetch, image decode, and load
//! progress reporting.
//!
//! Fetches are blocking and strictly sequential. That is a contract, not a
//! limitation: the progress milestones are defined by load order, so the
//! color map must finish before the bump map starts, and so on.

pub mod fetch;
pub mod progress;

pub use fetch::{HttpFetcher, ImageFetcher, TextureLoadError};
pub use progress::{LoadMilestone, ProgressSink, RecordingSink};
