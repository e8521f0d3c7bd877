//! # holmap-timeline
//!
//! Ordered time windows over the feature set. Moving between windows is
//! an incremental set difference: features leaving the window are hidden,
//! retained ones are re-asserted, arrivals are shown and highlighted.
//!
//! Auto-play is a cancellable repeating task obtained from a
//! [`PlaybackScheduler`](holmap_core::traits::PlaybackScheduler); the
//! engine never owns a timer itself.

pub mod engine;
pub mod playback;
pub mod points;

pub use engine::{Step, TimelineEngine};
pub use playback::{drive_playback, ManualScheduler};
pub use points::{build_points, parse_point};
