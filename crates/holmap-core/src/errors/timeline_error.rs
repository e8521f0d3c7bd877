/// Timeline subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("the map has no timeline")]
    NoTimeline,

    #[error("the timeline is disabled")]
    Disabled,

    #[error("timeline index {index} out of range ({len} points)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot step {direction} from timeline index {index}")]
    StepDisabled { direction: &'static str, index: usize },

    #[error("malformed timeline point {position}: {reason}")]
    MalformedPoint { position: usize, reason: String },
}
