mod renderer;
mod scheduler;

pub use renderer::{MapRenderer, NullRenderer};
pub use scheduler::{PlaybackScheduler, TaskHandle};
