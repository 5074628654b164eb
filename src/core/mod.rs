pub mod clock;
pub mod scheduler;
pub mod timer;

pub use clock::FpsCounter;
pub use scheduler::FrameScheduler;
pub use timer::{Countdown, Throttled};
