mod countdown;
mod stopwatch;

pub use countdown::{parse_duration, Countdown, CountdownState};
pub use stopwatch::{format_elapsed, Stopwatch};
