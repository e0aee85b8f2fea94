/// Metrics for habits: streaks and windowed progress
///
/// Everything here is a pure function of a completion set and a reference
/// "today", so results are deterministic and easy to test with fixed dates.

pub mod progress;
pub mod streak;

pub use progress::*;
pub use streak::*;
