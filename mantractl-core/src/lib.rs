pub mod model;
pub mod stats;

pub use model::{Mantra, PracticeSession, UserId};
pub use stats::{summarize, DayActivity, StatsSummary, ACTIVITY_WINDOW_DAYS};
