mod book;
mod entry;
mod evaluator;

pub use book::{AlarmBook, AlarmDraft};
pub use entry::{Alarm, DaySet, TimeOfDay, DEFAULT_LABEL};
pub use evaluator::AlarmEvaluator;
