pub mod api;
pub mod check;
pub mod config;
pub mod error;
pub mod predictor;
pub mod schedule;
pub mod voice;

pub use check::run_check;
pub use predictor::{predict, Advisory};
pub use schedule::{DaySchedule, Electricity, HourLabels, HourStatus};
