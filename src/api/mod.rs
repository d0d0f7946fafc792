pub mod account;
pub mod client;
pub mod types;

pub use account::AccountNumber;
pub use client::{ApiConfig, OutageClient, DEFAULT_ENDPOINT};
pub use types::{DayGraph, Graphs, QueueInfo, RawHour, ScheduleResponse};
