use thiserror::Error;

use crate::api::AccountNumber;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid hour label '{0}'")]
    InvalidHourLabel(String),
    #[error("unknown electricity status code {0}")]
    UnknownStatus(i64),
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u8),
    #[error("hour {0} appears more than once in the schedule")]
    DuplicateHour(u8),
    #[error("response has no schedule for today")]
    NoScheduleForToday,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid account number '{0}': it must be exactly 8 digits")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to outage API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the account number {0} is incorrect")]
    AccountNotFound(AccountNumber),
    #[error("outage API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("error parsing JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}
