use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

pub const HOURS_PER_DAY: u8 = 24;

/// Electricity status of a single hour, as reported by the utility.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub enum Electricity {
    Power,
    ScheduledOutage,
    PossibleOutage,
}

impl TryFrom<i64> for Electricity {
    type Error = ScheduleError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Electricity::Power),
            1 => Ok(Electricity::ScheduledOutage),
            2 => Ok(Electricity::PossibleOutage),
            other => Err(ScheduleError::UnknownStatus(other)),
        }
    }
}

impl From<Electricity> for i64 {
    fn from(status: Electricity) -> Self {
        match status {
            Electricity::Power => 0,
            Electricity::ScheduledOutage => 1,
            Electricity::PossibleOutage => 2,
        }
    }
}

impl fmt::Display for Electricity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Electricity::Power => "power",
            Electricity::ScheduledOutage => "scheduled outage",
            Electricity::PossibleOutage => "possible outage",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourStatus {
    pub hour: u8,
    pub electricity: Electricity,
}

/// How the API's `"1".."24"` hour labels line up with wall-clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourLabels {
    /// Label `n` is hour `n mod 24`, so `"24"` is midnight.
    #[default]
    Wrapped,
    /// Label `n` is the slot ending at `n:00`, i.e. hour `n - 1`.
    OneBased,
}

impl HourLabels {
    /// Maps a raw label such as `"24"` onto an hour in `0..24`.
    pub fn hour_of(self, label: &str) -> Result<u8, ScheduleError> {
        let invalid = || ScheduleError::InvalidHourLabel(label.to_string());
        let digits = label.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let n: u8 = digits.parse().map_err(|_| invalid())?;

        match self {
            HourLabels::Wrapped if n <= HOURS_PER_DAY => Ok(n % HOURS_PER_DAY),
            HourLabels::OneBased if (1..=HOURS_PER_DAY).contains(&n) => Ok(n - 1),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for HourLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrapped" => Ok(HourLabels::Wrapped),
            "one-based" => Ok(HourLabels::OneBased),
            other => Err(format!(
                "unknown hour label convention '{}' (expected 'wrapped' or 'one-based')",
                other
            )),
        }
    }
}

impl fmt::Display for HourLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourLabels::Wrapped => f.write_str("wrapped"),
            HourLabels::OneBased => f.write_str("one-based"),
        }
    }
}

/// Per-hour electricity status for one calendar day, keyed by hour 0..=23.
///
/// The table may have gaps when the utility returns partial data; lookups
/// for a missing hour return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DaySchedule {
    hours: [Option<Electricity>; HOURS_PER_DAY as usize],
}

impl DaySchedule {
    pub fn from_entries<I>(entries: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = HourStatus>,
    {
        let mut schedule = DaySchedule::default();
        for entry in entries {
            let slot = schedule
                .hours
                .get_mut(entry.hour as usize)
                .ok_or(ScheduleError::HourOutOfRange(entry.hour))?;
            if slot.is_some() {
                return Err(ScheduleError::DuplicateHour(entry.hour));
            }
            *slot = Some(entry.electricity);
        }
        Ok(schedule)
    }

    pub fn status_at(&self, hour: u32) -> Option<Electricity> {
        self.hours.get(hour as usize).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.hours.iter().all(Option::is_some)
    }

    pub fn missing_hours(&self) -> Vec<u8> {
        (0..HOURS_PER_DAY)
            .filter(|h| self.hours[*h as usize].is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = HourStatus> + '_ {
        self.hours.iter().enumerate().filter_map(|(hour, status)| {
            status.map(|electricity| HourStatus {
                hour: hour as u8,
                electricity,
            })
        })
    }
}
