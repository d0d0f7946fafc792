//! Decides whether the power state is about to change.
//!
//! The check only looks at the current hour and the next one. Near the end
//! of an hour (inside [`WARNING_WINDOW_MINUTES`]) the pair of statuses is
//! matched against [`TRANSITIONS`]; everything else is silence.

use chrono::Timelike;
use std::fmt;

use crate::schedule::{DaySchedule, Electricity, HOURS_PER_DAY};

/// How far ahead of the hour boundary an advisory is raised.
pub const WARNING_WINDOW_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    ScheduledOutage,
    PossibleOutage,
    PowerRestoring,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::ScheduledOutage => "A scheduled power outage is expected in 15 minutes",
            Advisory::PossibleOutage => "A possible power outage is expected in 15 minutes",
            Advisory::PowerRestoring => "Power is expected to be restored in 15 minutes",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// `(current hour, next hour) -> advisory`. Pairs not listed raise nothing.
pub const TRANSITIONS: [(Electricity, Electricity, Advisory); 4] = [
    (
        Electricity::Power,
        Electricity::ScheduledOutage,
        Advisory::ScheduledOutage,
    ),
    (
        Electricity::Power,
        Electricity::PossibleOutage,
        Advisory::PossibleOutage,
    ),
    (
        Electricity::ScheduledOutage,
        Electricity::Power,
        Advisory::PowerRestoring,
    ),
    (
        Electricity::PossibleOutage,
        Electricity::Power,
        Advisory::PowerRestoring,
    ),
];

/// The statuses of the hour containing `now` and of the hour after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub current: Electricity,
    pub next: Electricity,
}

impl Transition {
    pub fn advisory(&self) -> Option<Advisory> {
        TRANSITIONS
            .iter()
            .find(|(current, next, _)| *current == self.current && *next == self.next)
            .map(|(_, _, advisory)| *advisory)
    }
}

/// Looks up the current and next hour. Hour 23 wraps to hour 0 of the same
/// table; tomorrow's schedule is never consulted.
pub fn transition_at<T: Timelike>(schedule: &DaySchedule, now: &T) -> Option<Transition> {
    let hour = now.hour();
    let current = schedule.status_at(hour)?;
    let next = schedule.status_at((hour + 1) % HOURS_PER_DAY as u32)?;
    Some(Transition { current, next })
}

pub fn minutes_to_next_hour<T: Timelike>(now: &T) -> u32 {
    60 - now.minute()
}

/// Returns the advisory to announce at `now`, if any.
///
/// Missing schedule entries for either hour yield `None`.
pub fn predict<T: Timelike>(schedule: &DaySchedule, now: &T) -> Option<Advisory> {
    if minutes_to_next_hour(now) > WARNING_WINDOW_MINUTES {
        return None;
    }
    transition_at(schedule, now)?.advisory()
}
