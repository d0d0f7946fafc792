use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::schedule::{DaySchedule, Electricity, HourLabels, HourStatus};

/// Body of `GavGroupByAccountNumber`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub current: Option<QueueInfo>,
    pub graphs: Graphs,
}

/// Which outage queue the account belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueueInfo {
    pub note: Option<String>,
    pub has_queue: Option<String>,
    pub queue: Option<i64>,
    pub subqueue: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Graphs {
    #[serde(default)]
    pub today: Option<DayGraph>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayGraph {
    #[serde(default)]
    pub hours_list: Vec<RawHour>,
    pub event_date: Option<String>,
    pub schedule_approved_since: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawHour {
    pub hour: String,
    pub electricity: i64,
}

impl DayGraph {
    pub fn to_schedule(&self, labels: HourLabels) -> Result<DaySchedule, ScheduleError> {
        let entries = self
            .hours_list
            .iter()
            .map(|raw| {
                Ok(HourStatus {
                    hour: labels.hour_of(&raw.hour)?,
                    electricity: Electricity::try_from(raw.electricity)?,
                })
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;
        DaySchedule::from_entries(entries)
    }
}

impl ScheduleResponse {
    /// Normalizes today's hour list into a [`DaySchedule`].
    pub fn today(&self, labels: HourLabels) -> Result<DaySchedule, ScheduleError> {
        self.graphs
            .today
            .as_ref()
            .ok_or(ScheduleError::NoScheduleForToday)?
            .to_schedule(labels)
    }
}
