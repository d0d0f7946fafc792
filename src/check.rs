use anyhow::{Context, Result};
use chrono::NaiveTime;
use tracing::{info, warn};

use crate::api::{AccountNumber, OutageClient};
use crate::predictor::{self, Advisory};
use crate::schedule::HourLabels;
use crate::voice::Announcer;

/// One full run: fetch today's schedule, predict, announce.
///
/// Returns the advisory that was announced, if any.
pub async fn run_check(
    client: &OutageClient,
    account: &AccountNumber,
    labels: HourLabels,
    now: NaiveTime,
    announcer: &dyn Announcer,
) -> Result<Option<Advisory>> {
    let response = client
        .fetch_schedule(account)
        .await
        .context("Failed to fetch outage schedule")?;

    if let Some(note) = response.current.as_ref().and_then(|c| c.note.as_deref()) {
        info!("{}", note);
    }

    let schedule = response
        .today(labels)
        .context("Failed to read today's schedule")?;
    if !schedule.is_complete() {
        warn!(missing = ?schedule.missing_hours(), "Schedule is missing some hours");
    }

    match predictor::transition_at(&schedule, &now) {
        Some(t) => info!(current = %t.current, next = %t.next, at = %now.format("%H:%M"), "Status"),
        None => warn!(at = %now.format("%H:%M"), "No schedule data for the current or next hour"),
    }

    let Some(advisory) = predictor::predict(&schedule, &now) else {
        info!("No power change expected in the next {} minutes", predictor::WARNING_WINDOW_MINUTES);
        return Ok(None);
    };

    info!("{}", advisory);
    announcer
        .announce(advisory.message())
        .context("Failed to announce advisory")?;
    Ok(Some(advisory))
}
