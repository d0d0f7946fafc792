//! Hour-label conventions checked against a real response from the utility.

use chrono::NaiveTime;
use outage_alert::api::ScheduleResponse;
use outage_alert::{predict, Advisory, DaySchedule, Electricity, HourLabels};

const SAMPLE: &str = include_str!("fixtures/sample_response.json");

fn schedule(labels: HourLabels) -> DaySchedule {
    let response: ScheduleResponse = serde_json::from_str(SAMPLE).unwrap();
    response.today(labels).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn sample_parses_with_queue_info() {
    let response: ScheduleResponse = serde_json::from_str(SAMPLE).unwrap();
    let current = response.current.unwrap();
    assert_eq!(current.queue, Some(5));
    assert_eq!(current.subqueue, Some(2));
    assert_eq!(current.has_queue.as_deref(), Some("yes"));

    let today = response.graphs.today.unwrap();
    assert_eq!(today.hours_list.len(), 24);
    assert_eq!(today.event_date.as_deref(), Some("2024-07-11"));
}

#[test]
fn both_conventions_yield_a_full_day() {
    for labels in [HourLabels::Wrapped, HourLabels::OneBased] {
        let s = schedule(labels);
        assert!(s.is_complete(), "{} should cover every hour", labels);
        assert!(s.missing_hours().is_empty());
    }
}

#[test]
fn wrapped_reads_labels_as_wall_clock_hours() {
    let s = schedule(HourLabels::Wrapped);
    assert_eq!(s.status_at(0), Some(Electricity::Power)); // label "24"
    assert_eq!(s.status_at(3), Some(Electricity::ScheduledOutage));
    assert_eq!(s.status_at(10), Some(Electricity::Power));
    assert_eq!(s.status_at(11), Some(Electricity::ScheduledOutage));

    assert_eq!(predict(&s, &at(9, 50)), None);
    assert_eq!(predict(&s, &at(2, 50)), Some(Advisory::ScheduledOutage));
    assert_eq!(predict(&s, &at(10, 50)), Some(Advisory::ScheduledOutage));
    assert_eq!(predict(&s, &at(15, 50)), Some(Advisory::PowerRestoring));
    assert_eq!(predict(&s, &at(22, 50)), Some(Advisory::PowerRestoring));
    assert_eq!(predict(&s, &at(23, 50)), None);
}

#[test]
fn one_based_shifts_labels_back_an_hour() {
    let s = schedule(HourLabels::OneBased);
    assert_eq!(s.status_at(0), Some(Electricity::Power)); // label "1"
    assert_eq!(s.status_at(2), Some(Electricity::ScheduledOutage)); // label "3"
    assert_eq!(s.status_at(23), Some(Electricity::Power)); // label "24"

    assert_eq!(predict(&s, &at(9, 50)), Some(Advisory::ScheduledOutage));
    assert_eq!(predict(&s, &at(1, 50)), Some(Advisory::ScheduledOutage));
    assert_eq!(predict(&s, &at(14, 50)), Some(Advisory::PowerRestoring));
    assert_eq!(predict(&s, &at(21, 50)), Some(Advisory::PowerRestoring));
    assert_eq!(predict(&s, &at(23, 50)), None);
}

#[test]
fn nothing_before_minute_45_on_either_convention() {
    for labels in [HourLabels::Wrapped, HourLabels::OneBased] {
        let s = schedule(labels);
        for hour in 0..24 {
            assert_eq!(predict(&s, &at(hour, 44)), None);
        }
    }
}
