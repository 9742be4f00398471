use crate::date::resolve_local;
use chrono::{prelude::*, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How often a stored `Event` repeats.
///
/// A single stored record with a `Recurrence` represents the whole series.
/// Every interval is a fixed duration: `Monthly` is 30 days and does not
/// follow calendar months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn interval(&self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::weeks(1),
            Self::Monthly => Duration::days(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses client input where `none` and the empty string mean
    /// "does not repeat"
    pub fn parse_optional(value: &str) -> Result<Option<Self>, InvalidRecurrenceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("recurrence must be one of none, daily, weekly or monthly. Got: `{0}`")]
pub struct InvalidRecurrenceError(pub String);

impl FromStr for Recurrence {
    type Err = InvalidRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(InvalidRecurrenceError(s.to_string())),
        }
    }
}

/// Resolves the next occurrence of an event starting at `start` that is not
/// before `now`.
///
/// A one-shot event that already started has no next occurrence. A
/// recurring event is advanced by whole intervals until it reaches `now`.
/// The number of intervals is computed directly so the work does not grow
/// with the age of the series.
pub fn next_occurrence(
    start: DateTime<Utc>,
    recurrence: Option<Recurrence>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if start >= now {
        return Some(start);
    }

    let recurrence = recurrence?;
    let interval = recurrence.interval().num_milliseconds();
    let elapsed = (now - start).num_milliseconds();
    // Round up to the first whole interval that is not before `now`
    let steps = (elapsed + interval - 1) / interval;

    Some(start + Duration::milliseconds(steps * interval))
}

/// Same as [`next_occurrence`] for a series whose start has no offset.
///
/// Intervals are added to the wall-clock time in `tz`, so a daily 10:00
/// event stays at 10:00 local time across DST changes. An occurrence that
/// falls into a DST gap is moved one hour forward.
pub fn next_local_occurrence(
    start: NaiveDateTime,
    recurrence: Option<Recurrence>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let resolve = |local: NaiveDateTime| {
        resolve_local(&local, tz).or_else(|| resolve_local(&(local + Duration::hours(1)), tz))
    };

    let first = resolve(start)?;
    if first >= now {
        return Some(first);
    }

    let recurrence = recurrence?;
    let interval = recurrence.interval().num_milliseconds();
    let now_local = now.with_timezone(tz).naive_local();
    let elapsed = (now_local - start).num_milliseconds().max(0);
    let mut steps = (elapsed + interval - 1) / interval;

    // Ambiguous local times can resolve slightly before `now`
    loop {
        let local = start + Duration::milliseconds(steps * interval);
        match resolve(local) {
            Some(occurrence) if occurrence >= now => return Some(occurrence),
            _ => steps += 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_recurrence_input() {
        assert_eq!(Recurrence::parse_optional("daily"), Ok(Some(Recurrence::Daily)));
        assert_eq!(Recurrence::parse_optional("Weekly"), Ok(Some(Recurrence::Weekly)));
        assert_eq!(Recurrence::parse_optional("monthly"), Ok(Some(Recurrence::Monthly)));
        assert_eq!(Recurrence::parse_optional("None"), Ok(None));
        assert_eq!(Recurrence::parse_optional(""), Ok(None));
        assert!(Recurrence::parse_optional("yearly").is_err());
    }

    #[test]
    fn future_events_keep_their_start() {
        let start = now() + Duration::minutes(45);
        assert_eq!(next_occurrence(start, None, now()), Some(start));
        assert_eq!(
            next_occurrence(start, Some(Recurrence::Daily), now()),
            Some(start)
        );
    }

    #[test]
    fn elapsed_one_shot_events_have_no_next_occurrence() {
        let start = now() - Duration::minutes(1);
        assert_eq!(next_occurrence(start, None, now()), None);
    }

    #[test]
    fn daily_event_two_days_old_advances_by_whole_days() {
        let start = now() - Duration::days(2);
        let next = next_occurrence(start, Some(Recurrence::Daily), now()).unwrap();
        assert!(next >= now());

        let elapsed = next - start;
        assert_eq!(elapsed.num_milliseconds() % Duration::days(1).num_milliseconds(), 0);
        assert!(elapsed.num_days() < 3);
        assert_eq!(next, now());
    }

    #[test]
    fn recurring_events_land_on_the_first_occurrence_after_now() {
        let start = now() - Duration::days(2) - Duration::hours(1);
        assert_eq!(
            next_occurrence(start, Some(Recurrence::Daily), now()),
            Some(now() + Duration::hours(23))
        );
        assert_eq!(
            next_occurrence(start, Some(Recurrence::Weekly), now()),
            Some(start + Duration::weeks(1))
        );

        let start = now() - Duration::days(31);
        assert_eq!(
            next_occurrence(start, Some(Recurrence::Monthly), now()),
            Some(start + Duration::days(60))
        );
    }

    #[test]
    fn old_series_resolve_without_walking_every_interval() {
        let start = Utc.with_ymd_and_hms(1970, 1, 1, 12, 0, 0).unwrap();
        let next = next_occurrence(start, Some(Recurrence::Daily), now()).unwrap();
        assert_eq!(next, now());
    }

    fn oslo(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Tz::Europe__Oslo
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn local_series_keep_their_wall_clock_time_across_dst() {
        // Starts in CET, clocks move to CEST on 2024-03-31
        let start = local(2024, 3, 29, 10);
        let now = oslo(2024, 4, 2, 9, 30);
        assert_eq!(
            next_local_occurrence(start, Some(Recurrence::Daily), now, &Tz::Europe__Oslo),
            Some(oslo(2024, 4, 2, 10, 0))
        );

        let now = oslo(2024, 4, 2, 10, 30);
        assert_eq!(
            next_local_occurrence(start, Some(Recurrence::Daily), now, &Tz::Europe__Oslo),
            Some(oslo(2024, 4, 3, 10, 0))
        );
    }

    #[test]
    fn local_occurrences_in_a_dst_gap_move_forward() {
        // 02:00 does not exist in Oslo on 2024-03-31
        let start = local(2024, 3, 30, 2);
        let now = oslo(2024, 3, 30, 12, 0);
        assert_eq!(
            next_local_occurrence(start, Some(Recurrence::Daily), now, &Tz::Europe__Oslo),
            Some(oslo(2024, 3, 31, 3, 0))
        );
    }

    #[test]
    fn local_one_shot_events() {
        let start = local(2024, 4, 2, 10);
        assert_eq!(
            next_local_occurrence(start, None, oslo(2024, 4, 2, 9, 0), &Tz::Europe__Oslo),
            Some(oslo(2024, 4, 2, 10, 0))
        );
        assert_eq!(
            next_local_occurrence(start, None, oslo(2024, 4, 2, 11, 0), &Tz::Europe__Oslo),
            None
        );
    }

    #[test]
    fn local_series_match_the_utc_arithmetic_in_utc() {
        let start = local(2021, 2, 19, 11);
        let utc_start = Utc.from_utc_datetime(&start);
        for recurrence in [Recurrence::Daily, Recurrence::Weekly, Recurrence::Monthly] {
            assert_eq!(
                next_local_occurrence(start, Some(recurrence), now(), &Tz::UTC),
                next_occurrence(utc_start, Some(recurrence), now())
            );
        }
    }
}
