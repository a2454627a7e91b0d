//! Reshaping of the flat 3-hour sample list into today's strip and a daily
//! outlook.

use chrono::{FixedOffset, NaiveDate, Timelike};
use tracing::warn;

use crate::model::ForecastSample;

/// First local hour a slot may start at to represent its day.
pub const DAILY_CUTOFF_HOUR: u32 = 6;

/// The sample chosen for one calendar date.
///
/// `sample` is `None` when the date has no slot at or after the cutoff hour,
/// e.g. the last day of a window that ends before 06:00.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary<'a> {
    pub date: NaiveDate,
    pub sample: Option<&'a ForecastSample>,
}

/// Samples for the hourly strip. The list is shown as delivered.
pub fn today_samples(samples: &[ForecastSample]) -> &[ForecastSample] {
    samples
}

/// Pick one representative sample per distinct UTC date, in first-seen order.
///
/// Dates come from the UTC day of each timestamp; the cutoff is checked
/// against the hour at `offset`. Input order is trusted, nothing is sorted.
pub fn derive_daily_summaries(
    samples: &[ForecastSample],
    offset: FixedOffset,
) -> Vec<DailySummary<'_>> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for date in samples.iter().filter_map(ForecastSample::utc_date) {
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    dates
        .into_iter()
        .map(|date| {
            let sample = samples.iter().find(|s| {
                s.utc_date() == Some(date)
                    && local_hour(s, offset).is_some_and(|h| h >= DAILY_CUTOFF_HOUR)
            });

            if sample.is_none() {
                warn!(%date, "no sample at or after {DAILY_CUTOFF_HOUR}:00, leaving day empty");
            }

            DailySummary { date, sample }
        })
        .collect()
}

fn local_hour(sample: &ForecastSample, offset: FixedOffset) -> Option<u32> {
    sample.utc_time().map(|t| t.with_timezone(&offset).hour())
}
