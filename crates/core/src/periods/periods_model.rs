use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::TipRecord;

/// Granularity of the reporting period shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodGranularity {
    Day,
    Month,
    Year,
}

/// The period the dashboard is currently looking at.
///
/// Fields are private: the reference date only moves through [`advance`],
/// so every period change flows through one auditable path.
///
/// [`advance`]: ReportingPeriod::advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    granularity: PeriodGranularity,
    reference: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(granularity: PeriodGranularity, reference: NaiveDate) -> Self {
        Self {
            granularity,
            reference,
        }
    }

    pub fn granularity(&self) -> PeriodGranularity {
        self.granularity
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Returns the same period viewed at a different granularity. The
    /// reference date stays where it is.
    pub fn with_granularity(self, granularity: PeriodGranularity) -> Self {
        Self {
            granularity,
            ..self
        }
    }

    /// Moves the reference date by `delta` whole units of the current
    /// granularity. Month arithmetic clamps to the last valid day of the
    /// target month (Jan 31 + 1 month lands on Feb 28/29) and rolls across
    /// year boundaries. A shift past the representable date range leaves
    /// the reference unchanged.
    pub fn advance(&mut self, delta: i32) {
        let shifted = match self.granularity {
            PeriodGranularity::Day => shift_days(self.reference, delta),
            PeriodGranularity::Month => shift_months(self.reference, delta),
            PeriodGranularity::Year => shift_months(self.reference, delta.saturating_mul(12)),
        };
        if let Some(reference) = shifted {
            self.reference = reference;
        }
    }

    /// True when `date` falls inside the period. Time-of-day never enters
    /// the comparison; periods are calendar buckets.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.granularity {
            PeriodGranularity::Day => date == self.reference,
            PeriodGranularity::Month => {
                date.year() == self.reference.year() && date.month() == self.reference.month()
            }
            PeriodGranularity::Year => date.year() == self.reference.year(),
        }
    }

    /// Keeps the records whose `occurred_on` falls inside the period,
    /// preserving the input order.
    pub fn select(&self, records: &[TipRecord]) -> Vec<TipRecord> {
        records
            .iter()
            .filter(|record| self.contains(record.occurred_on))
            .cloned()
            .collect()
    }
}

fn shift_days(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(u64::from(delta.unsigned_abs())))
    }
}

fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
}
