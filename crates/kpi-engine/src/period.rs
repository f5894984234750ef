//! Period resolution: cycle month ranges, measurement months per frequency,
//! and which months are active for a measurable.

use chrono::Datelike;
use kpi_core::{ActiveQuarters, Cycle, Frequency, Measurable, Measurement, Quarter};

use crate::months::MonthSet;

/// Inclusive month range covered by a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: u8,
    pub end: u8,
}

impl MonthRange {
    #[must_use]
    pub fn months(self) -> MonthSet {
        MonthSet::range(self.start, self.end)
    }
}

/// `q1 → 1..=3` ... `q4 → 10..=12`, `anual → 1..=12`.
#[must_use]
pub const fn month_range_for_cycle(cycle: Cycle) -> MonthRange {
    match cycle.quarter() {
        Some(quarter) => {
            let (start, end) = quarter.months();
            MonthRange { start, end }
        }
        None => MonthRange { start: 1, end: 12 },
    }
}

/// Months in which a check-in is structurally expected.
#[must_use]
pub fn measurement_months(frequency: Frequency) -> MonthSet {
    match frequency {
        Frequency::Monthly => MonthSet::ALL,
        Frequency::Quarterly => [3, 6, 9, 12].into_iter().collect(),
        Frequency::Semiannual => [6, 12].into_iter().collect(),
        Frequency::Annual => [12].into_iter().collect(),
    }
}

/// A month is active when it is not before `start_month` and its quarter is enabled.
#[must_use]
pub fn is_month_active(month: u8, quarters: &ActiveQuarters, start_month: u8) -> bool {
    if month < start_month {
        return false;
    }
    Quarter::of_month(month).is_some_and(|q| quarters.is_enabled(q))
}

/// Every active month of the year.
#[must_use]
pub fn active_months(quarters: &ActiveQuarters, start_month: u8) -> MonthSet {
    MonthSet::ALL
        .iter()
        .filter(|&m| is_month_active(m, quarters, start_month))
        .collect()
}

/// Active months that are also measurement months for `frequency`.
#[must_use]
pub fn scheduled_months(quarters: &ActiveQuarters, start_month: u8, frequency: Frequency) -> MonthSet {
    active_months(quarters, start_month).intersect(measurement_months(frequency))
}

/// Whether `measurable` has anything to measure inside `cycle`.
///
/// The annual cycle always qualifies. A measurable whose own cycle is annual
/// qualifies for a quarter when that quarter is enabled. Otherwise the cycle's
/// months are scanned for one that is a measurement month, at or after the
/// start month, and in an enabled quarter.
#[must_use]
pub fn has_active_months_in_cycle(measurable: &Measurable, cycle: Cycle) -> bool {
    let Some(quarter) = cycle.quarter() else {
        return true;
    };

    if measurable.cycle == Cycle::Annual {
        return measurable.active_quarters.is_enabled(quarter);
    }

    let measured = measurement_months(measurable.frequency);
    month_range_for_cycle(cycle).months().iter().any(|m| {
        measured.contains(m)
            && is_month_active(m, &measurable.active_quarters, measurable.start_month_value())
    })
}

/// The (year, month) an evaluation is computed at. Months after it have not
/// happened yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsOf {
    pub year: i32,
    pub month: u8,
}

impl AsOf {
    /// `month` is clamped into `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u8) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    #[must_use]
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self::new(date.year(), u8::try_from(date.month()).unwrap_or(12))
    }
}

/// Months (and optionally a year) a check-in must fall in to be consolidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub year: Option<i32>,
    pub months: MonthSet,
}

impl PeriodWindow {
    #[must_use]
    pub const fn new(year: i32, months: MonthSet) -> Self {
        Self {
            year: Some(year),
            months,
        }
    }

    /// A window that accepts check-ins from any year.
    #[must_use]
    pub const fn any_year(months: MonthSet) -> Self {
        Self { year: None, months }
    }

    #[must_use]
    pub fn contains(&self, measurement: &Measurement) -> bool {
        self.months.contains(measurement.month) && self.year.is_none_or(|y| y == measurement.year)
    }
}

/// The month windows an evaluation needs for one measurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationWindow {
    /// Active months of the cycle up to the as-of month, in the as-of year.
    pub realized: PeriodWindow,
    /// Scheduled months of the cycle up to the as-of month.
    pub planned: MonthSet,
    /// Scheduled months of the whole cycle.
    pub full: MonthSet,
    /// Scheduled months of the whole year.
    pub scheduled: MonthSet,
}

impl EvaluationWindow {
    #[must_use]
    pub fn new(measurable: &Measurable, as_of: AsOf) -> Self {
        let range = month_range_for_cycle(measurable.cycle);
        let start_month = measurable.start_month_value();
        let active = active_months(&measurable.active_quarters, start_month);
        let scheduled = active.intersect(measurement_months(measurable.frequency));

        let cycle = range.months();
        let to_date = MonthSet::range(range.start, as_of.month.min(range.end));

        Self {
            realized: PeriodWindow::new(as_of.year, to_date.intersect(active)),
            planned: to_date.intersect(scheduled),
            full: cycle.intersect(scheduled),
            scheduled,
        }
    }
}
