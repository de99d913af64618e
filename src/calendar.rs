use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_HISTORY_DAYS: i64 = 180;
pub const MAX_HISTORY_DAYS: i64 = 365 * 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: String,
    pub day_of_month: u32,
    pub day_of_week: u32,
    pub is_today: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub name: String,
    pub grid_column_start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub days: Vec<DayCell>,
    pub months: Vec<MonthLabel>,
}

pub fn build_calendar(earliest: NaiveDate, completed: &BTreeSet<String>) -> Calendar {
    build_calendar_at(Local::now().date_naive(), earliest, completed)
}

/// Days run from the Sunday on or before `earliest` through `today`.
/// An `earliest` after `today` is clamped to `today`.
pub fn build_calendar_at(
    today: NaiveDate,
    earliest: NaiveDate,
    completed: &BTreeSet<String>,
) -> Calendar {
    let start = week_start(earliest.min(today));
    let span = (today - start).num_days() as usize + 1;

    let mut days = Vec::with_capacity(span);
    let mut months = Vec::new();
    let mut current_month = None;

    for (day_index, date) in start.iter_days().take(span).enumerate() {
        let month = (date.year(), date.month());
        if current_month != Some(month) {
            months.push(MonthLabel {
                name: date.format("%b").to_string(),
                grid_column_start: day_index / 7 + 1,
            });
            current_month = Some(month);
        }

        let key = date_key(date);
        days.push(DayCell {
            is_completed: completed.contains(&key),
            date: key,
            day_of_month: date.day(),
            day_of_week: date.weekday().num_days_from_sunday(),
            is_today: date == today,
        });
    }

    Calendar { days, months }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Lower bound of the heatmap. Only ever grows backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRange {
    earliest: NaiveDate,
}

impl CalendarRange {
    pub fn starting(earliest: NaiveDate) -> Self {
        Self { earliest }
    }

    /// `history_days` is clamped to `0..=MAX_HISTORY_DAYS`.
    pub fn recent(today: NaiveDate, history_days: i64) -> Self {
        let back = Duration::days(history_days.clamp(0, MAX_HISTORY_DAYS));
        Self::starting(today.checked_sub_signed(back).unwrap_or(today))
    }

    pub fn earliest(&self) -> NaiveDate {
        self.earliest
    }

    pub fn load_more(&mut self) {
        if let Some(earlier) = self.earliest.checked_sub_months(Months::new(12)) {
            self.earliest = earlier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn starts_on_sunday_and_ends_today() {
        let today = ymd(2024, 3, 14);
        for offset in 0..14 {
            let earliest = today - Duration::days(30 + offset);
            let calendar = build_calendar_at(today, earliest, &BTreeSet::new());

            let first = calendar.days.first().expect("first day");
            assert_eq!(first.day_of_week, 0);

            let last = calendar.days.last().expect("last day");
            assert_eq!(last.date, "2024-03-14");
            assert!(last.is_today);
            assert_eq!(calendar.days.iter().filter(|day| day.is_today).count(), 1);
        }
    }

    #[test]
    fn day_count_covers_aligned_range() {
        let today = ymd(2024, 3, 14);
        let earliest = ymd(2024, 1, 3);
        let start = ymd(2023, 12, 31);
        assert_eq!(start.weekday(), Weekday::Sun);

        let calendar = build_calendar_at(today, earliest, &BTreeSet::new());
        assert_eq!(
            calendar.days.len() as i64,
            (today - start).num_days() + 1
        );
        assert_eq!(calendar.days[0].date, "2023-12-31");
    }

    #[test]
    fn days_are_consecutive() {
        let today = ymd(2024, 3, 1);
        let calendar = build_calendar_at(today, ymd(2023, 11, 20), &BTreeSet::new());
        for pair in calendar.days.windows(2) {
            let a = NaiveDate::parse_from_str(&pair[0].date, "%Y-%m-%d").unwrap();
            let b = NaiveDate::parse_from_str(&pair[1].date, "%Y-%m-%d").unwrap();
            assert_eq!(b - a, Duration::days(1));
        }
    }

    #[test]
    fn marks_completed_dates() {
        let completed = BTreeSet::from(["2024-01-01".to_string(), "2030-01-01".to_string()]);
        let calendar = build_calendar_at(ymd(2024, 1, 20), ymd(2023, 12, 1), &completed);

        let marked: Vec<_> = calendar
            .days
            .iter()
            .filter(|day| day.is_completed)
            .map(|day| day.date.as_str())
            .collect();
        assert_eq!(marked, vec!["2024-01-01"]);
    }

    #[test]
    fn month_labels_follow_week_columns() {
        // 2023-11-26 is a Sunday.
        let calendar = build_calendar_at(ymd(2024, 1, 20), ymd(2023, 11, 28), &BTreeSet::new());

        let labels: Vec<_> = calendar
            .months
            .iter()
            .map(|month| (month.name.as_str(), month.grid_column_start))
            .collect();
        // Dec 1 is day index 5, Jan 1 is day index 36.
        assert_eq!(labels, vec![("Nov", 1), ("Dec", 1), ("Jan", 6)]);
    }

    #[test]
    fn month_labels_distinguish_years() {
        let calendar = build_calendar_at(ymd(2024, 2, 10), ymd(2023, 1, 15), &BTreeSet::new());
        assert_eq!(calendar.months.len(), 14);
        assert_eq!(calendar.months.first().unwrap().name, "Jan");
        assert_eq!(calendar.months.last().unwrap().name, "Feb");
    }

    #[test]
    fn future_lower_bound_clamps_to_today() {
        let today = ymd(2024, 3, 14);
        let calendar = build_calendar_at(today, ymd(2024, 6, 1), &BTreeSet::new());

        assert_eq!(calendar.days.first().unwrap().date, "2024-03-10");
        assert_eq!(calendar.days.len(), 5);
        assert!(calendar.days.last().unwrap().is_today);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let completed = BTreeSet::from(["2024-02-02".to_string()]);
        let today = ymd(2024, 3, 14);
        let first = build_calendar_at(today, ymd(2024, 1, 1), &completed);
        let second = build_calendar_at(today, ymd(2024, 1, 1), &completed);
        assert_eq!(first, second);
    }

    #[test]
    fn load_more_moves_back_one_year() {
        let mut range = CalendarRange::recent(ymd(2024, 3, 14), 180);
        assert_eq!(range.earliest(), ymd(2023, 9, 16));

        range.load_more();
        assert_eq!(range.earliest(), ymd(2022, 9, 16));

        let mut leap = CalendarRange::starting(ymd(2024, 2, 29));
        leap.load_more();
        assert_eq!(leap.earliest(), ymd(2023, 2, 28));
    }

    #[test]
    fn recent_clamps_history_length() {
        let today = ymd(2024, 3, 14);
        assert_eq!(CalendarRange::recent(today, -3).earliest(), today);

        let far = CalendarRange::recent(today, 100_000_000);
        assert_eq!(far.earliest(), today - Duration::days(MAX_HISTORY_DAYS));
        let calendar = build_calendar_at(today, far.earliest(), &BTreeSet::new());
        assert_eq!(calendar.days.first().unwrap().day_of_week, 0);
    }

    #[test]
    fn load_more_twice_from_leap_day() {
        let mut leap = CalendarRange::starting(ymd(2024, 2, 29));
        leap.load_more();
        leap.load_more();
        assert_eq!(leap.earliest(), ymd(2022, 2, 28));
    }
}
