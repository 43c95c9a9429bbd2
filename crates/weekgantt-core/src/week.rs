//! Year-week label resolution
//!
//! Turns labels like `2024-20` into the first day of that week. Three
//! numbering schemes are supported:
//!
//! | Convention    | First day | Week 0 | Valid weeks |
//! |---------------|-----------|--------|-------------|
//! | `MondayFirst` | Monday    | days before the first Monday | 0..=53 |
//! | `SundayFirst` | Sunday    | days before the first Sunday | 0..=53 |
//! | `Iso`         | Monday    | none   | 1..=52 or 1..=53 |
//!
//! `MondayFirst` is the `%W` scheme of `strftime`. Week 0 resolves to the
//! start day on or before January 1, so it may land in the previous year.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WeekError;

/// Week numbering scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekConvention {
    /// `%W`: weeks start on Monday, week 1 holds the first Monday
    #[default]
    #[serde(rename = "monday", alias = "monday-first")]
    MondayFirst,
    /// `%U`: weeks start on Sunday, week 1 holds the first Sunday
    #[serde(rename = "sunday", alias = "sunday-first")]
    SundayFirst,
    /// ISO 8601 week dates
    #[serde(rename = "iso")]
    Iso,
}

impl WeekConvention {
    /// Weekday a week starts on
    pub fn first_day(self) -> Weekday {
        match self {
            Self::MondayFirst | Self::Iso => Weekday::Mon,
            Self::SundayFirst => Weekday::Sun,
        }
    }

    fn week_bounds(self, year: i32) -> (u32, u32) {
        match self {
            Self::MondayFirst | Self::SundayFirst => (0, 53),
            Self::Iso => {
                // Dec 28 always falls in the last ISO week of its year
                let last = NaiveDate::from_ymd_opt(year, 12, 28)
                    .map_or(53, |d| d.iso_week().week());
                (1, last)
            }
        }
    }
}

impl fmt::Display for WeekConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MondayFirst => "monday",
            Self::SundayFirst => "sunday",
            Self::Iso => "iso",
        };
        f.write_str(name)
    }
}

impl FromStr for WeekConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "monday-first" | "w" => Ok(Self::MondayFirst),
            "sunday" | "sunday-first" | "u" => Ok(Self::SundayFirst),
            "iso" => Ok(Self::Iso),
            other => Err(format!(
                "unknown week convention '{}' (expected monday, sunday or iso)",
                other
            )),
        }
    }
}

/// A parsed `YYYY-WW` label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearWeek {
    pub year: i32,
    pub week: u32,
}

impl YearWeek {
    pub const fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// Date of the first day of this week under `convention`
    pub fn resolve(self, convention: WeekConvention) -> Result<NaiveDate, WeekError> {
        let (min, max) = convention.week_bounds(self.year);
        if self.week < min || self.week > max {
            return Err(WeekError::WeekOutOfRange {
                week: self.week,
                convention,
                min,
                max,
            });
        }

        let date = match convention {
            WeekConvention::Iso => {
                NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            }
            WeekConvention::MondayFirst | WeekConvention::SundayFirst => {
                self.resolve_strftime(convention.first_day())
            }
        };
        date.ok_or(WeekError::OutOfRange(self))
    }

    fn resolve_strftime(self, first_day: Weekday) -> Option<NaiveDate> {
        let jan1 = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
        // Days from the start of the week containing Jan 1 up to Jan 1
        let offset = u64::from(
            (jan1.weekday().num_days_from_monday() + 7 - first_day.num_days_from_monday()) % 7,
        );
        if self.week == 0 {
            return jan1.checked_sub_days(Days::new(offset));
        }
        let week0_len = (7 - offset) % 7;
        let days = week0_len + 7 * u64::from(self.week - 1);
        jan1.checked_add_days(Days::new(days))
    }
}

impl fmt::Display for YearWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

impl FromStr for YearWeek {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || WeekError::Malformed(s.to_string());
        let (year, week) = s.trim().split_once('-').ok_or_else(malformed)?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) {
            return Err(malformed());
        }
        if week.is_empty() || week.len() > 2 || !all_digits(week) {
            return Err(malformed());
        }

        Ok(Self {
            year: year.parse().map_err(|_| malformed())?,
            week: week.parse().map_err(|_| malformed())?,
        })
    }
}

/// Parse `label` and resolve it to the first day of its week
pub fn resolve_year_week(label: &str, convention: WeekConvention) -> Result<NaiveDate, WeekError> {
    label.parse::<YearWeek>()?.resolve(convention)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_labels() {
        assert_eq!("2024-20".parse::<YearWeek>().unwrap(), YearWeek::new(2024, 20));
        assert_eq!("2024-3".parse::<YearWeek>().unwrap(), YearWeek::new(2024, 3));
        assert_eq!(" 2024-03 ".parse::<YearWeek>().unwrap(), YearWeek::new(2024, 3));
        assert_eq!(YearWeek::new(2024, 3).to_string(), "2024-03");
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "2024", "2024-", "24-10", "2024-100", "2024-x1", "2024/10", "-2024-1"] {
            assert!(
                matches!(label.parse::<YearWeek>(), Err(WeekError::Malformed(_))),
                "{label:?} should be malformed"
            );
        }
    }

    #[test]
    fn monday_first_2024() {
        // 2024-01-01 is a Monday, so weeks 0 and 1 coincide
        let c = WeekConvention::MondayFirst;
        assert_eq!(resolve_year_week("2024-00", c).unwrap(), date(2024, 1, 1));
        assert_eq!(resolve_year_week("2024-01", c).unwrap(), date(2024, 1, 1));
        assert_eq!(resolve_year_week("2024-06", c).unwrap(), date(2024, 2, 5));
        assert_eq!(resolve_year_week("2024-20", c).unwrap(), date(2024, 5, 13));
        assert_eq!(resolve_year_week("2024-30", c).unwrap(), date(2024, 7, 22));
    }

    #[test]
    fn monday_first_week_zero_reaches_previous_year() {
        // 2023-01-01 is a Sunday
        let c = WeekConvention::MondayFirst;
        assert_eq!(resolve_year_week("2023-00", c).unwrap(), date(2022, 12, 26));
        assert_eq!(resolve_year_week("2023-01", c).unwrap(), date(2023, 1, 2));
    }

    #[test]
    fn week_53_may_spill_into_next_year() {
        let c = WeekConvention::MondayFirst;
        assert_eq!(resolve_year_week("2024-53", c).unwrap(), date(2024, 12, 30));
        assert_eq!(resolve_year_week("2023-53", c).unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn sunday_first() {
        let c = WeekConvention::SundayFirst;
        // 2023-01-01 is a Sunday
        assert_eq!(resolve_year_week("2023-00", c).unwrap(), date(2023, 1, 1));
        assert_eq!(resolve_year_week("2023-01", c).unwrap(), date(2023, 1, 1));
        // first Sunday of 2024 is Jan 7
        assert_eq!(resolve_year_week("2024-00", c).unwrap(), date(2023, 12, 31));
        assert_eq!(resolve_year_week("2024-01", c).unwrap(), date(2024, 1, 7));
    }

    #[test]
    fn iso_weeks() {
        let c = WeekConvention::Iso;
        assert_eq!(resolve_year_week("2024-01", c).unwrap(), date(2024, 1, 1));
        assert_eq!(resolve_year_week("2021-01", c).unwrap(), date(2021, 1, 4));
        assert_eq!(resolve_year_week("2020-53", c).unwrap(), date(2020, 12, 28));
        assert!(matches!(
            resolve_year_week("2021-53", c),
            Err(WeekError::WeekOutOfRange { week: 53, max: 52, .. })
        ));
        assert!(matches!(
            resolve_year_week("2021-00", c),
            Err(WeekError::WeekOutOfRange { week: 0, min: 1, .. })
        ));
    }

    #[test]
    fn rejects_weeks_above_53() {
        let err = resolve_year_week("2024-54", WeekConvention::MondayFirst).unwrap_err();
        assert_eq!(
            err,
            WeekError::WeekOutOfRange {
                week: 54,
                convention: WeekConvention::MondayFirst,
                min: 0,
                max: 53
            }
        );
    }

    #[test]
    fn every_valid_week_starts_on_convention_day() {
        for year in [2019, 2020, 2023, 2024, 2025, 2026] {
            for week in 0..=53 {
                let label = format!("{year}-{week:02}");
                let monday = resolve_year_week(&label, WeekConvention::MondayFirst).unwrap();
                assert_eq!(monday.weekday(), Weekday::Mon, "{label}");
                let sunday = resolve_year_week(&label, WeekConvention::SundayFirst).unwrap();
                assert_eq!(sunday.weekday(), Weekday::Sun, "{label}");
            }
        }
    }

    #[test]
    fn convention_from_str() {
        assert_eq!("Monday".parse::<WeekConvention>().unwrap(), WeekConvention::MondayFirst);
        assert_eq!("sunday-first".parse::<WeekConvention>().unwrap(), WeekConvention::SundayFirst);
        assert_eq!("iso".parse::<WeekConvention>().unwrap(), WeekConvention::Iso);
        assert!("friday".parse::<WeekConvention>().is_err());
    }
}
