//! Calendar-month arithmetic
//!
//! The reconciler, the reports, and the session's last-reconciled marker all
//! reason at month granularity. `Month` is the value type for that: ordered,
//! printable as `YYYY-MM`, and convertible to its first/last day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, ordered by (year, month)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.day(1)
    }

    /// Last day of the month (month-length and leap aware)
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .expect("date before first day of a month always exists")
    }

    /// Day `day` of this month. Days 1..=28 exist in every month; callers
    /// pass fixed trigger days well below that bound.
    pub fn day(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .expect("month is validated at construction and day <= 28")
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Whether the given date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month: {} (expected YYYY-MM)", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in: {}", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month out of range: {}", s));
        }
        Ok(Self { year, month })
    }
}

impl From<Month> for String {
    fn from(m: Month) -> Self {
        m.to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ordering() {
        let jan = Month::from_date(d(2026, 1, 15));
        let feb = Month::from_date(d(2026, 2, 1));
        let dec_prev = Month::from_date(d(2025, 12, 31));
        assert!(jan < feb);
        assert!(dec_prev < jan);
        assert_eq!(jan, Month::from_date(d(2026, 1, 31)));
    }

    #[test]
    fn test_next_prev_across_year_boundary() {
        let dec = Month::from_date(d(2025, 12, 5));
        assert_eq!(dec.next().to_string(), "2026-01");
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_last_day_leap_year() {
        let feb_leap = Month::from_date(d(2024, 2, 1));
        assert_eq!(feb_leap.last_day(), d(2024, 2, 29));
        let feb = Month::from_date(d(2026, 2, 1));
        assert_eq!(feb.last_day(), d(2026, 2, 28));
        let apr = Month::from_date(d(2026, 4, 10));
        assert_eq!(apr.last_day(), d(2026, 4, 30));
    }

    #[test]
    fn test_contains() {
        let aug = Month::from_date(d(2026, 8, 7));
        assert!(aug.contains(d(2026, 8, 1)));
        assert!(aug.contains(d(2026, 8, 31)));
        assert!(!aug.contains(d(2026, 7, 31)));
        assert!(!aug.contains(d(2026, 9, 1)));
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        let m: Month = "2026-08".parse().unwrap();
        assert_eq!(m.year(), 2026);
        assert_eq!(m.month(), 8);
        assert_eq!(m.to_string(), "2026-08");

        assert!("2026-13".parse::<Month>().is_err());
        assert!("2026".parse::<Month>().is_err());
        assert!("abcd-01".parse::<Month>().is_err());
    }
}
