//! Parsing of DATE entity text into calendar dates

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use regex::Regex;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Resolves absolute and relative date expressions against a reference day
pub struct DateParser {
    reference: NaiveDate,
    ordinal_regex: Regex,
    iso_regex: Regex,
    slash_regex: Regex,
    day_month_regex: Regex,
    month_day_regex: Regex,
    month_year_regex: Regex,
    year_regex: Regex,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DateParser {
    pub fn new() -> Self {
        Self::with_reference(Local::now().date_naive())
    }

    pub fn with_reference(reference: NaiveDate) -> Self {
        Self {
            reference,
            ordinal_regex: Regex::new(r"(\d)(?:st|nd|rd|th)\b").expect("Invalid ordinal regex"),
            iso_regex: Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("Invalid ISO regex"),
            slash_regex: Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$")
                .expect("Invalid slash date regex"),
            day_month_regex: Regex::new(r"^(\d{1,2}) ([a-z]+)(?: (\d{4}))?$")
                .expect("Invalid day-month regex"),
            month_day_regex: Regex::new(r"^([a-z]+) (\d{1,2})(?: (\d{4}))?$")
                .expect("Invalid month-day regex"),
            month_year_regex: Regex::new(r"^([a-z]+) (\d{4})$").expect("Invalid month-year regex"),
            year_regex: Regex::new(r"^(\d{4})$").expect("Invalid year regex"),
        }
    }

    /// Parse a date expression; `None` when it does not describe a valid calendar date
    pub fn parse(&self, expression: &str) -> Option<NaiveDate> {
        let cleaned = self.clean(expression);

        match cleaned.as_str() {
            "today" => return Some(self.reference),
            "tomorrow" => return self.reference.checked_add_days(Days::new(1)),
            "yesterday" => return self.reference.checked_sub_days(Days::new(1)),
            _ => {}
        }

        if let Ok(weekday) = cleaned.parse::<Weekday>() {
            return self.previous_weekday(weekday);
        }

        if let Some(caps) = self.iso_regex.captures(&cleaned) {
            return NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            );
        }

        if let Some(caps) = self.slash_regex.captures(&cleaned) {
            // Month first, the English default
            let year: i32 = caps[3].parse().ok()?;
            let year = if caps[3].len() == 2 { 2000 + year } else { year };
            return NaiveDate::from_ymd_opt(year, caps[1].parse().ok()?, caps[2].parse().ok()?);
        }

        if let Some(caps) = self.year_regex.captures(&cleaned) {
            let year: i32 = caps[1].parse().ok()?;
            return self.in_year(year, self.reference.month());
        }

        if let Some(caps) = self.month_year_regex.captures(&cleaned) {
            let month = month_number(&caps[1])?;
            return self.in_year(caps[2].parse().ok()?, month);
        }

        if let Some(caps) = self.day_month_regex.captures(&cleaned) {
            let year = self.year_or_reference(caps.get(3).map(|m| m.as_str()))?;
            return NaiveDate::from_ymd_opt(year, month_number(&caps[2])?, caps[1].parse().ok()?);
        }

        if let Some(caps) = self.month_day_regex.captures(&cleaned) {
            let year = self.year_or_reference(caps.get(3).map(|m| m.as_str()))?;
            return NaiveDate::from_ymd_opt(year, month_number(&caps[1])?, caps[2].parse().ok()?);
        }

        None
    }

    /// Lower-case, drop ordinal suffixes, "of", commas and periods
    fn clean(&self, expression: &str) -> String {
        let lowered = expression.to_lowercase().replace(&[',', '.'][..], " ");
        let without_ordinals = self.ordinal_regex.replace_all(&lowered, "$1");
        without_ordinals
            .split_whitespace()
            .filter(|word| *word != "of")
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn year_or_reference(&self, year: Option<&str>) -> Option<i32> {
        match year {
            Some(year) => year.parse().ok(),
            None => Some(self.reference.year()),
        }
    }

    /// The reference day moved into `year` and `month`, clamped to the month length
    fn in_year(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let day = self.reference.day().min(days_in_month(year, month)?);
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Most recent occurrence of `weekday`, counting the reference day itself
    fn previous_weekday(&self, weekday: Weekday) -> Option<NaiveDate> {
        let current = self.reference.weekday().num_days_from_monday();
        let target = weekday.num_days_from_monday();
        let behind = (current + 7 - target) % 7;
        self.reference.checked_sub_days(Days::new(u64::from(behind)))
    }
}

/// Month number for a full or abbreviated (at least three letters) English month name
fn month_number(name: &str) -> Option<u32> {
    if name == "sept" {
        return Some(9);
    }
    if name.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|month| month.starts_with(name))
        .map(|index| index as u32 + 1)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DateParser {
        // A Wednesday
        DateParser::with_reference(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_absolute_dates() {
        let parser = parser();
        assert_eq!(parser.parse("3 March 2025"), ymd(2025, 3, 3));
        assert_eq!(parser.parse("1st of January, 2025"), ymd(2025, 1, 1));
        assert_eq!(parser.parse("January 1st, 2025"), ymd(2025, 1, 1));
        assert_eq!(parser.parse("Sept. 9 2024"), ymd(2024, 9, 9));
        assert_eq!(parser.parse("2025-06-30"), ymd(2025, 6, 30));
        assert_eq!(parser.parse("12/25/2025"), ymd(2025, 12, 25));
        assert_eq!(parser.parse("4/7/26"), ymd(2026, 4, 7));
    }

    #[test]
    fn test_dates_without_year_use_reference_year() {
        let parser = parser();
        assert_eq!(parser.parse("12th of June"), ymd(2025, 6, 12));
        assert_eq!(parser.parse("Dec 3"), ymd(2025, 12, 3));
    }

    #[test]
    fn test_month_and_year_use_reference_day() {
        let parser = parser();
        assert_eq!(parser.parse("May 2025"), ymd(2025, 5, 15));

        let late = DateParser::with_reference(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(late.parse("February 2024"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_relative_dates() {
        let parser = parser();
        assert_eq!(parser.parse("today"), ymd(2025, 1, 15));
        assert_eq!(parser.parse("Tomorrow"), ymd(2025, 1, 16));
        assert_eq!(parser.parse("yesterday"), ymd(2025, 1, 14));
        assert_eq!(parser.parse("Wednesday"), ymd(2025, 1, 15));
        assert_eq!(parser.parse("Friday"), ymd(2025, 1, 10));
        assert_eq!(parser.parse("monday"), ymd(2025, 1, 13));
        assert_eq!(parser.parse("Thursday"), ymd(2025, 1, 9));
    }

    #[test]
    fn test_bare_year_uses_reference_month_and_day() {
        let parser = parser();
        assert_eq!(parser.parse("2024"), ymd(2024, 1, 15));

        let leap_day = DateParser::with_reference(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(leap_day.parse("2023"), ymd(2023, 2, 28));
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        let parser = parser();
        assert_eq!(parser.parse("31 February 2025"), None);
        assert_eq!(parser.parse("13/45/2025"), None);
        assert_eq!(parser.parse("5 Smarch 2025"), None);
        assert_eq!(parser.parse("next quarter"), None);
        assert_eq!(parser.parse(""), None);
    }
}
