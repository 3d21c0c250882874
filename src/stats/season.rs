use regex::Regex;
use std::sync::OnceLock;

fn four_digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").expect("static regex"))
}

fn two_digit_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/.\-](\d{2})\s*$").expect("static regex"))
}

/// Season bucket for event dates, which are stored in more than one format
/// (`2025-06-01`, `01/06/2025`, `01/06/25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonYear(pub i32);

impl SeasonYear {
    /// A date belongs to the season when it contains the 4-digit year. Dates
    /// with no 4-digit run at all fall back to a trailing 2-digit year.
    pub fn matches(&self, date: &str) -> bool {
        if date.contains(&self.0.to_string()) {
            return true;
        }
        if four_digit_run().is_match(date) {
            return false;
        }
        two_digit_suffix()
            .captures(date)
            .and_then(|caps| caps[1].parse::<i32>().ok())
            .is_some_and(|yy| yy == self.0.rem_euclid(100))
    }
}

/// Years a date string can be bucketed into.
pub fn years_in(date: &str) -> Vec<i32> {
    let full: Vec<i32> = four_digit_run()
        .find_iter(date)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|year| (1900..=2100).contains(year))
        .collect();
    if !full.is_empty() || four_digit_run().is_match(date) {
        return full;
    }
    two_digit_suffix()
        .captures(date)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .map(|yy| vec![2000 + yy])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-12-31", 2025, true)]
    #[case("2025-12-31", 2026, false)]
    #[case("2026-01-01", 2025, false)]
    #[case("2026-01-01", 2026, true)]
    #[case("15/03/2025", 2025, true)]
    #[case("15/03/25", 2025, true)]
    #[case("15/03/25", 2024, false)]
    #[case("2026-01-25", 2025, false)]
    #[case("", 2025, false)]
    fn matches_season(#[case] date: &str, #[case] year: i32, #[case] expected: bool) {
        assert_eq!(SeasonYear(year).matches(date), expected);
    }

    #[rstest]
    #[case("2025-06-01", vec![2025])]
    #[case("01/06/24", vec![2024])]
    #[case("sem data", vec![])]
    fn extracts_years(#[case] date: &str, #[case] expected: Vec<i32>) {
        assert_eq!(years_in(date), expected);
    }
}
