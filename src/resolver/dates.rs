//! Analysis-date parsing and formatting

use chrono::NaiveDate;

/// Display format used in reports and error messages
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parse an analysis date, trying `DD/MM/YYYY` first and falling back
/// to ISO `YYYY-MM-DD`.
pub fn parse_analysis_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .ok()
}

/// Format a date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_month_year() {
        assert_eq!(
            parse_analysis_date("2/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(
            parse_analysis_date("31/12/2023"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn test_iso_fallback() {
        assert_eq!(
            parse_analysis_date("2024-01-02"),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_analysis_date("not a date"), None);
        assert_eq!(parse_analysis_date("13/13/2024"), None);
        assert_eq!(parse_analysis_date(""), None);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            parse_analysis_date("  2/01/2024 "),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn test_format_round_trip() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(format_date(d), "02/01/2024");
        assert_eq!(parse_analysis_date(&format_date(d)), Some(d));
    }
}
