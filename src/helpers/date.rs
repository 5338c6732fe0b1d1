//! Date helper functions
//!
//! Display formatting follows the original site's pt-BR style:
//! "15 mar 2021" for dates and "15 mar 2021, às 10:30" for timestamps.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Abbreviated pt-BR month names, indexed by month number - 1
const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a date as "dd mmm yyyy" in pt-BR
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

/// Format a timestamp as "dd mmm yyyy, às HH:MM" in pt-BR
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}, às {:02}:{:02}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year(),
        date.hour(),
        date.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2021, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date), "15 mar 2021");
    }

    #[test]
    fn test_format_date_pads_day() {
        let date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date), "01 jan 2021");
    }

    #[test]
    fn test_format_date_time() {
        let date = Utc.with_ymd_and_hms(2021, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date_time(&date), "15 mar 2021, às 10:30");
    }
}
