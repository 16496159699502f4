//! Excel serial date conversion and ISO date parsing

use chrono::{NaiveDate, NaiveDateTime};

/// Serial number of the fictitious 1900-02-29 that Excel keeps for Lotus compatibility.
const LEAP_BUG_SERIAL: f64 = 60.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a naive date-time to an Excel serial date (1900 date system).
#[must_use]
pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    let seconds = (dt - excel_epoch()).num_seconds() as f64;
    let serial = seconds / SECONDS_PER_DAY;
    if serial < LEAP_BUG_SERIAL + 1.0 {
        serial - 1.0
    } else {
        serial
    }
}

/// Parse the ISO-8601 forms spreadsheet readers emit for date cells.
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
