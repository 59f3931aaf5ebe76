//! Birth-date cells arrive in whatever form the roster's author produced:
//! a real date cell, a bare serial number, an ISO string, or free text.
//! Everything funnels into the fixed `DD.MM.YYYY` display form used by the
//! document templates, falling back to the raw cell text when conversion
//! is impossible.

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Highest serial Excel's 1900 date system can represent (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Convert an Excel 1900-system serial number to a calendar date-time.
///
/// Serials count days from the epoch 1899-12-30; values below 60 are shifted
/// by one day to absorb the phantom 1900-02-29 the format inherited from
/// Lotus 1-2-3, so serial 1 maps to 1900-01-01 and serial 61 to 1900-03-01.
/// Returns `None` for values outside the representable range.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > MAX_SERIAL {
        return None;
    }
    let mut days = serial.trunc() as i64;
    if days < 60 {
        days += 1;
    }
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Render a date-of-birth cell as `DD.MM.YYYY`.
///
/// Empty cells render empty; cells that cannot be read as a date fall back to
/// their raw textual form rather than failing the row.
pub fn display_date(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_to_datetime(serial)
                .map(|d| d.format(DISPLAY_FORMAT).to_string())
                .unwrap_or_else(|| format_number(serial))
        }
        Data::Float(value) => serial_to_datetime(*value)
            .map(|d| d.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| format_number(*value)),
        Data::Int(value) => serial_to_datetime(*value as f64)
            .map(|d| d.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| value.to_string()),
        Data::DateTimeIso(s) => display_iso(s),
        Data::DurationIso(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

/// Plain textual form of a non-date cell: trimmed strings, numbers without a
/// spurious trailing `.0`. Used for every value column except date-of-birth.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(value) => format_number(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(b) => b.to_string(),
        // A date in a text column still reads better as a date.
        Data::DateTime(dt) => serial_to_datetime(dt.as_f64())
            .map(|d| d.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| format_number(dt.as_f64())),
        Data::DateTimeIso(s) => display_iso(s),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

fn display_iso(s: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.format(DISPLAY_FORMAT).to_string();
    }
    s.to_string()
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_epoch_mapping() {
        let date = |s: f64| serial_to_datetime(s).expect("serial in range").date();
        assert_eq!(date(1.0), NaiveDate::from_ymd_opt(1900, 1, 1).expect("date"));
        assert_eq!(date(59.0), NaiveDate::from_ymd_opt(1900, 2, 28).expect("date"));
        // Serial 60 is the phantom 1900-02-29; it lands on the 28th as well.
        assert_eq!(date(60.0), NaiveDate::from_ymd_opt(1900, 2, 28).expect("date"));
        assert_eq!(date(61.0), NaiveDate::from_ymd_opt(1900, 3, 1).expect("date"));
        assert_eq!(date(32_905.0), NaiveDate::from_ymd_opt(1990, 2, 1).expect("date"));
    }

    #[test]
    fn serial_rejects_out_of_range() {
        assert!(serial_to_datetime(-1.0).is_none());
        assert!(serial_to_datetime(f64::NAN).is_none());
        assert!(serial_to_datetime(MAX_SERIAL + 10.0).is_none());
    }

    #[test]
    fn display_date_formats_serials() {
        assert_eq!(display_date(&Data::Float(32_905.0)), "01.02.1990");
        assert_eq!(display_date(&Data::Int(32_905)), "01.02.1990");
    }

    #[test]
    fn display_date_falls_back_to_raw_text() {
        assert_eq!(display_date(&Data::String("01.02.1990 г.".to_string())), "01.02.1990 г.");
        assert_eq!(display_date(&Data::Float(99_999_999.0)), "99999999");
        assert_eq!(display_date(&Data::Empty), "");
    }

    #[test]
    fn display_date_reads_iso_strings() {
        assert_eq!(
            display_date(&Data::DateTimeIso("1990-02-01T00:00:00".to_string())),
            "01.02.1990"
        );
        assert_eq!(
            display_date(&Data::DateTimeIso("1990-02-01".to_string())),
            "01.02.1990"
        );
    }

    #[test]
    fn cell_text_trims_and_formats() {
        assert_eq!(cell_text(&Data::String("  Учитель  ".to_string())), "Учитель");
        assert_eq!(cell_text(&Data::Float(5.0)), "5");
        assert_eq!(cell_text(&Data::Float(5.5)), "5.5");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
