//! Conversion of the date shapes found in the two exports into the canonical
//! `DD/MM/YYYY` form used for comparison.

use chrono::NaiveDate;

/// Format string of the canonical date representation.
pub const CANONICAL_FORMAT: &str = "%d/%m/%Y";

/// Adds the missing leading zero to a `D/MM/YYYY` date.
///
/// This is a length check only: any 9 character input gains a leading `'0'`,
/// everything else is returned unchanged.
pub fn pad_day(date: &str) -> String {
    if date.chars().count() == 9 {
        format!("0{date}")
    } else {
        date.to_string()
    }
}

/// Zero-pads the day and month of a slash-delimited day-first date, so
/// `1/3/2020` becomes `01/03/2020`.
///
/// Values starting `YYYY-MM-DD`, as read from spreadsheet date cells, go
/// through [`format_from_timestamp`]. Anything else that does not split into
/// three slash-separated parts with a one or two digit day and month falls
/// back to [`pad_day`].
pub fn normalize_day_first(date: &str) -> String {
    if is_iso_prefixed(date) {
        return format_from_timestamp(date);
    }
    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [day, month, year] if is_short_number(day) && is_short_number(month) => {
            format!("{day:0>2}/{month:0>2}/{year}")
        }
        _ => pad_day(date),
    }
}

fn is_iso_prefixed(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit())
}

fn is_short_number(part: &str) -> bool {
    (1..=2).contains(&part.len()) && part.bytes().all(|byte| byte.is_ascii_digit())
}

/// Reassembles a `YYYY-MM-DD...` timestamp string as `DD/MM/YYYY` using fixed
/// offsets. No parsing takes place: short input yields truncated parts rather
/// than an error, and empty input stays empty.
pub fn format_from_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return String::new();
    }
    let year = char_slice(timestamp, 0, 4);
    let month = char_slice(timestamp, 5, 7);
    let day = char_slice(timestamp, 8, 10);
    format!("{day}/{month}/{year}")
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

/// Parses a canonical `DD/MM/YYYY` date.
pub fn parse_canonical(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, CANONICAL_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_day_prefixes_nine_character_dates() {
        assert_eq!(pad_day("1/03/2020"), "01/03/2020");
    }

    #[test]
    fn pad_day_leaves_canonical_dates_alone() {
        for date in ["01/03/2020", "31/12/1999", "15/06/2024"] {
            assert_eq!(pad_day(date), date);
        }
    }

    #[test]
    fn pad_day_is_not_idempotent_on_nine_characters() {
        let once = pad_day("1/03/2020");
        assert_eq!(once.len(), 10);
        assert_eq!(pad_day(&once), once);
        // Any length-9 string is padded, whether or not it is a D/MM/YYYY date.
        assert_eq!(pad_day("12/3/2020"), "012/3/2020");
    }

    #[test]
    fn normalize_pads_day_and_month() {
        assert_eq!(normalize_day_first("1/3/2020"), "01/03/2020");
        assert_eq!(normalize_day_first("12/3/2020"), "12/03/2020");
        assert_eq!(normalize_day_first("1/03/2020"), "01/03/2020");
        assert_eq!(normalize_day_first("01/03/2020"), "01/03/2020");
    }

    #[test]
    fn normalize_falls_back_to_pad_day() {
        assert_eq!(normalize_day_first(""), "");
        assert_eq!(normalize_day_first("x/03/2020"), "0x/03/2020");
    }

    #[test]
    fn normalize_reformats_iso_timestamps() {
        assert_eq!(normalize_day_first("2020-03-01T00:00:00"), "01/03/2020");
        assert_eq!(normalize_day_first("2021-12-31"), "31/12/2021");
        assert_eq!(normalize_day_first("2020-3-1"), "2020-3-1");
    }

    #[test]
    fn timestamp_is_reassembled_day_first() {
        assert_eq!(format_from_timestamp("2020-03-05T00:00:00"), "05/03/2020");
        assert_eq!(format_from_timestamp("2021-12-31 23:59:59"), "31/12/2021");
        assert_eq!(format_from_timestamp("2019-07-04"), "04/07/2019");
    }

    #[test]
    fn short_timestamps_do_not_panic() {
        assert_eq!(format_from_timestamp(""), "");
        assert_eq!(format_from_timestamp("2020-03"), "/03/2020");
        assert_eq!(format_from_timestamp("20"), "//20");
    }

    #[test]
    fn canonical_dates_parse() {
        assert_eq!(
            parse_canonical("05/03/2020"),
            NaiveDate::from_ymd_opt(2020, 3, 5)
        );
        assert_eq!(parse_canonical("2020-03-05"), None);
    }
}
