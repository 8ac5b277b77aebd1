// src/shows/csv.rs

use crate::shows::record::{normalize_key, ShowRecord};
use tracing::{debug, trace};

/// Split one CSV line into fields.
///
/// Left-to-right scan with an in-quotes flag: `"` toggles the flag and is
/// never emitted (escaped `""` pairs are not collapsed; this is the
/// sheet-export dialect, not RFC 4180), `,` separates fields only while
/// the flag is clear, everything else is literal. The pending buffer is
/// always emitted at end of line, so an empty line yields one empty
/// field. An unbalanced quote leaves the flag set through the rest of the
/// line; no error is raised.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Parse raw published-sheet CSV into show records.
///
/// Lines split on CRLF or LF, blank lines dropped. The first non-blank
/// line is the header (BOM stripped if present); its cells become
/// normalized keys. Rows shorter than the header leave keys absent, extra
/// values are ignored. Rows naming neither a date nor a venue are
/// discarded.
pub fn parse_records(csv_text: &str) -> Vec<ShowRecord> {
    let lines: Vec<&str> = csv_text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        debug!(lines = lines.len(), "not enough CSV lines; no records");
        return Vec::new();
    }

    let header_line = lines[0].strip_prefix('\u{feff}').unwrap_or(lines[0]);
    let headers: Vec<String> = parse_line(header_line)
        .iter()
        .map(|h| normalize_key(h))
        .collect();
    trace!(?headers, "sheet headers");

    let mut records = Vec::new();
    for line in &lines[1..] {
        let values = parse_line(line);
        let mut record = ShowRecord::new();
        for (key, value) in headers.iter().zip(values.iter()) {
            record.insert(key.clone(), clean_value(value));
        }
        if record.has_identity() {
            records.push(record);
        } else {
            trace!(line = %line, "dropping row without date or venue");
        }
    }

    debug!(records = records.len(), "parsed show records");
    records
}

/// Trim a raw cell and strip one outer pair of matching double or single
/// quotes, if present.
fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 {
        let bytes = trimmed.as_bytes();
        let (first, last) = (bytes[0], bytes[trimmed.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_split_on_commas() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_is_literal() {
        assert_eq!(
            parse_line(r#"The Vault,"Springfield, USA",8pm"#),
            vec!["The Vault", "Springfield, USA", "8pm"]
        );
    }

    #[test]
    fn quotes_are_consumed_not_emitted() {
        assert_eq!(parse_line(r#""The Venue""#), vec!["The Venue"]);
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn trailing_comma_yields_trailing_empty_field() {
        assert_eq!(parse_line("a,"), vec!["a", ""]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest_of_line() {
        assert_eq!(parse_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn one_row_one_record() {
        let records = parse_records("Date,Venue,City\n2025-06-15, The Vault ,Springfield\n");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date(), Some("2025-06-15"));
        assert_eq!(r.venue(), Some("The Vault"));
        assert_eq!(r.city(), Some("Springfield"));
    }

    #[test]
    fn header_only_yields_no_records() {
        assert!(parse_records("Date,Venue,City\n").is_empty());
        assert!(parse_records("").is_empty());
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let records = parse_records("Date,Venue\r\n\r\n2025-06-15,The Vault\r\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].venue(), Some("The Vault"));
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let records = parse_records("\u{feff}Date,Venue\n2025-06-15,The Vault\n");
        assert_eq!(records[0].date(), Some("2025-06-15"));
    }

    #[test]
    fn outer_quotes_stripped_from_values() {
        let records = parse_records("Venue,City\n'The Venue',\"x\"\n");
        assert_eq!(records[0].venue(), Some("The Venue"));
        // double quotes were already consumed by the line parser
        assert_eq!(records[0].city(), Some("x"));
    }

    #[test]
    fn short_rows_leave_keys_absent() {
        let records = parse_records("Date,Venue,City\n2025-06-15,The Vault\n");
        assert_eq!(records[0].city(), None);
    }

    #[test]
    fn extra_values_beyond_header_are_ignored() {
        let records = parse_records("Date,Venue\n2025-06-15,The Vault,stray,stray\n");
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn rows_without_date_or_venue_are_dropped() {
        let records = parse_records("Date,Venue,City\n,,Springfield\n2025-06-15,The Vault,\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].venue(), Some("The Vault"));
    }
}
