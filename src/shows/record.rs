// src/shows/record.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Keys tried, in order, when looking for a ticket purchase URL.
pub const TICKET_URL_KEYS: &[&str] = &["link", "ticket_url", "tickets", "ticket_link", "url"];

/// Keys tried, in order, for the set time column.
pub const SET_TIME_KEYS: &[&str] = &["set_time", "settime", "time"];

/// Keys tried, in order, for the ticket price column.
pub const TICKET_PRICE_KEYS: &[&str] = &["ticket_price", "ticketprice", "price"];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_KEY_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

/// Normalize a header cell into a record key: trim, lowercase, collapse
/// whitespace runs to `_`, strip everything outside `[a-z0-9_]`.
pub fn normalize_key(header: &str) -> String {
    let lowered = header.trim().to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    NON_KEY_CHAR.replace_all(&underscored, "").into_owned()
}

/// How the "buy tickets" cell of a show should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    /// Tickets are sold online and the sheet carries a working URL.
    Link(String),
    /// Display the sheet's text as-is; not clickable.
    Label(String),
    /// The sheet carries nothing recognizable for this show.
    Unavailable,
}

/// One row of show data, keyed by normalized column name.
///
/// The shape is driven entirely by the sheet's header row; there is no
/// fixed schema. A record is an independent, immutable value once the
/// builder hands it out; rebuilt from scratch on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowRecord {
    fields: BTreeMap<String, String>,
}

impl ShowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    /// Value under `key`, with empty strings treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// First non-empty value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record is kept only if it names a date or a venue.
    pub fn has_identity(&self) -> bool {
        self.date().is_some() || self.venue().is_some()
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn venue(&self) -> Option<&str> {
        self.get("venue")
    }

    pub fn city(&self) -> Option<&str> {
        self.get("city")
    }

    pub fn set_time(&self) -> Option<&str> {
        self.first_of(SET_TIME_KEYS)
    }

    pub fn ticket_price(&self) -> Option<&str> {
        self.first_of(TICKET_PRICE_KEYS)
    }

    pub fn ticket_url(&self) -> Option<&str> {
        self.first_of(TICKET_URL_KEYS)
    }

    /// The raw "buy tickets" cell. Falls back to scanning every value for
    /// the known option texts, which keeps working when the sheet's column
    /// header has drifted away from `Buy Tickets Option`.
    pub fn buy_tickets_option(&self) -> Option<&str> {
        if let Some(v) = self.get("buy_tickets_option") {
            return Some(v);
        }
        self.fields.values().map(String::as_str).find(|v| {
            let folded = fold_option_text(v);
            folded == "door sales only"
                || folded == "online"
                || (folded.contains("door") && folded.contains("sales") && folded.contains("only"))
        })
    }

    /// Interpret the ticket columns into a render-ready action.
    pub fn ticket_action(&self) -> TicketAction {
        let raw = self.buy_tickets_option().unwrap_or("").trim();
        if fold_option_text(raw) == "online" {
            if let Some(url) = self.ticket_url() {
                return TicketAction::Link(url.to_string());
            }
            return TicketAction::Label(raw.to_string());
        }
        if raw.is_empty() {
            TicketAction::Unavailable
        } else {
            TicketAction::Label(raw.to_string())
        }
    }
}

/// Lowercase with whitespace runs collapsed to single spaces, for
/// comparing option texts typed by hand into the sheet.
fn fold_option_text(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> ShowRecord {
        let mut r = ShowRecord::new();
        for (k, v) in pairs {
            r.insert(k.to_string(), v.to_string());
        }
        r
    }

    #[test]
    fn normalize_key_rules() {
        assert_eq!(normalize_key("Date"), "date");
        assert_eq!(normalize_key("  Set  Time "), "set_time");
        assert_eq!(normalize_key("Buy Tickets Option?"), "buy_tickets_option");
        assert_eq!(normalize_key("Ticket Price ($)"), "ticket_price_");
        assert_eq!(normalize_key("???"), "");
    }

    #[test]
    fn empty_values_read_as_absent() {
        let r = record(&[("venue", ""), ("city", "Springfield")]);
        assert_eq!(r.venue(), None);
        assert_eq!(r.city(), Some("Springfield"));
        assert!(!r.has_identity());
    }

    #[test]
    fn accessor_fallback_order() {
        let r = record(&[("time", "9pm"), ("settime", "8pm")]);
        assert_eq!(r.set_time(), Some("8pm"));

        let r = record(&[("url", "https://late.example"), ("tickets", "https://early.example")]);
        assert_eq!(r.ticket_url(), Some("https://early.example"));

        let r = record(&[("price", "$10")]);
        assert_eq!(r.ticket_price(), Some("$10"));
    }

    #[test]
    fn online_with_url_is_a_link() {
        let r = record(&[
            ("buy_tickets_option", "Online"),
            ("link", "https://tix.example/123"),
        ]);
        assert_eq!(
            r.ticket_action(),
            TicketAction::Link("https://tix.example/123".to_string())
        );
    }

    #[test]
    fn online_without_url_stays_a_label() {
        let r = record(&[("buy_tickets_option", "Online")]);
        assert_eq!(r.ticket_action(), TicketAction::Label("Online".to_string()));
    }

    #[test]
    fn other_option_text_displays_verbatim() {
        let r = record(&[("buy_tickets_option", "Door Sales Only")]);
        assert_eq!(
            r.ticket_action(),
            TicketAction::Label("Door Sales Only".to_string())
        );
    }

    #[test]
    fn option_found_by_value_scan_when_header_drifted() {
        let r = record(&[("tix", "door  sales  only")]);
        assert_eq!(
            r.ticket_action(),
            TicketAction::Label("door  sales  only".to_string())
        );
    }

    #[test]
    fn nothing_recognizable_is_unavailable() {
        let r = record(&[("venue", "The Spot"), ("link", "https://tix.example")]);
        assert_eq!(r.ticket_action(), TicketAction::Unavailable);
    }
}
