// src/bin/check_feed.rs
//
// Diagnostic for the published show sheet: fetch the CSV (or read a
// local export), show what the parser sees, and report how the rows
// would classify. Usage:
//
//   cargo run --bin check_feed [-- <file-or-url>]

use anyhow::Result;
use chrono::Local;
use reqwest::Client;
use showbill::shows::csv::{parse_line, parse_records};
use showbill::shows::record::normalize_key;
use showbill::shows::{classify, parse_show_date, CutoffPolicy};
use showbill::{fetch, SiteConfig};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,showbill=debug"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    // 1) Resolve the source: local file, explicit URL, or the configured sheet
    let source = env::args().nth(1);
    let text = match source.as_deref() {
        Some(path) if Path::new(path).exists() => fs::read_to_string(path)?,
        Some(raw_url) => {
            let url = Url::parse(raw_url)?;
            fetch::fetch_text(&Client::new(), &url).await?
        }
        None => {
            let url = Url::parse(&SiteConfig::default().sheet.csv_url())?;
            fetch::fetch_text(&Client::new(), &url).await?
        }
    };

    // 2) Line and header report
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    println!("non-blank lines: {}", lines.len());
    if lines.is_empty() {
        println!("nothing to parse");
        return Ok(());
    }

    let header_line = lines[0].strip_prefix('\u{feff}').unwrap_or(lines[0]);
    if header_line.len() != lines[0].len() {
        println!("note: BOM present on header line");
    }
    let headers: Vec<String> = parse_line(header_line)
        .iter()
        .map(|h| normalize_key(h))
        .collect();
    println!("columns ({}): {}", headers.len(), headers.join(", "));

    // 3) Row shape report
    for (i, line) in lines.iter().enumerate().skip(1) {
        let fields = parse_line(line);
        if fields.len() != headers.len() {
            println!(
                "row {}: {} fields (header has {})",
                i,
                fields.len(),
                headers.len()
            );
        }
    }

    // 4) Record and classification report
    let records = parse_records(&text);
    println!("records kept: {}", records.len());
    let undated = records
        .iter()
        .filter(|r| r.date().map(parse_show_date).map_or(true, |d| d.is_none()))
        .count();
    if undated > 0 {
        println!("records without a usable date: {}", undated);
    }

    let today = Local::now().date_naive();
    let schedule = classify(records, today, CutoffPolicy::DayAfterGrace);
    println!(
        "as of {}: {} upcoming, {} past",
        today,
        schedule.upcoming.len(),
        schedule.past.len()
    );

    Ok(())
}
