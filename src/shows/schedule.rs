// src/shows/schedule.rs

use crate::config::SiteConfig;
use crate::fetch;
use crate::shows::csv::parse_records;
use crate::shows::date::parse_show_date;
use crate::shows::record::ShowRecord;
use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{error, info, instrument};
use url::Url;

const MAX_RETRIES: u32 = 3;
const BACKOFF_MS: u64 = 500;

/// When a show stops counting as upcoming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// Upcoming only while the show date is today or later.
    SameDay,
    /// Upcoming through the day after the show date, so ticket details
    /// from the sheet stay visible through the morning after.
    #[default]
    DayAfterGrace,
}

impl CutoffPolicy {
    fn is_upcoming(self, show_date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            CutoffPolicy::SameDay => show_date >= today,
            CutoffPolicy::DayAfterGrace => show_date
                .checked_add_days(Days::new(1))
                .map(|limit| limit >= today)
                .unwrap_or(true),
        }
    }
}

/// The classified show schedule: upcoming soonest-first, past most
/// recent first.
#[derive(Debug, Default)]
pub struct Schedule {
    pub upcoming: Vec<ShowRecord>,
    pub past: Vec<ShowRecord>,
}

/// Partition records against `today` under `policy` and sort each side.
///
/// Records without a `date` value are excluded from both partitions. A
/// non-empty date that fails to parse classifies as past and sorts after
/// every dated record, keeping input order among its peers. Both sorts
/// are stable.
pub fn classify(records: Vec<ShowRecord>, today: NaiveDate, policy: CutoffPolicy) -> Schedule {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for record in records {
        let Some(raw_date) = record.date() else {
            continue;
        };
        match parse_show_date(raw_date) {
            Some(show_date) if policy.is_upcoming(show_date, today) => upcoming.push(record),
            _ => past.push(record),
        }
    }

    upcoming.sort_by_cached_key(|r| r.date().and_then(parse_show_date));
    past.sort_by_cached_key(|r| Reverse(r.date().and_then(parse_show_date)));

    Schedule { upcoming, past }
}

/// Fetch the published sheet and classify it against today's local date.
///
/// Never fails: transport or decode errors degrade to an empty schedule
/// with an error log, so the page renders "no shows" rather than an
/// error.
#[instrument(level = "info", skip(client, config))]
pub async fn fetch_shows(client: &Client, config: &SiteConfig) -> Schedule {
    match try_fetch_shows(client, config).await {
        Ok(schedule) => {
            info!(
                upcoming = schedule.upcoming.len(),
                past = schedule.past.len(),
                "schedule classified"
            );
            schedule
        }
        Err(e) => {
            error!(error = %e, "fetching show schedule failed; showing empty schedule");
            Schedule::default()
        }
    }
}

async fn try_fetch_shows(client: &Client, config: &SiteConfig) -> Result<Schedule> {
    let url = Url::parse(&config.sheet.csv_url()).context("published sheet URL")?;
    let text = fetch::fetch_text_with_retry(client, &url, MAX_RETRIES, BACKOFF_MS).await?;
    let records = parse_records(&text);
    let today = Local::now().date_naive();
    Ok(classify(records, today, config.cutoff))
}
