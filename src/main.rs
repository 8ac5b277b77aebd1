use anyhow::Result;
use reqwest::Client;
use showbill::media::gallery::{self, MediaKind};
use showbill::shows::{format_long_date, schedule, TicketAction};
use showbill::SiteConfig;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,showbill=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load site config ─────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => SiteConfig::from_path(Path::new(&path))?,
        None => SiteConfig::default(),
    };
    let client = Client::new();

    // ─── 3) fetch + classify the show schedule ───────────────────────
    let schedule = schedule::fetch_shows(&client, &config).await;

    println!("Upcoming shows ({}):", schedule.upcoming.len());
    for show in &schedule.upcoming {
        let tickets = match show.ticket_action() {
            TicketAction::Link(url) => format!("Buy Tickets <{}>", url),
            TicketAction::Label(text) => text,
            TicketAction::Unavailable => String::new(),
        };
        println!(
            "  {:<28} {:>8}  {:<28} {:<20} {:>8}  {}",
            format_long_date(show.date().unwrap_or("")),
            show.set_time().unwrap_or("TBA"),
            show.venue().unwrap_or("TBA"),
            show.city().unwrap_or(""),
            show.ticket_price().unwrap_or("TBA"),
            tickets,
        );
    }

    println!("Past shows ({}):", schedule.past.len());
    for show in &schedule.past {
        println!(
            "  {:<28} {:>8}  {:<28} {:<20} {:>8}",
            format_long_date(show.date().unwrap_or("")),
            show.set_time().unwrap_or("TBA"),
            show.venue().unwrap_or("TBA"),
            show.city().unwrap_or(""),
            show.ticket_price().unwrap_or("TBA"),
        );
    }

    // ─── 4) preload the media gallery ────────────────────────────────
    let store = gallery::preload(&client, &config).await;
    for category in &config.gallery.categories {
        info!(
            category = %category.slug,
            videos = store.count(MediaKind::Video, &category.slug),
            photos = store.count(MediaKind::Photo, &category.slug),
            video_state = ?store.category_state(&config.gallery, MediaKind::Video, &category.slug),
            photo_state = ?store.category_state(&config.gallery, MediaKind::Photo, &category.slug),
            "gallery category"
        );
    }
    if let Some(slug) = store.first_available(&config.gallery, MediaKind::Video) {
        info!(category = %slug, "gallery lands on");
    }

    info!("all done");
    Ok(())
}
