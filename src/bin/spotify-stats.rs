use clap::Parser;
use spotify_stats::{tui, DashboardSession, DashboardView, FilterSelection, SearchQuery, SpotifyClientImpl};
use std::env;

/// Spotify track statistics dashboard
#[derive(Parser)]
#[command(
    name = "spotify-stats",
    about = "Terminal dashboard for Spotify track statistics",
    long_about = None
)]
struct Cli {
    /// Release year to search (builds a `year:<YEAR>` query)
    #[arg(long, default_value = "2023")]
    year: u16,

    /// Full search query; overrides --year when set
    #[arg(long)]
    query: Option<String>,

    /// Market (country code) the search is scoped to
    #[arg(long, default_value = "IN")]
    market: String,

    /// Number of tracks to fetch (single page, at most 50)
    #[arg(long, default_value = "50")]
    limit: u32,

    /// Print the three chart projections as text instead of opening the dashboard
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Cli::parse();

    // Get credentials from environment
    let (client_id, client_secret) = match get_credentials() {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  SPOTIFY_CLIENT_ID=your_application_client_id");
            eprintln!("  SPOTIFY_CLIENT_SECRET=your_application_client_secret");
            eprintln!();
            eprintln!("Credentials come from the application page of the developer dashboard.");
            std::process::exit(1);
        }
    };

    let mut query = SearchQuery::for_year(args.year);
    if let Some(q) = args.query {
        query.query = q;
    }
    query.market = args.market;
    query.limit = args.limit;

    let http_client = http_client::native::NativeClient::new();
    let client = SpotifyClientImpl::new(Box::new(http_client), client_id, client_secret);

    if args.summary {
        if let Err(e) = print_summary(&client, query).await {
            eprintln!("❌ Failed to load dashboard: {e}");
            std::process::exit(1);
        }
    } else if let Err(e) = tui::run_dashboard(&client, query).await {
        eprintln!("❌ Dashboard error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Get client id and secret from environment variables
fn get_credentials() -> Result<(String, String), Box<dyn std::error::Error>> {
    let client_id = env::var("SPOTIFY_CLIENT_ID")
        .map_err(|_| "SPOTIFY_CLIENT_ID environment variable not set")?;
    let client_secret = env::var("SPOTIFY_CLIENT_SECRET")
        .map_err(|_| "SPOTIFY_CLIENT_SECRET environment variable not set")?;
    Ok((client_id, client_secret))
}

async fn print_summary(
    client: &SpotifyClientImpl,
    query: SearchQuery,
) -> spotify_stats::Result<()> {
    let mut session = DashboardSession::new(query);
    let count = session.load(client).await?;
    println!("✅ Loaded {count} tracks");
    println!();

    if let Some(view) = session.view(&FilterSelection::none()) {
        print_view(&view);
    }

    Ok(())
}

fn print_view(view: &DashboardView) {
    println!("Track Popularity");
    for (name, popularity) in &view.popularity {
        println!("  {popularity:>3}  {name}");
    }
    println!();

    println!("Genre Distribution");
    for (genre, count) in view.genres.iter() {
        println!("  {count:>3}  {genre}");
    }
    println!();

    println!("Monthly Releases");
    for (label, count) in &view.months {
        println!("  {label}  {count}");
    }
}
