mod analysis;
mod extract;
mod fetcher;
mod report;
mod review;
mod sentiment;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use fetcher::{Marketplace, ReviewFetcher};

/// Amazon review monitoring and sentiment analysis.
#[derive(Debug, Parser)]
#[command(name = "reviewpulse", version, about)]
struct Args {
    /// Amazon product ASIN
    #[arg(short, long)]
    asin: String,

    /// Marketplace site variant
    #[arg(short, long, value_enum, default_value_t = Marketplace::Ca)]
    marketplace: Marketplace,

    /// Max pages to fetch
    #[arg(short, long, default_value_t = 5)]
    pages: usize,

    /// Export the full analysis to a JSON file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Run with sample data instead of fetching (for testing)
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut reviews = if args.demo {
        println!("\n🎭 DEMO MODE - using sample review data");
        review::sample_reviews()
    } else {
        let fetcher = ReviewFetcher::new(args.marketplace)?;
        let reviews = fetcher.fetch_reviews(&args.asin, args.pages).await;
        if reviews.is_empty() {
            print_blocked_diagnostic();
            return Ok(());
        }
        reviews
    };

    println!("\n🧠 Analyzing sentiment...");
    sentiment::classify_all(&mut reviews);

    report::render(&reviews);

    if let Some(path) = &args.export {
        report::export_json(path, args.marketplace.id(), &reviews)?;
    }

    Ok(())
}

/// Zero reviews from a real fetch almost always means the robot check, not
/// a product with no reviews.
fn print_blocked_diagnostic() {
    println!("\n❌ Amazon blocked the request (robot check).");
    println!("To fetch real reviews, you need:");
    println!("  • A proxy rotation service (e.g. Bright Data, Oxylabs)");
    println!("  • Or Amazon's Product Advertising API");
    println!("  • Or a third-party review API (e.g. Rainforest, Keepa)");
    println!("\n💡 Run with --demo to see the tool in action with sample data");
}
