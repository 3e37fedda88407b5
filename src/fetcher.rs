//! Review-page fetching with basic anti-blocking hygiene: a rotating pool of
//! browser user agents, a randomized delay before every request, and a shared
//! cookie session across pages.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::extract;
use crate::review::Review;

const REQUEST_TIMEOUT_SECS: u64 = 15;
/// Uniform random delay bounds before each request, in seconds.
const MIN_DELAY_SECS: f64 = 1.5;
const MAX_DELAY_SECS: f64 = 3.0;
/// Fixed extra wait after a rate-limit response.
const RATE_LIMIT_BACKOFF_SECS: u64 = 5;

const FALLBACK_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static USER_AGENTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    ]
});

/// Amazon site variants the tool knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Marketplace {
    Ca,
    Us,
    Uk,
}

impl Marketplace {
    pub fn domain(&self) -> &'static str {
        match self {
            Marketplace::Ca => "amazon.ca",
            Marketplace::Us => "amazon.com",
            Marketplace::Uk => "amazon.co.uk",
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://www.{}", self.domain())
    }

    pub fn id(&self) -> &'static str {
        match self {
            Marketplace::Ca => "ca",
            Marketplace::Us => "us",
            Marketplace::Uk => "uk",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub struct ReviewFetcher {
    client: Client,
    base_url: String,
}

impl ReviewFetcher {
    pub fn new(marketplace: Marketplace) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: marketplace.base_url(),
        })
    }

    /// Fetch up to `max_pages` of reviews for one product, newest first.
    ///
    /// Pages are requested serially. A page that fails to fetch is skipped;
    /// the loop ends early the first time a fetched page parses to zero
    /// reviews (the end of the available review pages).
    pub async fn fetch_reviews(&self, asin: &str, max_pages: usize) -> Vec<Review> {
        println!("\n📊 ReviewPulse - fetching reviews for {}", asin);
        println!("   Marketplace: {}\n", self.base_url);

        let mut all_reviews = Vec::new();

        for page in 1..=max_pages {
            let Some(html) = self.fetch_page(asin, page).await else {
                continue;
            };

            let reviews = extract::parse_reviews(&html);
            if reviews.is_empty() {
                println!("   No more reviews found on page {}", page);
                break;
            }

            println!("📄 Page {}/{}: {} reviews", page, max_pages, reviews.len());
            all_reviews.extend(reviews);
        }

        println!("\n✅ Fetched {} reviews", all_reviews.len());
        all_reviews
    }

    /// One page request. Returns the raw markup, or `None` when the page
    /// should be skipped (rate limit, non-success status, transport failure).
    async fn fetch_page(&self, asin: &str, page: usize) -> Option<String> {
        // Randomized pause keeps the request rate under block heuristics.
        let delay = rand::thread_rng().gen_range(MIN_DELAY_SECS..MAX_DELAY_SECS);
        debug!("sleeping {:.2}s before page {}", delay, page);
        sleep(Duration::from_secs_f64(delay)).await;

        let url = self.page_url(asin, page);
        let response = match self.client.get(&url).headers(browser_headers()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("transport error on page {}: {}", page, e);
                return None;
            }
        };

        match response.status() {
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
                println!("⚠️  Rate limited on page {}, waiting...", page);
                sleep(Duration::from_secs(RATE_LIMIT_BACKOFF_SECS)).await;
                None
            }
            status if !status.is_success() => {
                warn!("page {} returned {}", page, status);
                None
            }
            _ => match response.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("failed to read body of page {}: {}", page, e);
                    None
                }
            },
        }
    }

    fn page_url(&self, asin: &str, page: usize) -> String {
        format!(
            "{}/product-reviews/{}?pageNumber={}&sortBy=recent",
            self.base_url,
            urlencoding::encode(asin),
            page
        )
    }
}

/// A realistic browser header set with a user agent picked from the pool.
fn browser_headers() -> HeaderMap {
    let agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_AGENT);

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(agent));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers
}
