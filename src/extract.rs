//! Turns one page of review markup into structured records.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::review::Review;

static REVIEW_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review"]"#).unwrap());
static RATING_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-hook="review-star-rating"], [data-hook="cmps-review-star-rating"]"#)
        .unwrap()
});
static TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review-title"]"#).unwrap());
static BODY_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review-body"]"#).unwrap());
static DATE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review-date"]"#).unwrap());
static VERIFIED_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="avp-badge"]"#).unwrap());
static HELPFUL_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="helpful-vote-statement"]"#).unwrap());

/// First decimal-or-integer number in the rating text ("4.0 out of 5 stars").
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
/// Rating boilerplate some layouts prepend to the title text.
static TITLE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+ out of \d+ stars?").unwrap());
static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Parse every review block on a page. Malformed blocks are skipped, never
/// fatal; a page with no recognizable blocks yields an empty vec.
pub fn parse_reviews(html: &str) -> Vec<Review> {
    let document = Html::parse_document(html);
    document
        .select(&REVIEW_SEL)
        .filter_map(|block| parse_block(&block))
        .collect()
}

fn parse_block(block: &ElementRef) -> Option<Review> {
    // Body text is the one required field; blocks without it are dropped.
    let body = select_text(block, &BODY_SEL).filter(|text| !text.is_empty())?;

    let rating = select_text(block, &RATING_SEL)
        .and_then(|text| NUMBER_RE.find(&text).and_then(|m| m.as_str().parse::<f32>().ok()));

    let title = select_text(block, &TITLE_SEL)
        .map(|text| TITLE_PREFIX_RE.replace(&text, "").trim().to_string())
        .unwrap_or_default();

    let date = select_text(block, &DATE_SEL).unwrap_or_default();
    let verified = block.select(&VERIFIED_SEL).next().is_some();

    // "12 people found this helpful" → 12; spelled-out counts stay 0.
    let helpful_votes = select_text(block, &HELPFUL_SEL)
        .and_then(|text| INT_RE.find(&text).and_then(|m| m.as_str().parse::<u32>().ok()))
        .unwrap_or(0);

    Some(Review {
        rating,
        title,
        body,
        date,
        verified,
        helpful_votes,
        sentiment: None,
        sentiment_score: None,
    })
}

fn select_text(block: &ElementRef, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
