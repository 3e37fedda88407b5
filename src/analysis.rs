//! Derived views over the review collection: the sentiment summary, the
//! keyword frequency table, and the ranked negative-review insights. All of
//! these read the collection, none mutate it.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::review::{Review, Sentiment};

/// Keyword table sizes: full export, report section, one-line digest.
pub const EXPORT_KEYWORDS: usize = 20;
pub const REPORT_KEYWORDS: usize = 15;
pub const DIGEST_KEYWORDS: usize = 10;

const MAX_INSIGHTS: usize = 10;
const EXCERPT_CHARS: usize = 200;

/// Qualifying keyword tokens: 3+ letter words.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").unwrap());

/// Common function words plus review-domain noise, kept as a fixed constant.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
        "be", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "must", "shall", "can", "need",
        "dare", "ought", "used", "this", "that", "these", "those", "i", "you",
        "he", "she", "it", "we", "they", "what", "which", "who", "whom", "am",
        "being", "having", "doing", "if", "because", "until", "while", "about",
        "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "up", "down", "out", "off", "over", "under", "again",
        "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "each", "few", "more", "most", "other", "some", "such",
        "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
        "s", "t", "just", "don", "now", "ve", "ll", "re", "m", "product",
        "amazon", "bought", "buy", "purchase", "purchased", "ordered", "order",
        "item", "review", "reviews", "really", "much", "also", "get", "got",
        "use", "using", "one", "two", "first", "like", "great", "good", "well",
        "take", "taking", "took", "started", "start", "since", "every", "day",
        "days", "time", "times", "feel", "feeling", "felt", "think", "thought",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_reviews: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub avg_sentiment_score: f64,
}

/// One ranked complaint from a negative review.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub rating: Option<f32>,
    pub title: String,
    pub excerpt: String,
    pub helpful_votes: u32,
}

/// Bucket counts, percentages (one decimal) and mean polarity (three
/// decimals). An empty collection yields all zeros rather than an error.
pub fn summarize(reviews: &[Review]) -> AnalysisSummary {
    let total = reviews.len();
    let count = |sentiment: Sentiment| {
        reviews
            .iter()
            .filter(|r| r.sentiment == Some(sentiment))
            .count()
    };
    let positive = count(Sentiment::Positive);
    let negative = count(Sentiment::Negative);
    let neutral = count(Sentiment::Neutral);

    let (positive_pct, negative_pct, neutral_pct, avg) = if total == 0 {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let sum: f64 = reviews.iter().filter_map(|r| r.sentiment_score).sum();
        (
            pct(positive, total),
            pct(negative, total),
            pct(neutral, total),
            sum / total as f64,
        )
    };

    AnalysisSummary {
        total_reviews: total,
        positive,
        negative,
        neutral,
        positive_pct,
        negative_pct,
        neutral_pct,
        avg_sentiment_score: round_to(avg, 3),
    }
}

/// Top-N keyword frequencies across all title+body text. Descending by
/// count; ties keep first-encountered order (stable sort over an
/// insertion-ordered list).
pub fn top_keywords(reviews: &[Review], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for review in reviews {
        let text = review.full_text().to_lowercase();
        for token in TOKEN_RE.find_iter(&text) {
            let token = token.as_str();
            if STOP_WORDS.contains(token) {
                continue;
            }
            match counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.to_string(), 1);
                    order.push(token.to_string());
                }
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|token| {
            let count = counts[&token];
            (token, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// Negative reviews as excerpted complaints, most helpful first, capped at
/// ten. No negatives is a valid empty result, not an error.
pub fn negative_insights(reviews: &[Review]) -> Vec<Insight> {
    let mut insights: Vec<Insight> = reviews
        .iter()
        .filter(|r| r.sentiment == Some(Sentiment::Negative))
        .map(|r| Insight {
            rating: r.rating,
            title: r.title.clone(),
            excerpt: excerpt(&r.body, EXCERPT_CHARS),
            helpful_votes: r.helpful_votes,
        })
        .collect();

    insights.sort_by(|a, b| b.helpful_votes.cmp(&a.helpful_votes));
    insights.truncate(MAX_INSIGHTS);
    insights
}

/// Truncate to `limit` characters with a continuation marker.
pub fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}

fn pct(part: usize, total: usize) -> f64 {
    round_to(part as f64 * 100.0 / total as f64, 1)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::sample_reviews;
    use crate::sentiment::classify_all;

    fn review_with(body: &str) -> Review {
        Review {
            rating: None,
            title: String::new(),
            body: body.to_string(),
            date: String::new(),
            verified: false,
            helpful_votes: 0,
            sentiment: None,
            sentiment_score: None,
        }
    }

    #[test]
    fn bucket_counts_sum_to_collection_size() {
        let mut reviews = sample_reviews();
        classify_all(&mut reviews);

        let summary = summarize(&reviews);
        assert_eq!(summary.total_reviews, reviews.len());
        assert_eq!(
            summary.positive + summary.negative + summary.neutral,
            reviews.len()
        );

        let pct_sum = summary.positive_pct + summary.negative_pct + summary.neutral_pct;
        assert!(
            (pct_sum - 100.0).abs() < 0.3,
            "percentages sum to {}",
            pct_sum
        );
    }

    #[test]
    fn empty_collection_summarizes_to_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.positive_pct, 0.0);
        assert_eq!(summary.negative_pct, 0.0);
        assert_eq!(summary.neutral_pct, 0.0);
        assert_eq!(summary.avg_sentiment_score, 0.0);
    }

    #[test]
    fn stop_words_and_short_tokens_yield_no_keywords() {
        let reviews = vec![review_with("the and was product amazon it is so up")];
        assert!(top_keywords(&reviews, 20).is_empty());
    }

    #[test]
    fn keywords_rank_by_count_then_first_seen() {
        let reviews = vec![review_with("banana cherry banana cherry durian")];
        let keywords = top_keywords(&reviews, 20);
        assert_eq!(
            keywords,
            vec![
                ("banana".to_string(), 2),
                ("cherry".to_string(), 2),
                ("durian".to_string(), 1),
            ]
        );
    }

    #[test]
    fn keyword_counting_spans_title_and_body() {
        let mut review = review_with("battery battery");
        review.title = "battery".to_string();
        let keywords = top_keywords(&[review], 5);
        assert_eq!(keywords, vec![("battery".to_string(), 3)]);
    }

    #[test]
    fn top_n_caps_the_table() {
        let reviews = vec![review_with("alpha bravo charlie delta echo foxtrot")];
        assert_eq!(top_keywords(&reviews, 3).len(), 3);
    }

    #[test]
    fn insights_rank_by_helpful_votes() {
        let mut low = review_with("Broke after two days, terrible quality control.");
        low.helpful_votes = 3;
        let mut high = review_with("Arrived broken and the seller was useless about a refund.");
        high.helpful_votes = 20;

        let mut reviews = vec![low, high];
        classify_all(&mut reviews);
        assert!(reviews.iter().all(|r| r.sentiment == Some(Sentiment::Negative)));

        let insights = negative_insights(&reviews);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].helpful_votes, 20);
        assert_eq!(insights[1].helpful_votes, 3);
    }

    #[test]
    fn no_negative_reviews_is_an_empty_list() {
        let mut reviews = vec![review_with("Amazing quality, works perfectly, love it.")];
        classify_all(&mut reviews);
        assert!(negative_insights(&reviews).is_empty());
    }

    #[test]
    fn long_bodies_are_excerpted_with_a_marker() {
        let body = "x".repeat(250);
        let cut = excerpt(&body, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));

        let short = excerpt("short body", 200);
        assert_eq!(short, "short body");
    }
}
