use serde::{Deserialize, Serialize};

/// One scraped product review.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    /// Star rating in [1, 5]. None when the rating text was unparsable.
    pub rating: Option<f32>,
    pub title: String,
    /// Review text. Always non-empty: body-less blocks are dropped at extraction time.
    pub body: String,
    /// Free-text date string as shown on the page ("January 15, 2026").
    pub date: String,
    /// Verified-purchase badge present.
    pub verified: bool,
    pub helpful_votes: u32,
    /// Filled in by classification, absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Polarity in [-1, +1]. Filled in by classification, absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

impl Review {
    /// Title and body joined, the text every analysis stage works on.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Fixed sample set for `--demo` runs and deterministic tests.
pub fn sample_reviews() -> Vec<Review> {
    fn sample(rating: f32, title: &str, body: &str, date: &str, helpful_votes: u32) -> Review {
        Review {
            rating: Some(rating),
            title: title.to_string(),
            body: body.to_string(),
            date: date.to_string(),
            verified: true,
            helpful_votes,
            sentiment: None,
            sentiment_score: None,
        }
    }

    vec![
        sample(
            5.0,
            "Amazing product!",
            "This magnesium has really helped with my sleep quality. I fall asleep faster and wake up refreshed. Highly recommend for anyone with sleep issues.",
            "January 15, 2026",
            12,
        ),
        sample(
            5.0,
            "Great for focus",
            "I started taking this for brain fog and it has made a noticeable difference. My concentration is better during work. Quality Canadian product.",
            "January 10, 2026",
            8,
        ),
        sample(
            4.0,
            "Good but capsules are large",
            "The product works well for my anxiety but the capsules are quite large and hard to swallow. Would prefer smaller capsules. Otherwise great quality.",
            "January 8, 2026",
            5,
        ),
        sample(
            5.0,
            "Finally sleeping through the night",
            "After trying many sleep supplements, this magnesium l-threonate actually works. No grogginess in the morning. Will definitely repurchase.",
            "January 5, 2026",
            15,
        ),
        sample(
            3.0,
            "Okay but expensive",
            "The product seems to work but its quite pricey compared to other magnesium supplements. Not sure if the premium is worth it yet.",
            "January 3, 2026",
            3,
        ),
        sample(
            2.0,
            "Didn't notice any difference",
            "I took this for a month and honestly didnt notice any improvement in my sleep or focus. Maybe it works for others but not for me. Disappointed.",
            "December 28, 2025",
            7,
        ),
        sample(
            5.0,
            "Best magnesium I've tried",
            "I have tried many forms of magnesium and L-threonate is the only one that crosses the blood brain barrier. This product is high quality and Canadian made which I appreciate.",
            "December 25, 2025",
            20,
        ),
        sample(
            4.0,
            "Helps with stress",
            "Taking this before bed helps me unwind and manage my stress levels. Good product, fast shipping from Amazon.",
            "December 20, 2025",
            4,
        ),
        sample(
            1.0,
            "Gave me stomach issues",
            "Unfortunately this product gave me an upset stomach and nausea. Had to stop taking it after a few days. Not for everyone I guess.",
            "December 15, 2025",
            9,
        ),
        sample(
            5.0,
            "Noticeable cognitive improvement",
            "As a software developer, I need to stay sharp. This supplement has noticeably improved my memory and mental clarity. Taking 2 capsules at night.",
            "December 10, 2025",
            11,
        ),
    ]
}
