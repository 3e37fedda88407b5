//! Word-list sentiment scoring.
//!
//! A lightweight lexicon analyzer: polarity is the balance of positive and
//! negative word hits in the text, in [-1, +1]. Scores are a pure function of
//! the text, so the same collection always classifies the same way. The
//! pipeline only depends on the `polarity` contract; a different scorer can
//! be swapped in behind it.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::review::{Review, Sentiment};

/// Three-way label cutoffs on the polarity score.
const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;

/// How many tokens back a negation still flips a sentiment word
/// ("didn't notice any improvement" counts against, not for).
const NEGATION_WINDOW: usize = 3;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "superb",
        "outstanding", "brilliant", "love", "loved", "best", "better", "perfect",
        "awesome", "incredible", "delightful", "pleasant", "satisfied", "satisfying",
        "recommend", "recommended", "impressive", "exceptional", "remarkable",
        "effective", "helpful", "reliable", "quality", "valuable", "works", "work",
        "worked", "worth", "helps", "helped", "improve", "improves", "improved",
        "improvement", "refreshed", "fast", "faster", "easy", "comfortable",
        "sturdy", "durable", "appreciate", "happy", "pleased", "smooth", "solid",
        "accurate", "beautiful", "favorite",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate",
        "hated", "dislike", "disappointing", "disappointed", "disappoints",
        "failure", "failed", "fail", "useless", "waste", "wasted", "broken",
        "broke", "defective", "faulty", "flimsy", "refund", "returned", "problem",
        "problems", "issue", "issues", "upset", "nausea", "headache", "sick",
        "painful", "hurt", "hard", "difficult", "confusing", "expensive",
        "overpriced", "pricey", "worthless", "garbage", "trash", "pathetic",
        "mediocre", "subpar", "inferior", "unreliable", "slow", "leaked",
        "leaking", "stopped", "unfortunately", "scam", "fake",
    ]
    .into_iter()
    .collect()
});

/// Negation markers. Tokens are alphabetic runs, so "didn't" arrives as
/// "didn" and contractions without the apostrophe arrive whole.
static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "none", "nothing", "neither", "nor", "without",
        "hardly", "barely", "didnt", "didn", "dont", "don", "doesnt", "doesn",
        "isnt", "isn", "wasnt", "wasn", "arent", "aren", "werent", "weren",
        "couldnt", "couldn", "wouldnt", "wouldn", "shouldnt", "shouldn", "wont",
        "cannot",
    ]
    .into_iter()
    .collect()
});

/// Polarity of a text in [-1, +1]. 0.0 when no sentiment words are present.
pub fn polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .collect();

    let mut positive = 0u32;
    let mut negative = 0u32;

    for i in 0..words.len() {
        let word = words[i];
        let hit = if POSITIVE_WORDS.contains(word) {
            1
        } else if NEGATIVE_WORDS.contains(word) {
            -1
        } else {
            continue;
        };

        let window_start = i.saturating_sub(NEGATION_WINDOW);
        let negated = words[window_start..i].iter().any(|w| NEGATIONS.contains(*w));

        if (hit > 0) != negated {
            positive += 1;
        } else {
            negative += 1;
        }
    }

    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }
    (f64::from(positive) - f64::from(negative)) / f64::from(total)
}

pub fn classify(score: f64) -> Sentiment {
    if score > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Score every record and write the label and polarity onto it in place.
/// An empty collection is a no-op.
pub fn classify_all(reviews: &mut [Review]) {
    for review in reviews.iter_mut() {
        let score = polarity(&review.full_text());
        review.sentiment = Some(classify(score));
        review.sentiment_score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::sample_reviews;

    #[test]
    fn positive_text_scores_positive() {
        let score = polarity("This product is amazing and wonderful. I love it. Best purchase ever!");
        assert!(score > POSITIVE_THRESHOLD);
        assert_eq!(classify(score), Sentiment::Positive);
    }

    #[test]
    fn negative_text_scores_negative() {
        let score = polarity("Terrible and horrible. Worst experience, total failure, complete waste.");
        assert!(score < NEGATIVE_THRESHOLD);
        assert_eq!(classify(score), Sentiment::Negative);
    }

    #[test]
    fn text_without_sentiment_words_is_neutral() {
        assert_eq!(polarity("The item arrived on a Tuesday in a cardboard box."), 0.0);
        assert_eq!(polarity(""), 0.0);
        assert_eq!(classify(0.0), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_a_nearby_sentiment_word() {
        // "works" alone is positive; negated it counts the other way.
        assert!(polarity("it works") > 0.0);
        assert!(polarity("it never works") < 0.0);
        assert!(polarity("didnt notice any improvement") < 0.0);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(classify(0.1), Sentiment::Neutral);
        assert_eq!(classify(-0.1), Sentiment::Neutral);
        assert_eq!(classify(0.11), Sentiment::Positive);
        assert_eq!(classify(-0.11), Sentiment::Negative);
    }

    #[test]
    fn scores_stay_in_range() {
        let mut reviews = sample_reviews();
        classify_all(&mut reviews);
        for review in &reviews {
            let score = review.sentiment_score.unwrap();
            assert!((-1.0..=1.0).contains(&score), "score {} out of range", score);
            assert_eq!(review.sentiment.unwrap(), classify(score));
        }
    }

    #[test]
    fn sample_set_classification_is_deterministic() {
        let mut first = sample_reviews();
        let mut second = sample_reviews();
        classify_all(&mut first);
        classify_all(&mut second);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.sentiment, b.sentiment);
            assert_eq!(a.sentiment_score, b.sentiment_score);
        }
    }

    #[test]
    fn sample_set_has_expected_anchors() {
        let mut reviews = sample_reviews();
        classify_all(&mut reviews);

        // Every record gets annotated.
        assert!(reviews.iter().all(|r| r.sentiment.is_some()));

        // Clear-cut anchors from the sample data.
        assert_eq!(reviews[6].sentiment, Some(Sentiment::Positive)); // "Best magnesium I've tried"
        assert_eq!(reviews[8].sentiment, Some(Sentiment::Negative)); // "Gave me stomach issues"
    }
}
