use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisSummary};
use crate::review::Review;

/// Complaint excerpts are cut down further for the terminal.
const INSIGHT_EXCERPT_CHARS: usize = 150;
const REPORT_INSIGHTS: usize = 5;

/// Everything one run produces, in exportable form.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub generated_at: String,
    pub marketplace: String,
    pub analysis: AnalysisSummary,
    pub keywords: Vec<(String, usize)>,
    pub reviews: Vec<Review>,
}

/// Render the analysis report to the terminal.
pub fn render(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("⚠️  No reviews to analyze.");
        return;
    }

    let summary = analysis::summarize(reviews);
    let keywords = analysis::top_keywords(reviews, analysis::REPORT_KEYWORDS);
    let insights = analysis::negative_insights(reviews);

    println!();
    println!("╭────────────────────────────────────╮");
    println!("│   📊 ReviewPulse Analysis Report   │");
    println!("╰────────────────────────────────────╯");
    println!();
    println!("{:<18} {:>8} {:>14}", "Metric", "Value", "Percentage");
    println!("{}", "─".repeat(42));
    println!("{:<18} {:>8}", "Total Reviews", summary.total_reviews);
    println!("{:<17} {:>8} {:>13}%", "✅ Positive", summary.positive, summary.positive_pct);
    println!("{:<17} {:>8} {:>13}%", "❌ Negative", summary.negative, summary.negative_pct);
    println!("{:<17} {:>8} {:>13}%", "➖ Neutral", summary.neutral, summary.neutral_pct);
    println!("{:<18} {:>8} {:>14}", "Avg Sentiment", summary.avg_sentiment_score, "(-1 to +1)");

    if !keywords.is_empty() {
        println!("\n🏷️  Top Keywords");
        let digest = keywords
            .iter()
            .take(analysis::DIGEST_KEYWORDS)
            .map(|(word, count)| format!("{} ({})", word, count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("   {}", digest);
    }

    if !insights.is_empty() {
        println!("\n⚠️  Top Complaints (negative reviews by helpfulness)");
        for (i, insight) in insights.iter().take(REPORT_INSIGHTS).enumerate() {
            let stars = insight
                .rating
                .map(|r| format!("★{}", r))
                .unwrap_or_else(|| "★?".to_string());
            println!("\n   {}. {} - {}", i + 1, stars, insight.title);
            println!("      {}", analysis::excerpt(&insight.excerpt, INSIGHT_EXCERPT_CHARS));
        }
    }
}

/// Write the full annotated collection plus derived views as pretty JSON.
pub fn export_json(path: &Path, marketplace: &str, reviews: &[Review]) -> Result<()> {
    let document = ExportDocument {
        generated_at: Local::now().to_rfc3339(),
        marketplace: marketplace.to_string(),
        analysis: analysis::summarize(reviews),
        keywords: analysis::top_keywords(reviews, analysis::EXPORT_KEYWORDS),
        reviews: reviews.to_vec(),
    };

    let json = serde_json::to_string_pretty(&document)?;
    fs::write(path, json).with_context(|| format!("writing export to {}", path.display()))?;

    println!("\n✅ Exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::sample_reviews;
    use crate::sentiment::classify_all;

    #[test]
    fn export_round_trips() {
        let mut reviews = sample_reviews();
        classify_all(&mut reviews);

        let path = std::env::temp_dir().join("reviewpulse_export_roundtrip.json");
        export_json(&path, "ca", &reviews).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let document: ExportDocument = serde_json::from_str(&raw).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(document.marketplace, "ca");
        assert_eq!(document.reviews.len(), reviews.len());
        assert_eq!(document.analysis, analysis::summarize(&reviews));
        assert_eq!(
            document.keywords,
            analysis::top_keywords(&reviews, analysis::EXPORT_KEYWORDS)
        );

        // Annotations survive the trip.
        for (read, original) in document.reviews.iter().zip(&reviews) {
            assert_eq!(read.sentiment, original.sentiment);
            assert_eq!(read.sentiment_score, original.sentiment_score);
            assert_eq!(read.body, original.body);
        }
    }

    #[test]
    fn render_handles_an_empty_collection() {
        // Must not panic or divide by zero.
        render(&[]);
    }
}
