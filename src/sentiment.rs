//! Thin wrapper over the VADER lexicon scorer.
//!
//! Stateless and deterministic: the analyzer is rebuilt per call and the
//! same input always yields the same scores. No caching, no length cap.

use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

/// Score a text, scaling VADER's [0, 1] fractions to percentages.
pub fn analyse(text: &str) -> SentimentScores {
    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let pct = |key: &str| scores.get(key).copied().unwrap_or_default() * 100.0;

    SentimentScores {
        negative: pct("neg"),
        neutral: pct("neu"),
        positive: pct("pos"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        let scores = analyse("I love this");
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn negative_text_scores_negative() {
        let scores = analyse("I hate this");
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn scores_sum_to_roughly_one_hundred() {
        let scores = analyse("The food was great but the service was terrible");
        let sum = scores.negative + scores.neutral + scores.positive;
        assert!((sum - 100.0).abs() < 1.0, "sum was {}", sum);
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let first = analyse("Consistency is a virtue");
        let second = analyse("Consistency is a virtue");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_is_all_neutral_zero() {
        let scores = analyse("");
        assert_eq!(scores.positive, 0.0);
        assert_eq!(scores.negative, 0.0);
    }
}
