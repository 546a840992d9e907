// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
//
// This file provides utility functions for formatting scores, percentages and
// elapsed time for consistent output in logs and the final summary.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

use std::time::Duration;

/// Utility functions for formatting harness output
pub struct FormatUtils;

impl FormatUtils {
    /// Format a score with SI suffixes (K, M, G, T). Infinite and undefined
    /// scores get short stable spellings so report columns stay aligned.
    pub fn format_score(score: f64) -> String {
        if score.is_nan() {
            return "NaN".to_string();
        }
        if score == f64::INFINITY {
            return "inf".to_string();
        }
        if score == f64::NEG_INFINITY {
            return "--".to_string();
        }
        let magnitude = score.abs();
        if magnitude >= 1_000_000_000_000.0 {
            format!("{:.2}T", score / 1_000_000_000_000.0)
        } else if magnitude >= 1_000_000_000.0 {
            format!("{:.2}G", score / 1_000_000_000.0)
        } else if magnitude >= 1_000_000.0 {
            format!("{:.2}M", score / 1_000_000.0)
        } else if magnitude >= 1_000.0 {
            format!("{:.2}K", score / 1_000.0)
        } else {
            format!("{:.2}", score)
        }
    }

    /// Format a fraction as a percentage to one decimal place.
    pub fn format_percentage(fraction: f64) -> String {
        if fraction == f64::INFINITY {
            "inf".to_string()
        } else {
            format!("{:5.1}", 100.0 * fraction)
        }
    }

    /// Format elapsed run time as a fixed-width seconds column.
    pub fn format_elapsed(elapsed: Duration) -> String {
        format!("{:6.1}s", elapsed.as_secs_f64())
    }

    /// Format large iteration counts with suffixes (K, M, B).
    pub fn format_number(num: u64) -> String {
        if num >= 1_000_000_000 {
            format!("{:.1}B", num as f64 / 1_000_000_000.0)
        } else if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_pick_the_right_suffix() {
        assert_eq!(FormatUtils::format_score(999.0), "999.00");
        assert_eq!(FormatUtils::format_score(1_500.0), "1.50K");
        assert_eq!(FormatUtils::format_score(2_000_000.0), "2.00M");
        assert_eq!(FormatUtils::format_score(3.25e9), "3.25G");
        assert_eq!(FormatUtils::format_score(7.0e12), "7.00T");
    }

    #[test]
    fn non_finite_scores_have_stable_spellings() {
        assert_eq!(FormatUtils::format_score(f64::NAN), "NaN");
        assert_eq!(FormatUtils::format_score(f64::INFINITY), "inf");
        assert_eq!(FormatUtils::format_score(f64::NEG_INFINITY), "--");
    }

    #[test]
    fn percentages_and_counts() {
        assert_eq!(FormatUtils::format_percentage(0.253), " 25.3");
        assert_eq!(FormatUtils::format_percentage(f64::INFINITY), "inf");
        assert_eq!(FormatUtils::format_number(999), "999");
        assert_eq!(FormatUtils::format_number(1_500), "1.5K");
        assert_eq!(FormatUtils::format_number(2_500_000), "2.5M");
        assert_eq!(FormatUtils::format_number(3_000_000_000), "3.0B");
    }
}
