//! Human-readable text report for mining results
//!
//! Two sections: frequent itemsets with their support percentages, then the
//! high-confidence rules. Percentages are printed with four decimal places.

use crate::miner::FrequentItemset;
use crate::rules::Rule;
use std::fmt::Write;

/// Text report formatter
#[derive(Debug)]
pub struct TextReport {
    min_support: f64,
    min_confidence: f64,
}

impl TextReport {
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
        }
    }

    /// Render both result sequences as the final report
    pub fn render(&self, frequent: &[FrequentItemset], rules: &[Rule]) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "==Frequent itemsets (min_sup={}%)",
            ratio_percent(self.min_support)
        );
        for f in frequent {
            let _ = writeln!(out, "{}, {:.4}%", f.itemset, f.support * 100.0);
        }

        let _ = writeln!(
            out,
            "==High-confidence association rules (min_conf={}%)",
            ratio_percent(self.min_confidence)
        );
        for rule in rules {
            let _ = writeln!(
                out,
                "{} => [{}] (Conf: {:.4}%, Supp: {:.4}%)",
                rule.lhs,
                rule.rhs,
                rule.confidence * 100.0,
                rule.support * 100.0
            );
        }

        out
    }
}

/// Threshold percentage for the section headers, without trailing zeros
fn ratio_percent(ratio: f64) -> String {
    let percent = ratio * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{}", percent.round() as i64)
    } else {
        format!("{}", percent)
    }
}
