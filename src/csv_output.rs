//! CSV output format for mining results
//!
//! One table covering both result sequences: itemset rows leave the rule
//! columns empty, rule rows carry the full split. Fields containing commas,
//! quotes, or newlines are quoted with `""` escapes.

use crate::miner::FrequentItemset;
use crate::rules::Rule;

/// CSV report formatter
#[derive(Debug, Default)]
pub struct CsvReport;

impl CsvReport {
    pub fn new() -> Self {
        Self
    }

    fn header(&self) -> String {
        ["kind", "items", "rhs", "confidence", "support"].join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_itemset(&self, f: &FrequentItemset) -> String {
        [
            "itemset".to_string(),
            Self::escape_field(&f.itemset.items().join("; ")),
            String::new(),
            String::new(),
            format!("{:.6}", f.support),
        ]
        .join(",")
    }

    fn format_rule(&self, rule: &Rule) -> String {
        [
            "rule".to_string(),
            Self::escape_field(&rule.lhs.items().join("; ")),
            Self::escape_field(&rule.rhs),
            format!("{:.6}", rule.confidence),
            format!("{:.6}", rule.support),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn render(&self, frequent: &[FrequentItemset], rules: &[Rule]) -> String {
        let mut output = String::new();
        output.push_str(&self.header());
        output.push('\n');
        for f in frequent {
            output.push_str(&self.format_itemset(f));
            output.push('\n');
        }
        for rule in rules {
            output.push_str(&self.format_rule(rule));
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::Itemset;

    fn itemset(items: &[&str]) -> Itemset {
        Itemset::new(items.iter().map(|s| s.to_string()))
    }

    fn sample_results() -> (Vec<FrequentItemset>, Vec<Rule>) {
        let frequent = vec![FrequentItemset {
            itemset: itemset(&["A", "B"]),
            support: 0.5,
        }];
        let rules = vec![Rule {
            lhs: itemset(&["A"]),
            rhs: "B".to_string(),
            confidence: 0.8,
            support: 0.5,
        }];
        (frequent, rules)
    }

    #[test]
    fn test_render_header() {
        let (frequent, rules) = sample_results();
        let csv = CsvReport::new().render(&frequent, &rules);
        assert!(csv.starts_with("kind,items,rhs,confidence,support\n"));
    }

    #[test]
    fn test_render_itemset_row() {
        let (frequent, rules) = sample_results();
        let csv = CsvReport::new().render(&frequent, &rules);
        assert!(csv.contains("itemset,A; B,,,0.500000"));
    }

    #[test]
    fn test_render_rule_row() {
        let (frequent, rules) = sample_results();
        let csv = CsvReport::new().render(&frequent, &rules);
        assert!(csv.contains("rule,A,B,0.800000,0.500000"));
    }

    #[test]
    fn test_escape_field_plain() {
        assert_eq!(CsvReport::escape_field("plain"), "plain");
    }

    #[test]
    fn test_escape_field_with_comma() {
        assert_eq!(CsvReport::escape_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_escape_field_with_quote() {
        assert_eq!(CsvReport::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_escape_field_with_newline() {
        assert_eq!(CsvReport::escape_field("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_render_empty_results() {
        let csv = CsvReport::new().render(&[], &[]);
        assert_eq!(csv, "kind,items,rhs,confidence,support\n");
    }

    #[test]
    fn test_items_with_comma_are_quoted() {
        let frequent = vec![FrequentItemset {
            itemset: itemset(&["BORO / NEW YORK, NY"]),
            support: 1.0,
        }];
        let csv = CsvReport::new().render(&frequent, &[]);
        assert!(csv.contains("\"BORO / NEW YORK, NY\""));
    }
}
