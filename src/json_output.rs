//! JSON output format for mining results

use crate::miner::FrequentItemset;
use crate::rules::Rule;
use serde::Serialize;

/// Mining parameters echoed into the report header
#[derive(Debug, Clone, Serialize)]
pub struct JsonParameters {
    pub min_support: f64,
    pub min_confidence: f64,
}

/// A frequent itemset entry
#[derive(Debug, Clone, Serialize)]
pub struct JsonItemset {
    /// Items in canonical order
    pub items: Vec<String>,
    /// Fraction of baskets containing the itemset
    pub support: f64,
}

/// An association rule entry
#[derive(Debug, Clone, Serialize)]
pub struct JsonRule {
    /// Left-hand side items in canonical order
    pub lhs: Vec<String>,
    /// Single implied item
    pub rhs: String,
    /// support(lhs ∪ rhs) / support(lhs)
    pub confidence: f64,
    /// Support of the combined itemset
    pub support: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub parameters: JsonParameters,
    pub frequent_itemsets: Vec<JsonItemset>,
    pub rules: Vec<JsonRule>,
}

impl JsonReport {
    pub fn new(
        min_support: f64,
        min_confidence: f64,
        frequent: &[FrequentItemset],
        rules: &[Rule],
    ) -> Self {
        Self {
            parameters: JsonParameters {
                min_support,
                min_confidence,
            },
            frequent_itemsets: frequent
                .iter()
                .map(|f| JsonItemset {
                    items: f.itemset.items().to_vec(),
                    support: f.support,
                })
                .collect(),
            rules: rules
                .iter()
                .map(|r| JsonRule {
                    lhs: r.lhs.items().to_vec(),
                    rhs: r.rhs.clone(),
                    confidence: r.confidence,
                    support: r.support,
                })
                .collect(),
        }
    }

    /// Serialize as compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
