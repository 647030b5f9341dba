use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The severity labels the report always shows by name, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Untriaged,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Untriaged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Untriaged => "UNTRIAGED",
        }
    }

    /// Matches an already-normalized label against the known vocabulary.
    pub fn from_normalized(label: &str) -> Option<Self> {
        Severity::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercases and trims a raw cell value.
pub fn normalize_label(raw: &str) -> String {
    raw.to_uppercase().trim().to_string()
}

/// A normalized label, either one of the known severities or anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Known(Severity),
    Other(String),
}

impl Category {
    /// Returns `None` only for an empty cell. Whitespace-only cells normalize
    /// to the empty label and are counted as `Other("")`.
    pub fn classify(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let label = normalize_label(raw);
        Some(match Severity::from_normalized(&label) {
            Some(severity) => Category::Known(severity),
            None => Category::Other(label),
        })
    }
}

/// One counter per known severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub untriaged: u64,
}

impl SeverityBreakdown {
    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Untriaged => self.untriaged,
        }
    }

    fn slot_mut(&mut self, severity: Severity) -> &mut u64 {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Untriaged => &mut self.untriaged,
        }
    }

    pub fn add(&mut self, severity: Severity, count: u64) {
        *self.slot_mut(severity) += count;
    }

    pub fn merge(&mut self, other: &SeverityBreakdown) {
        for severity in Severity::ALL {
            self.add(severity, other.get(severity));
        }
    }

    pub fn sum(&self) -> u64 {
        Severity::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Counts for a single file: known severities plus every other label seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub known: SeverityBreakdown,
    pub other: BTreeMap<String, u64>,
}

impl SeverityCounts {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Known(severity) => self.known.add(severity, 1),
            Category::Other(label) => *self.other.entry(label).or_insert(0) += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> u64 {
        self.known.get(severity)
    }

    /// Row count across all labels, including ones outside the known five.
    pub fn total(&self) -> u64 {
        self.known.sum() + self.other.values().sum::<u64>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally {
    pub file: String,
    pub counts: SeverityCounts,
    pub blank_cells: u64,
}

/// Running totals carried across files into the final summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityTotals {
    pub counts: SeverityBreakdown,
    pub files_processed: usize,
    pub files_skipped: usize,
}

impl SeverityTotals {
    pub fn absorb(&mut self, tally: &FileTally) {
        self.counts.merge(&tally.counts.known);
        self.files_processed += 1;
    }

    pub fn skip(&mut self) {
        self.files_skipped += 1;
    }

    pub fn merge(mut self, other: SeverityTotals) -> SeverityTotals {
        self.counts.merge(&other.counts);
        self.files_processed += other.files_processed;
        self.files_skipped += other.files_skipped;
        self
    }

    pub fn get(&self, severity: Severity) -> u64 {
        self.counts.get(severity)
    }

    /// Sum of the five known totals.
    pub fn grand_total(&self) -> u64 {
        self.counts.sum()
    }
}
