//! Research subjects
//!
//! A research subject is one scientific topic (an experiment in a given
//! situation over a given body) with a capped point value. The host's
//! research ledger owns and mutates subjects; the core only ever sees
//! snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a research subject, as issued by the host ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectKey(String);

impl SubjectKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Snapshot of a research subject's standing in the ledger
///
/// # Fields
///
/// * `current_science` - points already banked for this subject
/// * `science_cap` - maximum points the subject can ever award
/// * `data_scale` - data amount that corresponds to one full measurement
/// * `subject_value` - situational multiplier (body, biome, altitude band)
/// * `scientific_value` - fraction of full value the next result is worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSubject {
    pub key: SubjectKey,
    #[serde(default)]
    pub title: String,
    pub current_science: f64,
    pub science_cap: f64,
    pub data_scale: f64,
    pub subject_value: f64,
    pub scientific_value: f64,
}

impl ResearchSubject {
    /// Create a fresh, untouched subject
    ///
    /// # Example
    ///
    /// ```
    /// use science_manager_core::ResearchSubject;
    ///
    /// let subject = ResearchSubject::new("crewReport@KerbinSrfLanded", 10.0);
    /// assert_eq!(subject.current_science, 0.0);
    /// assert_eq!(subject.scientific_value, 1.0);
    /// assert_eq!(subject.headroom(), 10.0);
    /// ```
    pub fn new(key: impl Into<String>, science_cap: f64) -> Self {
        Self {
            key: SubjectKey::new(key),
            title: String::new(),
            current_science: 0.0,
            science_cap,
            data_scale: 1.0,
            subject_value: 1.0,
            scientific_value: 1.0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_data_scale(mut self, data_scale: f64) -> Self {
        self.data_scale = data_scale;
        self
    }

    pub fn with_subject_value(mut self, subject_value: f64) -> Self {
        self.subject_value = subject_value;
        self
    }

    /// Set banked science and derive the matching value multiplier
    pub fn with_current_science(mut self, current_science: f64) -> Self {
        self.current_science = current_science;
        self.scientific_value = self.derived_scientific_value();
        self
    }

    /// Points still obtainable before the cap
    pub fn headroom(&self) -> f64 {
        (self.science_cap - self.current_science).max(0.0)
    }

    /// Whether banked science is within `epsilon` of the cap
    pub fn is_near_cap(&self, epsilon: f64) -> bool {
        self.current_science >= self.science_cap - epsilon
    }

    /// Whether the subject is completely exhausted
    pub fn is_capped(&self) -> bool {
        self.current_science >= self.science_cap
    }

    /// Multiplier implied by the banked fraction: `1 - current / cap`
    pub fn derived_scientific_value(&self) -> f64 {
        if self.science_cap <= 0.0 {
            return 0.0;
        }
        (1.0 - self.current_science / self.science_cap).clamp(0.0, 1.0)
    }

    /// Whether the subject's numbers allow any valuation at all
    pub(crate) fn is_valuable(&self) -> bool {
        self.science_cap > 0.0 && self.data_scale > 0.0
    }
}
