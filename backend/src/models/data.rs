//! Collected science data

use super::subject::SubjectKey;
use serde::{Deserialize, Serialize};

/// One unit of collected data waiting to be kept or transmitted
///
/// `transmit_value` is the multiplicative penalty applied when the data is
/// sent home instead of recovered physically (1.0 means no penalty).
///
/// # Example
///
/// ```
/// use science_manager_core::DataUnit;
///
/// let data = DataUnit::new("temperatureScan@MunSrfLanded", 8.0).with_transmit_value(0.5);
/// assert_eq!(data.subject.as_str(), "temperatureScan@MunSrfLanded");
/// assert_eq!(data.transmit_value, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataUnit {
    pub subject: SubjectKey,
    #[serde(default)]
    pub title: String,
    pub data_amount: f64,
    #[serde(default = "full_transmit_value")]
    pub transmit_value: f64,
}

fn full_transmit_value() -> f64 {
    1.0
}

impl DataUnit {
    pub fn new(subject: impl Into<String>, data_amount: f64) -> Self {
        Self {
            subject: SubjectKey::new(subject),
            title: String::new(),
            data_amount,
            transmit_value: full_transmit_value(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_transmit_value(mut self, transmit_value: f64) -> Self {
        self.transmit_value = transmit_value;
        self
    }
}
