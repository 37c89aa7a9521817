use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::measure::{Measured, Measurement};

/// A timestamped snapshot of every bindable field of a scout.
///
/// Captured after `execute` returns and handed to whatever reporting layer
/// the embedding application runs. The snapshot owns its data, so it stays
/// valid while the scout moves on to its next invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub target: String,
    pub taken_at: DateTime<Utc>,
    pub measurements: BTreeMap<String, Measurement>,
}

impl Report {
    pub fn capture<S: Measured + ?Sized>(subject: &S) -> Self {
        let mut measurements = BTreeMap::new();
        for field in subject.bindable_fields() {
            let value = subject
                .measurement(field)
                .unwrap_or(Measurement::Unknown);
            measurements.insert((*field).to_string(), value);
        }

        Self {
            target: subject.target(),
            taken_at: Utc::now(),
            measurements,
        }
    }

    /// True when every field holds data, i.e. the last execution reached the
    /// target.
    pub fn is_complete(&self) -> bool {
        self.measurements.values().all(|value| !value.is_unknown())
    }
}
