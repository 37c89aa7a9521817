use super::{Expectation, MissingPolicy, Verdict, VerdictStatus, resolve_field};
use crate::scout::measure::field;
use crate::scout::Measured;

#[derive(Debug, Clone, Copy)]
enum Bound {
    Below(f64),
    Above(f64),
}

/// Threshold check on a float-millisecond measurement.
///
/// Bound to `response_time` by default; `for_field` rebinds it to any other
/// numeric field, e.g. `connect_time` or `cert_expiry_days`.
#[derive(Debug, Clone)]
pub struct ResponseTime {
    bound: Bound,
    field: &'static str,
    on_missing: MissingPolicy,
}

impl ResponseTime {
    /// Passes when the measured value is strictly below `limit`.
    pub fn below(limit: f64) -> Self {
        Self {
            bound: Bound::Below(limit),
            field: field::RESPONSE_TIME,
            on_missing: MissingPolicy::default(),
        }
    }

    /// Passes when the measured value is strictly above `floor`.
    pub fn above(floor: f64) -> Self {
        Self {
            bound: Bound::Above(floor),
            field: field::RESPONSE_TIME,
            on_missing: MissingPolicy::default(),
        }
    }

    /// Bind the threshold to another numeric field.
    pub fn for_field(mut self, field: &'static str) -> Self {
        self.field = field;
        self
    }

    pub fn on_missing(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }
}

impl Expectation for ResponseTime {
    fn name(&self) -> &str {
        "response_time"
    }

    fn field(&self) -> &str {
        self.field
    }

    fn evaluate(&self, subject: &dyn Measured) -> Verdict {
        let measurement =
            match resolve_field(subject, self.name(), self.field, self.on_missing) {
                Ok(measurement) => measurement,
                Err(verdict) => return verdict,
            };

        let (status, message) = match measurement.as_float() {
            Some(value) => {
                let (held, description) = match self.bound {
                    Bound::Below(limit) => (value < limit, format!("below {limit:.2}")),
                    Bound::Above(floor) => (value > floor, format!("above {floor:.2}")),
                };
                if held {
                    (
                        VerdictStatus::Passed,
                        format!("{} {value:.2} is {description}", self.field),
                    )
                } else {
                    (
                        VerdictStatus::Failed,
                        format!("{} {value:.2} is not {description}", self.field),
                    )
                }
            }
            None => (
                VerdictStatus::Failed,
                format!("{} is not a numeric measurement", self.field),
            ),
        };

        Verdict {
            expectation: self.name().to_string(),
            field: self.field.to_string(),
            status,
            message,
        }
    }
}
