use super::{Expectation, MissingPolicy, Verdict, VerdictStatus, resolve_field};
use crate::scout::measure::field;
use crate::scout::Measured;

/// Passes when the measured status code is in the accepted set.
///
/// Defaults to accepting exactly `[200]`.
#[derive(Debug, Clone)]
pub struct ResponseCode {
    accepted: Vec<u16>,
    on_missing: MissingPolicy,
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self {
            accepted: vec![200],
            on_missing: MissingPolicy::default(),
        }
    }
}

impl ResponseCode {
    /// Accept exactly one status code.
    pub fn is(code: u16) -> Self {
        Self {
            accepted: vec![code],
            ..Self::default()
        }
    }

    /// Accept any of the given status codes.
    pub fn any_of(codes: impl Into<Vec<u16>>) -> Self {
        Self {
            accepted: codes.into(),
            ..Self::default()
        }
    }

    pub fn on_missing(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }
}

impl Expectation for ResponseCode {
    fn name(&self) -> &str {
        "response_code"
    }

    fn field(&self) -> &str {
        field::RESPONSE_CODE
    }

    fn evaluate(&self, subject: &dyn Measured) -> Verdict {
        let measurement =
            match resolve_field(subject, self.name(), self.field(), self.on_missing) {
                Ok(measurement) => measurement,
                Err(verdict) => return verdict,
            };

        let (status, message) = match measurement.as_integer() {
            Some(code) if self.accepted.iter().any(|a| i64::from(*a) == code) => (
                VerdictStatus::Passed,
                format!("status {code} accepted"),
            ),
            Some(code) => (
                VerdictStatus::Failed,
                format!(
                    "unexpected status {code} for {} (accepted: {:?})",
                    subject.target(),
                    self.accepted
                ),
            ),
            None => (
                VerdictStatus::Failed,
                format!("{} is not an integer measurement", self.field()),
            ),
        };

        Verdict {
            expectation: self.name().to_string(),
            field: self.field().to_string(),
            status,
            message,
        }
    }
}
