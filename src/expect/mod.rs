//! Expectation evaluation over measured scouts.
//!
//! An expectation is a named predicate bound to a named measurement field.
//! It reads the field through [`Measured`] after the scout has executed and
//! returns a [`Verdict`]; it never sees the scout type itself and never
//! panics on absent data.

pub mod response_body;
pub mod response_code;
pub mod response_time;

pub use response_body::ResponseBody;
pub use response_code::ResponseCode;
pub use response_time::ResponseTime;

use serde::Serialize;
use unicode_truncate::UnicodeTruncateStr;

use crate::scout::{Measured, Measurement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictStatus {
    Passed,
    Failed,
    Skipped,
}

/// The outcome of one expectation against one measurement snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// Name of the expectation that produced this verdict.
    pub expectation: String,
    /// The measurement field the expectation was bound to.
    pub field: String,
    pub status: VerdictStatus,
    /// Advisory, human-readable explanation.
    pub message: String,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.status == VerdictStatus::Passed
    }
}

/// How an expectation scores the unknown sentinel.
///
/// After a reachability failure there is no data to judge; the default is to
/// fail the check, since "could not measure" and "unhealthy" alert the same
/// way. `Skip` suits advisory expectations that should stay quiet when the
/// primary reachability check already failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    #[default]
    Fail,
    Skip,
}

pub trait Expectation: Send + Sync {
    /// Name of this expectation, used in verdicts and reports.
    fn name(&self) -> &str;

    /// The measurement field this expectation is bound to.
    fn field(&self) -> &str;

    fn evaluate(&self, subject: &dyn Measured) -> Verdict;
}

/// Evaluate every expectation against one subject.
pub fn evaluate_all(
    subject: &dyn Measured,
    expectations: &[Box<dyn Expectation>],
) -> Vec<Verdict> {
    expectations
        .iter()
        .map(|expectation| expectation.evaluate(subject))
        .collect()
}

/// True when no verdict failed. Skipped verdicts do not count against.
pub fn all_passed(verdicts: &[Verdict]) -> bool {
    verdicts
        .iter()
        .all(|verdict| verdict.status != VerdictStatus::Failed)
}

/// Common front half of every evaluation: fetch the bound field, turn an
/// undeclared field or the unknown sentinel into a verdict.
pub(crate) fn resolve_field(
    subject: &dyn Measured,
    name: &str,
    field: &str,
    on_missing: MissingPolicy,
) -> Result<Measurement, Verdict> {
    let verdict = |status, message| Verdict {
        expectation: name.to_string(),
        field: field.to_string(),
        status,
        message,
    };

    match subject.measurement(field) {
        None => Err(verdict(
            VerdictStatus::Failed,
            format!("{} does not declare field {field}", subject.target()),
        )),
        Some(Measurement::Unknown) => match on_missing {
            MissingPolicy::Fail => Err(verdict(
                VerdictStatus::Failed,
                format!("no {field} measured for {}", subject.target()),
            )),
            MissingPolicy::Skip => Err(verdict(
                VerdictStatus::Skipped,
                format!("no {field} measured for {}, skipped", subject.target()),
            )),
        },
        Some(measurement) => Ok(measurement),
    }
}

/// Width-bounded excerpt of body content for verdict messages.
pub(crate) fn excerpt(text: &str, width: usize) -> String {
    let (truncated, _) = text.unicode_truncate(width);
    if truncated.len() < text.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scout::measure::field;

    pub(crate) struct StubSubject {
        pub code: Measurement,
        pub body: Measurement,
        pub time: Measurement,
    }

    impl StubSubject {
        pub(crate) fn responsive(code: i64, body: &str, time: f64) -> Self {
            Self {
                code: Measurement::Integer(code),
                body: Measurement::Text(body.to_string()),
                time: Measurement::Float(time),
            }
        }

        pub(crate) fn unreachable() -> Self {
            Self {
                code: Measurement::Unknown,
                body: Measurement::Unknown,
                time: Measurement::Unknown,
            }
        }
    }

    impl Measured for StubSubject {
        fn target(&self) -> String {
            "example.test:443/".to_string()
        }

        fn bindable_fields(&self) -> &'static [&'static str] {
            &[field::RESPONSE_CODE, field::RESPONSE_BODY, field::RESPONSE_TIME]
        }

        fn measurement(&self, name: &str) -> Option<Measurement> {
            match name {
                field::RESPONSE_CODE => Some(self.code.clone()),
                field::RESPONSE_BODY => Some(self.body.clone()),
                field::RESPONSE_TIME => Some(self.time.clone()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_evaluate_all_and_aggregate() {
        let subject = StubSubject::responsive(200, "OK", 12.0);
        let expectations: Vec<Box<dyn Expectation>> = vec![
            Box::new(ResponseCode::is(200)),
            Box::new(ResponseTime::below(500.0)),
            Box::new(ResponseBody::contains("OK")),
        ];

        let verdicts = evaluate_all(&subject, &expectations);
        assert_eq!(verdicts.len(), 3);
        assert!(all_passed(&verdicts));
    }

    #[test]
    fn test_skipped_verdicts_do_not_fail_aggregate() {
        let subject = StubSubject::unreachable();
        let expectations: Vec<Box<dyn Expectation>> = vec![Box::new(
            ResponseTime::below(500.0).on_missing(MissingPolicy::Skip),
        )];

        let verdicts = evaluate_all(&subject, &expectations);
        assert_eq!(verdicts[0].status, VerdictStatus::Skipped);
        assert!(all_passed(&verdicts));
    }

    #[test]
    fn test_undeclared_field_fails_without_panicking() {
        struct Bare;
        impl Measured for Bare {
            fn target(&self) -> String {
                "bare".to_string()
            }
            fn bindable_fields(&self) -> &'static [&'static str] {
                &[]
            }
            fn measurement(&self, _: &str) -> Option<Measurement> {
                None
            }
        }

        let verdict = ResponseCode::is(200).evaluate(&Bare);
        assert_eq!(verdict.status, VerdictStatus::Failed);
        assert!(verdict.message.contains("does not declare"));
    }

    #[test]
    fn test_excerpt_bounds_width() {
        assert_eq!(excerpt("short", 80), "short");
        let long = "x".repeat(100);
        let bounded = excerpt(&long, 10);
        assert_eq!(bounded, format!("{}...", "x".repeat(10)));
    }
}
