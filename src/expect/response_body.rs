use regex::Regex;

use super::{Expectation, MissingPolicy, Verdict, VerdictStatus, excerpt, resolve_field};
use crate::scout::measure::field;
use crate::scout::Measured;

const EXCERPT_WIDTH: usize = 80;

#[derive(Debug, Clone)]
enum Rule {
    Contains(String),
    Equals(String),
    Differs(String),
    Matches(Regex),
}

/// Pattern check on the measured response body.
#[derive(Debug, Clone)]
pub struct ResponseBody {
    rule: Rule,
    on_missing: MissingPolicy,
}

impl ResponseBody {
    /// Passes when the body contains `fragment`.
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::with_rule(Rule::Contains(fragment.into()))
    }

    /// Passes when the body equals `content` exactly.
    pub fn equals(content: impl Into<String>) -> Self {
        Self::with_rule(Rule::Equals(content.into()))
    }

    /// Passes when the body differs from `content`.
    pub fn differs(content: impl Into<String>) -> Self {
        Self::with_rule(Rule::Differs(content.into()))
    }

    /// Passes when the body matches `pattern`.
    pub fn matches(pattern: Regex) -> Self {
        Self::with_rule(Rule::Matches(pattern))
    }

    fn with_rule(rule: Rule) -> Self {
        Self {
            rule,
            on_missing: MissingPolicy::default(),
        }
    }

    pub fn on_missing(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }
}

impl Expectation for ResponseBody {
    fn name(&self) -> &str {
        "response_body"
    }

    fn field(&self) -> &str {
        field::RESPONSE_BODY
    }

    fn evaluate(&self, subject: &dyn Measured) -> Verdict {
        let measurement =
            match resolve_field(subject, self.name(), self.field(), self.on_missing) {
                Ok(measurement) => measurement,
                Err(verdict) => return verdict,
            };

        let (status, message) = match measurement.as_text() {
            Some(body) => {
                let (held, description) = match &self.rule {
                    Rule::Contains(fragment) => {
                        (body.contains(fragment), format!("contain {fragment:?}"))
                    }
                    Rule::Equals(content) => (body == content, format!("equal {content:?}")),
                    Rule::Differs(content) => {
                        (body != content, format!("differ from {content:?}"))
                    }
                    Rule::Matches(pattern) => {
                        (pattern.is_match(body), format!("match /{pattern}/"))
                    }
                };
                if held {
                    (VerdictStatus::Passed, format!("body does {description}"))
                } else {
                    (
                        VerdictStatus::Failed,
                        format!(
                            "body {:?} does not {description}",
                            excerpt(body, EXCERPT_WIDTH)
                        ),
                    )
                }
            }
            None => (
                VerdictStatus::Failed,
                format!("{} is not a text measurement", self.field()),
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
