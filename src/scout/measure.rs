use serde::Serialize;

/// Canonical measurement field names.
///
/// Expectations are bound to fields by name; scouts declare which of these
/// they populate via [`Measured::bindable_fields`].
pub mod field {
    /// Numeric HTTP-style status code.
    pub const RESPONSE_CODE: &str = "response_code";
    /// Raw response body text.
    pub const RESPONSE_BODY: &str = "response_body";
    /// Wall-clock request round trip in milliseconds.
    pub const RESPONSE_TIME: &str = "response_time";
    /// TCP connection establishment time in milliseconds.
    pub const CONNECT_TIME: &str = "connect_time";
    /// Name resolution time in milliseconds.
    pub const RESOLVE_TIME: &str = "resolve_time";
    /// Number of addresses a name resolved to.
    pub const ADDRESS_COUNT: &str = "address_count";
    /// TLS handshake time in milliseconds.
    pub const HANDSHAKE_TIME: &str = "handshake_time";
    /// Days until the peer certificate expires, negative once it has.
    pub const CERT_EXPIRY_DAYS: &str = "cert_expiry_days";
}

/// A single measured value, or the explicit "no data" sentinel.
///
/// `Unknown` is what every field of a scout reports together after a
/// reachability failure, and before the first execution. Serialized as
/// `null` so downstream reporting sees absence, not a stale number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measurement {
    Unknown,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Measurement {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Measurement::Unknown)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Measurement::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Measurement::Float(value) => Some(*value),
            Measurement::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Measurement::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Read-only access to a scout's measurement fields.
///
/// This is the seam between scouts and expectations: an expectation never
/// sees a concrete scout type, only a `&dyn Measured`, so any scout that
/// declares a field automatically supports every expectation reading it.
pub trait Measured {
    /// Human-readable subject of the check, e.g. `example.test:443/health`.
    fn target(&self) -> String;

    /// The field names expectations can be bound to on this scout.
    fn bindable_fields(&self) -> &'static [&'static str];

    /// Current value of a field.
    ///
    /// `None` means the field is not declared by this scout (a binding
    /// mistake); `Some(Measurement::Unknown)` means the field is declared but
    /// holds no data, either because the scout has not executed yet or
    /// because the last execution could not reach the target.
    fn measurement(&self, field: &str) -> Option<Measurement>;
}
