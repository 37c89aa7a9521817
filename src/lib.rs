//! Pluggable health-monitoring scouts with composable expectations.
//!
//! A *scout* is a configured unit that performs one network check per
//! invocation and publishes typed, named measurements. Separate *expectation*
//! objects read those measurements through the [`Measured`](scout::Measured)
//! capability and return pass/fail verdicts, so any scout automatically
//! supports any expectation bound to a field it declares.
//!
//! Scheduling, alert routing and configuration loading are left to the
//! embedding application: it constructs scouts from their config structs,
//! calls [`Scout::execute`](scout::Scout::execute) on whatever cadence it
//! wants, and hands the scout to its expectations afterwards.
//!
//! ```no_run
//! use oxyscout::prelude::*;
//!
//! # async fn demo() -> Result<(), oxyscout::ScoutError> {
//! let mut scout = HttpsScout::new(HttpConfig::from_url("https://example.test/health")?)?;
//! scout.execute().await?;
//!
//! let checks: Vec<Box<dyn Expectation>> = vec![
//!     Box::new(ResponseCode::is(200)),
//!     Box::new(ResponseTime::below(500.0)),
//! ];
//! for verdict in evaluate_all(&scout, &checks) {
//!     println!("{} -> {:?}: {}", verdict.expectation, verdict.status, verdict.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod expect;
pub mod scout;
pub mod scouts;
pub mod transport;

pub use error::ScoutError;

pub mod prelude {
    pub use crate::config::{DnsConfig, HttpConfig, TcpConfig, TlsCertConfig};
    pub use crate::error::ScoutError;
    pub use crate::expect::{
        Expectation, MissingPolicy, ResponseBody, ResponseCode, ResponseTime, Verdict,
        VerdictStatus, all_passed, evaluate_all,
    };
    pub use crate::scout::{Measured, Measurement, Report, Scout, field};
    pub use crate::scouts::{DnsScout, HttpsScout, TcpScout, TlsCertScout};
    pub use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};
}
