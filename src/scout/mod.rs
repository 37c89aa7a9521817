//! The scout execution contract.
//!
//! A scout is constructed from an immutable config struct, then executed
//! repeatedly by an external scheduler. Each execution performs one complete
//! network transaction and overwrites the previous measurement set; nothing
//! accumulates across invocations.
//!
//! - [`Scout`]: the lifecycle trait every concrete scout implements
//! - [`Measured`]: read-only access to typed, named measurement fields
//! - [`Measurement`]: a field value, or the unknown sentinel
//! - [`Report`]: a timestamped snapshot of every bindable field

pub mod measure;
pub mod report;

pub use measure::{Measured, Measurement, field};
pub use report::Report;

use async_trait::async_trait;

use crate::error::ScoutError;

/// A unit that performs one network check per invocation.
///
/// `execute` blocks the calling task for the duration of the round trip and
/// returns only after completion or a caught reachability failure. An
/// unreachable target is **not** an error: it is recorded by resetting every
/// measurement to [`Measurement::Unknown`], and `execute` returns `Ok(())`.
/// Only configuration and programming mistakes surface as `Err`; those must
/// reach the scheduler rather than masquerade as network flakiness.
///
/// `execute` takes `&mut self`, so the borrow checker enforces what the
/// contract demands anyway: calls on one instance are serialized. Run
/// separate instances for concurrent checks.
#[async_trait]
pub trait Scout: Measured + Send {
    /// Perform one complete, independent check attempt.
    async fn execute(&mut self) -> Result<(), ScoutError>;
}
