//! Signature-based threat-detection core.
//!
//! ## Scope
//! This crate evaluates scannable targets (name, content hash, size,
//! kind) against signature definitions with positional match windows,
//! orchestrates cancellable scan runs, and reports a deterministic
//! aggregate confidence score. Package enumeration, definition
//! persistence, and UI belong to the host application and plug in
//! through the [`TargetSource`], [`DefinitionProvider`], and
//! [`ScanListener`] seams.
//!
//! ## Key invariants
//! - Definitions are validated at build time and immutable afterwards;
//!   nothing on the scan path can fail for definition-shape reasons.
//! - Matching is pure: a non-matching definition is a negative outcome,
//!   never an error.
//! - Confidence is the order-independent sum of matched definition
//!   weights, so a run's score does not depend on enumeration order.
//! - One engine runs one scan at a time; each run that starts delivers
//!   exactly one terminal listener event.
//! - Cancellation is cooperative: a flag polled between targets, safe to
//!   set from any thread, never interrupting an evaluation in progress.
//!
//! ## Scan flow
//! `TargetSource -> (target) -> matcher x each provider definition
//! -> ScanEngine accumulates -> ScanResult + listener events`
//!
//! ## Notable entry points
//! - [`ScanEngine`]: scan orchestration and cancellation.
//! - [`matcher::evaluate`]: the windowed match rule on its own.
//! - [`SignatureDefinition`] / [`DefinitionBuilder`]: definition model.
//! - [`DevDefinitionProvider`], [`StaticDefinitionProvider`],
//!   [`VecTargetSource`]: built-in collaborators.

pub mod api;
pub mod errors;
pub mod matcher;
pub mod provider;
pub mod source;

mod engine;

pub use api::{
    DefinitionBuilder, MatchOutcome, MatchSurface, ScanResult, ScanTarget, SignatureDefinition,
    TargetKind,
};
pub use engine::{NullListener, ScanContext, ScanEngine, ScanListener};
pub use errors::{DefinitionError, ProviderError, ScanError, SourceError};
pub use provider::{DefinitionProvider, DevDefinitionProvider, StaticDefinitionProvider};
pub use source::{TargetSource, VecTargetSource};
