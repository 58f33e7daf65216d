//! Scan orchestration.
//!
//! Purpose: drive one scan run end to end — pull targets lazily from a
//! [`TargetSource`], evaluate each against every definition from a
//! [`DefinitionProvider`], accumulate confidence, and deliver listener
//! events in a strict order.
//!
//! Invariants / safety rules:
//! - One engine instance processes one scan at a time; a second `scan`
//!   while one is running is rejected with [`ScanError::AlreadyInProgress`].
//! - Listener events for a run are zero or more progress events followed
//!   by exactly one terminal event (completed, canceled, or failed),
//!   all delivered synchronously on the scanning thread.
//! - The two atomic flags are the only state shared across threads. The
//!   engine spawns no threads; callers pick the thread `scan` runs on and
//!   may call [`ScanEngine::cancel`] from any other thread.
//!
//! Cancellation model: cooperative checkpointing. The cancel flag is
//! polled once per loop iteration, before the next target is pulled. A
//! cancel request never interrupts the evaluation of the target already
//! in hand. The flag is monotonic for the duration of a run and is reset
//! only at terminal transitions, so a cancel that lands before the first
//! checkpoint still cancels that run.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::{ScanResult, ScanTarget, SignatureDefinition};
use crate::errors::ScanError;
use crate::matcher;
use crate::provider::{DefinitionProvider, DevDefinitionProvider};
use crate::source::TargetSource;


// --------------------------
// Listener capability
// --------------------------

/// Receiver for scan-lifecycle events.
///
/// All methods default to no-ops so listeners implement only the events
/// they care about. Callbacks run synchronously on the scanning thread;
/// a slow listener slows the scan.
pub trait ScanListener {
    /// One target was fully evaluated. `partial` is the result
    /// accumulated so far, including this target's contribution.
    fn on_progress(&self, _target: &ScanTarget, _partial: &ScanResult) {}

    /// The target source was exhausted without cancellation.
    fn on_scan_completed(&self, _result: &ScanResult) {}

    /// The run stopped at a cancellation checkpoint. Carries the partial
    /// result accumulated before the checkpoint.
    fn on_scan_canceled(&self, _result: &ScanResult) {}

    /// A collaborator failed mid-run. The run terminates without a
    /// completion event and the error is also returned from `scan`.
    fn on_scan_failed(&self, _error: &ScanError) {}
}

/// No-op listener for callers that only want the returned result.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl ScanListener for NullListener {}

/// Caller-owned pairing of a listener with one scan invocation.
///
/// Short-lived by design: build one per scan and let it go out of scope
/// with the run.
pub struct ScanContext<'a> {
    listener: &'a dyn ScanListener,
}

impl<'a> ScanContext<'a> {
    pub fn new(listener: &'a dyn ScanListener) -> Self {
        Self { listener }
    }

    pub fn listener(&self) -> &dyn ScanListener {
        self.listener
    }
}

// --------------------------
// Engine
// --------------------------

/// Cancellable scan orchestrator.
///
/// Cheap to construct and explicitly owned by the composition root; there
/// is no process-wide default instance. All collaborators arrive as
/// arguments, so one engine value can serve successive runs against
/// different sources and providers.
///
/// # Guarantees
/// - `scan` is safe to call from any thread; `cancel` is safe to call
///   concurrently from any other thread.
/// - Exactly one terminal listener event per run that starts.
#[derive(Debug, Default)]
pub struct ScanEngine {
    /// Re-entrancy guard. Held for the duration of one `scan` call.
    running: AtomicBool,
    /// Cooperative stop flag, observed at the per-target checkpoint.
    /// Reset at terminal transitions, not at scan entry.
    cancel_requested: AtomicBool,
}

impl ScanEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one scan to a terminal state.
    ///
    /// Pulls targets lazily, evaluates each against the full definition
    /// set, and reports progress after every target. Returns the final
    /// result, with `canceled` set when the run stopped at a checkpoint.
    ///
    /// A second call while a scan is running returns
    /// [`ScanError::AlreadyInProgress`] without emitting any listener
    /// event: the rejected call never starts a run, so it owes no
    /// terminal event.
    pub fn scan(
        &self,
        ctx: &ScanContext<'_>,
        source: &dyn TargetSource,
        provider: &dyn DefinitionProvider,
    ) -> Result<ScanResult, ScanError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ScanError::AlreadyInProgress);
        }

        let outcome = self.run(ctx.listener(), source, provider);

        // Terminal transition: clear the cancel request before releasing
        // the guard so the next run starts from a clean flag.
        self.cancel_requested.store(false, Ordering::Release);
        self.running.store(false, Ordering::Release);

        outcome
    }

    /// Evaluates a single target against a provider's definitions.
    ///
    /// Convenience for hosts that vet one entity at a time (for example
    /// on package install). No listener events, no cancellation; the
    /// engine's re-entrancy guard is not taken.
    pub fn scan_target(
        &self,
        target: &ScanTarget,
        provider: &dyn DefinitionProvider,
    ) -> Result<ScanResult, ScanError> {
        let definitions = provider.definitions().map_err(ScanError::from)?;
        let mut acc = ScanResult::default();
        evaluate_target(target, &definitions, &mut acc);
        acc.targets_scanned = 1;
        Ok(acc)
    }

    /// Convenience composition: scans `source` against the development
    /// definition set.
    pub fn perform_basic_scan(
        &self,
        source: &dyn TargetSource,
        listener: &dyn ScanListener,
    ) -> Result<ScanResult, ScanError> {
        let ctx = ScanContext::new(listener);
        self.scan(&ctx, source, &DevDefinitionProvider::new())
    }

    /// Requests cooperative cancellation of the running scan.
    ///
    /// Idempotent and non-blocking: returns immediately, and the scan
    /// stops at its next checkpoint. Calling with no scan running marks
    /// the next run for cancellation, which keeps a cancel racing a scan
    /// start from being lost.
    pub fn cancel(&self) {
        self.cancel_requested.store(true, Ordering::Release);
    }

    /// True while a `scan` call is in progress on any thread.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn run(
        &self,
        listener: &dyn ScanListener,
        source: &dyn TargetSource,
        provider: &dyn DefinitionProvider,
    ) -> Result<ScanResult, ScanError> {
        let definitions = match provider.definitions() {
            Ok(definitions) => definitions,
            Err(err) => {
                let err = ScanError::from(err);
                listener.on_scan_failed(&err);
                return Err(err);
            }
        };

        let mut acc = ScanResult::default();
        let mut targets = source.targets();

        loop {
            // Checkpoint precedes each pull: a canceled run never draws
            // another target from the source.
            if self.cancel_requested.load(Ordering::Acquire) {
                acc.canceled = true;
                listener.on_scan_canceled(&acc);
                return Ok(acc);
            }

            let target = match targets.next() {
                None => break,
                Some(Ok(target)) => target,
                Some(Err(err)) => {
                    let err = ScanError::from(err);
                    listener.on_scan_failed(&err);
                    return Err(err);
                }
            };

            evaluate_target(&target, &definitions, &mut acc);
            acc.targets_scanned += 1;
            listener.on_progress(&target, &acc);
        }

        listener.on_scan_completed(&acc);
        Ok(acc)
    }
}

/// Evaluates one target against every definition, accumulating all
/// matching weights. Summing every match (rather than stopping at the
/// first) keeps confidence independent of definition order.
fn evaluate_target(target: &ScanTarget, definitions: &[SignatureDefinition], acc: &mut ScanResult) {
    for definition in definitions {
        let outcome = matcher::evaluate(target, definition);
        acc.definitions_evaluated += 1;
        if outcome.matched {
            acc.matches_found = true;
            acc.confidence += u64::from(outcome.weight);
        }
    }
}
