//! Target enumeration seam.
//!
//! A [`TargetSource`] produces the lazy, finite sequence of targets for
//! one scan run. Each call to [`TargetSource::targets`] starts a fresh
//! iteration from the beginning, so one source value can back repeated
//! scans. Mid-iteration failures travel as `Err` items so the engine can
//! surface them without the source needing to know about listeners.

use crate::api::ScanTarget;
use crate::errors::SourceError;

/// Enumerator of scannable entities for one scan run.
///
/// Implementations must be iterable from whichever thread invokes the
/// scan; the engine treats the source as read-only for the duration of
/// a run and pulls targets one at a time.
pub trait TargetSource {
    /// Begins a fresh enumeration of all targets.
    fn targets(&self) -> Box<dyn Iterator<Item = Result<ScanTarget, SourceError>> + '_>;
}

/// In-memory source over a fixed set of targets.
///
/// The workhorse for tests and for hosts that materialize their platform
/// enumeration up front before handing it to the engine.
#[derive(Clone, Debug, Default)]
pub struct VecTargetSource {
    targets: Vec<ScanTarget>,
}

impl VecTargetSource {
    pub fn new(targets: Vec<ScanTarget>) -> Self {
        Self { targets }
    }

    /// Number of targets one enumeration will yield.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TargetSource for VecTargetSource {
    fn targets(&self) -> Box<dyn Iterator<Item = Result<ScanTarget, SourceError>> + '_> {
        Box::new(self.targets.iter().cloned().map(Ok))
    }
}
