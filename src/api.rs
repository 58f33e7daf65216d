//! Public data-model types for the detection core.

use base64::engine::general_purpose::STANDARD as B64_STD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::errors::DefinitionError;

// --------------------------
// Target model
// --------------------------

/// Small tag classifying what kind of entity a target is.
///
/// The core does not interpret the value; target sources assign meaning
/// (for example "installed package" vs "downloaded archive").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetKind(pub u8);

/// One scannable unit produced by a target source.
///
/// `name` is the identity string and the primary match surface (for
/// example a package identifier). `content_hash` identifies the exact
/// binary content and is the alternate match surface for hash-based
/// definitions. The engine holds only a transient reference to a target
/// while evaluating it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    /// Identity string, e.g. `com.example.android.softkeyboard`.
    pub name: String,
    /// Fixed-length digest of the target's content.
    pub content_hash: Box<[u8]>,
    /// Content size in bytes.
    pub size: u64,
    /// Target classification tag.
    pub kind: TargetKind,
}

impl ScanTarget {
    /// Convenience constructor for the common case.
    pub fn new(
        name: impl Into<String>,
        content_hash: impl Into<Box<[u8]>>,
        size: u64,
        kind: TargetKind,
    ) -> Self {
        Self {
            name: name.into(),
            content_hash: content_hash.into(),
            size,
            kind,
        }
    }
}

// Targets order by size first so sources can present small targets
// early; ties fall through the remaining fields to stay consistent
// with `Eq`.
impl Ord for ScanTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.content_hash.cmp(&other.content_hash))
    }
}

impl PartialOrd for ScanTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// --------------------------
// Definition model
// --------------------------

/// Which bytes of a target a definition is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchSurface {
    /// The target's identity string (`ScanTarget::name`).
    Identity,
    /// The target's content digest (`ScanTarget::content_hash`).
    ContentHash,
}

/// Immutable description of one known threat pattern.
///
/// A definition carries a reference `pattern` and a match window
/// (`match_position`, `match_size`) over the chosen surface. Built
/// through [`DefinitionBuilder`], which validates at `build()` time so
/// no definition-level validation runs on the scan path.
///
/// # Guarantees
/// - `pattern` is non-empty and `weight >= 1`.
/// - Immutable after build; the matcher only borrows `&self`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDefinition {
    pattern: Box<[u8]>,
    surface: MatchSurface,
    match_position: usize,
    match_size: usize,
    weight: u32,
}

impl SignatureDefinition {
    /// Starts a definition matched against target identity bytes.
    pub fn identity(pattern: impl Into<Vec<u8>>) -> DefinitionBuilder {
        DefinitionBuilder::new(pattern.into(), MatchSurface::Identity)
    }

    /// Starts a definition matched against the target's content hash.
    pub fn content_hash(hash: impl Into<Vec<u8>>) -> DefinitionBuilder {
        DefinitionBuilder::new(hash.into(), MatchSurface::ContentHash)
    }

    /// Starts a content-hash definition from a base64-encoded digest, the
    /// form hash signatures are distributed in.
    pub fn content_hash_b64(encoded: &str) -> Result<DefinitionBuilder, DefinitionError> {
        let hash = B64_STD
            .decode(encoded)
            .map_err(DefinitionError::InvalidHashEncoding)?;
        Ok(DefinitionBuilder::new(hash, MatchSurface::ContentHash))
    }

    /// Reference pattern bytes.
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Surface this definition is compared against.
    pub fn surface(&self) -> MatchSurface {
        self.surface
    }

    /// Offset into the surface where the match window starts.
    pub fn match_position(&self) -> usize {
        self.match_position
    }

    /// Requested window length. Clamped against the surface during
    /// evaluation; see [`crate::matcher::evaluate`].
    pub fn match_size(&self) -> usize {
        self.match_size
    }

    /// Confidence contribution when this definition matches.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Re-checks build-time invariants.
    ///
    /// Used when definitions arrive through deserialization rather than
    /// [`DefinitionBuilder`].
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.pattern.is_empty() {
            return Err(DefinitionError::EmptyPattern);
        }
        if self.weight == 0 {
            return Err(DefinitionError::ZeroWeight);
        }
        Ok(())
    }
}

/// Builder for [`SignatureDefinition`].
///
/// Window fields may be adjusted freely before `build()`; the built
/// definition is immutable. `match_size` defaults to the pattern's
/// natural length.
#[derive(Clone, Debug)]
pub struct DefinitionBuilder {
    pattern: Vec<u8>,
    surface: MatchSurface,
    match_position: usize,
    match_size: Option<usize>,
    weight: u32,
}

impl DefinitionBuilder {
    fn new(pattern: Vec<u8>, surface: MatchSurface) -> Self {
        Self {
            pattern,
            surface,
            match_position: 0,
            match_size: None,
            weight: 1,
        }
    }

    /// Sets the window start offset (default 0).
    pub fn match_position(mut self, pos: usize) -> Self {
        self.match_position = pos;
        self
    }

    /// Sets the requested window length (default: pattern length).
    pub fn match_size(mut self, size: usize) -> Self {
        self.match_size = Some(size);
        self
    }

    /// Sets the confidence contribution on match (default 1).
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Validates and freezes the definition.
    pub fn build(self) -> Result<SignatureDefinition, DefinitionError> {
        let match_size = self.match_size.unwrap_or(self.pattern.len());
        let def = SignatureDefinition {
            pattern: self.pattern.into_boxed_slice(),
            surface: self.surface,
            match_position: self.match_position,
            match_size,
            weight: self.weight,
        };
        def.validate()?;
        Ok(def)
    }
}

// --------------------------
// Outcome and result types
// --------------------------

/// Result of evaluating one target against one definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the definition matched.
    pub matched: bool,
    /// The definition's weight when matched, zero otherwise.
    pub weight: u32,
}

impl MatchOutcome {
    /// Negative outcome; contributes nothing.
    pub const fn miss() -> Self {
        Self {
            matched: false,
            weight: 0,
        }
    }

    /// Positive outcome contributing `weight` to confidence.
    pub const fn hit(weight: u32) -> Self {
        Self {
            matched: true,
            weight,
        }
    }
}

/// Accumulated outcome of one scan run.
///
/// Produced once per completed, canceled, or failed run; the same value
/// is handed to listener callbacks as the partial result during the run.
/// Confidence is the sum of contributing weights over all matched
/// (target, definition) pairs observed before termination, so it is
/// independent of target order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// True iff at least one definition matched at least one target.
    pub matches_found: bool,
    /// Sum of contributing weights across all observed matches.
    pub confidence: u64,
    /// True iff the run ended via cancellation rather than exhausting the
    /// target source.
    pub canceled: bool,
    /// Targets fully evaluated before termination.
    pub targets_scanned: u64,
    /// Total (target, definition) evaluations performed.
    pub definitions_evaluated: u64,
}
