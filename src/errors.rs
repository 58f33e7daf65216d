//! Error types for definition construction and scan execution.
//!
//! Errors are stage-specific to keep diagnostics precise and avoid a
//! single monolithic error enum that grows unbounded. All enums are
//! `#[non_exhaustive]` to allow adding variants without breaking callers;
//! consumers should include a fallback match arm.
//!
//! Matching-level mismatches are never errors: a definition that does not
//! match a target is an ordinary negative [`MatchOutcome`]. Only
//! structural problems (malformed definitions) and environmental failures
//! (a collaborator unable to produce targets or definitions mid-scan)
//! surface through these types.
//!
//! [`MatchOutcome`]: crate::api::MatchOutcome

use std::fmt;
use std::io;

/// Errors from building a [`SignatureDefinition`].
///
/// These occur at construction time only; a definition that builds
/// successfully never fails validation during a scan.
///
/// [`SignatureDefinition`]: crate::api::SignatureDefinition
#[derive(Debug)]
#[non_exhaustive]
pub enum DefinitionError {
    /// The reference pattern is empty. An empty pattern would match every
    /// target vacuously.
    EmptyPattern,
    /// The definition weight is zero. A zero-weight match could never
    /// contribute confidence, which masks real matches.
    ZeroWeight,
    /// A base64-encoded content hash could not be decoded.
    InvalidHashEncoding(base64::DecodeError),
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "definition pattern is empty"),
            Self::ZeroWeight => write!(f, "definition weight is zero"),
            Self::InvalidHashEncoding(err) => {
                write!(f, "content hash is not valid base64: {err}")
            }
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHashEncoding(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors from a [`DefinitionProvider`] failing to supply its set.
///
/// [`DefinitionProvider`]: crate::provider::DefinitionProvider
#[derive(Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// The backing store could not be reached or read.
    Unavailable { detail: String },
    /// A stored definition failed re-validation.
    Definition(DefinitionError),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { detail } => {
                write!(f, "definition provider unavailable: {detail}")
            }
            Self::Definition(err) => write!(f, "invalid stored definition: {err}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Definition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DefinitionError> for ProviderError {
    fn from(err: DefinitionError) -> Self {
        Self::Definition(err)
    }
}

/// Errors from a [`TargetSource`] failing to enumerate targets.
///
/// [`TargetSource`]: crate::source::TargetSource
#[derive(Debug)]
#[non_exhaustive]
pub enum SourceError {
    /// The enumerator could not be started or continued.
    Unavailable { detail: String },
    /// I/O error while producing a target.
    Io(io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { detail } => {
                write!(f, "target source unavailable: {detail}")
            }
            Self::Io(err) => write!(f, "I/O error while enumerating targets: {err}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors from one scan run.
#[derive(Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// A scan is already running on this engine. The engine processes one
    /// scan at a time; callers wanting queuing must serialize externally.
    AlreadyInProgress,
    /// The definition provider failed before any target was evaluated.
    Provider(ProviderError),
    /// The target source failed mid-run.
    Source(SourceError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInProgress => write!(f, "a scan is already in progress"),
            Self::Provider(err) => write!(f, "definition provider failed: {err}"),
            Self::Source(err) => write!(f, "target source failed: {err}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for ScanError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<SourceError> for ScanError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}
