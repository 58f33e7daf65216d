//! Windowed definition matching.
//!
//! The matcher is a pure function over one target and one definition. It
//! never allocates and never fails; a definition that does not match is
//! an ordinary negative outcome, not an error.
//!
//! # Window semantics
//!
//! A definition asks for a window of `match_size` bytes starting at
//! `match_position` in the chosen surface. The window is clamped to the
//! bytes actually available past the position, and the match succeeds iff
//! the clamped window has exactly the pattern's length and its bytes
//! equal the pattern:
//!
//! ```text
//! available = surface.len().saturating_sub(match_position)
//! effective = min(match_size, available)
//! matched   = effective == pattern.len()
//!             && surface[match_position..][..effective] == pattern
//! ```
//!
//! The clamp gives the window rules their deliberate asymmetry, which is
//! contractual and covered by the tests below:
//!
//! - A window *shrunk* below the pattern's natural length fails even
//!   though the shorter prefixes compare equal: the window must cover the
//!   whole pattern.
//! - A window *grown* past the pattern's natural length still matches
//!   when the surface ends where the pattern ends (the clamp pulls the
//!   window back to the pattern length), but fails when the surface
//!   continues past the pattern (the grown window is satisfiable and no
//!   longer has the pattern's length). A definition built from a proper
//!   prefix of the identity therefore matches at its natural size only.

use crate::api::{MatchOutcome, MatchSurface, ScanTarget, SignatureDefinition};

/// Evaluates one target against one definition.
///
/// Returns [`MatchOutcome::hit`] carrying the definition's weight on
/// match, [`MatchOutcome::miss`] otherwise. Out-of-bounds window
/// positions are a non-match, never a panic.
pub fn evaluate(target: &ScanTarget, definition: &SignatureDefinition) -> MatchOutcome {
    let surface: &[u8] = match definition.surface() {
        MatchSurface::Identity => target.name.as_bytes(),
        MatchSurface::ContentHash => &target.content_hash,
    };

    let pos = definition.match_position();
    let pattern = definition.pattern();
    let available = surface.len().saturating_sub(pos);
    let effective = definition.match_size().min(available);

    if effective != pattern.len() {
        return MatchOutcome::miss();
    }

    match surface.get(pos..pos + effective) {
        Some(window) if window == pattern => MatchOutcome::hit(definition.weight()),
        _ => MatchOutcome::miss(),
    }
}
