//! Properties of the windowed match rule and confidence aggregation.

use proptest::prelude::*;

use sigscan_rs::{
    matcher, NullListener, ScanContext, ScanEngine, ScanTarget, SignatureDefinition,
    StaticDefinitionProvider, TargetKind, VecTargetSource,
};

fn target(name: &str) -> ScanTarget {
    ScanTarget::new(name, vec![0u8; 20], name.len() as u64, TargetKind(1))
}

proptest! {
    /// A definition built from a target's own identity with the default
    /// window always matches, whatever the weight.
    #[test]
    fn self_pattern_matches_at_position_zero(
        identity in "[a-z][a-z0-9.]{0,30}",
        weight in 1u32..1000,
    ) {
        let def = SignatureDefinition::identity(identity.as_str())
            .weight(weight)
            .build()
            .unwrap();
        let outcome = matcher::evaluate(&target(&identity), &def);
        prop_assert!(outcome.matched);
        prop_assert_eq!(outcome.weight, weight);
    }

    /// Any window shrunk below the pattern's natural length fails, even
    /// though the shorter prefix bytes compare equal.
    #[test]
    fn any_shrink_fails(
        identity in "[a-z][a-z0-9.]{1,30}",
        shrink in 1usize..31,
    ) {
        prop_assume!(shrink < identity.len());
        let def = SignatureDefinition::identity(identity.as_str())
            .match_size(identity.len() - shrink)
            .build()
            .unwrap();
        prop_assert!(!matcher::evaluate(&target(&identity), &def).matched);
    }

    /// A grown window matches exactly when the pattern spans to the end
    /// of the identity: clamping pulls the window back to the pattern
    /// length there, and nowhere else.
    #[test]
    fn grown_window_matches_iff_pattern_spans_to_surface_end(
        identity in "[a-z][a-z0-9.]{0,30}",
        prefix_len in 1usize..32,
        growth in 1usize..8,
    ) {
        prop_assume!(prefix_len <= identity.len());
        let pattern = &identity[..prefix_len];
        let def = SignatureDefinition::identity(pattern)
            .match_size(prefix_len + growth)
            .build()
            .unwrap();
        let matched = matcher::evaluate(&target(&identity), &def).matched;
        prop_assert_eq!(matched, prefix_len == identity.len());
    }

    /// A shifted window never matches a pattern embedded only at the
    /// surface start.
    #[test]
    fn shifted_window_fails_for_start_anchored_pattern(
        identity in "[a-z][a-z0-9.]{0,30}",
        shift in 1usize..40,
    ) {
        let def = SignatureDefinition::identity(identity.as_str())
            .match_position(shift)
            .build()
            .unwrap();
        prop_assert!(!matcher::evaluate(&target(&identity), &def).matched);
    }

    /// Total confidence is independent of target enumeration order.
    #[test]
    fn confidence_is_order_independent(
        names in prop::collection::vec("[a-c][a-c.]{0,6}", 1..12),
        pattern_picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
        weights in prop::collection::vec(1u32..10, 1..4),
    ) {
        let defs: Vec<_> = pattern_picks
            .iter()
            .zip(weights.iter())
            .map(|(pick, &w)| {
                let name = pick.get(&names);
                SignatureDefinition::identity(name.as_str())
                    .weight(w)
                    .build()
                    .unwrap()
            })
            .collect();
        let provider = StaticDefinitionProvider::new(defs);

        let forward: Vec<_> = names.iter().map(|n| target(n)).collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let engine = ScanEngine::new();
        let listener = NullListener;
        let a = engine
            .scan(
                &ScanContext::new(&listener),
                &VecTargetSource::new(forward),
                &provider,
            )
            .unwrap();
        let b = engine
            .scan(
                &ScanContext::new(&listener),
                &VecTargetSource::new(reversed),
                &provider,
            )
            .unwrap();

        prop_assert_eq!(a.confidence, b.confidence);
        prop_assert_eq!(a.matches_found, b.matches_found);
        prop_assert_eq!(a.definitions_evaluated, b.definitions_evaluated);
    }
}
