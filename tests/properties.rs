//! Property tests for the algebra of modifiers and elementwise comparison.

use proptest::prelude::*;
use tinyexpect::{TestRun, Value};

fn seq_of(items: &[f64]) -> Value {
    Value::Seq(items.iter().map(|&n| Value::Num(n)).collect())
}

proptest! {
    /// Negation is a strict boolean complement for any matcher outcome.
    #[test]
    fn prop_not_is_complement(a in -1e9f64..1e9, b in -1e9f64..1e9) {
        let mut run = TestRun::silent();
        let plain = run.expect(a).to_be(b);
        let negated = run.expect(a).not().to_be(b);
        prop_assert_eq!(plain, !negated);

        let plain = run.expect(a).to_be_less_than(b);
        let negated = run.expect(a).not().to_be_less_than(b);
        prop_assert_eq!(plain, !negated);
    }

    /// Elementwise "all" agrees with the conjunction of scalar outcomes,
    /// and "some" with the disjunction.
    #[test]
    fn prop_quantifiers_match_scalar_outcomes(
        pairs in prop::collection::vec((-100i64..100, -100i64..100), 1..8)
    ) {
        let mut run = TestRun::silent();
        let actual: Vec<f64> = pairs.iter().map(|(a, _)| *a as f64).collect();
        let expected: Vec<f64> = pairs.iter().map(|(_, e)| *e as f64).collect();

        let scalar: Vec<bool> = pairs.iter().map(|(a, e)| a == e).collect();

        let all = run
            .expect(seq_of(&actual))
            .contents()
            .to_be(seq_of(&expected));
        prop_assert_eq!(all, scalar.iter().all(|&p| p));

        let some = run
            .expect(seq_of(&actual))
            .some()
            .contents()
            .to_be(seq_of(&expected));
        prop_assert_eq!(some, scalar.iter().any(|&p| p));
    }

    /// Broadcasting a scalar operand is equivalent to repeating it to the
    /// subject's length.
    #[test]
    fn prop_broadcast_equals_repetition(
        items in prop::collection::vec(-100i64..100, 1..8),
        scalar in -100i64..100
    ) {
        let mut run = TestRun::silent();
        let subject: Vec<f64> = items.iter().map(|&n| n as f64).collect();
        let repeated = vec![scalar as f64; subject.len()];

        let broadcast = run
            .expect(seq_of(&subject))
            .contents()
            .to_be(Value::Num(scalar as f64));
        let explicit = run
            .expect(seq_of(&subject))
            .contents()
            .to_be(seq_of(&repeated));
        prop_assert_eq!(broadcast, explicit);
    }

    /// Length mismatch fails regardless of contents or quantifier.
    #[test]
    fn prop_length_mismatch_always_fails(
        items in prop::collection::vec(-100i64..100, 1..6),
        extra in -100i64..100
    ) {
        let mut run = TestRun::silent();
        let subject: Vec<f64> = items.iter().map(|&n| n as f64).collect();
        let mut longer = subject.clone();
        longer.push(extra as f64);

        prop_assert!(!run
            .expect(seq_of(&subject))
            .contents()
            .to_be(seq_of(&longer)));
        prop_assert!(!run
            .expect(seq_of(&subject))
            .some()
            .contents()
            .to_be(seq_of(&longer)));
    }

    /// Values within tolerance are close, symmetrically.
    #[test]
    fn prop_close_to_symmetric(a in -1e6f64..1e6, delta in -1e-7f64..1e-7) {
        let mut run = TestRun::silent();
        let b = a + delta;
        prop_assert!(run.expect(a).to_be_close_to(b));
        prop_assert!(run.expect(b).to_be_close_to(a));
    }

    /// Group arithmetic: N statements while a group is active add exactly N
    /// to that group and to the aggregate.
    #[test]
    fn prop_group_counts(outcomes in prop::collection::vec(any::<bool>(), 0..12)) {
        let mut run = TestRun::silent();
        run.start_group("g");
        for &should_pass in &outcomes {
            run.expect(1).to_be(if should_pass { 1 } else { 2 });
        }
        run.end_group("g");

        let expected_passed = outcomes.iter().filter(|&&p| p).count() as u32;
        let stats = run.stats("g").unwrap();
        prop_assert_eq!(stats.tested, outcomes.len() as u32);
        prop_assert_eq!(stats.passed, expected_passed);
        prop_assert_eq!(run.totals().tested, outcomes.len() as u32);
        prop_assert!(stats.passed <= stats.tested);
    }
}
