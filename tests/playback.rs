//! Playback behaviour driven through simulated time.

use proptest::prelude::*;
use spark_typewriter::pipeline::timeline;
use spark_typewriter::{Fragment, Phase, Sequence, TypingConfig, TypingScheduler};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_two_characters() {
    let seq = Sequence::new(vec![Fragment::new("ab").char_delay(10)]);
    let mut s = TypingScheduler::with_sequence(seq, TypingConfig::default(), 0);

    s.advance(10);
    assert_eq!(s.project_state().visible_text(), "a");

    s.advance(20);
    let p = s.project_state();
    assert_eq!(p.visible_text(), "ab");
    assert!(p.is_done);
}

#[test]
fn test_scenario_persisted_then_next() {
    let seq = Sequence::new(vec![Fragment::new("a").persist(), Fragment::new("b")]);
    let config = TypingConfig::new(75, 5);
    let mut s = TypingScheduler::with_sequence(seq, config, 0);

    s.advance(75);
    assert_eq!(s.phase(), Phase::Pausing);
    assert!(s.project_state().completed_persisted.is_empty());

    s.advance(80);
    let p = s.project_state();
    let persisted: Vec<&str> = p.completed_persisted.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(persisted, ["a"]);
    assert_eq!(p.current.as_ref().map(|c| c.index), Some(1));
    assert_eq!(p.visible_text(), "");
}

#[test]
fn test_scenario_empty_first_fragment() {
    let seq = Sequence::new(vec![Fragment::new(""), Fragment::new("x")]);
    let frames = timeline::record(seq, TypingConfig::new(10, 500));

    // start, advance after the pause, reveal "x"
    let times: Vec<u64> = frames.iter().map(|f| f.at).collect();
    assert_eq!(times, [0, 500, 510]);
    assert_eq!(frames[1].projection.current.as_ref().map(|c| c.index), Some(1));
    assert!(frames[2].projection.is_done);
}

#[test]
fn test_non_persisted_fragment_disappears() {
    let seq = Sequence::new(vec![
        Fragment::new("$ run").code(),
        Fragment::new("kept").persist(),
        Fragment::new("end"),
    ]);
    let mut s = TypingScheduler::with_sequence(seq, TypingConfig::new(1, 1), 0);
    s.finish(0);

    let p = s.project_state();
    let persisted: Vec<&str> = p.completed_persisted.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(persisted, ["kept"]);
    assert_eq!(p.visible_text(), "end");
    assert!(!p.current.unwrap().caret_visible);
}

#[test]
fn test_caret_visible_during_pause() {
    let seq = Sequence::new(vec![Fragment::new("a"), Fragment::new("b")]);
    let mut s = TypingScheduler::with_sequence(seq, TypingConfig::new(10, 1000), 0);
    s.advance(500);

    assert_eq!(s.phase(), Phase::Pausing);
    assert!(s.project_state().current.unwrap().caret_visible);
}

#[test]
fn test_reconfigure_mid_pause() {
    let seq = Sequence::new(vec![Fragment::new("a").persist(), Fragment::new("b")]);
    let mut s = TypingScheduler::with_sequence(seq, TypingConfig::new(10, 100), 0);
    s.advance(50);
    assert_eq!(s.phase(), Phase::Pausing);

    s.start(Sequence::single("new"), TypingConfig::new(10, 100), true, 50);
    // The old pause deadline (110) must not advance anything
    s.advance(110);
    assert_eq!(s.fragment_index(), 0);
    assert_eq!(s.visible_text(), "new");
    assert!(s.project_state().completed_persisted.is_empty());
}

#[test]
fn test_projection_signal_matches_pure_read() {
    let seq = Sequence::new(vec![Fragment::new("ab").persist(), Fragment::new("c")]);
    let mut s = TypingScheduler::with_sequence(seq, TypingConfig::new(3, 3), 0);
    let signal = s.projection();

    while let Some(due) = s.next_deadline() {
        s.fire_next(due);
        assert_eq!(signal.get(), s.project_state());
    }
    assert!(signal.get().is_done);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_fragment() -> impl Strategy<Value = Fragment> {
    (
        "[a-z é]{0,6}",
        proptest::option::of(-5i64..20),
        proptest::option::of(-5i64..20),
        any::<bool>(),
    )
        .prop_map(|(text, char_delay_ms, pause_after_ms, persist)| Fragment {
            text,
            char_delay_ms,
            pause_after_ms,
            persist,
            ..Default::default()
        })
}

fn arb_sequence() -> impl Strategy<Value = Vec<Fragment>> {
    proptest::collection::vec(arb_fragment(), 0..6)
}

fn arb_config() -> impl Strategy<Value = TypingConfig> {
    (-5i64..30, -5i64..30).prop_map(|(c, p)| TypingConfig::new(c, p))
}

proptest! {
    /// Playback always terminates showing the full last fragment.
    #[test]
    fn prop_reaches_done_with_full_text(fragments in arb_sequence(), config in arb_config()) {
        let last = fragments.last().map(|f| f.text.clone());
        let mut s = TypingScheduler::with_sequence(Sequence::new(fragments), config, 0);
        s.finish(0);

        prop_assert!(s.is_done());
        prop_assert!(!s.has_pending_timer());
        match last {
            Some(text) => prop_assert_eq!(s.visible_text(), text.as_str()),
            None => prop_assert!(s.project_state().current.is_none()),
        }
    }

    /// Revealed count only grows within a fragment and resets on advance.
    #[test]
    fn prop_revealed_monotone(fragments in arb_sequence(), config in arb_config()) {
        let mut s = TypingScheduler::with_sequence(Sequence::new(fragments), config, 0);
        let mut prev = (s.fragment_index(), s.revealed_count());

        while let Some(due) = s.next_deadline() {
            prop_assert!(s.fire_next(due));
            let now = (s.fragment_index(), s.revealed_count());
            if now.0 == prev.0 {
                prop_assert_eq!(now.1, prev.1 + 1);
            } else {
                prop_assert_eq!(now.0, prev.0 + 1);
                prop_assert_eq!(now.1, 0);
            }
            prop_assert!(now.1 <= s.sequence().char_count(now.0).unwrap_or(0));
            prev = now;
        }
    }

    /// The persisted list is exactly the persist fragments already passed.
    #[test]
    fn prop_persisted_partition(fragments in arb_sequence(), config in arb_config()) {
        let flags: Vec<bool> = fragments.iter().map(|f| f.persist).collect();
        let mut s = TypingScheduler::with_sequence(Sequence::new(fragments), config, 0);

        loop {
            let p = s.project_state();
            let expected: Vec<usize> = (0..s.fragment_index()).filter(|&i| flags[i]).collect();
            let actual: Vec<usize> = p.completed_persisted.iter().map(|f| f.index).collect();
            prop_assert_eq!(actual, expected);

            // Pure and repeatable
            prop_assert_eq!(&p, &s.project_state());

            match s.next_deadline() {
                Some(due) => { s.fire_next(due); }
                None => break,
            }
        }
    }

    /// Restarting at any point resets position and leaves no stale timer.
    #[test]
    fn prop_restart_resets(
        fragments in arb_sequence(),
        config in arb_config(),
        steps in 0usize..20,
    ) {
        let mut s = TypingScheduler::with_sequence(Sequence::new(fragments), config, 0);
        let mut now = 0;
        for _ in 0..steps {
            match s.next_deadline() {
                Some(due) => { now = due; s.fire_next(due); }
                None => break,
            }
        }

        let restart_at = now + 1;
        s.start(Sequence::single("zz"), TypingConfig::new(50, 0), true, restart_at);
        prop_assert_eq!(s.fragment_index(), 0);
        prop_assert_eq!(s.revealed_count(), 0);
        prop_assert_eq!(s.next_deadline(), Some(restart_at + 50));

        // Nothing fires before the new deadline
        prop_assert_eq!(s.advance(restart_at + 49), 0);
        prop_assert_eq!(s.visible_text(), "");
    }

    /// Simulated advance lands on the same state as stepping each timer.
    #[test]
    fn prop_advance_matches_stepping(fragments in arb_sequence(), config in arb_config(), horizon in 0u64..200) {
        let seq = Sequence::new(fragments);
        let mut bulk = TypingScheduler::with_sequence(seq.clone(), config, 0);
        let mut stepped = TypingScheduler::with_sequence(seq, config, 0);

        bulk.advance(horizon);
        while let Some(due) = stepped.next_deadline() {
            if due > horizon {
                break;
            }
            stepped.fire_next(due);
        }

        prop_assert_eq!(bulk.project_state(), stepped.project_state());
        prop_assert_eq!(bulk.next_deadline(), stepped.next_deadline());
    }
}

// =============================================================================
// Scripts
// =============================================================================

#[test]
fn test_bundled_demo_script_plays() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/intro.yaml");
    let script = spark_typewriter::Script::load(path).unwrap();
    assert_eq!(script.fragments.len(), 2);

    let mut s = TypingScheduler::with_sequence(script.sequence(), script.config(), 0);
    s.finish(0);

    let p = s.project_state();
    assert!(p.is_done);
    // The prompt was not persisted, the tagline is the final current fragment
    assert!(p.completed_persisted.is_empty());
    assert_eq!(p.visible_text(), script.fragments[1].text);
}
