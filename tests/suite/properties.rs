//! Behavioural properties of the typewriter, exercised through the public API.

use std::time::Duration;

use macterm_types::{AnimationState, Phase, Typewriter, TypewriterOptions, advance, next_delay};

use crate::common::{config, options, run_to_end, typewriter};

#[test]
fn typing_completes_for_every_line() {
    let lines = ["alpha", "b", "gamma ray", "e\u{301}t\u{e9}"];
    let mut tw = typewriter(&lines, options(true, true, 50));
    let mut completed = [false; 4];

    for _ in 0..400 {
        tw.tick();
        let state = tw.state();
        if tw.displayed() == tw.config().full_text(state.line_index()) {
            completed[state.line_index()] = true;
        }
    }
    assert_eq!(completed, [true; 4]);
}

#[test]
fn delete_effect_reaches_empty_before_next_line() {
    let mut tw = typewriter(&["one", "two", "three"], options(true, true, 50));
    let mut previous_line = tw.state().line_index();
    let mut previous_text = String::new();

    for _ in 0..300 {
        tw.tick();
        let line = tw.state().line_index();
        if line != previous_line {
            // The last tick on the old line deleted its final grapheme.
            assert_eq!(previous_text.chars().count(), 1);
            assert_eq!(tw.displayed(), "");
            previous_line = line;
        }
        previous_text = tw.displayed().to_string();
    }
}

#[test]
fn line_index_follows_cycle_count() {
    let lines = ["a", "bb", "ccc", "dddd", "eeeee"];
    for delete_effect in [true, false] {
        let mut tw = typewriter(&lines, options(true, delete_effect, 50));
        let mut cycles = 0_usize;
        let mut previous = 0;
        for _ in 0..1_000 {
            tw.tick();
            let current = tw.state().line_index();
            if current != previous {
                cycles += 1;
                previous = current;
            }
            assert_eq!(current, cycles % lines.len());
        }
        assert!(cycles >= 2 * lines.len());
    }
}

#[test]
fn no_loop_no_delete_finishes_after_full_text_ticks() {
    for text in ["x", "hello", "typing is fun"] {
        let mut tw = typewriter(&[text, "never shown"], options(false, false, 50));
        let seen = run_to_end(&mut tw, 100);
        assert_eq!(seen.len(), text.len());
        assert_eq!(seen.last().map(String::as_str), Some(text));
        assert!(tw.state().is_finished());
        assert_eq!(tw.next_delay(), None);
    }
}

#[test]
fn two_graphemes_no_loop_no_delete() {
    let mut tw = typewriter(&["ab"], options(false, false, 10));
    assert_eq!(tw.next_delay(), Some(Duration::from_millis(10)));
    assert_eq!(tw.tick(), Some(Duration::from_millis(10)));
    assert_eq!(tw.displayed(), "a");
    assert_eq!(tw.tick(), None);
    assert_eq!(tw.displayed(), "ab");
}

#[test]
fn two_lines_loop_without_delete() {
    let mut tw = typewriter(
        &["hi", "yo"],
        TypewriterOptions {
            pause_before_next_line: Duration::from_millis(100),
            ..options(true, false, 50)
        },
    );

    let mut texts = Vec::new();
    let mut delays = Vec::new();
    for _ in 0..9 {
        delays.push(tw.tick());
        texts.push(tw.displayed().to_string());
    }

    assert_eq!(
        texts,
        ["h", "hi", "", "y", "yo", "", "h", "hi", ""].map(String::from)
    );
    assert_eq!(delays[1], Some(Duration::from_millis(100)));
    assert_eq!(delays[4], Some(Duration::from_millis(100)));
    assert_eq!(delays[2], Some(Duration::from_millis(50)));
}

#[test]
fn displayed_is_always_a_prefix() {
    let mut tw = typewriter(&["$ ls -la", "", "✨ done"], options(true, true, 50));
    for _ in 0..500 {
        tw.tick();
        let state = tw.state();
        assert!(state.line_index() < tw.config().line_count());
        assert!(
            tw.config()
                .full_text(state.line_index())
                .starts_with(state.displayed())
        );
    }
}

#[test]
fn pure_transition_matches_typewriter() {
    let config = config(&["abc", "de"], options(true, true, 30));
    let mut tw = Typewriter::new(config.clone());
    let mut state = AnimationState::initial(&config);

    for _ in 0..60 {
        assert_eq!(next_delay(&state, &config), tw.next_delay());
        state = advance(&state, &config);
        tw.tick();
        assert_eq!(&state, tw.state());
    }
}

#[test]
fn delays_follow_the_phase() {
    let opts = TypewriterOptions {
        loop_lines: true,
        ..TypewriterOptions::default()
    };
    let mut tw = typewriter(&["ab"], opts);
    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push((tw.state().phase(), tw.next_delay()));
        tw.tick();
    }
    assert_eq!(
        seen,
        [
            (Phase::Typing, Some(Duration::from_millis(50))),
            (Phase::Typing, Some(Duration::from_millis(50))),
            (Phase::PauseBeforeDelete, Some(Duration::from_millis(1000))),
            (Phase::Deleting, Some(Duration::from_millis(25))),
            (Phase::Deleting, Some(Duration::from_millis(25))),
            (Phase::Typing, Some(Duration::from_millis(50))),
        ]
    );
}
