//! The timer-driven animator and the app state built on it.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use macterm_engine::{Animator, App, AppSettings, Frame, Phase, Size, Typewriter};

use crate::common::{config, options};

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn frames_follow_the_documented_schedule() {
    let mut animator = Animator::spawn(Typewriter::new(config(&["ab"], options(false, false, 10))));

    sleep_ms(5).await;
    assert!(!animator.poll());
    assert_eq!(animator.frame().text, "");

    sleep_ms(10).await;
    animator.poll();
    assert_eq!(animator.frame().text, "a");

    sleep_ms(10).await;
    animator.poll();
    assert_eq!(animator.frame().text, "ab");
    assert_eq!(animator.frame().phase, Phase::Finished);

    sleep_ms(60_000).await;
    assert!(!animator.poll());
}

#[tokio::test(start_paused = true)]
async fn observer_receives_each_transition_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let _animator = Animator::spawn_with_observer(
        Typewriter::new(config(&["hi", "yo"], options(true, true, 10))),
        move |frame: &Frame| sink.lock().unwrap().push((frame.seq, frame.text.clone())),
    );

    // h, hi, pause, delete x2 (lands on "yo"), y
    sleep_ms(10 + 10 + 1000 + 25 + 25 + 10 + 1).await;
    let log = log.lock().unwrap();
    let texts: Vec<&str> = log.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, ["h", "hi", "hi", "h", "", "y"]);
    assert!(log.windows(2).all(|pair| pair[0].0 < pair[1].0));
}

#[tokio::test(start_paused = true)]
async fn no_mutation_is_observable_after_teardown() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spy = Arc::clone(&calls);
    let mut animator = Animator::spawn_with_observer(
        Typewriter::new(config(&["teardown"], options(true, true, 10))),
        move |_: &Frame| {
            spy.fetch_add(1, Ordering::SeqCst);
        },
    );

    sleep_ms(45).await;
    animator.poll();
    animator.shutdown();
    let at_teardown = calls.load(Ordering::SeqCst);
    assert_eq!(at_teardown, 4);

    sleep_ms(60_000).await;
    assert_eq!(calls.load(Ordering::SeqCst), at_teardown);
    assert!(!animator.poll());
}

#[tokio::test(start_paused = true)]
async fn app_restart_replays_from_the_first_line() {
    let mut app = App::new(
        config(&["abc", "d"], options(false, false, 10)),
        AppSettings::default(),
        Size::new(80, 24),
    );

    sleep_ms(35).await;
    app.tick();
    assert_eq!(app.frame().text, "abc");
    assert_eq!(app.frame().phase, Phase::Finished);

    app.restart();
    sleep_ms(1).await;
    app.tick();
    assert_eq!(app.frame().text, "");
    assert_eq!(app.frame().line_index, 0);

    sleep_ms(10).await;
    app.tick();
    assert_eq!(app.frame().text, "a");
    app.shutdown();
}

#[tokio::test(start_paused = true)]
async fn app_reconfigure_switches_lines() {
    let mut app = App::new(
        config(&["old"], options(false, false, 10)),
        AppSettings::default(),
        Size::new(80, 24),
    );
    sleep_ms(15).await;
    app.tick();
    assert_eq!(app.frame().text, "o");

    app.reconfigure(config(&["new"], options(false, false, 10)));
    sleep_ms(11).await;
    app.tick();
    assert_eq!(app.frame().text, "n");
}
