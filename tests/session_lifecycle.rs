use std::{sync::Arc, thread, time::Duration};

use adventure_session::{
    persistence::{self, decode, encode},
    GameSession, Leaderboard, Scheduler, SessionError, SubmitOutcome, TimerMode,
};
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn pause_save_load_resume_and_finish() {
    let session = GameSession::new(93, Scheduler::current()).expect("runtime available");
    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(session.reading().elapsed, 11);

    assert_eq!(session.toggle().expect("pause"), TimerMode::Paused);
    let bytes = encode(&session.save()).expect("encodes");
    drop(session);

    let snapshot = decode(&bytes).expect("decodes");
    let (clock, controller) = persistence::load(&snapshot, Scheduler::current()).expect("valid");
    assert_eq!(controller.describe(), "Paused");
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(), 11);
    assert_eq!(clock.remaining(), 82);

    // Resuming ticks once straight away.
    assert_eq!(controller.toggle().expect("resume"), TimerMode::Resumed);
    sleep(Duration::from_millis(400)).await;
    assert_eq!(clock.elapsed(), 12);

    // Pause again so the restored session starts out stopped.
    assert_eq!(controller.toggle().expect("pause"), TimerMode::Paused);
    assert!(!clock.is_running());

    let board = Leaderboard::new();
    let restored = GameSession::restore(&persistence::save(&controller), Scheduler::current())
        .expect("valid");
    assert_eq!(restored.describe(), "Paused");
    assert!(!restored.clock().is_running());

    let finished = restored.finish("saj", &board);
    assert_eq!(finished.score, 12);
    assert_eq!(finished.outcome, SubmitOutcome::Inserted);
    assert_eq!(restored.describe(), "Paused");
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_out_at_the_configured_limit() {
    let session = GameSession::new(92, Scheduler::current()).expect("runtime available");
    sleep(Duration::from_secs(200)).await;

    let reading = session.reading();
    assert_eq!(reading.elapsed, 92);
    assert_eq!(reading.remaining, 0);
    assert!(!reading.running);
    assert_eq!(session.describe(), "Resumed");
}

#[test]
fn leaderboard_keeps_the_three_best_times() {
    let board = Leaderboard::new();
    board.submit("a", 11);
    board.submit("b", 12);
    board.submit("c", 13);
    assert_eq!(board.len(), 3);

    assert_eq!(board.submit("d", 14), SubmitOutcome::Discarded);
    board.submit("d", 10);
    board.submit("a", 5);
    board.submit("a", 20);

    let entries: Vec<(String, u32)> = board
        .snapshot()
        .into_iter()
        .map(|entry| (entry.name, entry.score))
        .collect();
    assert_eq!(
        entries,
        vec![("a".to_string(), 5), ("d".to_string(), 10), ("b".to_string(), 12)]
    );
}

#[test]
fn corrupt_save_is_reported() {
    let result = decode(br#"{"format_version":1,"saved_at":"2026-01-01T00:00:00Z","clock":{"elapsed":5,"limit":93,"remaining":1,"ending":0},"mode":"Paused"}"#)
        .and_then(|snapshot| persistence::load(&snapshot, Scheduler::current()).map(|_| ()));
    assert!(matches!(result, Err(SessionError::CorruptSnapshot(_))));
}

#[test]
fn clock_can_be_driven_from_foreign_threads() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime");
    let scheduler = Scheduler::on(runtime.handle().clone()).with_tick_period(Duration::from_millis(1));
    let session = Arc::new(GameSession::new(40, scheduler).expect("runtime available"));

    let workers: Vec<_> = (0..3)
        .map(|_| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let _ = session.toggle();
                    let reading = session.reading();
                    assert!(reading.elapsed <= reading.limit);
                    assert_eq!(reading.remaining, reading.limit - reading.elapsed);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker finished cleanly");
    }

    let running = session.clock().is_running();
    let expired = session.reading().elapsed == 40;
    match session.mode() {
        TimerMode::Paused => assert!(!running),
        TimerMode::Resumed => assert!(running || expired),
    }
}
