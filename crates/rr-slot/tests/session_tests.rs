//! Session integration tests
//!
//! Commands sent while a spin is in flight must be handled right away:
//! a second spin is rejected (naming auto-spin between its spins), skip cuts
//! the cascade short, auto-spin toggles take effect, bet changes are ignored
//! and shutdown waits for the spin.

use std::time::Duration;

use rr_slot::{SessionConfig, SlotMachine, SlotSession, TimingProfile};
use rr_stage::{Stage, StageEvent};
use tokio::sync::broadcast;

// ═══════════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

fn normal_machine(seed: u64) -> SlotMachine {
    SlotMachine::new(SessionConfig {
        timing_profile: TimingProfile::Normal,
        seed: Some(seed),
        ..SessionConfig::default()
    })
}

fn drain(rx: &mut broadcast::Receiver<StageEvent>) -> Vec<StageEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn count(events: &[StageEvent], type_name: &str) -> usize {
    events.iter().filter(|e| e.type_name() == type_name).count()
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test(start_paused = true)]
async fn test_second_spin_rejected_while_first_runs() {
    let (session, handle) = SlotSession::new(normal_machine(1));
    let mut rx = handle.slot().subscribe();
    let task = tokio::spawn(session.run());

    assert!(handle.spin().await);
    advance(100).await;
    assert!(handle.slot().is_spinning());

    assert!(handle.spin().await);
    advance(100).await;
    assert_eq!(
        handle.slot().snapshot().message,
        "Spin already in progress!"
    );

    assert!(handle.shutdown().await);
    let machine = task.await.unwrap();

    assert_eq!(machine.stats().total_spins, 1);
    assert_eq!(machine.stats().rejected_spins, 1);
    assert_eq!(
        machine.state().balance,
        1000 - 10 + machine.stats().total_win
    );

    let events = drain(&mut rx);
    assert_eq!(count(&events, "spin_start"), 1);
    assert_eq!(count(&events, "spin_rejected"), 1);
    assert_eq!(count(&events, "spin_end"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_skip_through_session() {
    let (session, handle) = SlotSession::new(normal_machine(2));
    let mut rx = handle.slot().subscribe();
    let task = tokio::spawn(session.run());

    handle.spin().await;
    advance(1200).await;
    handle.skip().await;
    handle.shutdown().await;
    let machine = task.await.unwrap();
    assert_eq!(machine.stats().skipped_spins, 1);

    let events = drain(&mut rx);
    let at = |name: &str| {
        events
            .iter()
            .find(|e| e.type_name() == name)
            .map(|e| e.timestamp_ms)
            .unwrap()
    };
    let duration = at("spin_end") - at("spin_start");
    assert!((2395.0..2450.0).contains(&duration), "spin took {}ms", duration);
}

#[tokio::test(start_paused = true)]
async fn test_auto_spin_toggled_on_mid_spin_continues_after_it() {
    let (session, handle) = SlotSession::new(normal_machine(3));
    let task = tokio::spawn(session.run());

    // Manual spin 0-4000ms, auto spins at 4000 and 9000 (1000ms pacing)
    handle.spin().await;
    advance(100).await;
    handle.toggle_auto_spin().await;
    advance(10_000).await;
    assert!(handle.slot().auto_spin_enabled());

    // Off at 10100ms: the spin in flight finishes, no further spin
    handle.toggle_auto_spin().await;
    handle.shutdown().await;
    let machine = task.await.unwrap();

    assert_eq!(machine.stats().total_spins, 3);
    assert!(!handle.slot().auto_spin_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_spin_between_auto_spins_names_auto_spin() {
    let (session, handle) = SlotSession::new(normal_machine(7));
    let mut rx = handle.slot().subscribe();
    let task = tokio::spawn(session.run());

    // First auto spin 0-4000ms, pacing wait until 5000ms
    handle.toggle_auto_spin().await;
    advance(4500).await;
    assert!(!handle.slot().is_spinning());

    handle.spin().await;
    advance(10).await;
    assert_eq!(handle.slot().snapshot().message, "Auto spin is running!");

    handle.shutdown().await;
    let machine = task.await.unwrap();
    assert_eq!(machine.stats().total_spins, 1);
    assert_eq!(machine.stats().rejected_spins, 1);

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| e.stage
        == Stage::SpinRejected {
            reason: "auto spin is running".into(),
        }));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_during_auto_spin_waits_for_the_spin() {
    let (session, handle) = SlotSession::new(normal_machine(4));
    let mut rx = handle.slot().subscribe();
    let task = tokio::spawn(session.run());

    handle.toggle_auto_spin().await;
    advance(1000).await;
    assert!(handle.slot().is_spinning());

    handle.shutdown().await;
    let machine = task.await.unwrap();

    assert_eq!(machine.stats().total_spins, 1);
    assert!(!machine.state().spinning);
    assert!(!handle.slot().auto_spin_enabled());

    let events = drain(&mut rx);
    assert_eq!(count(&events, "spin_end"), 1);
    assert_eq!(count(&events, "auto_spin_changed"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_bet_changes_ignored_while_spinning() {
    let (session, handle) = SlotSession::new(normal_machine(5));
    let task = tokio::spawn(session.run());

    handle.increase_bet().await;
    handle.spin().await;
    advance(100).await;
    handle.increase_bet().await;
    handle.decrease_bet().await;
    handle.shutdown().await;

    let machine = task.await.unwrap();
    assert_eq!(machine.state().bet, 15);
    assert_eq!(handle.slot().snapshot().bet, 15);
    assert_eq!(machine.stats().total_bet, 15);
}

#[tokio::test]
async fn test_dropping_all_handles_ends_session() {
    let (session, handle) = SlotSession::new(normal_machine(6));
    let slot = handle.slot().clone();
    let task = tokio::spawn(session.run());

    drop(handle);
    let machine = task.await.unwrap();
    assert_eq!(machine.stats().total_spins, 0);
    assert!(!slot.auto_spin_enabled());
}
