//! Integration tests for the session tracker

use fx_risk::alerts::{AlertKind, AlertPolicy};
use fx_risk::session::{SessionState, SessionTracker, SharedSessionTracker};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

#[test]
fn test_three_wins_then_loss_win_rate() {
    let mut tracker = SessionTracker::new();
    tracker.record_trade(true);
    tracker.record_trade(true);
    tracker.record_trade(true);
    tracker.record_trade(false);

    assert_eq!(tracker.metrics().win_rate, dec!(75.0));
    assert_eq!(tracker.state().trades_count, 4);
}

#[test]
fn test_win_rate_matches_ratio() {
    for (wins, losses) in [(1u64, 2u64), (5, 0), (0, 3), (7, 4)] {
        let mut tracker = SessionTracker::new();
        for _ in 0..wins {
            tracker.record_trade(true);
        }
        for _ in 0..losses {
            tracker.record_trade(false);
        }

        let expected = Decimal::from(wins) / Decimal::from(wins + losses) * dec!(100);
        assert_eq!(tracker.metrics().win_rate, expected);
        assert_eq!(tracker.state().trades_count, wins + losses);
        assert!(tracker.state().win_count <= tracker.state().trades_count);
    }
}

#[test]
fn test_reset_zeroes_metrics() {
    let mut tracker = SessionTracker::new();
    tracker.simulate_trade(false, dec!(300));
    tracker.simulate_trade(true, dec!(50));
    tracker.reset();

    let metrics = tracker.metrics();
    assert_eq!(metrics.daily_pnl, Decimal::ZERO);
    assert_eq!(metrics.drawdown_percent, Decimal::ZERO);
    assert_eq!(metrics.win_rate, Decimal::ZERO);
    assert_eq!(tracker.state(), &SessionState::default());
}

#[test]
fn test_listener_driven_alerts() {
    let mut tracker = SessionTracker::new();
    let policy = AlertPolicy::default();
    let latest = Arc::new(Mutex::new(Vec::new()));

    let sink = latest.clone();
    tracker.subscribe(move |state| {
        let kinds: Vec<_> = policy
            .evaluate_metrics(&state.metrics())
            .into_iter()
            .map(|a| a.kind)
            .collect();
        *sink.lock().unwrap() = kinds;
    });

    tracker.adjust_equity(dec!(-300));
    assert_eq!(*latest.lock().unwrap(), vec![AlertKind::DrawdownWarning]);

    tracker.adjust_equity(dec!(-200));
    assert_eq!(*latest.lock().unwrap(), vec![AlertKind::MandatoryBreak]);

    tracker.reset();
    assert!(latest.lock().unwrap().is_empty());

    tracker.adjust_equity(dec!(100));
    assert_eq!(*latest.lock().unwrap(), vec![AlertKind::TargetReached]);
}

#[test]
fn test_independent_trackers() {
    let mut a = SessionTracker::new();
    let b = SessionTracker::new();
    a.simulate_trade(true, dec!(50));

    assert_eq!(a.state().current_equity, dec!(10050));
    assert_eq!(b.state().current_equity, dec!(10000));
}

#[tokio::test]
async fn test_feed_delivers_in_mutation_order() {
    let mut tracker = SessionTracker::new();
    let mut feed = tracker.feed();

    let consumer = tokio::spawn(async move {
        let mut equities = Vec::new();
        while let Ok(state) = feed.recv().await {
            equities.push(state.current_equity);
        }
        equities
    });

    tracker.adjust_equity(dec!(10));
    tracker.adjust_equity(dec!(-30));
    tracker.reset();
    drop(tracker);

    let equities = consumer.await.unwrap();
    assert_eq!(equities, vec![dec!(10010), dec!(9980), dec!(10000)]);
}

#[test]
fn test_shared_tracker_snapshot_and_metrics() {
    let shared = SharedSessionTracker::from(SessionTracker::new());
    shared.simulate_trade(false, dec!(50)).unwrap();

    assert_eq!(shared.snapshot().unwrap().current_equity, dec!(9950));
    assert_eq!(shared.metrics().unwrap().drawdown_percent, dec!(0.5));
}
