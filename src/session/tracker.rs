//! Session tracker with synchronous listeners
//!
//! The tracker is the only writer of its `SessionState`. Listeners are
//! called in registration order, inside the mutating call, with a shared
//! reference to the new state. Because every mutation takes `&mut self`, a
//! listener can never reach back into the tracker that is notifying it.

use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, ThreadId};
use thiserror::Error;
use tokio::sync::broadcast;

use super::state::{DerivedMetrics, SessionState, SIMULATED_PAIR};
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};

/// Default capacity of the snapshot feed
pub const DEFAULT_FEED_CAPACITY: usize = 64;

type Listener = Box<dyn FnMut(&SessionState) + Send>;

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Owns one session's state and notifies listeners on every mutation
pub struct SessionTracker {
    state: SessionState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    feed: broadcast::Sender<SessionState>,
}

impl SessionTracker {
    /// Create a tracker at the default starting state
    pub fn new() -> Self {
        Self::with_feed_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// Create a tracker whose snapshot feed buffers `capacity` states
    pub fn with_feed_capacity(capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(capacity.max(1));
        Self {
            state: SessionState::default(),
            listeners: Vec::new(),
            next_id: 0,
            feed,
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Derived metrics for the current state
    pub fn metrics(&self) -> DerivedMetrics {
        self.state.metrics()
    }

    /// Register a listener for every subsequent mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SessionState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Receiver of state snapshots, one per mutation, in mutation order
    ///
    /// A receiver that falls more than the feed capacity behind skips the
    /// oldest snapshots.
    pub fn feed(&self) -> broadcast::Receiver<SessionState> {
        self.feed.subscribe()
    }

    /// Record the outcome of a trade
    pub fn record_trade(&mut self, won: bool) {
        self.state.trades_count += 1;
        if won {
            self.state.win_count += 1;
        }
        self.state.session_active = true;
        self.state.current_pair = SIMULATED_PAIR.to_string();

        increment_counter(CounterMetric::TradesRecorded);
        tracing::info!(
            won,
            trades = self.state.trades_count,
            wins = self.state.win_count,
            "Trade recorded"
        );
        self.notify();
    }

    /// Move equity by `delta`
    pub fn adjust_equity(&mut self, delta: Decimal) {
        self.state.current_equity = self.state.current_equity.saturating_add(delta);

        tracing::info!(%delta, equity = %self.state.current_equity, "Equity adjusted");
        self.notify();
    }

    /// Restore the default starting state
    pub fn reset(&mut self) {
        self.state = SessionState::default();

        tracing::info!("Session reset");
        self.notify();
    }

    /// Record a demo trade and book its P&L
    ///
    /// Emits two notifications: one for the trade, one for the equity move.
    pub fn simulate_trade(&mut self, won: bool, amount: Decimal) {
        let amount = amount.abs();
        self.record_trade(won);
        self.adjust_equity(if won { amount } else { -amount });
    }

    fn notify(&mut self) {
        let metrics = self.state.metrics();
        set_gauge(GaugeMetric::Equity, self.state.current_equity);
        set_gauge(GaugeMetric::DailyPnl, metrics.daily_pnl);
        set_gauge(GaugeMetric::DrawdownPct, metrics.drawdown_percent);
        set_gauge(GaugeMetric::WinRatePct, metrics.win_rate);

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        // No receivers is fine
        let _ = self.feed.send(self.state.clone());
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Errors from the shared tracker handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// A listener tried to use the tracker that is notifying it
    #[error("Session tracker accessed from inside its own listener")]
    Reentrant,
}

struct SharedInner {
    tracker: Mutex<SessionTracker>,
    owner: Mutex<Option<ThreadId>>,
}

/// Cloneable, thread-safe handle to one `SessionTracker`
///
/// Each call locks the whole tracker, so compound read-then-write updates
/// never interleave. Calls made from inside a listener of the same tracker
/// fail with `TrackerError::Reentrant` instead of deadlocking.
#[derive(Clone)]
pub struct SharedSessionTracker {
    inner: Arc<SharedInner>,
}

impl SharedSessionTracker {
    pub fn new(tracker: SessionTracker) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                tracker: Mutex::new(tracker),
                owner: Mutex::new(None),
            }),
        }
    }

    /// Run `f` with exclusive access to the tracker
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionTracker) -> R) -> Result<R, TrackerError> {
        let current = thread::current().id();
        if *self.lock_owner() == Some(current) {
            return Err(TrackerError::Reentrant);
        }

        let mut tracker = self
            .inner
            .tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.lock_owner() = Some(current);
        let _release = OwnerRelease(self);

        Ok(f(&mut *tracker))
    }

    pub fn record_trade(&self, won: bool) -> Result<(), TrackerError> {
        self.with(|t| t.record_trade(won))
    }

    pub fn adjust_equity(&self, delta: Decimal) -> Result<(), TrackerError> {
        self.with(|t| t.adjust_equity(delta))
    }

    pub fn reset(&self) -> Result<(), TrackerError> {
        self.with(|t| t.reset())
    }

    pub fn simulate_trade(&self, won: bool, amount: Decimal) -> Result<(), TrackerError> {
        self.with(|t| t.simulate_trade(won, amount))
    }

    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId, TrackerError>
    where
        F: FnMut(&SessionState) + Send + 'static,
    {
        self.with(|t| t.subscribe(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, TrackerError> {
        self.with(|t| t.unsubscribe(id))
    }

    pub fn snapshot(&self) -> Result<SessionState, TrackerError> {
        self.with(|t| t.state().clone())
    }

    pub fn metrics(&self) -> Result<DerivedMetrics, TrackerError> {
        self.with(|t| t.metrics())
    }

    fn lock_owner(&self) -> std::sync::MutexGuard<'_, Option<ThreadId>> {
        self.inner
            .owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<SessionTracker> for SharedSessionTracker {
    fn from(tracker: SessionTracker) -> Self {
        Self::new(tracker)
    }
}

struct OwnerRelease<'a>(&'a SharedSessionTracker);

impl Drop for OwnerRelease<'_> {
    fn drop(&mut self) {
        *self.0.lock_owner() = None;
    }
}
