//! Slot Machine — the spin controller
//!
//! Owns the game state and sequences a spin: pay the bet, start the reels,
//! stop them one by one, evaluate the middle row, settle the balance. Every
//! visible change goes out as a [`StageEvent`]; nothing here renders.
//!
//! UI-side inputs that must reach a spin in flight (skip, auto-spin toggle)
//! travel through a cloneable [`SlotHandle`]. The reels sit behind the shared
//! lock as well, so the win-clear timer can switch their highlights off.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use rr_stage::{Stage, StageEvent};

use crate::config::SessionConfig;
use crate::config::rules::{REEL_COUNT, STOP_OFFSET_RANGE, VISIBLE_ROWS};
use crate::error::{SlotError, SlotResult, SpinRejection};
use crate::paytable::{WinResult, evaluate_middle_row};
use crate::reel::Reel;
use crate::state::{BetLadder, GameState};
use crate::stats::SessionStats;
use crate::symbols::{PayoutTable, Symbol, WeightTable};
use crate::timing::TimingConfig;

/// Stage events buffered per subscriber before it lags
const EVENT_CAPACITY: usize = 1024;

// ═══════════════════════════════════════════════════════════════════════════
// OUTCOME / SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════════

/// Result of one resolved spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub spin_id: String,
    pub bet: u64,
    /// Visible window of each reel, top to bottom
    pub reels: Vec<[Symbol; VISIBLE_ROWS]>,
    pub middle_row: Vec<Symbol>,
    pub win: Option<WinResult>,
    pub balance_after: u64,
    /// Skip collapsed at least one inter-reel wait
    pub skipped: bool,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.win.is_some()
    }

    pub fn win_amount(&self) -> u64 {
        self.win.as_ref().map_or(0, |w| w.amount)
    }
}

/// What a UI would currently show
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub balance: u64,
    pub bet: u64,
    pub spinning: bool,
    pub auto_spin: bool,
    pub message: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// SHARED STATE / HANDLE
// ═══════════════════════════════════════════════════════════════════════════

struct Shared {
    skip_tx: watch::Sender<bool>,
    auto_spin: AtomicBool,
    spinning: AtomicBool,
    events: broadcast::Sender<StageEvent>,
    snapshot: RwLock<GameSnapshot>,
    reels: RwLock<Vec<Reel>>,
    epoch: Instant,
}

impl Shared {
    fn emit(&self, stage: Stage, spin_id: Option<&str>) {
        let timestamp_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        let mut event = StageEvent::new(stage, timestamp_ms);
        if let Some(spin_id) = spin_id {
            event = event.with_spin(spin_id);
        }
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn show_message(&self, text: &str, spin_id: Option<&str>) {
        self.snapshot.write().message = text.to_string();
        self.emit(
            Stage::Message {
                text: text.to_string(),
            },
            spin_id,
        );
    }

    /// Switch every lit reel off, one `ReelHighlight` event per reel
    fn clear_highlights(&self, spin_id: Option<&str>) {
        let cleared: Vec<u8> = self
            .reels
            .write()
            .iter_mut()
            .filter(|reel| reel.is_highlighted())
            .map(|reel| {
                reel.clear_highlight();
                reel.index()
            })
            .collect();

        for reel_index in cleared {
            self.emit(Stage::ReelHighlight { reel_index, on: false }, spin_id);
        }
    }

    /// Returns the previous value
    fn set_auto_spin(&self, enabled: bool) -> bool {
        let previous = self.auto_spin.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            self.snapshot.write().auto_spin = enabled;
            self.emit(Stage::AutoSpinChanged { enabled }, None);
            log::info!("[Slot] Auto spin {}", if enabled { "on" } else { "off" });
        }
        previous
    }
}

/// Cloneable handle for inputs that must reach a running spin
#[derive(Clone)]
pub struct SlotHandle {
    shared: Arc<Shared>,
}

impl SlotHandle {
    /// Ask the running spin to stop its remaining reels back-to-back
    ///
    /// Returns false when no spin is in flight; the flag is reset at every
    /// spin start, so an early request has no effect.
    pub fn request_skip(&self) -> bool {
        let spinning = self.is_spinning();
        self.shared.skip_tx.send_replace(true);
        if spinning {
            self.shared.emit(Stage::SkipRequested, None);
            log::debug!("[Slot] Skip requested");
        }
        spinning
    }

    /// Set auto-spin, returning the previous value
    ///
    /// Turning it off lets the loop finish its current spin and pacing wait.
    pub fn set_auto_spin(&self, enabled: bool) -> bool {
        self.shared.set_auto_spin(enabled)
    }

    /// Flip auto-spin, returning the new value
    pub fn toggle_auto_spin(&self) -> bool {
        let enabled = !self.auto_spin_enabled();
        self.shared.set_auto_spin(enabled);
        enabled
    }

    pub fn auto_spin_enabled(&self) -> bool {
        self.shared.auto_spin.load(Ordering::SeqCst)
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.spinning.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.snapshot.read().clone()
    }

    /// Subscribe to stage events
    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.shared.events.subscribe()
    }

    /// Refuse a spin press that the session cannot start now
    pub(crate) fn reject(&self, rejection: SpinRejection) {
        log::warn!("[Slot] Spin rejected: {}", rejection);
        self.shared.emit(
            Stage::SpinRejected {
                reason: rejection.to_string(),
            },
            None,
        );
        self.shared.show_message(rejection.message(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SLOT MACHINE
// ═══════════════════════════════════════════════════════════════════════════

/// The game controller
pub struct SlotMachine {
    config: SessionConfig,
    state: GameState,
    weights: WeightTable,
    payouts: PayoutTable,
    ladder: BetLadder,
    timing: TimingConfig,
    rng: StdRng,
    stats: SessionStats,
    spin_count: u64,
    current_spin: Option<String>,
    skip_rx: watch::Receiver<bool>,
    win_clear: Option<JoinHandle<()>>,
    shared: Arc<Shared>,
}

impl SlotMachine {
    /// Create a machine with standard tables and fresh reel strips
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let weights = WeightTable::standard();
        let reels: Vec<Reel> = (0..REEL_COUNT)
            .map(|index| Reel::new(index as u8, &weights, &mut rng))
            .collect();

        let state = GameState::default();
        let (skip_tx, skip_rx) = watch::channel(false);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let shared = Arc::new(Shared {
            skip_tx,
            auto_spin: AtomicBool::new(false),
            spinning: AtomicBool::new(false),
            events,
            snapshot: RwLock::new(GameSnapshot {
                balance: state.balance,
                bet: state.bet,
                ..GameSnapshot::default()
            }),
            reels: RwLock::new(reels),
            epoch: Instant::now(),
        });

        let timing = config.timing_config();
        log::debug!("[Slot] Machine created with {:?} timing", timing.profile);

        Self {
            config,
            state,
            weights,
            payouts: PayoutTable::standard(),
            ladder: BetLadder::standard(),
            timing,
            rng,
            stats: SessionStats::default(),
            spin_count: 0,
            current_spin: None,
            skip_rx,
            win_clear: None,
            shared,
        }
    }

    /// Replace the timing
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Start from a different balance (scenario setup)
    pub fn with_balance(mut self, balance: u64) -> Self {
        self.state.balance = balance;
        self.shared.snapshot.write().balance = balance;
        self
    }

    /// Reseed the RNG for reproducible spins
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn handle(&self) -> SlotHandle {
        SlotHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Subscribe to stage events
    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.shared.events.subscribe()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Copy of the reels as they are now
    pub fn reels(&self) -> Vec<Reel> {
        self.shared.reels.read().clone()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    /// Image path for a symbol under the configured asset naming
    pub fn symbol_image(&self, symbol: Symbol) -> String {
        symbol.image_path(&self.config.image_dir, &self.config.image_ext)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BET
    // ═══════════════════════════════════════════════════════════════════════

    /// Step the bet up; false if declined
    pub fn increase_bet(&mut self) -> bool {
        if self.state.spinning {
            return false;
        }
        match self.ladder.increase(self.state.bet, self.state.balance) {
            Some(bet) => self.set_bet(bet),
            None => false,
        }
    }

    /// Step the bet down; false if declined
    pub fn decrease_bet(&mut self) -> bool {
        if self.state.spinning {
            return false;
        }
        match self.ladder.decrease(self.state.bet) {
            Some(bet) => self.set_bet(bet),
            None => false,
        }
    }

    fn set_bet(&mut self, bet: u64) -> bool {
        log::debug!("[Slot] Bet {} -> {}", self.state.bet, bet);
        self.state.bet = bet;
        self.refresh_display();
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Run one full spin and resolve it
    pub async fn spin(&mut self) -> SlotResult<SpinOutcome> {
        self.spin_internal(None).await
    }

    /// Spin with predetermined middle symbols; everything else is normal
    pub async fn spin_forced(&mut self, middle_row: [Symbol; REEL_COUNT]) -> SlotResult<SpinOutcome> {
        self.spin_internal(Some(middle_row)).await
    }

    async fn spin_internal(&mut self, forced: Option<[Symbol; REEL_COUNT]>) -> SlotResult<SpinOutcome> {
        if let Err(rejection) = self.state.can_spin() {
            self.reject(rejection);
            return Err(SlotError::Rejected(rejection));
        }

        if let Some(pending) = self.win_clear.take() {
            pending.abort();
        }
        self.shared.clear_highlights(None);

        self.shared.skip_tx.send_replace(false);
        self.skip_rx.borrow_and_update();
        self.set_spinning(true);

        let bet = self.state.bet;
        self.state.balance -= bet;
        self.spin_count += 1;
        let spin_id = format!("spin-{:06}", self.spin_count);
        self.current_spin = Some(spin_id.clone());
        log::debug!("[Slot] {} bet {} balance {}", spin_id, bet, self.state.balance);

        self.emit(Stage::SpinStart {
            spin_id: spin_id.clone(),
            bet,
            balance: self.state.balance,
        });
        self.refresh_display();
        self.show_message("");
        self.emit(Stage::SpinControls { skip_enabled: true });

        for reel in self.shared.reels.write().iter_mut() {
            reel.spin();
        }
        for reel_index in 0..REEL_COUNT as u8 {
            self.emit(Stage::ReelSpinning { reel_index });
        }

        let targets: [usize; REEL_COUNT] =
            std::array::from_fn(|_| self.rng.random_range(STOP_OFFSET_RANGE));

        let mut skipped = false;
        for index in 0..REEL_COUNT {
            if !skipped && *self.skip_rx.borrow() {
                skipped = true;
            }
            if !skipped && self.inter_reel_wait().await {
                log::debug!("[Slot] {} skipping from reel {}", spin_id, index);
                skipped = true;
            }

            let stop = {
                let mut reels = self.shared.reels.write();
                let reel = &mut reels[index];
                match forced {
                    Some(row) => reel.stop_forced(targets[index], row[index], &self.weights, &mut self.rng),
                    None => reel.stop(targets[index], &self.weights, &mut self.rng),
                }
            };
            log::debug!(
                "[Slot] {} reel {} stopped at {} showing {:?}",
                spin_id,
                index,
                stop.stop_index,
                stop.symbols
            );
            self.emit(Stage::ReelStop {
                reel_index: stop.reel_index,
                stop_index: stop.stop_index,
                symbols: symbol_names(&stop.symbols),
                slots: stop.slots.to_vec(),
            });

            pause(self.timing.reel_settle()).await;
        }

        self.emit(Stage::SpinControls { skip_enabled: false });
        self.state.reel_positions = targets.to_vec();

        let middle_row: Vec<Symbol> = self.shared.reels.read().iter().map(Reel::middle_symbol).collect();
        self.emit(Stage::EvaluateWins {
            middle_row: symbol_names(&middle_row),
        });

        let evaluation = evaluate_middle_row(&middle_row, bet, &self.payouts);
        match &evaluation.win {
            Some(win) => self.present_win(win),
            None => {
                self.emit(Stage::NoWin);
                self.show_message("Try again!");
            }
        }

        self.set_spinning(false);
        self.refresh_display();
        self.emit(Stage::SpinEnd {
            balance: self.state.balance,
        });
        self.stats.record_spin(bet, evaluation.win.as_ref(), skipped);
        self.current_spin = None;

        log::info!(
            "[Slot] {} {} balance {}",
            spin_id,
            match &evaluation.win {
                Some(win) => format!("won {} ({}x {})", win.amount, win.match_count, win.symbol),
                None => "lost".to_string(),
            },
            self.state.balance
        );

        Ok(SpinOutcome {
            spin_id,
            bet,
            reels: self.shared.reels.read().iter().map(Reel::visible_symbols).collect(),
            middle_row,
            win: evaluation.win,
            balance_after: self.state.balance,
            skipped,
        })
    }

    /// Wait before the next reel stop; true if skip cut it short
    async fn inter_reel_wait(&mut self) -> bool {
        let interval = self.timing.reel_stop_interval();
        tokio::select! {
            _ = pause(interval) => false,
            _ = wait_for_skip(&mut self.skip_rx) => true,
        }
    }

    fn present_win(&mut self, win: &WinResult) {
        self.state.balance = self.state.balance.saturating_add(win.amount);

        let mut lit = Vec::with_capacity(win.winning_reels.len());
        {
            let mut reels = self.shared.reels.write();
            for &reel_index in &win.winning_reels {
                if let Some(reel) = reels.get_mut(reel_index as usize) {
                    reel.highlight_win();
                    lit.push(reel_index);
                }
            }
        }
        for reel_index in lit {
            self.emit(Stage::ReelHighlight {
                reel_index,
                on: true,
            });
        }

        self.emit(Stage::WinPresent {
            symbol: win.symbol.name().to_string(),
            match_count: win.match_count,
            win_amount: win.amount,
        });
        self.show_message(&format!(
            "WIN! {}x {} = {} coins!",
            win.match_count, win.symbol, win.amount
        ));

        let shared = Arc::clone(&self.shared);
        let spin_id = self.current_spin.clone();
        let delay = self.timing.win_display();
        self.win_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.clear_highlights(spin_id.as_deref());
            shared.emit(Stage::WinClear, spin_id.as_deref());
        }));
    }

    fn reject(&mut self, rejection: SpinRejection) {
        log::warn!("[Slot] Spin rejected: {}", rejection);
        self.stats.record_rejection();
        self.emit(Stage::SpinRejected {
            reason: rejection.to_string(),
        });
        self.show_message(rejection.message());
    }

    /// Count a rejection handled outside the machine
    pub(crate) fn record_rejection(&mut self) {
        self.stats.record_rejection();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // AUTO SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Enable auto-spin and run until it is turned off or funds run out
    ///
    /// Returns the number of spins played.
    pub async fn start_auto_spin(&mut self) -> u64 {
        self.run_auto_spin(None).await
    }

    /// Like [`start_auto_spin`](Self::start_auto_spin), but turns itself off
    /// after `limit` spins
    pub async fn start_auto_spin_for(&mut self, limit: u64) -> u64 {
        self.run_auto_spin(Some(limit)).await
    }

    async fn run_auto_spin(&mut self, limit: Option<u64>) -> u64 {
        self.shared.set_auto_spin(true);
        let mut played = 0u64;

        while self.shared.auto_spin.load(Ordering::SeqCst) && self.state.can_afford_bet() {
            if let Err(err) = self.spin().await {
                log::warn!("[Slot] Auto spin stopped: {}", err);
                break;
            }
            played += 1;

            if limit.is_some_and(|limit| played >= limit) {
                self.shared.set_auto_spin(false);
            }
            if self.shared.auto_spin.load(Ordering::SeqCst) {
                pause(self.timing.auto_spin_pacing()).await;
            }
        }

        if !self.state.can_afford_bet() {
            self.shared.set_auto_spin(false);
            self.show_message("Insufficient balance for auto spin!");
        }

        log::info!("[Slot] Auto spin finished after {} spins", played);
        played
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PRESENTATION
    // ═══════════════════════════════════════════════════════════════════════

    fn emit(&self, stage: Stage) {
        self.shared.emit(stage, self.current_spin.as_deref());
    }

    fn show_message(&self, text: &str) {
        self.shared.show_message(text, self.current_spin.as_deref());
    }

    fn refresh_display(&self) {
        {
            let mut snapshot = self.shared.snapshot.write();
            snapshot.balance = self.state.balance;
            snapshot.bet = self.state.bet;
            snapshot.spinning = self.state.spinning;
        }
        self.emit(Stage::Display {
            balance: self.state.balance,
            bet: self.state.bet,
        });
    }

    fn set_spinning(&mut self, spinning: bool) {
        self.state.spinning = spinning;
        self.shared.spinning.store(spinning, Ordering::SeqCst);
    }
}

impl Drop for SlotMachine {
    fn drop(&mut self) {
        if let Some(pending) = self.win_clear.take() {
            pending.abort();
        }
    }
}

/// Sleep, or just yield when there is nothing to wait for
async fn pause(duration: Duration) {
    if duration.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(duration).await;
    }
}

/// Resolve once the skip flag is set
async fn wait_for_skip(rx: &mut watch::Receiver<bool>) {
    loop {
        let requested = *rx.borrow_and_update();
        if requested {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn symbol_names(symbols: &[Symbol]) -> Vec<String> {
    symbols.iter().map(|s| s.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rules::{MAX_BET, STARTING_BALANCE, STARTING_BET};
    use crate::timing::TimingProfile;

    fn instant_machine(seed: u64) -> SlotMachine {
        SlotMachine::new(SessionConfig {
            timing_profile: TimingProfile::Instant,
            seed: Some(seed),
            ..SessionConfig::default()
        })
    }

    #[test]
    fn test_new_machine_defaults() {
        let machine = instant_machine(1);
        assert_eq!(machine.state().balance, STARTING_BALANCE);
        assert_eq!(machine.state().bet, STARTING_BET);
        assert_eq!(machine.reels().len(), REEL_COUNT);
        assert_eq!(machine.timing().profile, TimingProfile::Instant);

        let snapshot = machine.handle().snapshot();
        assert_eq!(snapshot.balance, STARTING_BALANCE);
        assert!(!snapshot.spinning);
        assert_eq!(machine.symbol_image(Symbol::Axe), "img/axe.png");
    }

    #[test]
    fn test_bet_adjustment_updates_snapshot() {
        let mut machine = instant_machine(1);
        assert!(machine.increase_bet());
        assert_eq!(machine.state().bet, 15);
        assert_eq!(machine.handle().snapshot().bet, 15);

        assert!(machine.decrease_bet());
        assert!(machine.decrease_bet());
        assert!(!machine.decrease_bet());
        assert_eq!(machine.state().bet, 5);
    }

    #[test]
    fn test_bet_capped_at_max() {
        let mut machine = instant_machine(1);
        while machine.increase_bet() {}
        assert_eq!(machine.state().bet, MAX_BET);
    }

    #[tokio::test]
    async fn test_same_seed_same_spins() {
        let mut a = instant_machine(42);
        let mut b = instant_machine(42);
        for _ in 0..10 {
            let left = a.spin().await.unwrap();
            let right = b.spin().await.unwrap();
            assert_eq!(left.reels, right.reels);
            assert_eq!(left.balance_after, right.balance_after);
        }
    }

    #[tokio::test]
    async fn test_reseed_repeats_windows() {
        let mut a = instant_machine(1);
        let mut b = instant_machine(2);
        a.seed(99);
        b.seed(99);
        assert_eq!(a.spin().await.unwrap().reels, b.spin().await.unwrap().reels);
    }

    #[tokio::test]
    async fn test_balance_accounting() {
        let mut machine = instant_machine(7);
        let mut expected = machine.state().balance;
        for _ in 0..50 {
            let outcome = machine.spin().await.unwrap();
            expected = expected - outcome.bet + outcome.win_amount();
            assert_eq!(outcome.balance_after, expected);
            assert_eq!(outcome.reels.len(), REEL_COUNT);
            assert_eq!(
                outcome.middle_row,
                outcome.reels.iter().map(|r| r[1]).collect::<Vec<_>>()
            );
        }
        assert_eq!(machine.stats().total_spins, 50);
        assert!(!machine.state().spinning);
    }

    #[tokio::test]
    async fn test_stop_positions_in_range() {
        let mut machine = instant_machine(3);
        machine.spin().await.unwrap();
        assert_eq!(machine.state().reel_positions.len(), REEL_COUNT);
        for &position in &machine.state().reel_positions {
            assert!(STOP_OFFSET_RANGE.contains(&position));
        }
        for reel in machine.reels() {
            assert!(reel.stop_index().is_some_and(|i| STOP_OFFSET_RANGE.contains(&i)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_winning_reels_highlighted_until_next_spin() {
        let mut machine = instant_machine(5).with_timing(TimingConfig {
            win_display_ms: 3000,
            ..TimingConfig::instant()
        });
        let mut rx = machine.subscribe();
        let outcome = machine
            .spin_forced([Symbol::Coin, Symbol::Sword, Symbol::Coin, Symbol::Book, Symbol::Coin])
            .await
            .unwrap();
        assert_eq!(outcome.win_amount(), 10);

        let lit: Vec<bool> = machine.reels().iter().map(Reel::is_highlighted).collect();
        assert_eq!(lit, vec![true, false, true, false, true]);

        while rx.try_recv().is_ok() {}

        machine
            .spin_forced([Symbol::Coin, Symbol::Sword, Symbol::Shield, Symbol::Axe, Symbol::Book])
            .await
            .unwrap();
        assert!(machine.reels().iter().all(|r| !r.is_highlighted()));

        // Highlights go off before the new spin starts
        let mut turned_off = Vec::new();
        while let Ok(event) = rx.try_recv() {
            match event.stage {
                Stage::ReelHighlight { reel_index, on: false } => turned_off.push(reel_index),
                Stage::SpinStart { .. } => break,
                _ => {}
            }
        }
        assert_eq!(turned_off, vec![0, 2, 4]);
    }
}
