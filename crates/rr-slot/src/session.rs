//! Session — UI commands in, one machine driven at a time
//!
//! The session owns the [`SlotMachine`] and keeps reading commands while a
//! spin or an auto-spin run is in flight, so a skip or a second spin press
//! is handled immediately instead of queueing behind the spin.

use tokio::sync::mpsc;

use crate::error::SpinRejection;
use crate::machine::{SlotHandle, SlotMachine};

const COMMAND_CAPACITY: usize = 64;

/// Player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Spin,
    Skip,
    ToggleAutoSpin,
    IncreaseBet,
    DecreaseBet,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Spin,
    AutoSpin,
}

/// How an activity ended
struct Finished {
    shutdown: bool,
    start_auto: bool,
}

/// Command sender for a running session
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    slot: SlotHandle,
}

impl SessionHandle {
    /// Send a command; false if the session has ended
    pub async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub async fn spin(&self) -> bool {
        self.send(Command::Spin).await
    }

    pub async fn skip(&self) -> bool {
        self.send(Command::Skip).await
    }

    pub async fn toggle_auto_spin(&self) -> bool {
        self.send(Command::ToggleAutoSpin).await
    }

    pub async fn increase_bet(&self) -> bool {
        self.send(Command::IncreaseBet).await
    }

    pub async fn decrease_bet(&self) -> bool {
        self.send(Command::DecreaseBet).await
    }

    pub async fn shutdown(&self) -> bool {
        self.send(Command::Shutdown).await
    }

    /// Machine handle for snapshots and event subscriptions
    pub fn slot(&self) -> &SlotHandle {
        &self.slot
    }
}

/// Command loop around a machine
pub struct SlotSession {
    machine: SlotMachine,
    commands: mpsc::Receiver<Command>,
}

impl SlotSession {
    pub fn new(machine: SlotMachine) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::channel(COMMAND_CAPACITY);
        let handle = SessionHandle {
            commands: tx,
            slot: machine.handle(),
        };
        (
            Self {
                machine,
                commands: rx,
            },
            handle,
        )
    }

    /// Process commands until `Shutdown` or every sender is dropped
    ///
    /// Hands the machine back so callers can read the final state.
    pub async fn run(self) -> SlotMachine {
        let Self {
            mut machine,
            mut commands,
        } = self;
        let slot = machine.handle();
        log::info!("[Session] Started");

        while let Some(command) = commands.recv().await {
            let mut activity = match command {
                Command::Spin => Activity::Spin,
                Command::ToggleAutoSpin => {
                    if !slot.toggle_auto_spin() {
                        continue;
                    }
                    Activity::AutoSpin
                }
                Command::Skip => {
                    slot.request_skip();
                    continue;
                }
                Command::IncreaseBet => {
                    machine.increase_bet();
                    continue;
                }
                Command::DecreaseBet => {
                    machine.decrease_bet();
                    continue;
                }
                Command::Shutdown => break,
            };

            loop {
                let finished = drive(&mut machine, &mut commands, &slot, activity).await;
                if finished.shutdown {
                    log::info!("[Session] Stopped");
                    return machine;
                }
                if !finished.start_auto {
                    break;
                }
                activity = Activity::AutoSpin;
            }
        }

        slot.set_auto_spin(false);
        log::info!("[Session] Stopped");
        machine
    }
}

/// Run one activity to completion while handling commands that arrive
async fn drive(
    machine: &mut SlotMachine,
    commands: &mut mpsc::Receiver<Command>,
    slot: &SlotHandle,
    activity: Activity,
) -> Finished {
    let mut finished = Finished {
        shutdown: false,
        start_auto: false,
    };
    let mut rejected = 0u64;

    {
        let work = async {
            match activity {
                Activity::Spin => {
                    if let Err(err) = machine.spin().await {
                        log::debug!("[Session] {}", err);
                    }
                }
                Activity::AutoSpin => {
                    machine.start_auto_spin().await;
                }
            }
        };
        tokio::pin!(work);

        loop {
            tokio::select! {
                _ = &mut work => break,
                command = commands.recv(), if !finished.shutdown => match command {
                    Some(Command::Spin) => {
                        let rejection = if activity == Activity::AutoSpin && !slot.is_spinning() {
                            SpinRejection::AutoSpinActive
                        } else {
                            SpinRejection::AlreadySpinning
                        };
                        slot.reject(rejection);
                        rejected += 1;
                    }
                    Some(Command::Skip) => {
                        slot.request_skip();
                    }
                    Some(Command::ToggleAutoSpin) => {
                        let enabled = slot.toggle_auto_spin();
                        finished.start_auto = enabled && activity == Activity::Spin;
                    }
                    Some(Command::IncreaseBet) | Some(Command::DecreaseBet) => {
                        log::debug!("[Session] Bet change ignored while spinning");
                    }
                    Some(Command::Shutdown) | None => {
                        slot.set_auto_spin(false);
                        finished.shutdown = true;
                    }
                },
            }
        }
    }

    for _ in 0..rejected {
        machine.record_rejection();
    }
    if finished.shutdown {
        finished.start_auto = false;
    }
    finished
}
