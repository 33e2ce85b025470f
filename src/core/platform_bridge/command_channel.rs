//=========================================================================
// Command Channel
//=========================================================================
//
// Cross-thread queue carrying PendingCommands from the native thread to
// the thread that owns the platform sensor APIs.
//
// Architecture:
//   native thread: CommandSender::post() ──► unbounded MPSC
//                                                  ↓
//   owning thread: CommandReceiver::drain(budget) ─► SensorSubscriptionManager
//
// Posting never blocks. Commands from one producer are consumed in FIFO
// order, exactly once. Once the receiver is dropped (teardown), posts
// fail with `ChannelClosed` and the command is discarded.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{BridgeError, PendingCommand};

//=== Construction ========================================================

/// Creates a connected sender/receiver pair.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (sender, receiver) = unbounded();
    (CommandSender { sender }, CommandReceiver { receiver })
}

//=== CommandSender =======================================================

/// Producer half, cloneable and `Send`.
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: Sender<PendingCommand>,
}

impl CommandSender {
    /// Queues a command without blocking.
    ///
    /// Returns [`BridgeError::ChannelClosed`] after teardown; the command
    /// is dropped and callers are free to ignore the error.
    pub fn post(&self, command: PendingCommand) -> Result<(), BridgeError> {
        match self.sender.send(command) {
            Ok(()) => {
                trace!(target: "bridge::command", "Posted {:?}", command);
                Ok(())
            }
            Err(_) => {
                debug!(target: "bridge::command", "Channel closed, dropping {:?}", command);
                Err(BridgeError::ChannelClosed)
            }
        }
    }

    /// Queues a command given by its wire code.
    pub fn post_code(&self, code: i32) -> Result<(), BridgeError> {
        let command = PendingCommand::try_from(code).inspect_err(|_| {
            warn!(target: "bridge::command", "Ignoring unknown command code {:#010x}", code);
        })?;
        self.post(command)
    }
}

//=== CommandReceiver =====================================================

/// Consumer half, held by the thread that owns the platform.
#[derive(Debug)]
pub struct CommandReceiver {
    receiver: Receiver<PendingCommand>,
}

impl CommandReceiver {
    /// Hands up to `budget` queued commands to `execute`, in post order.
    ///
    /// Returns how many were executed. Anything past the budget stays
    /// queued for the next call.
    pub fn drain<F>(&self, budget: usize, mut execute: F) -> usize
    where
        F: FnMut(PendingCommand),
    {
        let mut drained = 0;

        while drained < budget {
            match self.receiver.try_recv() {
                Ok(command) => {
                    execute(command);
                    drained += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained >= budget && !self.receiver.is_empty() {
            warn!(
                target: "bridge::command",
                "Command backlog: drained {} commands, {} still queued",
                drained,
                self.receiver.len()
            );
        }

        drained
    }

    /// Number of commands waiting.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
