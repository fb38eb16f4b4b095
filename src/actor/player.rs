//! Player Actor: Dedicated thread that owns a player and its timers.
//!
//! The thread sleeps on the command channel until either a command arrives
//! or the player's next deadline passes, so preemption is as immediate as
//! channel delivery.

use super::messages::{PlayerCommand, PlayerEvent};
use crate::player::{Player, PollOutcome};
use crate::surface::Surface;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use rand::Rng;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Player actor running on its own thread.
pub struct PlayerActor<S> {
    /// Handle to the player thread.
    handle: Option<JoinHandle<()>>,
    /// Command sender.
    commands: Sender<PlayerCommand<S>>,
}

impl<S: Surface + Send + 'static> PlayerActor<S> {
    /// Spawn the player thread.
    ///
    /// # Arguments
    ///
    /// * `player` - The player to move onto the thread.
    /// * `events` - Channel receiving progress and cursor events.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the player thread.
    pub fn spawn<R>(player: Player<S, R>, events: Sender<PlayerEvent>) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (commands, command_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("typist-player".to_string())
            .spawn(move || {
                Self::run_loop(player, &command_rx, &events);
            })
            .expect("Failed to spawn player thread");

        Self {
            handle: Some(handle),
            commands,
        }
    }

    /// Start or restart typing. Returns `false` if the thread is gone.
    pub fn run(&self) -> bool {
        self.commands.send(PlayerCommand::Run).is_ok()
    }

    /// Run `edit` against the surface on the player thread.
    pub fn edit(&self, edit: impl FnOnce(&mut S) + Send + 'static) -> bool {
        self.commands
            .send(PlayerCommand::Edit(Box::new(edit)))
            .is_ok()
    }

    /// Signal the player thread to shutdown.
    pub fn shutdown(&self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
    }

    /// Wait for the player thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main player loop.
    fn run_loop<R: Rng>(
        mut player: Player<S, R>,
        commands: &Receiver<PlayerCommand<S>>,
        events: &Sender<PlayerEvent>,
    ) {
        loop {
            let received = match player.next_deadline() {
                Some(deadline) => commands.recv_deadline(deadline),
                None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            let cursor = player.cursor();
            match received {
                Ok(PlayerCommand::Run) => match player.run(Instant::now()) {
                    Ok(()) => {
                        let _ = events.send(PlayerEvent::Started {
                            ops: player.script().len(),
                        });
                    }
                    Err(e) => {
                        let _ = events.send(PlayerEvent::Error(e.to_string()));
                    }
                },
                Ok(PlayerCommand::Edit(edit)) => edit(player.surface_mut()),
                Ok(PlayerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => match player.poll(Instant::now()) {
                    Ok(outcome) => Self::report(&player, outcome, events),
                    Err(e) => {
                        let _ = events.send(PlayerEvent::Error(e.to_string()));
                    }
                },
            }

            if player.cursor() != cursor {
                let _ = events.send(PlayerEvent::Cursor(player.cursor()));
            }
        }

        let _ = events.send(PlayerEvent::Shutdown);
    }

    fn report<R: Rng>(player: &Player<S, R>, outcome: PollOutcome, events: &Sender<PlayerEvent>) {
        if outcome.applied > 0 {
            let _ = events.send(PlayerEvent::Progress {
                applied: player.applied(),
                total: player.script().len(),
            });
        }
        if outcome.completed {
            let _ = events.send(PlayerEvent::Completed);
        }
    }
}

impl<S> Drop for PlayerActor<S> {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
    }
}
