//! The world worker and its clients.
//!
//! One worker thread owns the [`Game`]. Each frame it advances the world
//! clock, then spends what is left of the frame handling inbound lines.
//! Clients talk to it only through channels: a shared inbound channel for
//! lines and a private outbound channel per client for rendered alerts.

use std::collections::{HashMap, HashSet};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use tracing::{debug, error, info, warn};
use wayfarer_engine::{ClockConfig, WorldClock};
use wayfarer_foundation::{EntityId, Error, Result};

use crate::game::Game;

enum Inbound {
    Join {
        name: String,
        outbox: Sender<String>,
        reply: Sender<Result<EntityId>>,
    },
    Line {
        actor: EntityId,
        line: String,
    },
    Leave {
        actor: EntityId,
    },
    Shutdown,
}

fn stopped() -> Error {
    Error::internal("world worker is not running")
}

// =============================================================================
// Server
// =============================================================================

/// Handle to a running world worker.
#[derive(Debug)]
pub struct Server {
    inbound: Sender<Inbound>,
    worker: Option<JoinHandle<Game>>,
}

impl Server {
    /// Starts the world worker.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid clock, or an internal
    /// error if the thread cannot be spawned.
    pub fn start(game: Game, clock: ClockConfig) -> Result<Self> {
        let clock = WorldClock::new(clock)?;
        let (inbound, receiver) = channel::unbounded();
        let frame_ms = u64::try_from(clock.config().frame.as_millis()).unwrap_or(u64::MAX);
        let time_scale = clock.config().time_scale;

        let worker = thread::Builder::new()
            .name("world".to_string())
            .spawn(move || {
                Worker {
                    game,
                    clock,
                    inbound: receiver,
                    players: HashSet::new(),
                    outboxes: HashMap::new(),
                }
                .run()
            })
            .map_err(|e| Error::internal(format!("cannot spawn world worker: {e}")))?;

        info!(frame_ms, time_scale, "world worker started");
        Ok(Self {
            inbound,
            worker: Some(worker),
        })
    }

    /// Joins the game as a new player.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped or cannot place the player.
    pub fn connect(&self, name: &str) -> Result<Client> {
        let (outbox, received) = channel::unbounded();
        let (reply, answer) = channel::bounded(1);
        self.inbound
            .send(Inbound::Join {
                name: name.to_string(),
                outbox,
                reply,
            })
            .map_err(|_| stopped())?;
        let actor = answer.recv().map_err(|_| stopped())??;
        Ok(Client {
            actor,
            inbound: self.inbound.clone(),
            outbox: received,
        })
    }

    /// Stops the worker and hands back the game.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the worker panicked.
    pub fn shutdown(mut self) -> Result<Game> {
        let worker = self.worker.take().ok_or_else(stopped)?;
        let _ = self.inbound.send(Inbound::Shutdown);
        worker
            .join()
            .map_err(|_| Error::internal("world worker panicked"))
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.inbound.send(Inbound::Shutdown);
            let _ = worker.join();
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// One player's connection to the world worker.
///
/// Dropping the client removes the player from the world.
#[derive(Debug)]
pub struct Client {
    actor: EntityId,
    inbound: Sender<Inbound>,
    outbox: Receiver<String>,
}

impl Client {
    /// The player's entity.
    #[must_use]
    pub const fn actor(&self) -> EntityId {
        self.actor
    }

    /// Sends a command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker has stopped.
    pub fn send(&self, line: &str) -> Result<()> {
        self.inbound
            .send(Inbound::Line {
                actor: self.actor,
                line: line.to_string(),
            })
            .map_err(|_| stopped())
    }

    /// Waits up to `timeout` for the next message.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<String> {
        self.outbox.recv_timeout(timeout).ok()
    }

    /// Takes every message already delivered.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.outbox.try_iter().collect()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        let _ = self.inbound.send(Inbound::Leave { actor: self.actor });
    }
}

// =============================================================================
// Worker
// =============================================================================

struct Worker {
    game: Game,
    clock: WorldClock,
    inbound: Receiver<Inbound>,
    players: HashSet<EntityId>,
    outboxes: HashMap<EntityId, Sender<String>>,
}

impl Worker {
    fn run(mut self) -> Game {
        loop {
            let started = Instant::now();
            let fired = self.clock.tick(&mut self.game);
            if fired > 0 {
                debug!(frame = self.clock.frames(), fired, "events fired");
            }
            self.deliver();

            // Whatever is already queued is handled even when the tick overran.
            loop {
                match self.inbound.try_recv() {
                    Ok(message) => {
                        if !self.receive(message) {
                            return self.stop();
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return self.stop(),
                }
            }

            while let Some(wait) = self.clock.remaining(started) {
                match self.inbound.recv_timeout(wait) {
                    Ok(message) => {
                        if !self.receive(message) {
                            return self.stop();
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => return self.stop(),
                }
            }
        }
    }

    fn stop(self) -> Game {
        info!(frames = self.clock.frames(), time = self.game.realm().now(), "world worker stopping");
        self.game
    }

    /// Handles one message. Returns false when the worker should stop.
    fn receive(&mut self, message: Inbound) -> bool {
        match message {
            Inbound::Join {
                name,
                outbox,
                reply,
            } => {
                let joined = self.game.spawn_player(&name);
                if let Ok(actor) = joined {
                    self.players.insert(actor);
                    self.outboxes.insert(actor, outbox);
                    self.game.handle(actor, "look");
                }
                let _ = reply.send(joined);
            }
            Inbound::Line { actor, line } => {
                if self.players.contains(&actor) {
                    self.game.handle(actor, &line);
                } else {
                    warn!(actor = %actor, "line from unknown player");
                }
            }
            Inbound::Leave { actor } => {
                self.outboxes.remove(&actor);
                if self.players.remove(&actor) {
                    if let Err(err) = self.game.remove_player(actor) {
                        error!(actor = %actor, error = %err, "cannot remove player");
                    }
                }
            }
            Inbound::Shutdown => return false,
        }
        self.deliver();
        true
    }

    /// Sends rendered alerts to connected players. Alerts for anyone else
    /// (creatures, merchants) are dropped. A closed outbox is forgotten; the
    /// player stays until their `Leave` arrives.
    fn deliver(&mut self) {
        for (target, text) in self.game.drain_output() {
            let gone = self
                .outboxes
                .get(&target)
                .is_some_and(|outbox| outbox.send(text).is_err());
            if gone {
                debug!(actor = %target, "outbox closed");
                self.outboxes.remove(&target);
            }
        }
    }
}
