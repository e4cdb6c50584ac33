//! Player runtime - the single event loop
//!
//! One tokio task owns the [`VideoPlayer`] and applies events in arrival
//! order, so player state needs no locking. Hosts talk to it through a
//! [`PlayerHandle`] and the listeners acquired on mount; after unmount every
//! send fails with [`Error::Unmounted`].

use crate::{
    backend::{Decoder, DeviceScreen},
    event::PlayerEvent,
    player::{PlayerSnapshot, VideoPlayer},
    types::{BackAction, Dimensions},
    Error, Result,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Capacity of the event queue
const EVENT_QUEUE_DEPTH: usize = 256;

type Reply = oneshot::Sender<Result<Option<BackAction>>>;

enum Message {
    Event {
        event: PlayerEvent,
        reply: Option<Reply>,
    },
    Unmount,
}

/// Cloneable handle for posting events to a mounted player
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<Message>,
    snapshot_rx: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    /// Queue an event without waiting for it to be applied
    pub async fn post(&self, event: PlayerEvent) -> Result<()> {
        self.tx
            .send(Message::Event { event, reply: None })
            .await
            .map_err(|_| Error::Unmounted)
    }

    /// Apply an event and wait for the outcome
    pub async fn dispatch(&self, event: PlayerEvent) -> Result<Option<BackAction>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Message::Event {
                event,
                reply: Some(reply),
            })
            .await
            .map_err(|_| Error::Unmounted)?;
        rx.await.map_err(|_| Error::Unmounted)?
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshots published after each event
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Connectivity monitor registration
#[derive(Debug, Clone)]
pub struct ConnectivityListener {
    handle: PlayerHandle,
}

impl ConnectivityListener {
    /// Report reachability; returns once the player has applied it
    pub async fn notify(&self, connected: bool) -> Result<()> {
        self.handle
            .dispatch(PlayerEvent::ConnectivityChanged { connected })
            .await
            .map(|_| ())
    }
}

/// Window dimension change registration
#[derive(Debug, Clone)]
pub struct DimensionsListener {
    handle: PlayerHandle,
}

impl DimensionsListener {
    pub async fn notify(&self, dimensions: Dimensions) -> Result<()> {
        self.handle
            .dispatch(PlayerEvent::DimensionsChanged { dimensions })
            .await
            .map(|_| ())
    }
}

/// Hardware back registration
#[derive(Debug, Clone)]
pub struct BackListener {
    handle: PlayerHandle,
}

impl BackListener {
    /// Ask the player whether it handles the press. An unmounted player
    /// always lets the host navigate.
    pub async fn press(&self) -> BackAction {
        match self.handle.dispatch(PlayerEvent::HardwareBack).await {
            Ok(Some(action)) => action,
            Ok(None) | Err(_) => BackAction::Propagate,
        }
    }
}

/// Listeners acquired on mount
#[derive(Debug, Clone)]
pub struct Listeners {
    pub connectivity: ConnectivityListener,
    pub dimensions: DimensionsListener,
    pub back: BackListener,
}

/// A player running on its own task
pub struct MountedPlayer<D: Decoder + 'static, S: DeviceScreen + 'static> {
    handle: PlayerHandle,
    listeners: Listeners,
    task: JoinHandle<VideoPlayer<D, S>>,
}

impl<D: Decoder + 'static, S: DeviceScreen + 'static> MountedPlayer<D, S> {
    /// Spawn the event loop for `player`
    pub fn spawn(player: VideoPlayer<D, S>) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (snapshot_tx, snapshot_rx) = watch::channel(player.snapshot());

        let handle = PlayerHandle { tx, snapshot_rx };
        let listeners = Listeners {
            connectivity: ConnectivityListener {
                handle: handle.clone(),
            },
            dimensions: DimensionsListener {
                handle: handle.clone(),
            },
            back: BackListener {
                handle: handle.clone(),
            },
        };

        info!(session_id = %player.id(), "Player runtime started");
        let task = tokio::spawn(run(player, rx, snapshot_tx));

        Self {
            handle,
            listeners,
            task,
        }
    }

    pub fn handle(&self) -> PlayerHandle {
        self.handle.clone()
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Stop the loop and release the listeners. Events queued before the
    /// call are still applied. Returns the player for inspection.
    pub async fn unmount(self) -> Result<VideoPlayer<D, S>> {
        // A closed queue means the loop already stopped; the join reports why
        let _ = self.handle.tx.send(Message::Unmount).await;
        let player = self
            .task
            .await
            .map_err(|e| Error::Runtime(e.to_string()))?;
        info!(session_id = %player.id(), "Player runtime stopped");
        Ok(player)
    }
}

#[instrument(skip_all, fields(session_id = %player.id()))]
async fn run<D: Decoder, S: DeviceScreen>(
    mut player: VideoPlayer<D, S>,
    mut rx: mpsc::Receiver<Message>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
) -> VideoPlayer<D, S> {
    while let Some(message) = rx.recv().await {
        match message {
            Message::Event { event, reply } => {
                let name = event.name();
                let outcome = player.dispatch(event);
                if let Err(ref e) = outcome {
                    warn!(event = name, error = %e, "Event rejected");
                }
                snapshot_tx.send_replace(player.snapshot());
                if let Some(reply) = reply {
                    // Caller stopped waiting; nothing to report to
                    let _ = reply.send(outcome);
                }
            }
            Message::Unmount => {
                debug!("Unmount requested");
                break;
            }
        }
    }

    // Dropping the receiver releases every listener
    rx.close();
    player
}
