//! Simulated multiplayer session.
//!
//! No transport: `connect` and `send` schedule deferred responses on a
//! virtual-clock timer queue, and `advance` delivers whatever came due
//! through the event bus. Latency is modelled with fixed and randomized delays.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use glam::Vec2;
use log::{debug, info, warn};

use crate::api::types::{Appearance, CharacterClass, CharacterData};
use crate::core::rng::Rng;
use crate::core::timers::TimerQueue;
use crate::error::NetError;
use crate::net::bus::EventBus;
use crate::net::link::NetworkLink;
use crate::net::messages::{ClientMessage, NetEvent, PlayerRecord};

/// Connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Simulated latencies, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkDelays {
    pub connect: f64,
    pub move_echo: f64,
    /// Ambient remote moves fire uniformly within this window.
    pub remote_move: (f64, f64),
    pub join_ack: f64,
    pub roster_sync: f64,
    /// Remote move jitter, per axis, in `[-jitter, jitter)`.
    pub jitter: f32,
}

impl Default for NetworkDelays {
    fn default() -> Self {
        Self {
            connect: 0.5,
            move_echo: 0.05,
            remote_move: (0.1, 0.3),
            join_ack: 0.2,
            roster_sync: 0.3,
            jitter: 10.0,
        }
    }
}

/// Deferred work waiting on the timer queue.
#[derive(Debug, Clone)]
enum Pending {
    Established,
    Fire(NetEvent),
    RemoteMove { player_id: String, x: f32, y: f32 },
    SyncRoster,
}

const ID_SPACE: u32 = 1_000_000;
const SPAWN_HALF_EXTENT: f32 = 500.0;

pub struct NetworkSim {
    state: ConnectionState,
    server_url: Option<String>,
    client_id: Option<String>,
    /// Remote players by identifier. Ordered so simulation runs are reproducible.
    roster: BTreeMap<String, PlayerRecord>,
    /// Every identifier handed out so far, local or synthesized.
    issued_ids: HashSet<String>,
    bus: Rc<EventBus<NetEvent>>,
    timers: TimerQueue<Pending>,
    rng: Rng,
    delays: NetworkDelays,
}

impl NetworkSim {
    pub fn new(seed: u64) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            server_url: None,
            client_id: None,
            roster: BTreeMap::new(),
            issued_ids: HashSet::new(),
            bus: Rc::new(EventBus::new()),
            timers: TimerQueue::new(),
            rng: Rng::new(seed),
            delays: NetworkDelays::default(),
        }
    }

    pub fn with_delays(mut self, delays: NetworkDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Number of deferred responses still in flight.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    // -- Roster --

    /// Insert or replace a roster entry. The local client never enters its own roster.
    pub fn add_player(&mut self, id: &str, record: PlayerRecord) -> bool {
        if self.client_id.as_deref() == Some(id) {
            warn!("Refusing to add local client {} to the roster", id);
            return false;
        }
        self.roster.insert(id.to_string(), record);
        true
    }

    /// Remove a roster entry, announcing it with `player_leave` if it existed.
    pub fn remove_player(&mut self, id: &str) -> Option<PlayerRecord> {
        let removed = self.roster.remove(id)?;
        self.publish(&NetEvent::PlayerLeave { player_id: id.to_string() });
        Some(removed)
    }

    pub fn get_player(&self, id: &str) -> Option<&PlayerRecord> {
        self.roster.get(id)
    }

    pub fn get_players(&self) -> Vec<&PlayerRecord> {
        self.roster.values().collect()
    }

    // -- Internals --

    fn publish(&self, event: &NetEvent) -> usize {
        self.bus.trigger(event.name(), event)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("player-{}", self.rng.next_int(ID_SPACE));
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn run(&mut self, task: Pending) {
        match task {
            Pending::Established => {
                self.state = ConnectionState::Connected;
                let client_id = self.client_id.clone().unwrap_or_default();
                info!("Connected to server with client ID: {}", client_id);
                self.publish(&NetEvent::Connect { client_id });
            }
            Pending::Fire(event) => {
                self.publish(&event);
            }
            Pending::RemoteMove { player_id, x, y } => {
                if let Some(record) = self.roster.get_mut(&player_id) {
                    record.x = x;
                    record.y = y;
                }
                self.publish(&NetEvent::PlayerMove { player_id, x, y });
            }
            Pending::SyncRoster => {
                let count = self.rng.next_int(3) + 1;
                for i in 0..count {
                    let id = self.fresh_id();
                    let record = PlayerRecord {
                        id: id.clone(),
                        name: format!("Player{}", i + 1),
                        x: self.rng.range(-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT),
                        y: self.rng.range(-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT),
                        character: CharacterData {
                            class: *self.rng.pick(&CharacterClass::ALL).unwrap_or(&CharacterClass::Warrior),
                            appearance: *self.rng.pick(&Appearance::ALL).unwrap_or(&Appearance::TypeA),
                        },
                    };
                    self.roster.insert(id, record.clone());
                    self.publish(&NetEvent::PlayerJoin(record));
                }
            }
        }
    }

    fn simulate_move(&mut self, x: f32, y: f32) {
        let client_id = self.client_id.clone().unwrap_or_default();
        self.timers.schedule(
            self.delays.move_echo,
            Pending::Fire(NetEvent::PlayerMove { player_id: client_id.clone(), x, y }),
        );

        let jitter = self.delays.jitter;
        let (lo, hi) = self.delays.remote_move;
        let others: Vec<(String, Vec2)> = self
            .roster
            .values()
            .filter(|p| p.id != client_id)
            .map(|p| (p.id.clone(), p.pos()))
            .collect();
        for (player_id, pos) in others {
            let x = pos.x + self.rng.range(-jitter, jitter);
            let y = pos.y + self.rng.range(-jitter, jitter);
            let delay = self.rng.range_f64(lo, hi);
            self.timers.schedule(delay, Pending::RemoteMove { player_id, x, y });
        }
    }

    fn simulate_join(&mut self, x: f32, y: f32, character: CharacterData) {
        let player_id = self.client_id.clone().unwrap_or_default();
        self.timers.schedule(self.delays.roster_sync, Pending::SyncRoster);
        self.timers.schedule(
            self.delays.join_ack,
            Pending::Fire(NetEvent::JoinSuccess {
                player_id,
                position: Vec2::new(x, y),
                character,
            }),
        );
    }
}

impl NetworkLink for NetworkSim {
    fn connect(&mut self, url: &str) -> Result<(), NetError> {
        match self.state {
            ConnectionState::Connected => {
                warn!("Already connected to server");
                return Err(NetError::AlreadyConnected);
            }
            ConnectionState::Connecting => {
                warn!("Connection to {} already in progress", self.server_url.as_deref().unwrap_or("?"));
                return Err(NetError::AlreadyConnecting);
            }
            ConnectionState::Disconnected => {}
        }
        if url.trim().is_empty() {
            warn!("Failed to connect to server: empty URL");
            self.publish(&NetEvent::Error { message: "Connection failed".to_string() });
            return Err(NetError::InvalidUrl);
        }

        info!("Attempting to connect to server at {}", url);
        self.server_url = Some(url.to_string());
        self.client_id = Some(self.fresh_id());
        self.state = ConnectionState::Connecting;
        self.timers.schedule(self.delays.connect, Pending::Established);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), NetError> {
        if self.state == ConnectionState::Disconnected {
            warn!("Not connected to any server");
            return Err(NetError::NotConnectedToAny);
        }
        info!("Disconnecting from server");
        self.state = ConnectionState::Disconnected;
        let cancelled = self.timers.len();
        self.timers.clear();
        if cancelled > 0 {
            debug!("Cancelled {} in-flight network responses", cancelled);
        }
        self.publish(&NetEvent::Disconnect);
        self.roster.clear();
        self.client_id = None;
        Ok(())
    }

    fn send(&mut self, msg: ClientMessage) -> Result<(), NetError> {
        if self.state != ConnectionState::Connected {
            warn!("Cannot send {}: not connected to server", msg.name());
            return Err(NetError::NotConnected(msg.name().to_string()));
        }
        debug!("Sending to server: {:?}", msg);

        match msg {
            ClientMessage::PlayerMove { x, y } => self.simulate_move(x, y),
            ClientMessage::JoinGame { x, y, character } => self.simulate_join(x, y, character),
            ClientMessage::Other { .. } => {}
        }
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    fn bus(&self) -> Rc<EventBus<NetEvent>> {
        self.bus.clone()
    }

    fn advance(&mut self, dt: f64) -> usize {
        let due = self.timers.advance(dt);
        let fired = due.len();
        for task in due {
            self.run(task);
        }
        fired
    }
}
