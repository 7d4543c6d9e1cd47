//! Session coordinator.
//!
//! `Game` owns the world, the entity set, the frame scheduler and the network
//! link, and is passed explicitly into every update. Network events never
//! touch the session directly: bus handlers push them into an inbox that the
//! coordinator drains once per updated frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use log::{debug, info, warn};

use crate::api::config::GameConfig;
use crate::api::hooks::{NoopHooks, SessionHooks};
use crate::api::types::{Appearance, CharacterClass, EntityId};
use crate::components::entity::Entity;
use crate::components::player::PlayerComponent;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::scheduler::FrameScheduler;
use crate::error::SessionError;
use crate::input::queue::{InputEvent, InputProvider, InputQueue, InputState, KeyCode, NullInput};
use crate::net::bus::EventBus;
use crate::net::link::{NetworkLink, OfflineLink};
use crate::net::messages::{ClientMessage, NetEvent, PlayerRecord, ALL_EVENTS};
use crate::net::sim::{ConnectionState, NetworkSim};
use crate::persistence::character::{self, create_character};
use crate::persistence::store::KeyValueStore;
use crate::renderer::sink::RenderSink;
use crate::systems::movement::{update_entity, UpdateContext};
use crate::systems::render::render_entities;
use crate::world::obstacle::generate_obstacles;
use crate::world::World;

type Inbox = Rc<RefCell<VecDeque<NetEvent>>>;

/// Salt so the network and the world never share a random stream.
const NETWORK_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

const REMOTE_TAG: &str = "remote";

/// Kind of the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    SinglePlayer,
    Multiplayer { is_host: bool },
}

/// What one frame did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// `false` for frames the scheduler gated off (paused or stopped).
    pub updated: bool,
    /// Deferred network responses delivered this frame.
    pub network_events: usize,
    /// Entities whose update failed and were skipped.
    pub entity_failures: usize,
    pub obstacles_drawn: usize,
    pub entities_drawn: usize,
}

pub struct Game {
    config: GameConfig,
    world: World,
    scene: Scene,
    scheduler: FrameScheduler,
    network: Box<dyn NetworkLink>,
    inbox: Inbox,
    hooks: Box<dyn SessionHooks>,
    input_queue: InputQueue,
    input_state: InputState,
    session: Option<SessionMode>,
    local_player: Option<EntityId>,
    next_id: u32,
}

fn wire_inbox(bus: &EventBus<NetEvent>, inbox: &Inbox) {
    for name in ALL_EVENTS {
        let inbox = inbox.clone();
        bus.subscribe(name, move |event: &NetEvent| inbox.borrow_mut().push_back(event.clone()));
    }
}

impl Game {
    /// Build a session from config: obstacles are generated from `config.seed`
    /// and each disabled subsystem gets its no-op stand-in.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let obstacles = generate_obstacles(&mut rng, &config.obstacle_layout());
        let mut world = World::new(config.viewport_width, config.viewport_height).with_obstacles(obstacles);
        world.camera_mut().set_smoothing(config.camera_smoothing);

        let network: Box<dyn NetworkLink> = if config.subsystems.network {
            Box::new(NetworkSim::new(config.seed ^ NETWORK_SEED_SALT))
        } else {
            Box::new(OfflineLink::new())
        };
        let inbox: Inbox = Rc::default();
        wire_inbox(&network.bus(), &inbox);

        info!(
            "World created: {} obstacles, viewport {}x{}",
            world.obstacles().len(),
            config.viewport_width,
            config.viewport_height
        );

        Self {
            scheduler: FrameScheduler::new(config.frame_dt_cap()),
            config,
            world,
            scene: Scene::new(),
            network,
            inbox,
            hooks: Box::new(NoopHooks),
            input_queue: InputQueue::new(),
            input_state: InputState::new(),
            session: None,
            local_player: None,
            next_id: 1,
        }
    }

    /// Install UI hooks. Ignored when the UI subsystem is disabled.
    pub fn with_hooks(mut self, hooks: Box<dyn SessionHooks>) -> Self {
        if self.config.subsystems.ui {
            self.hooks = hooks;
        } else {
            debug!("UI disabled, keeping no-op hooks");
        }
        self
    }

    /// Replace the network link. Events from the old link are dropped.
    pub fn with_network(mut self, network: Box<dyn NetworkLink>) -> Self {
        self.inbox = Rc::default();
        wire_inbox(&network.bus(), &self.inbox);
        self.network = network;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// New player entity at the origin, moving at the configured speed.
    pub fn create_character(&mut self, name: &str, class: CharacterClass, appearance: Appearance) -> Entity {
        let id = self.next_id();
        create_character(id, name, class, appearance, self.config.player_speed)
    }

    /// Add an entity to the running session. Only a session start may create
    /// the local player, so a spawned entity never keeps the local flag.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        if let Some(player) = entity.player.as_mut().filter(|p| p.is_local) {
            warn!("Spawned entity {:?} cannot be the local player; clearing the flag", entity.id);
            player.is_local = false;
        }
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    // -- Session lifecycle --

    /// Start a single-player session with `player` as the local player.
    /// Any active session ends first. Returns the id the player was spawned with.
    pub fn start_single_player(&mut self, player: Entity) -> EntityId {
        self.start_session(player, SessionMode::SinglePlayer)
    }

    /// Start a multiplayer session and begin connecting to `config.server_url`.
    /// A rejected connection is logged; the session still runs locally.
    pub fn start_multiplayer(&mut self, player: Entity, is_host: bool) -> EntityId {
        let id = self.start_session(player, SessionMode::Multiplayer { is_host });
        let url = self.config.server_url.clone();
        if let Err(err) = self.network.connect(&url) {
            warn!("Multiplayer connection not started: {}", err);
        }
        id
    }

    fn start_session(&mut self, mut player: Entity, mode: SessionMode) -> EntityId {
        if self.session.is_some() {
            info!("Ending previous session before starting a new one");
            let _ = self.end_session();
        }

        player.id = self.next_id();
        let speed = self.config.player_speed;
        let local = player
            .player
            .get_or_insert_with(|| PlayerComponent::default().with_speed(speed));
        local.is_local = true;
        local.network_id = None;

        let multiplayer = matches!(mode, SessionMode::Multiplayer { .. });
        info!(
            "Starting {} game for {}",
            if multiplayer { "multiplayer" } else { "single-player" },
            local.name
        );

        self.world.camera_mut().look_at(player.pos);
        let id = player.id;
        self.scene.spawn(player);
        self.local_player = Some(id);
        self.session = Some(mode);
        self.input_state.release_all();
        self.scheduler.start();
        self.hooks.on_game_start(multiplayer);
        id
    }

    /// Gate updates off. Entities, camera and network timers freeze.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.session.is_none() {
            return Err(SessionError::NoActiveSession);
        }
        if !self.scheduler.pause() {
            warn!("Pause ignored: session is already paused");
            return Err(SessionError::AlreadyPaused);
        }
        info!("Game paused");
        self.hooks.on_pause();
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.session.is_none() {
            return Err(SessionError::NoActiveSession);
        }
        if !self.scheduler.resume() {
            warn!("Resume ignored: session is not paused");
            return Err(SessionError::NotPaused);
        }
        info!("Game resumed");
        self.hooks.on_resume();
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), SessionError> {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Stop the loop, drop the connection and every entity.
    pub fn end_session(&mut self) -> Result<(), SessionError> {
        if self.session.take().is_none() {
            return Err(SessionError::NoActiveSession);
        }
        self.scheduler.stop();
        if self.network.state() != ConnectionState::Disconnected {
            if let Err(err) = self.network.disconnect() {
                warn!("Disconnect on session end failed: {}", err);
            }
        }
        self.inbox.borrow_mut().clear();
        self.scene.clear();
        self.local_player = None;
        self.input_state.release_all();
        info!("Session ended");
        self.hooks.on_session_end();
        Ok(())
    }

    // -- Input --

    pub fn push_input(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.push_input(InputEvent::KeyDown(key));
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.push_input(InputEvent::KeyUp(key));
    }

    /// Drain queued input into the held-key state. Escape toggles pause.
    pub fn process_input(&mut self) {
        for event in self.input_queue.drain() {
            if !self.config.subsystems.input {
                continue;
            }
            if event == InputEvent::KeyDown(KeyCode::Escape) && self.session.is_some() {
                let _ = self.toggle_pause();
            }
            self.input_state.apply(event);
        }
    }

    // -- Frame --

    /// Entry point for each platform frame callback.
    /// Paused or stopped frames do no update or render work.
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn RenderSink) -> FrameReport {
        self.process_input();
        let Some(dt) = self.scheduler.frame(now_ms) else {
            return FrameReport::default();
        };
        let mut report = self.update(dt);
        let (obstacles, entities) = self.render(sink);
        report.obstacles_drawn = obstacles;
        report.entities_drawn = entities;
        report
    }

    /// Simulate one step of `dt` seconds: network delivery, camera follow,
    /// then every entity in insertion order. Bypasses the frame clock and its clamp,
    /// but does nothing unless a session is running.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        if !self.is_running() {
            return FrameReport::default();
        }
        let mut report = FrameReport {
            updated: true,
            network_events: self.network.advance(f64::from(dt)),
            ..FrameReport::default()
        };
        self.apply_network_events();

        let tracked = self.local_player().map(|e| e.pos);
        self.world.update(dt, tracked);

        let input: &dyn InputProvider = if self.config.subsystems.input {
            &self.input_state
        } else {
            &NullInput
        };
        let mut ctx = UpdateContext {
            world: &self.world,
            input,
            network: self.network.as_mut(),
        };
        for entity in self.scene.iter_mut() {
            if let Err(err) = update_entity(entity, dt, &mut ctx) {
                warn!("Skipping entity update: {}", err);
                report.entity_failures += 1;
            }
        }
        report
    }

    /// Draw the world, then every entity. Returns `(obstacles, entities)` drawn.
    pub fn render(&self, sink: &mut dyn RenderSink) -> (usize, usize) {
        let obstacles = self.world.render(sink);
        let entities = render_entities(self.scene.iter(), &self.world, sink);
        (obstacles, entities)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        debug!("Viewport resized to {}x{}", width, height);
        self.world.resize(width, height);
    }

    // -- Network events --

    fn apply_network_events(&mut self) {
        let events: Vec<NetEvent> = self.inbox.borrow_mut().drain(..).collect();
        for event in events {
            self.apply_network_event(event);
        }
    }

    fn apply_network_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::Connect { client_id } => self.on_connected(client_id),
            NetEvent::JoinSuccess { player_id, .. } => info!("Joined game as {}", player_id),
            NetEvent::PlayerJoin(record) => self.on_player_join(record),
            NetEvent::PlayerMove { player_id, x, y } => {
                match self.scene.find_by_network_id_mut(&player_id) {
                    Some(entity) if !entity.is_local_player() => entity.pos = Vec2::new(x, y),
                    Some(_) => {}
                    None => debug!("Move for unknown player {}", player_id),
                }
            }
            NetEvent::PlayerLeave { player_id } => {
                let removed = self
                    .scene
                    .despawn_where(|e| !e.is_local_player() && e.network_id() == Some(player_id.as_str()));
                if removed > 0 {
                    info!("Player left: {}", player_id);
                }
            }
            NetEvent::Disconnect => {
                let removed = self.scene.despawn_where(is_remote_player);
                if let Some(local) = self.local_player_mut().and_then(|e| e.player.as_mut()) {
                    local.network_id = None;
                }
                info!("Disconnected, removed {} remote players", removed);
            }
            NetEvent::Error { message } => {
                warn!("Network error: {}", message);
                self.hooks.on_message(&message);
            }
        }
    }

    fn on_connected(&mut self, client_id: String) {
        self.hooks.on_message("Connected to multiplayer server!");
        let Some(entity) = self.local_player.and_then(|id| self.scene.get_mut(id)) else {
            return;
        };
        let Some(player) = entity.player.as_mut() else {
            return;
        };
        player.network_id = Some(client_id);
        let join = ClientMessage::JoinGame {
            x: entity.pos.x,
            y: entity.pos.y,
            character: player.character(),
        };
        if let Err(err) = self.network.send(join) {
            warn!("Could not join game: {}", err);
        }
    }

    fn on_player_join(&mut self, record: PlayerRecord) {
        if self.local_player().and_then(Entity::network_id) == Some(record.id.as_str()) {
            return;
        }
        if let Some(existing) = self.scene.find_by_network_id_mut(&record.id) {
            existing.pos = record.pos();
            return;
        }
        info!("Player joined: {} ({})", record.name, record.id);
        let id = self.next_id();
        let mut remote = create_character(
            id,
            &record.name,
            record.character.class,
            record.character.appearance,
            self.config.player_speed,
        )
        .with_tag(REMOTE_TAG)
        .with_pos(record.pos());
        if let Some(player) = remote.player.as_mut() {
            player.network_id = Some(record.id);
        }
        self.scene.spawn(remote);
    }

    // -- Persistence --

    /// Save the local player under the character key.
    pub fn save_character(&self, store: &mut dyn KeyValueStore) -> bool {
        match self.local_player() {
            Some(entity) => character::save_character(store, entity),
            None => {
                warn!("No local player to save");
                false
            }
        }
    }

    /// Rebuild the saved character with a fresh id. Does not start a session.
    pub fn load_character(&mut self, store: &dyn KeyValueStore) -> Option<Entity> {
        let id = self.next_id();
        character::load_character(store, id, self.config.player_speed)
    }

    // -- Accessors --

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn local_player_id(&self) -> Option<EntityId> {
        self.local_player
    }

    pub fn local_player(&self) -> Option<&Entity> {
        self.local_player.and_then(|id| self.scene.get(id))
    }

    fn local_player_mut(&mut self) -> Option<&mut Entity> {
        self.local_player.and_then(|id| self.scene.get_mut(id))
    }

    pub fn network(&self) -> &dyn NetworkLink {
        self.network.as_ref()
    }

    pub fn network_mut(&mut self) -> &mut dyn NetworkLink {
        self.network.as_mut()
    }

    pub fn session(&self) -> Option<SessionMode> {
        self.session
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Active and not paused.
    pub fn is_running(&self) -> bool {
        self.session.is_some() && self.scheduler.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_some() && !self.scheduler.is_running()
    }

    pub fn is_multiplayer(&self) -> bool {
        matches!(self.session, Some(SessionMode::Multiplayer { .. }))
    }

    pub fn is_host(&self) -> bool {
        matches!(self.session, Some(SessionMode::Multiplayer { is_host: true }))
    }
}

fn is_remote_player(entity: &Entity) -> bool {
    entity.player.as_ref().is_some_and(|p| !p.is_local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::Subsystems;
    use crate::error::NetError;
    use crate::net::messages::EVENT_PLAYER_LEAVE;
    use crate::persistence::store::MemoryStore;
    use crate::renderer::draw_list::DrawList;
    use crate::renderer::sink::NullSink;
    use crate::world::obstacle::{Obstacle, ObstacleKind};

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl SessionHooks for Recorder {
        fn on_game_start(&mut self, multiplayer: bool) {
            self.0.borrow_mut().push(format!("start:{multiplayer}"));
        }
        fn on_pause(&mut self) {
            self.0.borrow_mut().push("pause".into());
        }
        fn on_resume(&mut self) {
            self.0.borrow_mut().push("resume".into());
        }
        fn on_session_end(&mut self) {
            self.0.borrow_mut().push("end".into());
        }
        fn on_message(&mut self, text: &str) {
            self.0.borrow_mut().push(format!("msg:{text}"));
        }
    }

    fn empty_world() -> GameConfig {
        GameConfig {
            obstacle_count: 0,
            ..GameConfig::default()
        }
    }

    fn hero(game: &mut Game) -> Entity {
        game.create_character("Hero", CharacterClass::Warrior, Appearance::TypeA)
    }

    /// Run `count` frames `step_ms` apart starting at `start_ms`. Returns the next timestamp.
    fn run_frames(game: &mut Game, sink: &mut dyn RenderSink, start_ms: f64, count: usize, step_ms: f64) -> f64 {
        let mut now = start_ms;
        for _ in 0..count {
            game.frame(now, sink);
            now += step_ms;
        }
        now
    }

    fn remote_players(game: &Game) -> Vec<&Entity> {
        game.scene().iter().filter(|e| is_remote_player(e)).collect()
    }

    #[test]
    fn generates_configured_obstacles() {
        let game = Game::new(GameConfig::default());
        assert_eq!(game.world().obstacles().len(), 50);
        assert!(!game.has_session());
    }

    #[test]
    fn holding_right_for_one_second() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let id = game.start_single_player(player);

        game.key_down(KeyCode::ArrowRight);
        game.process_input();
        let report = game.update(1.0);

        assert_eq!(report.entity_failures, 0);
        assert_eq!(game.scene().get(id).unwrap().pos, Vec2::new(200.0, 0.0));
    }

    #[test]
    fn blocked_move_is_fully_reverted() {
        let mut game = Game::new(empty_world());
        game.world.add_obstacle(Obstacle::new(ObstacleKind::Rock, Vec2::new(110.0, 100.0)));
        let player = hero(&mut game).with_pos(Vec2::new(100.0, 100.0));
        let id = game.start_single_player(player);

        game.key_down(KeyCode::KeyD);
        game.process_input();
        for dt in [0.01, 0.05, 0.1] {
            game.update(dt);
            assert_eq!(game.scene().get(id).unwrap().pos, Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn capped_frames_cannot_step_over_a_rock() {
        // Rock spans x 40..60; the 30-wide player needs a 60-unit step to clear it.
        let rock = || Obstacle::new(ObstacleKind::Rock, Vec2::new(40.0, 0.0));

        let mut direct = Game::new(empty_world());
        direct.world.add_obstacle(rock());
        let player = hero(&mut direct);
        let id = direct.start_single_player(player);
        direct.key_down(KeyCode::KeyD);
        direct.process_input();
        direct.update(0.5);
        assert_eq!(direct.scene().get(id).unwrap().pos, Vec2::new(100.0, 0.0));

        let mut framed = Game::new(empty_world());
        framed.world.add_obstacle(rock());
        let player = hero(&mut framed);
        let id = framed.start_single_player(player);
        let mut sink = NullSink;
        framed.key_down(KeyCode::KeyD);
        framed.frame(0.0, &mut sink);
        for i in 1..=5 {
            let report = framed.frame(f64::from(i) * 500.0, &mut sink);
            assert!(report.updated);
            assert_eq!(framed.scene().get(id).unwrap().pos, Vec2::ZERO);
        }
    }

    #[test]
    fn spawned_entity_never_becomes_a_second_local_player() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let local = game.start_single_player(player);

        let mut impostor = hero(&mut game);
        if let Some(p) = impostor.player.as_mut() {
            p.is_local = true;
        }
        let other = game.spawn(impostor);

        assert_eq!(game.scene().local_player_count(), 1);
        assert!(!game.scene().get(other).unwrap().is_local_player());
        assert_eq!(game.local_player_id(), Some(local));
    }

    #[test]
    fn update_does_nothing_while_paused() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let id = game.start_multiplayer(player, false);
        game.key_down(KeyCode::KeyD);
        game.process_input();
        game.pause().unwrap();

        let report = game.update(1.0);
        assert_eq!(report, FrameReport::default());
        assert_eq!(game.scene().get(id).unwrap().pos, Vec2::ZERO);
        assert_eq!(game.network().state(), ConnectionState::Connecting);

        game.end_session().unwrap();
        assert!(!game.update(1.0).updated);
    }

    #[test]
    fn frame_clamps_long_gaps() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let id = game.start_single_player(player);
        let mut sink = DrawList::new();

        game.key_down(KeyCode::ArrowRight);
        game.frame(0.0, &mut sink);
        game.frame(5000.0, &mut sink);

        let x = game.scene().get(id).unwrap().pos.x;
        assert!((x - 200.0 * 0.1).abs() < 1e-3, "x = {x}");
    }

    #[test]
    fn frame_renders_world_and_entities() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        game.start_single_player(player);
        let mut sink = DrawList::new();

        let report = game.frame(0.0, &mut sink);
        assert!(report.updated);
        assert_eq!(report.entities_drawn, 1);
        assert_eq!(sink.texts().collect::<Vec<_>>(), vec!["Hero"]);
    }

    #[test]
    fn nothing_runs_before_start() {
        let mut game = Game::new(GameConfig::default());
        let mut sink = DrawList::new();
        assert_eq!(game.frame(16.0, &mut sink), FrameReport::default());
        assert!(sink.is_empty());
        assert_eq!(game.pause(), Err(SessionError::NoActiveSession));
        assert_eq!(game.end_session(), Err(SessionError::NoActiveSession));
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let id = game.start_single_player(player);
        let mut sink = DrawList::new();

        game.key_down(KeyCode::ArrowDown);
        let now = run_frames(&mut game, &mut sink, 0.0, 5, 16.0);
        assert_eq!(game.pause(), Ok(()));

        let pos = game.scene().get(id).unwrap().pos;
        let camera = game.world().camera().center;

        assert_eq!(game.pause(), Err(SessionError::AlreadyPaused));
        let now = run_frames(&mut game, &mut sink, now, 10, 16.0);
        assert!(game.is_paused());
        assert_eq!(game.scene().get(id).unwrap().pos, pos);
        assert_eq!(game.world().camera().center, camera);

        assert_eq!(game.resume(), Ok(()));
        assert_eq!(game.resume(), Err(SessionError::NotPaused));
        assert_eq!(game.scene().get(id).unwrap().pos, pos);

        // the paused gap is not replayed
        game.frame(now, &mut sink);
        let moved = game.scene().get(id).unwrap().pos.y - pos.y;
        assert!(moved > 0.0 && moved < 200.0 * 0.02, "moved {moved}");
    }

    #[test]
    fn escape_toggles_pause() {
        let hooks = Recorder::default();
        let mut game = Game::new(empty_world()).with_hooks(Box::new(hooks.clone()));
        let player = hero(&mut game);
        game.start_single_player(player);
        let mut sink = DrawList::new();

        game.key_down(KeyCode::Escape);
        game.key_up(KeyCode::Escape);
        let report = game.frame(0.0, &mut sink);
        assert!(!report.updated);
        assert!(game.is_paused());

        game.key_down(KeyCode::Escape);
        let report = game.frame(16.0, &mut sink);
        assert!(report.updated);
        assert!(game.is_running());
        assert_eq!(*hooks.0.borrow(), vec!["start:false", "pause", "resume"]);
    }

    #[test]
    fn failing_entity_does_not_stop_the_frame() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        game.start_single_player(player);

        let broken = game.next_id();
        game.spawn(Entity::new(broken).with_velocity(Vec2::new(f32::NAN, 0.0)));
        let mover = game.next_id();
        game.spawn(Entity::new(mover).with_velocity(Vec2::new(10.0, 0.0)));

        let report = game.update(1.0);
        assert_eq!(report.entity_failures, 1);
        assert_eq!(game.scene().get(broken).unwrap().pos, Vec2::ZERO);
        assert_eq!(game.scene().get(mover).unwrap().pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn new_session_replaces_the_old_one() {
        let hooks = Recorder::default();
        let mut game = Game::new(empty_world()).with_hooks(Box::new(hooks.clone()));
        let first = hero(&mut game);
        game.start_single_player(first);
        let second = hero(&mut game);
        game.start_multiplayer(second, true);

        assert_eq!(game.scene().local_player_count(), 1);
        assert_eq!(game.scene().len(), 1);
        assert!(game.is_multiplayer());
        assert!(game.is_host());
        assert_eq!(*hooks.0.borrow(), vec!["start:false", "end", "start:true"]);
    }

    #[test]
    fn plain_entity_becomes_local_player() {
        let mut game = Game::new(empty_world());
        let id = game.start_single_player(Entity::new(EntityId(77)));
        let entity = game.local_player().unwrap();
        assert_eq!(entity.id, id);
        assert!(entity.is_local_player());
        assert_eq!(entity.player.as_ref().unwrap().speed, 200.0);
    }

    #[test]
    fn multiplayer_session_end_to_end() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        let local = game.start_multiplayer(player, false);
        let mut sink = DrawList::new();

        assert_eq!(game.network().state(), ConnectionState::Connecting);
        let now = run_frames(&mut game, &mut sink, 0.0, 40, 50.0);

        let client_id = game.network().client_id().unwrap().to_string();
        let me = game.scene().get(local).unwrap();
        assert_eq!(me.network_id(), Some(client_id.as_str()));

        let remotes = remote_players(&game);
        assert!((1..=3).contains(&remotes.len()), "got {} remotes", remotes.len());
        for r in &remotes {
            let nid = r.network_id().unwrap();
            assert_ne!(nid, client_id);
            assert_eq!(r.tag, REMOTE_TAG);
        }
        let remote_count = remotes.len();

        // local moves echo back without spawning anyone
        game.key_down(KeyCode::ArrowRight);
        run_frames(&mut game, &mut sink, now, 20, 50.0);
        assert_eq!(remote_players(&game).len(), remote_count);
        assert_eq!(game.scene().local_player_count(), 1);
        assert!(game.scene().get(local).unwrap().pos.x > 0.0);

        assert_eq!(game.end_session(), Ok(()));
        assert!(game.scene().is_empty());
        assert_eq!(game.network().state(), ConnectionState::Disconnected);
        assert!(!game.is_multiplayer());
    }

    #[test]
    fn network_events_mutate_the_roster() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        game.start_multiplayer(player, false);
        let mut sink = DrawList::new();
        let now = run_frames(&mut game, &mut sink, 0.0, 40, 50.0);

        let gone = remote_players(&game)[0].network_id().unwrap().to_string();
        let before = remote_players(&game).len();
        game.network()
            .bus()
            .trigger(EVENT_PLAYER_LEAVE, &NetEvent::PlayerLeave { player_id: gone.clone() });
        let now = run_frames(&mut game, &mut sink, now, 1, 16.0);
        assert_eq!(remote_players(&game).len(), before - 1);
        assert!(game.scene().find_by_network_id(&gone).is_none());

        game.network_mut().disconnect().unwrap();
        run_frames(&mut game, &mut sink, now, 1, 16.0);
        assert!(remote_players(&game).is_empty());
        assert_eq!(game.scene().local_player_count(), 1);
        assert_eq!(game.local_player().unwrap().network_id(), None);
    }

    #[test]
    fn network_timers_freeze_while_paused() {
        let mut game = Game::new(empty_world());
        let player = hero(&mut game);
        game.start_multiplayer(player, false);
        let mut sink = NullSink;

        let now = run_frames(&mut game, &mut sink, 0.0, 5, 50.0);
        game.pause().unwrap();
        let now = run_frames(&mut game, &mut sink, now, 100, 50.0);
        assert_eq!(game.network().state(), ConnectionState::Connecting);

        game.resume().unwrap();
        run_frames(&mut game, &mut sink, now, 20, 50.0);
        assert_eq!(game.network().state(), ConnectionState::Connected);
    }

    #[test]
    fn disabled_subsystems_use_stand_ins() {
        let hooks = Recorder::default();
        let config = GameConfig {
            subsystems: Subsystems { input: false, ui: false, network: false },
            ..empty_world()
        };
        let mut game = Game::new(config).with_hooks(Box::new(hooks.clone()));
        let player = hero(&mut game);
        let id = game.start_multiplayer(player, false);

        assert!(game.is_multiplayer());
        assert_eq!(game.network_mut().connect("sim://x"), Err(NetError::Disabled));

        game.key_down(KeyCode::ArrowRight);
        game.key_down(KeyCode::Escape);
        let mut sink = DrawList::new();
        run_frames(&mut game, &mut sink, 0.0, 10, 16.0);

        assert!(game.is_running());
        assert_eq!(game.scene().get(id).unwrap().pos, Vec2::ZERO);
        assert!(hooks.0.borrow().is_empty());
    }

    #[test]
    fn resize_reaches_the_camera() {
        let mut game = Game::new(GameConfig::default());
        game.resize(1024.0, 768.0);
        assert_eq!(game.world().camera().viewport, Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn save_and_load_local_player() {
        let mut game = Game::new(empty_world());
        let mut store = MemoryStore::new();
        assert!(!game.save_character(&mut store));

        let player = game
            .create_character("Ada", CharacterClass::Mage, Appearance::TypeC)
            .with_pos(Vec2::new(5.0, 6.0));
        game.start_single_player(player);
        assert!(game.save_character(&mut store));

        let loaded = game.load_character(&store).unwrap();
        assert_eq!(loaded.pos, Vec2::new(5.0, 6.0));
        let p = loaded.player.unwrap();
        assert_eq!((p.name.as_str(), p.class, p.appearance), ("Ada", CharacterClass::Mage, Appearance::TypeC));
        assert!(!p.is_local);
    }
}
