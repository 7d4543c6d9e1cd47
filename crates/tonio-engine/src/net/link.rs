use std::rc::Rc;

use log::warn;

use crate::error::NetError;
use crate::net::bus::EventBus;
use crate::net::messages::{ClientMessage, NetEvent};
use crate::net::sim::ConnectionState;

/// The session's view of the network layer.
///
/// `NetworkSim` is the real implementation; `OfflineLink` stands in when the
/// network subsystem is disabled so the coordinator never checks for existence.
pub trait NetworkLink {
    /// Begin connecting. Rejected if a connection exists or is in progress.
    fn connect(&mut self, url: &str) -> Result<(), NetError>;

    /// Drop the connection and cancel in-flight responses.
    fn disconnect(&mut self) -> Result<(), NetError>;

    /// Send a message. Rejected unless connected.
    fn send(&mut self, msg: ClientMessage) -> Result<(), NetError>;

    fn state(&self) -> ConnectionState;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Identifier assigned at connect time.
    fn client_id(&self) -> Option<&str>;

    /// Event bus carrying everything the network delivers.
    fn bus(&self) -> Rc<EventBus<NetEvent>>;

    /// Advance simulated time, delivering due events. Returns how many fired.
    fn advance(&mut self, dt: f64) -> usize;
}

/// No-op network used when multiplayer is disabled. Every request is rejected.
#[derive(Default)]
pub struct OfflineLink {
    bus: Rc<EventBus<NetEvent>>,
}

impl OfflineLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NetworkLink for OfflineLink {
    fn connect(&mut self, url: &str) -> Result<(), NetError> {
        warn!("Network disabled, not connecting to {}", url);
        Err(NetError::Disabled)
    }

    fn disconnect(&mut self) -> Result<(), NetError> {
        Err(NetError::NotConnectedToAny)
    }

    fn send(&mut self, _msg: ClientMessage) -> Result<(), NetError> {
        Err(NetError::Disabled)
    }

    fn state(&self) -> ConnectionState {
        ConnectionState::Disconnected
    }

    fn client_id(&self) -> Option<&str> {
        None
    }

    fn bus(&self) -> Rc<EventBus<NetEvent>> {
        self.bus.clone()
    }

    fn advance(&mut self, _dt: f64) -> usize {
        0
    }
}
