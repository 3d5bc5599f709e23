//! Navigation adapter
//!
//! The client core only ever asks for one destination: the login surface.
//! Requests are forwarded over a channel to whatever drives the UI.

use casedesk_core::Navigator;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Destination requested by the session guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    Login,
}

/// [`Navigator`] that forwards requests to a channel receiver
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<NavigationRequest>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NavigationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate_to_login(&self) {
        debug!("navigation to login requested");
        if self.tx.send(NavigationRequest::Login).is_err() {
            warn!("navigation receiver dropped, login request lost");
        }
    }
}
