//! Handle for communicating with the search session actor.

use marquee_core::SearchState;
use tokio::sync::{mpsc, oneshot, watch};

use super::SessionError;
use super::commands::{SessionCommand, SessionSnapshot};

/// Handle for driving a search session.
///
/// Cloneable; every clone talks to the same actor and observes the same
/// snapshots.
#[derive(Clone)]
pub struct SearchSessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SearchSessionHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<SessionCommand>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Feeds typed text into the session.
    ///
    /// Returns the state to mirror into the URL; the page is reset to 1.
    ///
    /// # Errors
    /// - `SessionError::Shutdown` - Session actor has stopped
    pub async fn input(&self, value: impl Into<String>) -> Result<SearchState, SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::Input {
            value: value.into(),
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::Shutdown)?;

        rx.await.map_err(|_| SessionError::Shutdown)
    }

    /// Moves the session to another page, keeping the search text.
    ///
    /// # Errors
    /// - `SessionError::Shutdown` - Session actor has stopped
    pub async fn change_page(&self, page: u32) -> Result<SearchState, SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::ChangePage { page, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::Shutdown)?;

        rx.await.map_err(|_| SessionError::Shutdown)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Waits for the first snapshot matching `predicate`, checking the
    /// current one first.
    ///
    /// # Errors
    /// - `SessionError::Shutdown` - Session stopped before a match
    pub async fn wait_until<F>(&self, mut predicate: F) -> Result<SessionSnapshot, SessionError>
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| SessionError::Shutdown)?;
        Ok(snapshot.clone())
    }

    /// Stops the session actor.
    ///
    /// # Errors
    /// - `SessionError::Shutdown` - Session actor had already stopped
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();

        self.sender
            .send(SessionCommand::Shutdown { responder })
            .await
            .map_err(|_| SessionError::Shutdown)?;

        rx.await.map_err(|_| SessionError::Shutdown)
    }
}
