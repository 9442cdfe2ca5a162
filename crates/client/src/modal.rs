//! Shared modal state: which modal is open and the data it was opened with.

use tokio::sync::RwLock;

use crate::model::ServerView;

/// Modals that can be opened through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalType {
    Members,
}

/// Payload a modal is opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalData {
    pub server: Option<ServerView>,
}

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub kind: Option<ModalType>,
    pub data: ModalData,
    pub is_open: bool,
}

impl ModalState {
    /// The server of an open members modal, if that is what is showing.
    pub fn members_server(&self) -> Option<&ServerView> {
        match (self.is_open, self.kind) {
            (true, Some(ModalType::Members)) => self.data.server.as_ref(),
            _ => None,
        }
    }
}

/// Thread-safe modal store, shared behind an `Arc`.
#[derive(Default)]
pub struct ModalStore {
    state: RwLock<ModalState>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `kind` with `data`, replacing whatever was showing.
    pub async fn on_open(&self, kind: ModalType, data: ModalData) {
        *self.state.write().await = ModalState {
            kind: Some(kind),
            data,
            is_open: true,
        };
    }

    /// Close the modal and drop its data.
    pub async fn on_close(&self) {
        *self.state.write().await = ModalState::default();
    }

    pub async fn snapshot(&self) -> ModalState {
        self.state.read().await.clone()
    }
}
