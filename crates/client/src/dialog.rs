//! The members dialog: lists a server's members and lets the owner change
//! roles or kick.
//!
//! Rendering is a pure projection of the modal store plus the dialog's own
//! row state. Actions run one request each; while a request is in flight its
//! row shows a spinner instead of the action menu.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use concord_core::policy::is_manageable;
use concord_core::roles::MemberRole;
use concord_core::types::DbId;
use tokio::sync::{watch, Mutex};

use crate::api::MembersApi;
use crate::error::ClientError;
use crate::modal::{ModalData, ModalStore, ModalType};
use crate::model::{MemberView, ServerView};

pub const TITLE: &str = "Manage Members";

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    ShieldCheck,
    ShieldAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Indigo,
    Rose,
}

/// Icon shown next to a member's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBadge {
    pub icon: BadgeIcon,
    pub tone: BadgeTone,
}

impl RoleBadge {
    /// Guests carry no badge.
    pub fn for_role(role: MemberRole) -> Option<Self> {
        match role {
            MemberRole::Guest => None,
            MemberRole::Moderator => Some(RoleBadge {
                icon: BadgeIcon::ShieldCheck,
                tone: BadgeTone::Indigo,
            }),
            MemberRole::Admin => Some(RoleBadge {
                icon: BadgeIcon::ShieldAlert,
                tone: BadgeTone::Rose,
            }),
        }
    }
}

/// One entry of the role submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleOption {
    pub role: MemberRole,
    /// Marked with a check in the submenu.
    pub current: bool,
}

/// What sits at the end of a member row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActions {
    /// Role submenu plus the kick item.
    Menu { roles: Vec<RoleOption> },
    /// A request for this row is in flight.
    Spinner,
    /// The server owner's own row.
    Hidden,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowStatus {
    #[default]
    Idle,
    /// The last action on this row failed; the list still shows the old data.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRowView {
    pub member_id: DbId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub role: MemberRole,
    pub badge: Option<RoleBadge>,
    pub actions: RowActions,
    pub status: RowStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MembersView {
    pub title: &'static str,
    /// `"{n} Members"`.
    pub description: String,
    pub rows: Vec<MemberRowView>,
}

// ---------------------------------------------------------------------------
// Page refresh
// ---------------------------------------------------------------------------

/// Reloads whatever page data sits behind the dialog.
#[async_trait]
pub trait PageRefresh: Send + Sync {
    async fn refresh(&self, server_id: DbId);
}

/// [`PageRefresh`] that re-fetches the server and publishes it on a watch
/// channel for the page to render from.
pub struct ServerFeed {
    api: Arc<dyn MembersApi>,
    tx: watch::Sender<Option<ServerView>>,
}

impl ServerFeed {
    pub fn new(api: Arc<dyn MembersApi>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { api, tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ServerView>> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl PageRefresh for ServerFeed {
    async fn refresh(&self, server_id: DbId) {
        match self.api.fetch_server(server_id).await {
            Ok(server) => {
                self.tx.send_replace(Some(server));
            }
            Err(e) => tracing::warn!(server_id, error = %e, "Page refresh failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dialog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct RowState {
    /// Single slot: concurrent actions overwrite it and the first to finish clears it.
    loading_id: Option<DbId>,
    failures: HashMap<DbId, String>,
}

pub struct MembersDialog {
    api: Arc<dyn MembersApi>,
    modal: Arc<ModalStore>,
    refresh: Arc<dyn PageRefresh>,
    assignable: Vec<MemberRole>,
    rows: Mutex<RowState>,
}

impl MembersDialog {
    pub fn new(
        api: Arc<dyn MembersApi>,
        modal: Arc<ModalStore>,
        refresh: Arc<dyn PageRefresh>,
        assignable: Vec<MemberRole>,
    ) -> Self {
        Self {
            api,
            modal,
            refresh,
            assignable,
            rows: Mutex::new(RowState::default()),
        }
    }

    /// The id of the member whose action is in flight, if any.
    pub async fn loading_id(&self) -> Option<DbId> {
        self.rows.lock().await.loading_id
    }

    /// Project the current state into a view, or `None` when the members
    /// modal is not open.
    pub async fn render(&self) -> Option<MembersView> {
        let modal = self.modal.snapshot().await;
        let server = modal.members_server()?;
        let rows = self.rows.lock().await;

        let rows = server
            .member
            .iter()
            .map(|member| self.render_row(server, member, &rows))
            .collect();

        Some(MembersView {
            title: TITLE,
            description: format!("{} Members", server.member.len()),
            rows,
        })
    }

    fn render_row(
        &self,
        server: &ServerView,
        member: &MemberView,
        rows: &RowState,
    ) -> MemberRowView {
        let actions = if rows.loading_id == Some(member.id) {
            RowActions::Spinner
        } else if is_manageable(server.profile_id, member.profile_id) {
            RowActions::Menu {
                roles: self
                    .assignable
                    .iter()
                    .map(|&role| RoleOption {
                        role,
                        current: role == member.role,
                    })
                    .collect(),
            }
        } else {
            RowActions::Hidden
        };

        let status = match rows.failures.get(&member.id) {
            Some(message) => RowStatus::Failed {
                message: message.clone(),
            },
            None => RowStatus::Idle,
        };

        MemberRowView {
            member_id: member.id,
            name: member.profile.name.clone(),
            email: member.profile.email.clone(),
            image_url: member.profile.image_url.clone(),
            role: member.role,
            badge: RoleBadge::for_role(member.role),
            actions,
            status,
        }
    }

    /// Change `member_id` to `role` in the open server.
    ///
    /// Roles outside the assignable set are refused without a request.
    pub async fn change_role(
        &self,
        member_id: DbId,
        role: MemberRole,
    ) -> Result<ServerView, ClientError> {
        if !self.assignable.contains(&role) {
            return Err(ClientError::RoleNotAssignable(role));
        }
        let server_id = self.open_server_id().await?;

        self.run(member_id, server_id, "change role", async {
            self.api.update_role(server_id, member_id, role).await
        })
        .await
    }

    /// Remove `member_id` from the open server.
    pub async fn kick(&self, member_id: DbId) -> Result<ServerView, ClientError> {
        let server_id = self.open_server_id().await?;

        self.run(member_id, server_id, "kick", async {
            self.api.kick(server_id, member_id).await
        })
        .await
    }

    async fn open_server_id(&self) -> Result<DbId, ClientError> {
        self.modal
            .snapshot()
            .await
            .members_server()
            .map(|server| server.id)
            .ok_or(ClientError::NoServer)
    }

    /// Shared loading/refresh/failure flow around one request.
    async fn run<F>(
        &self,
        member_id: DbId,
        server_id: DbId,
        action: &'static str,
        request: F,
    ) -> Result<ServerView, ClientError>
    where
        F: Future<Output = Result<ServerView, ClientError>> + Send,
    {
        {
            let mut rows = self.rows.lock().await;
            rows.loading_id = Some(member_id);
            rows.failures.remove(&member_id);
        }

        let result = request.await;

        match &result {
            Ok(server) => {
                self.refresh.refresh(server_id).await;
                self.modal
                    .on_open(
                        ModalType::Members,
                        ModalData {
                            server: Some(server.clone()),
                        },
                    )
                    .await;
            }
            Err(e) => {
                tracing::warn!(member_id, server_id, action, error = %e, "Member action failed");
                self.rows
                    .lock()
                    .await
                    .failures
                    .insert(member_id, e.to_string());
            }
        }

        self.rows.lock().await.loading_id = None;
        result
    }
}
