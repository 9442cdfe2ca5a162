//! HTTP client for the member management endpoints.

use async_trait::async_trait;
use concord_core::roles::MemberRole;
use concord_core::types::DbId;
use serde::Serialize;

use crate::error::ClientError;
use crate::model::ServerView;

/// Operations the members dialog needs from the backend.
#[async_trait]
pub trait MembersApi: Send + Sync {
    /// `PATCH /api/members/{member_id}?serverId={server_id}`
    async fn update_role(
        &self,
        server_id: DbId,
        member_id: DbId,
        role: MemberRole,
    ) -> Result<ServerView, ClientError>;

    /// `DELETE /api/members/{member_id}?serverId={server_id}`
    async fn kick(&self, server_id: DbId, member_id: DbId) -> Result<ServerView, ClientError>;

    /// `GET /api/servers/{server_id}`
    async fn fetch_server(&self, server_id: DbId) -> Result<ServerView, ClientError>;
}

#[derive(Serialize)]
struct UpdateRoleBody {
    role: MemberRole,
}

/// [`MembersApi`] over HTTP with a Bearer session token.
pub struct HttpMembersApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl HttpMembersApi {
    /// * `api_url` - Base URL, e.g. `http://localhost:3000`.
    pub fn new(api_url: String, token: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, api_url: String, token: String) -> Self {
        Self {
            client,
            api_url,
            token,
        }
    }

    fn member_url(&self, member_id: DbId) -> String {
        format!("{}/api/members/{member_id}", self.api_url)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], otherwise decode the body.
    async fn parse_response(response: reqwest::Response) -> Result<ServerView, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<ServerView>().await?)
    }
}

#[async_trait]
impl MembersApi for HttpMembersApi {
    async fn update_role(
        &self,
        server_id: DbId,
        member_id: DbId,
        role: MemberRole,
    ) -> Result<ServerView, ClientError> {
        let response = self
            .client
            .patch(self.member_url(member_id))
            .query(&[("serverId", server_id)])
            .bearer_auth(&self.token)
            .json(&UpdateRoleBody { role })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn kick(&self, server_id: DbId, member_id: DbId) -> Result<ServerView, ClientError> {
        let response = self
            .client
            .delete(self.member_url(member_id))
            .query(&[("serverId", server_id)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn fetch_server(&self, server_id: DbId) -> Result<ServerView, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/servers/{server_id}", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
