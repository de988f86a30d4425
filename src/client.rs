use crate::{
    apis::NodeApi,
    auth::{self, Authentication, TicketAuth},
    config::ClientConfig,
    error::{AlfrescoError, AlfrescoResult},
    models::{ErrorEnvelope, ErrorPayload},
};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// An authenticated session against one Alfresco server.
///
/// Immutable once built; clone it freely or share it between tasks.
#[derive(Clone)]
pub struct AlfrescoClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn Authentication>,
    // Same allocation as `auth` for ticket-based sessions
    ticket: Option<Arc<TicketAuth>>,
}

impl AlfrescoClient {
    /// Log in with username and password and keep the issued ticket
    pub async fn login(config: ClientConfig, username: &str, password: &str) -> AlfrescoResult<Self> {
        let client = config.build_http_client()?;
        let ticket = auth::request_ticket(&client, &config, username, password).await?;
        Ok(Self::assemble(client, config, ticket))
    }

    /// Build a session from a ticket issued earlier
    pub fn with_ticket(config: ClientConfig, ticket: impl Into<String>) -> AlfrescoResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self::assemble(client, config, TicketAuth::new(ticket)))
    }

    /// Build a session with any authentication scheme
    pub fn with_auth(config: ClientConfig, auth: impl Authentication + 'static) -> AlfrescoResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            auth: Arc::new(auth),
            ticket: None,
        })
    }

    fn assemble(client: Client, config: ClientConfig, ticket: TicketAuth) -> Self {
        let ticket = Arc::new(ticket);
        Self {
            client,
            base_url: config.base_url().clone(),
            auth: ticket.clone(),
            ticket: Some(ticket),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The raw ticket, for ticket-based sessions
    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_ref().map(|t| t.ticket())
    }

    /// Get Node API
    pub fn nodes(&self) -> NodeApi<'_> {
        NodeApi::new(self)
    }

    /// Build a request to the given path with authentication
    pub async fn request(&self, method: reqwest::Method, path: &str) -> AlfrescoResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!("HTTP {} {}", method, url);
        let mut request = self.client.request(method, url);

        // Apply authentication
        let mut headers = reqwest::header::HeaderMap::new();
        self.auth.apply_auth(&mut headers).await?;

        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        Ok(request)
    }

    /// Send a request and require the given status, decoding the JSON body
    pub async fn execute<T>(&self, request: RequestBuilder, expected: StatusCode) -> AlfrescoResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, expected).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            AlfrescoError::invalid_response(format!("unexpected body for HTTP {}: {}", expected.as_u16(), e))
        })
    }

    /// Send a request and require the given status, ignoring the body
    pub async fn execute_empty(&self, request: RequestBuilder, expected: StatusCode) -> AlfrescoResult<()> {
        self.send(request, expected).await.map(drop)
    }

    /// Send a request and hand back the live response on the expected status
    pub async fn send(&self, request: RequestBuilder, expected: StatusCode) -> AlfrescoResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == expected {
            Ok(response)
        } else if status.is_success() {
            Err(AlfrescoError::invalid_response(format!(
                "expected HTTP {}, got {}",
                expected.as_u16(),
                status.as_u16()
            )))
        } else {
            Err(self.handle_error_response(status, response).await)
        }
    }

    /// Decode the server's error body
    async fn handle_error_response(&self, status: StatusCode, response: Response) -> AlfrescoError {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AlfrescoError::Transport(e),
        };

        let payload = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error,
            Err(_) => ErrorPayload::from_status(status.as_u16(), body),
        };
        warn!(
            "HTTP {} from server: {} {}",
            status.as_u16(),
            payload.error_key,
            payload.brief_summary
        );

        AlfrescoError::server_error(status.as_u16(), payload)
    }
}

impl std::fmt::Debug for AlfrescoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlfrescoClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
