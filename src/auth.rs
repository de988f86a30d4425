use crate::config::ClientConfig;
use crate::error::{AlfrescoError, AlfrescoResult};
use crate::models::{LoginRequest, LoginResponse};
use base64::{engine::general_purpose, Engine};
use log::{debug, info, warn};
use reqwest::Client;

/// Login endpoint, relative to the server root
pub const LOGIN_PATH: &str = "alfresco/service/api/login";

/// Authentication trait for Alfresco API
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication to the request headers
    async fn apply_auth(&self, headers: &mut reqwest::header::HeaderMap) -> AlfrescoResult<()>;
}

fn insert_basic(headers: &mut reqwest::header::HeaderMap, encoded: &str) -> AlfrescoResult<()> {
    let auth_value = format!("Basic {}", encoded);
    headers.insert(
        reqwest::header::AUTHORIZATION,
        auth_value
            .parse()
            .map_err(|e| AlfrescoError::auth_error(format!("Invalid auth header: {}", e)))?,
    );
    Ok(())
}

/// Ticket issued by the login endpoint, sent as a Basic credential
#[derive(Clone)]
pub struct TicketAuth {
    ticket: String,
    encoded: String,
}

impl TicketAuth {
    pub fn new(ticket: impl Into<String>) -> Self {
        let ticket = ticket.into();
        let encoded = general_purpose::STANDARD.encode(ticket.as_bytes());
        Self { ticket, encoded }
    }

    /// The raw ticket as issued by the server
    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    /// The base64 form carried in the Authorization header
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

// Keep the ticket out of logs.
impl std::fmt::Debug for TicketAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketAuth").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Authentication for TicketAuth {
    async fn apply_auth(&self, headers: &mut reqwest::header::HeaderMap) -> AlfrescoResult<()> {
        insert_basic(headers, &self.encoded)
    }
}

/// Basic authentication using username/password
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Authentication for BasicAuth {
    async fn apply_auth(&self, headers: &mut reqwest::header::HeaderMap) -> AlfrescoResult<()> {
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        insert_basic(headers, &encoded)
    }
}

/// Exchange credentials for a ticket
pub(crate) async fn request_ticket(
    http: &Client,
    config: &ClientConfig,
    username: &str,
    password: &str,
) -> AlfrescoResult<TicketAuth> {
    info!("Logging in as {}", username);
    let url = config.base_url().join(LOGIN_PATH)?;
    debug!("HTTP POST {}", url);

    let response = http
        .post(url)
        .json(&LoginRequest { username, password })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Login for {} rejected with HTTP {}", username, status);
        return Err(AlfrescoError::auth_error(format!(
            "login rejected with HTTP {}: {}",
            status.as_u16(),
            body
        )));
    }

    let body = response.bytes().await?;
    let login: LoginResponse = serde_json::from_slice(&body)
        .map_err(|e| AlfrescoError::auth_error(format!("unreadable login response: {}", e)))?;

    match login.data {
        Some(data) if !data.ticket.is_empty() => {
            info!("Login succeeded for {}", username);
            Ok(TicketAuth::new(data.ticket))
        }
        _ => Err(AlfrescoError::auth_error("login response contained no ticket")),
    }
}
