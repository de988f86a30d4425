use crate::error::{AlfrescoError, AlfrescoResult};
use reqwest::Client;
use std::env;
use std::net::Ipv6Addr;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_PORT: u16 = 8080;

/// Connection settings shared by the login call and every node operation
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: String,
}

impl ClientConfig {
    /// Plain HTTP on `host:port`, unless `host` already names a scheme.
    ///
    /// `host` may carry a path prefix (`ecm.example/ctx`) or be an IPv6 literal,
    /// but not a port of its own.
    pub fn new(host: &str, port: u16) -> AlfrescoResult<Self> {
        let host = host.trim_end_matches('/');
        let raw = if host.contains("://") {
            host.to_string()
        } else if host.parse::<Ipv6Addr>().is_ok() {
            format!("http://[{}]/", host)
        } else {
            format!("http://{}/", host)
        };

        let mut url = Url::parse(&raw)
            .map_err(|err| AlfrescoError::Config(format!("invalid host {:?}: {}", host, err)))?;
        if url.port().is_some() {
            return Err(AlfrescoError::Config(format!(
                "host {:?} already carries a port",
                host
            )));
        }
        url.set_port(Some(port))
            .map_err(|_| AlfrescoError::Config(format!("host {:?} cannot take a port", host)))?;

        Self::from_url(url.as_str())
    }

    /// Use a full base URL; any path prefix is kept for relative joins
    pub fn from_url(base_url: &str) -> AlfrescoResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AlfrescoError::Config(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Read `ALFRESCO_URL` (or `ALFRESCO_HOST` and `ALFRESCO_PORT`) and `ALFRESCO_TIMEOUT_SECS`
    pub fn from_env() -> AlfrescoResult<Self> {
        let config = match env::var("ALFRESCO_URL") {
            Ok(url) => Self::from_url(&url)?,
            Err(_) => {
                let host = env::var("ALFRESCO_HOST")
                    .map_err(|_| AlfrescoError::Config("missing ALFRESCO_HOST or ALFRESCO_URL".into()))?;
                let port = match env::var("ALFRESCO_PORT") {
                    Ok(port) => port
                        .parse::<u16>()
                        .map_err(|err| AlfrescoError::Config(format!("invalid ALFRESCO_PORT: {err}")))?,
                    Err(_) => DEFAULT_PORT,
                };
                Self::new(&host, port)?
            }
        };

        match env::var("ALFRESCO_TIMEOUT_SECS") {
            Ok(secs) => {
                let secs = secs
                    .parse::<u64>()
                    .map_err(|err| AlfrescoError::Config(format!("invalid ALFRESCO_TIMEOUT_SECS: {err}")))?;
                Ok(config.with_timeout(Some(Duration::from_secs(secs))))
            }
            Err(_) => Ok(config),
        }
    }

    /// Overall per-request timeout; `None` disables it.
    ///
    /// The limit spans the whole exchange, body transfer included, so large
    /// downloads through `NodeContent` or streamed uploads must fit in it too.
    /// Raise it or pass `None` for big content and rely on the connect timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Build the HTTP client these settings describe
    pub fn build_http_client(&self) -> AlfrescoResult<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
