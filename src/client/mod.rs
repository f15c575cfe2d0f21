//! Client layer: configuration, the HTTP seam and the `send` / `status` operations.

mod config;
mod dispatch;
mod report;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub use config::{ClientConfig, ClientSettings, ConfigError, GatewayHost};
use dispatch::Unreachable;

use crate::domain::{
    ApiKey, Charset, CheckStatus, ErrorCode, Login, MessageCategory, MessageId, Password,
    RawReply, SendReceipt, SendSms, StatusReport, ValidationError,
};
use crate::transport::{
    SendReply, StatusReply, decode_send_reply, decode_status_reply, encode_send_query,
    encode_status_query, quote, reassemble_status_reply,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const SEND_COMMAND: &str = "send";
const STATUS_COMMAND: &str = "status";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, Eq)]
enum HttpRequest {
    Get { url: String },
    Post { url: String, body: Vec<u8> },
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let builder = match request {
                HttpRequest::Get { url } => self.client.get(url),
                HttpRequest::Post { url, body } => self
                    .client
                    .post(url)
                    .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body),
            };
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for SMSC.RU API calls.
///
/// Use [`Credentials::api_key`] when you have an API key, or [`Credentials::login_password`]
/// if you authenticate with a login/password pair.
pub enum Credentials {
    /// Authenticate via `apikey`.
    ApiKey(ApiKey),
    /// Authenticate via `login` + `psw`.
    LoginPassword { login: Login, password: Password },
}

impl Credentials {
    /// Create [`Credentials::ApiKey`] and validate that the value is non-empty after trimming.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey(ApiKey::new(value)?))
    }

    /// Create [`Credentials::LoginPassword`] and validate that both parts are non-empty.
    pub fn login_password(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::LoginPassword {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    fn push_query(&self, query: &mut String, charset: Charset) {
        match self {
            Self::ApiKey(key) => {
                query.push_str(ApiKey::FIELD);
                query.push('=');
                query.push_str(&quote(key.as_str(), charset));
            }
            Self::LoginPassword { login, password } => {
                query.push_str(Login::FIELD);
                query.push('=');
                query.push_str(&quote(login.as_str(), charset));
                query.push('&');
                query.push_str(Password::FIELD);
                query.push('=');
                query.push_str(&quote(password.as_str(), charset));
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmscClient`].
///
/// Gateway-reported failures keep their vendor code; the positional reply is always available
/// through the `*_raw` methods.
pub enum SmscError {
    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Neither the primary host nor any mirror produced a reply.
    #[error("gateway unreachable after {attempts} attempts (last url: {last_url})")]
    Unreachable { attempts: usize, last_url: String },

    /// The gateway answered with a negative error code.
    #[error("API error: code {code}")]
    Api {
        code: ErrorCode,
        message_id: Option<MessageId>,
    },

    /// The reply did not have the expected shape.
    #[error("parse error: {source}")]
    Parse {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
        reply: RawReply,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Settings could not be turned into a client configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<Unreachable> for SmscError {
    fn from(value: Unreachable) -> Self {
        Self::Unreachable {
            attempts: value.attempts,
            last_url: value.last_url,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmscClient`].
///
/// Use this when you need to customize transport flags, charset, channel, host or timeout.
pub struct SmscClientBuilder {
    config: ClientConfig,
    host: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmscClientBuilder {
    /// Create a builder with the default settings of [`ClientConfig::new`].
    pub fn new(credentials: Credentials) -> Self {
        Self::from_config(ClientConfig::new(credentials))
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            host: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the gateway host (`smsc.ru`); validated in [`SmscClientBuilder::build`].
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Use `https` (default) or plain `http` for every attempt.
    pub fn https(mut self, https: bool) -> Self {
        self.config.https = https;
        self
    }

    /// Always send POST (default); with `false`, GET is used unless the query is too long.
    pub fn post(mut self, post: bool) -> Self {
        self.config.post = post;
        self
    }

    /// Set the charset for request values and replies (default UTF-8).
    pub fn charset(mut self, charset: Charset) -> Self {
        self.config.charset = charset;
        self
    }

    /// Report every reply through `tracing` (default `true`).
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the channel used by `send` (default [`MessageCategory::Sms`]).
    pub fn category(mut self, category: MessageCategory) -> Self {
        self.config.category = category;
        self
    }

    /// Set an HTTP client timeout applied to each attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmscClient`].
    pub fn build(self) -> Result<SmscClient, SmscError> {
        let mut config = self.config;
        if let Some(host) = self.host {
            config.host = GatewayHost::new(host)?;
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmscError::Transport(Box::new(err)))?;

        Ok(SmscClient {
            config,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level SMSC.RU client.
///
/// Every call is sent to `https://smsc.ru/sys/<command>.php` first and then, on transport
/// failure, to the mirrors `www1.smsc.ru` ... `www5.smsc.ru` in order. Replies use the
/// comma-separated `fmt=1` format.
///
/// The configuration is immutable, so a client can be cloned and shared between tasks freely.
pub struct SmscClient {
    config: ClientConfig,
    http: Arc<dyn HttpTransport>,
}

impl SmscClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`SmscClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            config: ClientConfig::new(credentials),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmscClientBuilder {
        SmscClientBuilder::new(credentials)
    }

    /// Build a client from loosely typed settings (see [`ClientSettings::from_env`]).
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, SmscError> {
        let mut builder = SmscClientBuilder::from_config(settings.to_config()?);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = settings.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }
        builder.build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A client with a different configuration sharing this client's HTTP connection pool.
    pub fn with_config(&self, config: ClientConfig) -> Self {
        Self {
            config,
            http: Arc::clone(&self.http),
        }
    }

    /// Send a message and return the gateway reply as positional fields.
    ///
    /// `(id, sms_count, cost, balance)` on success, `(id, -error)` on failure, and a single empty
    /// field when no host could be reached.
    pub async fn send_raw(&self, request: SendSms) -> RawReply {
        self.send_reply(&request)
            .await
            .unwrap_or_else(|_| RawReply::unreachable())
    }

    /// Send a message.
    ///
    /// Errors:
    /// - [`SmscError::Unreachable`] when every host failed,
    /// - [`SmscError::Api`] when the gateway returned a negative error code,
    /// - [`SmscError::Parse`] when the reply has an unexpected shape.
    pub async fn send(&self, request: SendSms) -> Result<SendReceipt, SmscError> {
        let reply = self.send_reply(&request).await?;
        match decode_send_reply(&reply) {
            Ok(SendReply::Sent(receipt)) => Ok(receipt),
            Ok(SendReply::Rejected { code, id }) => Err(SmscError::Api {
                code,
                message_id: id,
            }),
            Err(err) => Err(SmscError::Parse {
                source: Box::new(err),
                reply,
            }),
        }
    }

    /// Query delivery status and return the gateway reply as positional fields.
    ///
    /// `(status, change_time, error[, send_time, phone, cost, sender, status_name, message])` on
    /// success, `(0, -error)` on failure, and a single empty field when no host could be reached.
    /// For extended requests the message text is kept whole even when it contains commas.
    pub async fn status_raw(&self, request: CheckStatus) -> RawReply {
        self.status_reply(&request)
            .await
            .unwrap_or_else(|_| RawReply::unreachable())
    }

    /// Query delivery status.
    ///
    /// Errors:
    /// - [`SmscError::Unreachable`] when every host failed,
    /// - [`SmscError::Api`] when the gateway returned a negative error code,
    /// - [`SmscError::Parse`] when the reply has an unexpected shape.
    pub async fn status(&self, request: CheckStatus) -> Result<StatusReport, SmscError> {
        let reply = self.status_reply(&request).await?;
        match decode_status_reply(&request, &reply) {
            Ok(StatusReply::Report(report)) => Ok(report),
            Ok(StatusReply::Rejected { code }) => Err(SmscError::Api {
                code,
                message_id: Some(request.id()),
            }),
            Err(err) => Err(SmscError::Parse {
                source: Box::new(err),
                reply,
            }),
        }
    }

    async fn send_reply(&self, request: &SendSms) -> Result<RawReply, Unreachable> {
        let query = encode_send_query(request, self.config.category, self.config.charset);
        let reply = self.dispatch(SEND_COMMAND, &query).await?;
        if self.config.debug {
            report::send(&reply);
        }
        Ok(reply)
    }

    async fn status_reply(&self, request: &CheckStatus) -> Result<RawReply, Unreachable> {
        let query = encode_status_query(request, self.config.charset);
        let reply = self.dispatch(STATUS_COMMAND, &query).await?;
        let reply = reassemble_status_reply(reply, request.is_extended());
        if self.config.debug {
            report::status(request, &reply);
        }
        Ok(reply)
    }
}
