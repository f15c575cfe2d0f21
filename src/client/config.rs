//! Client configuration: the immutable [`ClientConfig`] value and [`ClientSettings`] loading.

use std::fmt;

use serde::Deserialize;

use super::Credentials;
use crate::domain::{Charset, MessageCategory, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Gateway host name (optionally with a port), e.g. `smsc.ru`.
///
/// Mirrors are addressed as `www1.<host>` ... `www5.<host>`.
pub struct GatewayHost(String);

impl GatewayHost {
    pub const DEFAULT: &'static str = "smsc.ru";

    /// Create a validated host. Schemes, paths and credentials are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "host" });
        }
        let invalid = || ValidationError::InvalidHost {
            host: trimmed.to_owned(),
        };
        if trimmed.contains(['/', '?', '#', '@']) {
            return Err(invalid());
        }
        let parsed = url::Url::parse(&format!("http://{trimmed}/")).map_err(|_| invalid())?;
        if parsed.host_str().is_none() {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{scheme}://{host}/sys/{command}.php`
    pub(super) fn endpoint(&self, https: bool, command: &str) -> String {
        let scheme = if https { "https" } else { "http" };
        format!("{scheme}://{}/sys/{command}.php", self.0)
    }

    /// Rewrite a primary endpoint URL to point at mirror number `mirror`.
    pub(super) fn mirror_url(&self, primary: &str, mirror: usize) -> String {
        primary.replacen(
            &format!("{}/", self.0),
            &format!("www{mirror}.{}/", self.0),
            1,
        )
    }
}

impl Default for GatewayHost {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone)]
/// Everything a request is built from.
///
/// The value is immutable once attached to a client; derive a client with different flags via
/// [`SmscClient::with_config`](super::SmscClient::with_config).
pub struct ClientConfig {
    pub credentials: Credentials,
    pub host: GatewayHost,
    /// Use `https` (default) instead of `http`.
    pub https: bool,
    /// Always use POST (default). GET is used otherwise, unless the query is too long.
    pub post: bool,
    pub charset: Charset,
    /// Report every reply through `tracing` (default).
    pub debug: bool,
    pub category: MessageCategory,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            host: GatewayHost::default(),
            https: true,
            post: true,
            charset: Charset::default(),
            debug: true,
            category: MessageCategory::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors produced while loading [`ClientSettings`].
pub enum ConfigError {
    #[error("missing credentials: set an api key, or a login and a password")]
    MissingCredentials,

    #[error("missing password for login {login:?}")]
    MissingPassword { login: String },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Loosely typed client settings, as read from a config file or the environment.
///
/// A non-empty `login` selects login/password authentication, otherwise `api_key` is used.
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub https: Option<bool>,
    pub post: Option<bool>,
    pub charset: Option<String>,
    pub debug: Option<bool>,
    pub category: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("ClientSettings")
            .field("api_key", &redacted(&self.api_key))
            .field("login", &self.login)
            .field("password", &redacted(&self.password))
            .field("host", &self.host)
            .field("https", &self.https)
            .field("post", &self.post)
            .field("charset", &self.charset)
            .field("debug", &self.debug)
            .field("category", &self.category)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientSettings {
    pub const ENV_API_KEY: &'static str = "SMSC_API_KEY";
    pub const ENV_LOGIN: &'static str = "SMSC_LOGIN";
    pub const ENV_PASSWORD: &'static str = "SMSC_PASSWORD";
    pub const ENV_HOST: &'static str = "SMSC_HOST";
    pub const ENV_HTTPS: &'static str = "SMSC_HTTPS";
    pub const ENV_POST: &'static str = "SMSC_POST";
    pub const ENV_CHARSET: &'static str = "SMSC_CHARSET";
    pub const ENV_DEBUG: &'static str = "SMSC_DEBUG";
    pub const ENV_CATEGORY: &'static str = "SMSC_CATEGORY";
    pub const ENV_TIMEOUT_SECS: &'static str = "SMSC_TIMEOUT_SECS";
    pub const ENV_USER_AGENT: &'static str = "SMSC_USER_AGENT";

    /// Read settings from `SMSC_*` environment variables. Unset variables stay `None`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup (environment-like).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let flag = |key: &'static str| -> Result<Option<bool>, ConfigError> {
            text(key).map(|value| parse_flag(key, &value)).transpose()
        };

        let timeout_secs = text(Self::ENV_TIMEOUT_SECS)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: Self::ENV_TIMEOUT_SECS,
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            api_key: text(Self::ENV_API_KEY),
            login: text(Self::ENV_LOGIN),
            password: lookup(Self::ENV_PASSWORD).filter(|value| !value.is_empty()),
            host: text(Self::ENV_HOST),
            https: flag(Self::ENV_HTTPS)?,
            post: flag(Self::ENV_POST)?,
            charset: text(Self::ENV_CHARSET),
            debug: flag(Self::ENV_DEBUG)?,
            category: text(Self::ENV_CATEGORY),
            timeout_secs,
            user_agent: text(Self::ENV_USER_AGENT),
        })
    }

    /// Resolve the configured credentials.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (self.login.as_deref(), self.api_key.as_deref()) {
            (Some(login), _) if !login.trim().is_empty() => {
                let password = self
                    .password
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingPassword {
                        login: login.to_owned(),
                    })?;
                Ok(Credentials::login_password(login, password)?)
            }
            (_, Some(api_key)) => Ok(Credentials::api_key(api_key)?),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Build a [`ClientConfig`]; unset values fall back to the defaults of [`ClientConfig::new`].
    pub fn to_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::new(self.credentials()?);
        if let Some(host) = self.host.as_deref() {
            config.host = GatewayHost::new(host)?;
        }
        if let Some(https) = self.https {
            config.https = https;
        }
        if let Some(post) = self.post {
            config.post = post;
        }
        if let Some(charset) = self.charset.as_deref() {
            config.charset = charset.parse()?;
        }
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if let Some(category) = self.category.as_deref() {
            config.category = category.parse()?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn host_validation_and_mirrors() {
        let host = GatewayHost::default();
        let primary = host.endpoint(true, "send");
        assert_eq!(primary, "https://smsc.ru/sys/send.php");
        assert_eq!(
            host.mirror_url(&primary, 3),
            "https://www3.smsc.ru/sys/send.php"
        );
        assert_eq!(
            host.endpoint(false, "status"),
            "http://smsc.ru/sys/status.php"
        );

        assert_eq!(
            GatewayHost::new("127.0.0.1:8080").unwrap().as_str(),
            "127.0.0.1:8080"
        );
        assert!(GatewayHost::new("").is_err());
        assert!(GatewayHost::new("https://smsc.ru").is_err());
        assert!(GatewayHost::new("user@smsc.ru").is_err());
    }

    #[test]
    fn defaults_follow_gateway_recommendations() {
        let config = ClientConfig::new(Credentials::api_key("key").unwrap());
        assert!(config.https);
        assert!(config.post);
        assert!(config.debug);
        assert_eq!(config.charset, Charset::Utf8);
        assert_eq!(config.category, MessageCategory::Sms);
        assert_eq!(config.host.as_str(), "smsc.ru");
    }

    #[test]
    fn settings_from_lookup_parse_flags_and_names() {
        let settings = ClientSettings::from_lookup(lookup(&[
            ("SMSC_API_KEY", "token"),
            ("SMSC_POST", "0"),
            ("SMSC_DEBUG", "off"),
            ("SMSC_CHARSET", "windows-1251"),
            ("SMSC_CATEGORY", "12"),
            ("SMSC_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(settings.timeout_secs, Some(15));

        let config = settings.to_config().unwrap();
        assert!(!config.post);
        assert!(!config.debug);
        assert!(config.https);
        assert_eq!(config.charset, Charset::Windows1251);
        assert_eq!(config.category, MessageCategory::Bot);
        assert!(matches!(config.credentials, Credentials::ApiKey(_)));
    }

    #[test]
    fn settings_reject_bad_values() {
        let err = ClientSettings::from_lookup(lookup(&[("SMSC_HTTPS", "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "SMSC_HTTPS",
                ..
            }
        ));

        let settings = ClientSettings::from_lookup(lookup(&[
            ("SMSC_API_KEY", "token"),
            ("SMSC_CATEGORY", "fax"),
        ]))
        .unwrap();
        assert!(matches!(
            settings.to_config(),
            Err(ConfigError::Validation(
                ValidationError::UnknownCategoryName { .. }
            ))
        ));
    }

    #[test]
    fn login_takes_precedence_over_api_key() {
        let settings = ClientSettings::from_lookup(lookup(&[
            ("SMSC_API_KEY", "token"),
            ("SMSC_LOGIN", "user"),
            ("SMSC_PASSWORD", "secret"),
        ]))
        .unwrap();
        assert!(matches!(
            settings.credentials().unwrap(),
            Credentials::LoginPassword { .. }
        ));

        let settings = ClientSettings::from_lookup(lookup(&[("SMSC_LOGIN", "user")])).unwrap();
        assert!(matches!(
            settings.credentials(),
            Err(ConfigError::MissingPassword { .. })
        ));

        let settings = ClientSettings::from_lookup(lookup(&[])).unwrap();
        assert!(matches!(
            settings.credentials(),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn settings_deserialize_and_redact_secrets() {
        let settings: ClientSettings = serde_json::from_str(
            r#"{"login": "user", "password": "secret", "https": false, "category": "viber"}"#,
        )
        .unwrap();
        let config = settings.to_config().unwrap();
        assert!(!config.https);
        assert_eq!(config.category, MessageCategory::Viber);

        let debug = format!("{settings:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("user"));

        assert!(serde_json::from_str::<ClientSettings>(r#"{"apikey": "x"}"#).is_err());
    }
}
