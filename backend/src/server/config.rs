//! Process settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BARBERSHOP_*` environment variables, or a
//! config file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::DEFAULT_MAIL_TIMEOUT;
use crate::outbound::mail::{SmtpConfig, SmtpSecurity};
use crate::outbound::persistence::PoolConfig;

pub(crate) const DEFAULT_DATABASE_URL: &str = "postgres://barbershop@localhost/barbershop";
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub(crate) const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_SMTP_FROM: &str = "Barbershop <bookings@localhost>";

/// Invalid combination or shape of settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {reason}")]
    BindAddr { value: String, reason: String },
    #[error("unknown SMTP security mode '{0}'; expected tls|starttls|plain")]
    SmtpSecurity(String),
    #[error("SMTP password given without a username")]
    SmtpPasswordWithoutUser,
}

/// Configuration for the booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BARBERSHOP")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random per-process key when the key file is missing.
    pub session_allow_ephemeral: Option<bool>,
    /// Mark the session cookie `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// SMTP relay host. Email is disabled when unset.
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    /// `tls`, `starttls` (default) or `plain`.
    pub smtp_security: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Sender mailbox for booking emails.
    pub smtp_from: Option<String>,
    /// Upper bound on the post-commit email step, in seconds.
    pub email_timeout_secs: Option<u64>,
}

impl AppSettings {
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn email_timeout(&self) -> Duration {
        self.email_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MAIL_TIMEOUT)
    }

    /// Relay settings, or `None` when email is disabled.
    pub fn smtp_config(&self) -> Result<Option<SmtpConfig>, SettingsError> {
        let Some(host) = self.smtp_host.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Ok(None);
        };
        let security = match self
            .smtp_security
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("starttls") => SmtpSecurity::StartTls,
            Some("tls") => SmtpSecurity::Tls,
            Some("plain") => SmtpSecurity::Plain,
            Some(other) => return Err(SettingsError::SmtpSecurity(other.to_owned())),
        };
        if self.smtp_password.is_some() && self.smtp_username.is_none() {
            return Err(SettingsError::SmtpPasswordWithoutUser);
        }
        let default_port = match security {
            SmtpSecurity::Tls => 465,
            SmtpSecurity::StartTls => 587,
            SmtpSecurity::Plain => 25,
        };
        Ok(Some(SmtpConfig {
            host: host.trim().to_owned(),
            port: self.smtp_port.unwrap_or(default_port),
            security,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone().map(Zeroizing::new),
            from: self
                .smtp_from
                .clone()
                .unwrap_or_else(|| DEFAULT_SMTP_FROM.to_owned()),
            timeout: self.email_timeout(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 13] = [
        "BARBERSHOP_DATABASE_URL",
        "BARBERSHOP_BIND_ADDR",
        "BARBERSHOP_POOL_SIZE",
        "BARBERSHOP_SESSION_KEY_FILE",
        "BARBERSHOP_SESSION_ALLOW_EPHEMERAL",
        "BARBERSHOP_COOKIE_SECURE",
        "BARBERSHOP_SMTP_HOST",
        "BARBERSHOP_SMTP_PORT",
        "BARBERSHOP_SMTP_SECURITY",
        "BARBERSHOP_SMTP_USERNAME",
        "BARBERSHOP_SMTP_PASSWORD",
        "BARBERSHOP_SMTP_FROM",
        "BARBERSHOP_EMAIL_TIMEOUT_SECS",
    ];

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("barbershop")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = load();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(
            settings.bind_addr().expect("default parses").to_string(),
            DEFAULT_BIND_ADDR
        );
        assert!(settings.cookie_secure());
        assert!(!settings.session_allow_ephemeral());
        assert_eq!(settings.email_timeout(), DEFAULT_MAIL_TIMEOUT);
        assert!(settings.smtp_config().expect("valid").is_none());
    }

    #[rstest]
    fn environment_configures_smtp() {
        let _guard = lock_env(env_with(&[
            ("BARBERSHOP_SMTP_HOST", "mail.example.com"),
            ("BARBERSHOP_SMTP_SECURITY", "TLS"),
            ("BARBERSHOP_SMTP_USERNAME", "bookings"),
            ("BARBERSHOP_SMTP_PASSWORD", "hunter2"),
            ("BARBERSHOP_EMAIL_TIMEOUT_SECS", "2"),
        ]));

        let smtp = load()
            .smtp_config()
            .expect("valid smtp settings")
            .expect("smtp enabled");

        assert_eq!(smtp.host, "mail.example.com");
        assert_eq!(smtp.security, SmtpSecurity::Tls);
        assert_eq!(smtp.port, 465);
        assert_eq!(smtp.timeout, Duration::from_secs(2));
        assert_eq!(smtp.password.as_deref().map(String::as_str), Some("hunter2"));
    }

    #[rstest]
    #[case(&[("BARBERSHOP_SMTP_HOST", "mail"), ("BARBERSHOP_SMTP_SECURITY", "ssl3")])]
    #[case(&[("BARBERSHOP_SMTP_HOST", "mail"), ("BARBERSHOP_SMTP_PASSWORD", "pw")])]
    fn inconsistent_smtp_settings_are_rejected(#[case] overrides: &[(&'static str, &str)]) {
        let _guard = lock_env(env_with(overrides));

        assert!(load().smtp_config().is_err());
    }

    #[rstest]
    #[case("true", "false", true, false)]
    #[case("false", "true", false, true)]
    fn environment_overrides_session_flags(
        #[case] allow_ephemeral: &str,
        #[case] cookie_secure: &str,
        #[case] expect_ephemeral: bool,
        #[case] expect_secure: bool,
    ) {
        let _guard = lock_env(env_with(&[
            ("BARBERSHOP_SESSION_ALLOW_EPHEMERAL", allow_ephemeral),
            ("BARBERSHOP_COOKIE_SECURE", cookie_secure),
        ]));

        let settings = load();

        assert_eq!(settings.session_allow_ephemeral(), expect_ephemeral);
        assert_eq!(settings.cookie_secure(), expect_secure);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(env_with(&[("BARBERSHOP_BIND_ADDR", "localhost")]));

        let err = load().bind_addr().expect_err("not a socket address");

        assert!(err.to_string().contains("localhost"));
    }
}
