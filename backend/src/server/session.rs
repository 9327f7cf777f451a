//! Session cookie key and flags derived from [`AppSettings`].

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

use super::config::AppSettings;

const SESSION_KEY_MIN_LEN: usize = 64;

/// Whether debug-only fallbacks are tolerated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Cookie session parameters handed to the server.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("insecure session cookies are only allowed in debug builds")]
    InsecureCookieInRelease,
}

/// Load the signing key and cookie flags.
///
/// A missing key file falls back to a random key in debug builds or when
/// `session_allow_ephemeral` is set; sessions then die with the process.
pub fn session_settings(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if !settings.cookie_secure() && mode == BuildMode::Release {
        return Err(SessionConfigError::InsecureCookieInRelease);
    }
    let path = settings.session_key_file();
    let key = match std::fs::read(&path) {
        Ok(mut bytes) => {
            if bytes.len() < SESSION_KEY_MIN_LEN {
                let length = bytes.len();
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            key
        }
        Err(source) if mode == BuildMode::Debug || settings.session_allow_ephemeral() => {
            warn!(path = %path.display(), error = %source, "using ephemeral session key");
            Key::generate()
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    Ok(SessionSettings {
        key,
        cookie_secure: settings.cookie_secure(),
        same_site: SameSite::Lax,
    })
}
