//! CLI-owned configuration: TOML file + `STUFA_*` environment variables,
//! merged with command-line flags into portal credentials.
//!
//! `stufa-api` never sees these types -- it receives pre-built
//! [`Credentials`] and a [`TransportConfig`].

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use stufa_api::Credentials;
use stufa_api::transport::{DEFAULT_TIMEOUT, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

/// Contents of `config.toml`. Every field can also arrive via `STUFA_*`
/// env vars or the matching global flag; flags win, then env, then file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub uuid: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("it", "stufa", "stufa")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("stufa.toml"))
}

fn load_file() -> Result<FileConfig, CliError> {
    Ok(Figment::new()
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("STUFA_"))
        .extract()?)
}

// ── Resolved settings ────────────────────────────────────────────────

/// Everything needed to build a connected client.
pub struct Settings {
    pub credentials: Credentials,
    pub base_url: Option<Url>,
    pub transport: TransportConfig,
}

/// Merge file, env, and flags into [`Settings`].
///
/// Email and password are required. A missing uuid gets a freshly
/// generated one -- the portal only uses it to tell installations apart,
/// but a stable value is nicer to the portal, so we say so.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let file = load_file()?;

    let email = global
        .email
        .clone()
        .or(file.email)
        .ok_or_else(|| missing("email", "EMAIL"))?;
    let password = global
        .password
        .clone()
        .or(file.password)
        .ok_or_else(|| missing("password", "PASSWORD"))?;
    let uuid = global.uuid.clone().or(file.uuid).unwrap_or_else(|| {
        let generated = uuid::Uuid::new_v4().to_string();
        warn!(
            uuid = %generated,
            "no installation uuid configured, generated a one-off; \
             set STUFA_UUID to keep it stable across runs"
        );
        generated
    });

    let base_url = global
        .base_url
        .clone()
        .or(file.base_url)
        .map(|raw| {
            Url::parse(&raw).map_err(|e| CliError::InvalidValue {
                field: "base-url",
                reason: format!("{raw}: {e}"),
            })
        })
        .transpose()?;

    let timeout = global
        .timeout
        .or(file.timeout)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    Ok(Settings {
        credentials: Credentials {
            email,
            password: password.into(),
            uuid,
        },
        base_url,
        transport: TransportConfig { timeout },
    })
}

fn missing(field: &'static str, field_env: &'static str) -> CliError {
    CliError::MissingCredential {
        field,
        field_env,
        config_path: config_path().display().to_string(),
    }
}
