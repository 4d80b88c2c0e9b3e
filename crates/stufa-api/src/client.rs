// Total Control session client
//
// Wraps `reqwest::Client` with the portal's calling convention: every
// endpoint is a POST with its payload as query parameters, answered with
// the `{ resultCode, data }` envelope. Owns the session token and the
// device roster discovered at connect time.
//
// Auth policy: any call that needs a token logs in lazily exactly once if
// the token is absent, and never retries after a failure -- a failed call
// surfaces an error and the next polling cycle re-attempts from scratch.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::device::Device;
use crate::error::Error;
use crate::models::{LoginData, RosterEntry};
use crate::registers::{self, RegisterKey, RegisterValue};
use crate::transport::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://totalcontrol.extraflame.it";

const PATH_LOGIN: &str = "/frontend/index_do.jsp";
const PATH_DEVICE_LIST: &str = "/api/stove-list.jsp";
const PATH_DEVICE_STATE: &str = "/api/stove-get-state.jsp";
const PATH_DEVICE_WRITE: &str = "/api/stove-set-parameter.jsp";

/// Account credentials for the portal.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    /// Caller-chosen installation id, echoed back by the portal. The mobile
    /// app sends a stable per-install UUID here.
    pub uuid: String,
}

/// What went wrong with a single portal call, before the public fold.
///
/// Callers of the authorized operations cannot tell these apart -- they all
/// fold into [`Error::Protocol`]. The distinction exists so `login` can
/// report transport trouble as [`Error::Connect`] and credential rejection
/// as [`Error::Auth`], and so failures log usefully.
#[derive(Debug)]
enum CallFailure {
    Transport(reqwest::Error),
    Status(reqwest::StatusCode),
    Malformed(String),
    Rejected(i64),
}

impl CallFailure {
    fn into_protocol(self) -> Error {
        match self {
            Self::Transport(e) => Error::protocol(format!("transport failure: {e}")),
            Self::Status(status) => Error::protocol(format!("unexpected HTTP status {status}")),
            Self::Malformed(message) => Error::protocol(message),
            Self::Rejected(code) => Error::protocol(format!("portal returned resultCode {code}")),
        }
    }
}

/// One authenticated session against the Total Control portal.
///
/// Holds the token for every device of one account; a failed authorized
/// call drops the token, which forces re-authentication on the next call
/// regardless of which device failed.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    token: Option<String>,
    devices: Vec<Device>,
}

impl CloudClient {
    /// Create a client against the production portal. Does NOT connect --
    /// call [`connect()`](Self::connect) to authenticate and load the roster.
    pub fn new(credentials: Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Self::with_base_url(credentials, base_url, transport)
    }

    /// Create a client against a non-default portal URL (tests, proxies).
    pub fn with_base_url(
        credentials: Credentials,
        base_url: Url,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            credentials,
            token: None,
            devices: Vec::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a session token is currently held.
    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    /// The discovered devices, in roster order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Find a device by serial number or MAC address.
    pub fn device(&self, identifier: &str) -> Option<&Device> {
        self.devices
            .iter()
            .find(|d| d.id == identifier || d.mac == identifier)
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate and load the device roster.
    pub async fn connect(&mut self) -> Result<(), Error> {
        self.login().await?;
        self.refresh_devices().await?;
        Ok(())
    }

    /// Authenticate with the account credentials and store the session token.
    ///
    /// `POST /frontend/index_do.jsp` with `_action=login_json`. On any
    /// failure the token stays unset.
    pub async fn login(&mut self) -> Result<(), Error> {
        let url = self.endpoint(PATH_LOGIN)?;
        debug!(email = %self.credentials.email, "logging in");

        let params = [
            ("_action", "login_json"),
            ("email", self.credentials.email.as_str()),
            ("password", self.credentials.password.expose_secret()),
            ("uuid", self.credentials.uuid.as_str()),
        ];

        let body = match self.call(url, &params).await {
            Ok(body) => body,
            Err(CallFailure::Transport(e)) => return Err(Error::Connect(e)),
            Err(CallFailure::Rejected(code)) => {
                return Err(Error::Auth {
                    message: format!("portal rejected the credentials (resultCode {code})"),
                });
            }
            Err(failure) => return Err(failure.into_protocol()),
        };

        let data: LoginData = extract_data(body)?;
        self.token = Some(data.token);
        debug!("login successful");
        Ok(())
    }

    /// Fetch the account's device roster and rebuild the device list,
    /// preserving roster order.
    ///
    /// `POST /api/stove-list.jsp`
    pub async fn refresh_devices(&mut self) -> Result<(), Error> {
        let token = self.ensure_token().await?;
        let url = self.endpoint(PATH_DEVICE_LIST)?;
        debug!("fetching device roster");

        let body = match self.call(url, &[("token", token.as_str())]).await {
            Ok(body) => body,
            Err(failure) => return Err(self.drop_session(failure)),
        };

        let entries: Vec<RosterEntry> = extract_data(body)?;
        let mut devices = Vec::with_capacity(entries.len());
        for entry in entries {
            devices.push(Device::from_roster(entry)?);
        }
        debug!(count = devices.len(), "device roster refreshed");
        self.devices = devices;
        Ok(())
    }

    // ── Device state ─────────────────────────────────────────────────

    /// Fetch the raw register snapshot for one device.
    ///
    /// `POST /api/stove-get-state.jsp`
    pub async fn fetch_state(
        &mut self,
        mac: &str,
    ) -> Result<BTreeMap<RegisterKey, RegisterValue>, Error> {
        let token = self.ensure_token().await?;
        let url = self.endpoint(PATH_DEVICE_STATE)?;
        debug!(mac, "fetching device state");

        let params = [("token", token.as_str()), ("mac", mac)];
        let body = match self.call(url, &params).await {
            Ok(body) => body,
            Err(failure) => return Err(self.drop_session(failure)),
        };

        let data: serde_json::Map<String, serde_json::Value> = extract_data(body)?;
        registers::snapshot_from_state(&data)
    }

    /// Refresh one device's snapshot in place.
    pub async fn update_device(&mut self, mac: &str) -> Result<(), Error> {
        let state = self.fetch_state(mac).await?;
        if let Some(device) = self.devices.iter_mut().find(|d| d.mac == mac) {
            device.apply_state(state);
        }
        Ok(())
    }

    /// Refresh every device's snapshot, sequentially in roster order.
    pub async fn update(&mut self) -> Result<(), Error> {
        let macs: Vec<String> = self.devices.iter().map(|d| d.mac.clone()).collect();
        for mac in macs {
            self.update_device(&mac).await?;
        }
        Ok(())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Post a raw parameter write. Callers normally go through
    /// [`set_value`](Self::set_value), which validates first.
    ///
    /// `POST /api/stove-set-parameter.jsp`
    pub async fn write_parameter(
        &mut self,
        mac: &str,
        parameter_id: u16,
        value: i64,
    ) -> Result<(), Error> {
        let token = self.ensure_token().await?;
        let url = self.endpoint(PATH_DEVICE_WRITE)?;
        debug!(mac, parameter_id, value, "writing parameter");

        let parameter_id = parameter_id.to_string();
        let value = value.to_string();
        let params = [
            ("token", token.as_str()),
            ("mac", mac),
            ("parameterId", parameter_id.as_str()),
            ("parameterValue", value.as_str()),
        ];
        match self.call(url, &params).await {
            Ok(_) => Ok(()),
            Err(failure) => Err(self.drop_session(failure)),
        }
    }

    /// Validate and write a register value.
    ///
    /// Validation is entirely client-side: an unwritable register or an
    /// out-of-range value never produces an HTTP request. The local
    /// snapshot is NOT updated on success -- the new value becomes visible
    /// on the next fetch.
    pub async fn set_value(
        &mut self,
        mac: &str,
        key: RegisterKey,
        value: f64,
    ) -> Result<(), Error> {
        let (parameter_id, wire) = key.spec().validate_write(value)?;
        self.write_parameter(mac, parameter_id, wire).await
    }

    /// Write a register by enumeration label.
    ///
    /// Reverse-maps the label through the register's label table (first
    /// match wins; tables are label-unique). Unknown labels that parse as
    /// numbers fall through to the ordinary bounds check; anything else is
    /// a validation error.
    pub async fn set_value_label(
        &mut self,
        mac: &str,
        key: RegisterKey,
        label: &str,
    ) -> Result<(), Error> {
        let spec = key.spec();
        #[allow(clippy::cast_precision_loss)]
        let value = match spec.value_for_label(label) {
            Some(raw) => raw as f64,
            None => label.trim().parse::<f64>().map_err(|_| Error::Validation {
                register: spec.field,
                reason: format!("no such label: {label:?}"),
            })?,
        };
        self.set_value(mac, key, value).await
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    /// Return the session token, logging in first if none is held.
    /// Exactly one login attempt; its failure propagates unchanged.
    async fn ensure_token(&mut self) -> Result<String, Error> {
        if self.token.is_none() {
            self.login().await?;
        }
        self.token
            .clone()
            .ok_or_else(|| Error::protocol("login completed without a token"))
    }

    /// Invalidate the session and fold the failure for the caller.
    ///
    /// Coarse-grained on purpose: one failed call re-authenticates the whole
    /// account, not just the failing device.
    fn drop_session(&mut self, failure: CallFailure) -> Error {
        warn!(?failure, "portal call failed, dropping session token");
        self.token = None;
        failure.into_protocol()
    }

    /// One portal round-trip: POST with the payload as query parameters.
    ///
    /// A response is usable only when the HTTP status is exactly OK, the
    /// body parses as JSON, and `resultCode` is zero. Everything else comes
    /// back as a [`CallFailure`].
    async fn call(&self, url: Url, params: &[(&str, &str)]) -> Result<serde_json::Value, CallFailure> {
        let resp = self
            .http
            .post(url.clone())
            .query(params)
            .send()
            .await
            .map_err(CallFailure::Transport)?;

        let status = resp.status();
        debug!(%url, %status, "portal response");
        if status != reqwest::StatusCode::OK {
            return Err(CallFailure::Status(status));
        }

        let body = resp.text().await.map_err(CallFailure::Transport)?;
        let json: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            CallFailure::Malformed(format!("response is not JSON: {e} (body preview: {preview:?})"))
        })?;

        match json.get("resultCode").and_then(serde_json::Value::as_i64) {
            Some(0) => Ok(json),
            Some(code) => Err(CallFailure::Rejected(code)),
            None => Err(CallFailure::Malformed("response has no resultCode".into())),
        }
    }
}

/// Pull the typed `data` payload out of an envelope that already passed
/// the `resultCode` check.
fn extract_data<T: DeserializeOwned>(mut body: serde_json::Value) -> Result<T, Error> {
    let data = body
        .get_mut("data")
        .map(serde_json::Value::take)
        .ok_or_else(|| Error::protocol("response has no data field"))?;
    serde_json::from_value(data).map_err(|e| Error::protocol(format!("unexpected data payload: {e}")))
}
