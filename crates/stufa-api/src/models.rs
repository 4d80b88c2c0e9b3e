// Portal response types
//
// Every Total Control endpoint wraps its payload the same way:
// `{ "resultCode": 0, "data": ... }` -- zero is the only success value and
// the shape under `data` depends on the endpoint. Fields use
// `#[serde(default)]` liberally because the portal is inconsistent about
// field presence across stove firmware generations.

use serde::Deserialize;

/// Payload of a successful login, under `data`.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// One entry from the `stove-list` roster.
///
/// `stove_state` is the same field→value object `stove-get-state` returns;
/// the roster embeds it so a freshly listed device starts with a usable
/// snapshot. Undocumented fields land in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub serial: String,
    #[serde(rename = "codArt", default)]
    pub cod_art: Option<String>,
    #[serde(rename = "friendlyName", default)]
    pub friendly_name: Option<String>,
    pub mac: String,
    #[serde(rename = "stoveState")]
    pub stove_state: serde_json::Map<String, serde_json::Value>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
