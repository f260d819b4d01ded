// Wire types for the EdgeOS JSON API
//
// The router is loose about types: boolean flags arrive as `true`,
// `"1"`, or `1` depending on endpoint and firmware version, and
// numeric stats arrive as strings. The deserializers here normalize
// those shapes so the rest of the crate sees ordinary Rust types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Response envelope ────────────────────────────────────────────────

/// Uniform envelope for configuration and operation responses.
///
/// `success` and `failure` are never both set by the router; absence
/// of `errors` means no per-node validation failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigResponse {
    /// Operation accepted and committed.
    #[serde(default, deserialize_with = "flag")]
    pub success: bool,

    /// Operation explicitly refused.
    #[serde(default, deserialize_with = "flag")]
    pub failure: bool,

    /// Validation messages keyed by configuration path.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,

    /// Subtree payload on read operations.
    #[serde(rename = "GET", default)]
    pub data: Option<Value>,
}

impl ConfigResponse {
    /// True when the router reported success and no failure flag.
    pub fn is_success(&self) -> bool {
        self.success && !self.failure
    }
}

// ── Batch entries ────────────────────────────────────────────────────

/// Sub-operation kind inside a batch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOp {
    Set,
    Delete,
}

/// One entry in a `/api/edge/batch.json` request.
///
/// `value` is omitted from the wire form entirely when absent; the
/// router rejects explicit nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub op: BatchOp,
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl BatchEntry {
    /// A `set` entry writing `value` at `path`.
    pub fn set(path: Vec<String>, value: Value) -> Self {
        Self {
            op: BatchOp::Set,
            path,
            value: Some(value),
        }
    }

    /// A `delete` entry removing the node at `path`.
    pub fn delete(path: Vec<String>) -> Self {
        Self {
            op: BatchOp::Delete,
            path,
            value: None,
        }
    }
}

// ── Lenient deserializers ────────────────────────────────────────────

/// Accept `true`/`false`, `1`/`0`, and `"1"`/`"0"`/`"true"` as a flag.
pub(crate) fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Flag::deserialize(de)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
        Flag::Str(s) => s == "1" || s.eq_ignore_ascii_case("true"),
    })
}

/// Accept a number or a numeric string.
pub(crate) fn num_str<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct FlagProbe {
        #[serde(deserialize_with = "flag")]
        value: bool,
    }

    #[test]
    fn flag_accepts_every_router_shape() {
        for raw in [json!(true), json!("1"), json!(1), json!("true")] {
            let probe: FlagProbe =
                serde_json::from_value(json!({ "value": raw.clone() })).expect("flag");
            assert!(probe.value, "expected true for {raw}");
        }
        for raw in [json!(false), json!("0"), json!(0), json!("")] {
            let probe: FlagProbe =
                serde_json::from_value(json!({ "value": raw.clone() })).expect("flag");
            assert!(!probe.value, "expected false for {raw}");
        }
    }

    #[test]
    fn config_response_string_flags() {
        let resp: ConfigResponse =
            serde_json::from_value(json!({ "success": "1", "failure": "0" })).expect("decode");
        assert!(resp.is_success());
        assert!(resp.errors.is_none());
    }

    #[test]
    fn config_response_validation_errors() {
        let resp: ConfigResponse = serde_json::from_value(json!({
            "success": "0",
            "failure": "1",
            "errors": { "firewall name WAN_IN": "rule 10 is incomplete" }
        }))
        .expect("decode");
        assert!(!resp.is_success());
        let errors = resp.errors.expect("errors present");
        assert_eq!(
            errors.get("firewall name WAN_IN").map(String::as_str),
            Some("rule 10 is incomplete")
        );
    }

    #[test]
    fn batch_delete_omits_value_on_the_wire() {
        let entry = BatchEntry::delete(vec!["system".into(), "ntp".into()]);
        let wire = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(wire, json!({ "op": "delete", "path": ["system", "ntp"] }));
    }

    #[test]
    fn batch_round_trip_does_not_reintroduce_null() {
        let entry = BatchEntry::delete(vec!["service".into()]);
        let wire = serde_json::to_string(&entry).expect("serialize");
        assert!(!wire.contains("null"), "wire form leaked a null: {wire}");
        let back: BatchEntry = serde_json::from_str(&wire).expect("deserialize");
        assert_eq!(back, entry);
    }
}
