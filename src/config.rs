use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::shared::BusError;

/// Environment variable holding the bus name
pub const ENV_NAME: &str = "EVENTBUS_NAME";
/// Environment variable holding the dispatch policy (`fail-stop` or `isolate`)
pub const ENV_DISPATCH: &str = "EVENTBUS_DISPATCH";

/// How an event source reacts when a listener fails during `fire`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DispatchPolicy {
    /// The first failing listener aborts the dispatch; its error goes to the poster
    /// and later listeners are not notified.
    #[default]
    FailStop,
    /// Every listener is notified; failures (panics included) are collected and
    /// returned together once the dispatch completes.
    Isolate,
}

/// Settings for an [`EventBus`](crate::EventBus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub name: String,
    pub dispatch: DispatchPolicy,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            dispatch: DispatchPolicy::default(),
        }
    }
}

impl BusConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dispatch(mut self, dispatch: DispatchPolicy) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Builds a config from `EVENTBUS_NAME` and `EVENTBUS_DISPATCH`
    ///
    /// Unset variables keep their defaults; an unknown policy is an error.
    pub fn from_env() -> Result<Self, BusError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Parses a JSON document such as `{"name": "ui", "dispatch": "isolate"}`
    pub fn from_json(json: &str) -> Result<Self, BusError> {
        serde_json::from_str(json).map_err(|e| BusError::Config(format!("invalid JSON: {}", e)))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BusError> {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_NAME).filter(|n| !n.trim().is_empty()) {
            config.name = name;
        }

        if let Some(raw) = lookup(ENV_DISPATCH) {
            config.dispatch = DispatchPolicy::from_str(raw.trim()).map_err(|_| {
                BusError::Config(format!("{} has unknown dispatch policy '{}'", ENV_DISPATCH, raw))
            })?;
        }

        debug!(name = %config.name, dispatch = %config.dispatch, "Loaded bus configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BusConfig::default();
        assert_eq!(config.name, "default");
        assert_eq!(config.dispatch, DispatchPolicy::FailStop);
    }

    #[rstest]
    #[case("fail-stop", DispatchPolicy::FailStop)]
    #[case("isolate", DispatchPolicy::Isolate)]
    #[case(" isolate ", DispatchPolicy::Isolate)]
    fn test_dispatch_from_env(#[case] raw: &str, #[case] expected: DispatchPolicy) {
        let config = BusConfig::from_lookup(lookup_from(&[(ENV_DISPATCH, raw)])).unwrap();
        assert_eq!(config.dispatch, expected);
    }

    #[test]
    fn test_name_from_env() {
        let config = BusConfig::from_lookup(lookup_from(&[(ENV_NAME, "wizard")])).unwrap();
        assert_eq!(config.name, "wizard");
        assert_eq!(config.dispatch, DispatchPolicy::FailStop);
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let config = BusConfig::from_lookup(lookup_from(&[(ENV_NAME, "  ")])).unwrap();
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_unknown_dispatch_is_config_error() {
        let result = BusConfig::from_lookup(lookup_from(&[(ENV_DISPATCH, "retry")]));
        assert!(matches!(result, Err(BusError::Config(_))));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = BusConfig::from_json(r#"{"dispatch": "isolate"}"#).unwrap();
        assert_eq!(config.name, "default");
        assert_eq!(config.dispatch, DispatchPolicy::Isolate);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            BusConfig::from_json("{not json"),
            Err(BusError::Config(_))
        ));
    }

    #[test]
    fn test_policy_display_matches_serde() {
        assert_eq!(DispatchPolicy::FailStop.to_string(), "fail-stop");
        assert_eq!(
            serde_json::to_string(&DispatchPolicy::Isolate).unwrap(),
            "\"isolate\""
        );
    }
}
