//! Configuration loading and hot-swap management (component C7).
//!
//! Mirrors the teacher's `data_directory()` upward-search idiom for
//! locating a user-writable override, generalized into a fallback chain
//! of override -> bundled resource -> hard-coded minimal configuration.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use slog::{info, o, Logger};

use crate::error::Error;

pub const DEFAULT_PROFILE: &str = "default";

const DEFAULT_CONFIG_JSON: &str = include_str!("../config/ranking_config_default.json");

const VALID_TIE_BREAKER_FIELDS: &[&str] = &["frequencyRank", "surfaceLength", "jlptBonus", "id", "createdAt"];

/// A feature registration in a [`Configuration`]: an untyped parameter
/// bag, decoded by the registry's builder for `type_name` into a typed
/// parameter record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureConfig {
	#[serde(rename = "type")]
	pub type_name: String,
	pub weight: f64,
	#[serde(rename = "minScore")]
	pub min_score: f64,
	#[serde(rename = "maxScore")]
	pub max_score: f64,
	pub enabled: bool,
	#[serde(default)]
	pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A hard-rule registration in a [`Configuration`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HardRuleConfig {
	#[serde(rename = "type")]
	pub type_name: String,
	pub priority: i64,
	pub enabled: bool,
	#[serde(default)]
	pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A single tie-breaker step. `order` is kept as a raw string (rather
/// than an enum) so an invalid value surfaces as the typed
/// [`Error::InvalidTieBreakerOrder`] during [`Configuration::validate`]
/// instead of a generic deserialization failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TieBreakerConfig {
	pub field: String,
	pub order: String,
}

impl TieBreakerConfig {
	pub fn ascending(&self) -> Result<bool, Error> {
		match self.order.as_str() {
			"ascending" => Ok(true),
			"descending" => Ok(false),
			_ => Err(Error::InvalidTieBreakerOrder { order: self.order.clone() }),
		}
	}
}

/// A complete, JSON-serializable ranking configuration (spec.md 6's
/// "Configuration format").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
	pub version: String,
	pub profile: String,
	#[serde(rename = "useLegacyScorer", default)]
	pub use_legacy_scorer: bool,
	pub features: Vec<FeatureConfig>,
	#[serde(rename = "hardRules")]
	pub hard_rules: Vec<HardRuleConfig>,
	#[serde(rename = "tieBreakers")]
	pub tie_breakers: Vec<TieBreakerConfig>,
}

impl Configuration {
	/// Validates score ranges, weight bounds, unique enabled-rule
	/// priorities, and tie-breaker field/order validity (spec.md 4.7).
	/// A configuration must pass this before being handed to the ranking
	/// engine.
	pub fn validate(&self) -> Result<(), Error> {
		for feature in &self.features {
			if feature.min_score > feature.max_score {
				return Err(Error::InvalidRange {
					name: feature.type_name.clone(),
					min: feature.min_score,
					max: feature.max_score,
				});
			}
			if !(0.0..=10.0).contains(&feature.weight) {
				return Err(Error::InvalidWeight { name: feature.type_name.clone(), weight: feature.weight });
			}
		}

		let mut seen_priorities = std::collections::HashSet::new();
		for rule in &self.hard_rules {
			if !rule.enabled {
				continue;
			}
			if !seen_priorities.insert(rule.priority) {
				return Err(Error::DuplicatePriorities { priority: rule.priority });
			}
		}

		for tb in &self.tie_breakers {
			if !VALID_TIE_BREAKER_FIELDS.contains(&tb.field.as_str()) {
				return Err(Error::InvalidTieBreakerField { field: tb.field.clone() });
			}
			tb.ascending()?;
		}

		Ok(())
	}
}

fn override_dir() -> Option<PathBuf> {
	std::env::var_os("KOTOBA_RANK_CONFIG_DIR").map(PathBuf::from)
}

fn override_path(profile: &str) -> Option<PathBuf> {
	override_dir().map(|dir| dir.join(format!("ranking_config_{}.json", profile)))
}

fn bundled_resource(profile: &str) -> Option<&'static str> {
	match profile {
		DEFAULT_PROFILE => Some(DEFAULT_CONFIG_JSON),
		_ => None,
	}
}

fn parse_and_validate(json: &str) -> Result<Configuration, Error> {
	let config: Configuration =
		serde_json::from_str(json).map_err(|e| Error::SchemaMismatch { message: e.to_string() })?;
	config.validate()?;
	Ok(config)
}

/// The last-resort configuration: always available, never fails to
/// validate. Used when neither an override file nor a bundled resource
/// can be found for any profile.
pub fn fallback_configuration() -> Configuration {
	Configuration {
		version: "1.0".to_string(),
		profile: "fallback".to_string(),
		use_legacy_scorer: false,
		features: vec![
			FeatureConfig {
				type_name: "exactMatch".to_string(),
				weight: 1.0,
				min_score: 0.0,
				max_score: 100.0,
				enabled: true,
				parameters: None,
			},
			FeatureConfig {
				type_name: "prefixMatch".to_string(),
				weight: 1.0,
				min_score: 0.0,
				max_score: 30.0,
				enabled: true,
				parameters: None,
			},
		],
		hard_rules: vec![
			HardRuleConfig { type_name: "exactMatchBucket".to_string(), priority: 1, enabled: true, parameters: None },
			HardRuleConfig { type_name: "lemmaMatchBucket".to_string(), priority: 2, enabled: true, parameters: None },
		],
		tie_breakers: vec![
			TieBreakerConfig { field: "frequencyRank".to_string(), order: "ascending".to_string() },
			TieBreakerConfig { field: "id".to_string(), order: "ascending".to_string() },
		],
	}
}

/// Loads a [`Configuration`] following the fallback chain described in
/// spec.md 4.7: user override, bundled resource, default profile, and
/// finally the hard-coded [`fallback_configuration`].
pub fn load(profile: Option<&str>) -> Result<Configuration, Error> {
	load_with_logger(profile, &crate::logging::discard_logger())
}

pub fn load_with_logger(profile: Option<&str>, log: &Logger) -> Result<Configuration, Error> {
	let profile = profile.unwrap_or(DEFAULT_PROFILE);
	let log = log.new(o!("profile" => profile.to_string()));

	if let Some(path) = override_path(profile) {
		if let Ok(text) = std::fs::read_to_string(&path) {
			info!(log, "loaded configuration override"; "path" => path.display().to_string());
			return parse_and_validate(&text);
		}
	}

	if let Some(json) = bundled_resource(profile) {
		info!(log, "loaded bundled configuration");
		return parse_and_validate(json);
	}

	if profile != DEFAULT_PROFILE {
		info!(log, "profile not found, falling back to default profile");
		return load_with_logger(Some(DEFAULT_PROFILE), &log);
	}

	info!(log, "no override or bundled resource found, using hard-coded fallback configuration");
	Ok(fallback_configuration())
}

/// Read-biased manager for the currently active configuration: readers
/// snapshot an `Arc<Configuration>` without blocking; `switch_profile`
/// and `reload` publish a new snapshot atomically, so in-flight queries
/// finish under whichever configuration they started with.
pub struct ConfigManager {
	active: RwLock<Arc<Configuration>>,
	profile: RwLock<String>,
	log: Logger,
}

impl ConfigManager {
	pub fn new(profile: Option<&str>) -> Result<ConfigManager, Error> {
		Self::with_logger(profile, crate::logging::discard_logger())
	}

	pub fn with_logger(profile: Option<&str>, log: Logger) -> Result<ConfigManager, Error> {
		let profile_name = profile.unwrap_or(DEFAULT_PROFILE).to_string();
		let config = load_with_logger(profile.or(Some(DEFAULT_PROFILE)), &log)?;
		Ok(ConfigManager {
			active: RwLock::new(Arc::new(config)),
			profile: RwLock::new(profile_name),
			log,
		})
	}

	/// Returns the currently active configuration without blocking
	/// concurrent writers for longer than a pointer clone.
	pub fn snapshot(&self) -> Arc<Configuration> {
		self.active.read().expect("config lock poisoned").clone()
	}

	pub fn is_using_legacy_scorer(&self) -> bool {
		self.snapshot().use_legacy_scorer
	}

	/// Loads and publishes the configuration for a new profile.
	pub fn switch_profile(&self, profile: &str) -> Result<(), Error> {
		let config = load_with_logger(Some(profile), &self.log)?;
		*self.active.write().expect("config lock poisoned") = Arc::new(config);
		*self.profile.write().expect("config lock poisoned") = profile.to_string();
		Ok(())
	}

	/// Re-runs the fallback chain for the current profile and publishes
	/// the result, picking up any override file changes.
	pub fn reload(&self) -> Result<(), Error> {
		let profile = self.profile.read().expect("config lock poisoned").clone();
		let config = load_with_logger(Some(&profile), &self.log)?;
		*self.active.write().expect("config lock poisoned") = Arc::new(config);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_load_default_bundled() {
		let config = load(None).unwrap();
		assert_eq!(config.profile, "default");
		assert!(config.features.iter().any(|f| f.type_name == "exactMatch"));
	}

	#[test]
	fn test_unknown_profile_falls_back_to_default() {
		let config = load(Some("nonexistent-profile")).unwrap();
		assert_eq!(config.profile, "default");
	}

	#[test]
	fn test_fallback_configuration_validates() {
		assert!(fallback_configuration().validate().is_ok());
	}

	#[test]
	fn test_validate_rejects_duplicate_priorities() {
		let mut config = fallback_configuration();
		config.hard_rules[1].priority = config.hard_rules[0].priority;
		assert!(matches!(config.validate(), Err(Error::DuplicatePriorities { .. })));
	}

	#[test]
	fn test_validate_rejects_bad_range() {
		let mut config = fallback_configuration();
		config.features[0].min_score = 50.0;
		config.features[0].max_score = 10.0;
		assert!(matches!(config.validate(), Err(Error::InvalidRange { .. })));
	}

	#[test]
	fn test_validate_rejects_unknown_tie_breaker_field() {
		let mut config = fallback_configuration();
		config.tie_breakers.push(TieBreakerConfig { field: "bogus".to_string(), order: "ascending".to_string() });
		assert!(matches!(config.validate(), Err(Error::InvalidTieBreakerField { .. })));
	}

	#[test]
	fn test_config_manager_switch_profile() {
		let manager = ConfigManager::new(None).unwrap();
		assert_eq!(manager.snapshot().profile, "default");
		manager.switch_profile("nonexistent-profile").unwrap();
		assert_eq!(manager.snapshot().profile, "default");
	}
}
