//! Feature & rule registry (component C5): builder functions that decode
//! the untyped configuration parameter bags into typed, evaluable
//! features and hard rules.

use serde_json::Value;

use crate::config::{FeatureConfig, HardRuleConfig};
use crate::error::Error;
use crate::model::{Bucket, Entry, JlptLevel, ScoringContext};

const EXPRESSION_MARKERS: &[&str] =
	&["expression", "expressions", "phrase", "idiom", "saying", "proverb", "成句", "慣用句", "熟語"];
const DOMAIN_MARKERS: &[&str] = &[
	"medicine", "law", "chemistry", "physics", "biology", "botany", "zoology", "mathematics", "computing", "医学",
	"法律", "化学", "物理学", "生物学", "植物学", "動物学", "数学", "電算機",
];
const ARCHAIC_MARKERS: &[&str] = &["archaic", "obsolete", "rare", "old-fashioned", "dated", "古語", "廃語"];
const VULGAR_MARKERS: &[&str] = &["vulgar", "slang", "crude", "derogatory", "俗語", "卑語"];

fn sense_text(entry: &Entry) -> String {
	entry
		.senses
		.iter()
		.flat_map(|s| [s.part_of_speech.as_str(), s.usage_notes.as_deref().unwrap_or("")])
		.collect::<Vec<_>>()
		.join(";")
}

fn has_marker(entry: &Entry, markers: &[&str]) -> bool {
	let text = sense_text(entry).to_lowercase();
	markers.iter().any(|m| text.contains(&m.to_lowercase()))
}

fn is_expression(entry: &Entry) -> bool {
	entry.headword.contains(' ') || entry.headword.contains('・') || has_marker(entry, EXPRESSION_MARKERS)
}

// -- Parameter extraction -----------------------------------------------

type Params = Option<serde_json::Map<String, Value>>;

fn require_params<'a>(type_name: &str, params: &'a Params) -> Result<&'a serde_json::Map<String, Value>, Error> {
	params.as_ref().ok_or_else(|| Error::MissingParameters { type_name: type_name.to_string() })
}

fn get_str(type_name: &str, params: &Params, name: &str) -> Result<String, Error> {
	let params = require_params(type_name, params)?;
	let value = params
		.get(name)
		.ok_or_else(|| Error::MissingParameter { type_name: type_name.to_string(), name: name.to_string() })?;
	value
		.as_str()
		.map(|s| s.to_string())
		.ok_or_else(|| Error::InvalidParameterType { type_name: type_name.to_string(), name: name.to_string() })
}

fn get_f64_or(type_name: &str, params: &Params, name: &str, default: f64) -> Result<f64, Error> {
	let params = match params {
		Some(p) => p,
		None => return Ok(default),
	};
	match params.get(name) {
		None => Ok(default),
		Some(v) => v
			.as_f64()
			.ok_or_else(|| Error::InvalidParameterType { type_name: type_name.to_string(), name: name.to_string() }),
	}
}

fn get_u32_or(type_name: &str, params: &Params, name: &str, default: u32) -> Result<u32, Error> {
	let params = match params {
		Some(p) => p,
		None => return Ok(default),
	};
	match params.get(name) {
		None => Ok(default),
		Some(v) => v
			.as_u64()
			.map(|n| n as u32)
			.ok_or_else(|| Error::InvalidParameterType { type_name: type_name.to_string(), name: name.to_string() }),
	}
}

// -- Features -------------------------------------------------------------

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Smoothing {
	Stepwise,
	Linear,
	Logarithmic,
	Sigmoid,
}

#[derive(Clone, Debug)]
pub struct FrequencyParams {
	pub smoothing: Smoothing,
	pub midpoint: f64,
	/// The feature's configured `maxScore`, threaded in so the raw curve's
	/// ceiling tracks the feature's own range instead of a hardcoded 15.0
	/// (spec.md:217's formula is parametric in `max_score`).
	pub max_score: f64,
}

#[derive(Clone, Debug)]
pub enum FeatureKind {
	ExactMatch,
	LemmaMatch,
	PrefixMatch,
	ContainsMatch,
	Jlpt,
	Frequency(FrequencyParams),
	PosPriority,
	CommonWord,
	EntryType,
	SurfaceLength,
	CommonPatternPenalty,
	RareWordPenalty,
	ArchaicWordPenalty,
	SpecializedDomainPenalty,
	VulgarSlangPenalty,
}

/// A constructed, ready-to-evaluate scoring feature.
#[derive(Clone, Debug)]
pub struct Feature {
	pub name: String,
	pub weight: f64,
	pub min_score: f64,
	pub max_score: f64,
	pub enabled: bool,
	pub kind: FeatureKind,
}

impl Feature {
	/// `clamp(weight * raw, min_score, max_score)`, or `0.0` when disabled.
	pub fn evaluate(&self, entry: &Entry, ctx: &ScoringContext) -> f64 {
		if !self.enabled {
			return 0.0;
		}
		let raw = self.raw(entry, ctx);
		(self.weight * raw).clamp(self.min_score, self.max_score)
	}

	fn raw(&self, entry: &Entry, ctx: &ScoringContext) -> f64 {
		use crate::model::MatchType;
		match &self.kind {
			FeatureKind::ExactMatch => {
				if ctx.is_exact_headword {
					100.0
				} else {
					0.0
				}
			}
			FeatureKind::LemmaMatch => {
				if ctx.is_lemma_match && !ctx.is_exact_headword {
					35.0
				} else {
					0.0
				}
			}
			FeatureKind::PrefixMatch => {
				if ctx.match_type == MatchType::Prefix {
					30.0
				} else {
					0.0
				}
			}
			FeatureKind::ContainsMatch => {
				if ctx.match_type == MatchType::Contains {
					10.0
				} else {
					0.0
				}
			}
			FeatureKind::Jlpt => match entry.jlpt_level {
				Some(JlptLevel::N5) => 10.0,
				Some(JlptLevel::N4) => 7.0,
				Some(JlptLevel::N3) => 4.0,
				Some(JlptLevel::N2) => 2.0,
				Some(JlptLevel::N1) => 0.0,
				None => 0.0,
			},
			FeatureKind::Frequency(params) => frequency_raw(entry.frequency_rank, params),
			FeatureKind::PosPriority => pos_priority_raw(entry),
			FeatureKind::CommonWord => {
				if entry.frequency_rank.map(|f| f <= 500).unwrap_or(false) {
					5.0
				} else {
					0.0
				}
			}
			FeatureKind::EntryType => {
				if is_expression(entry) {
					0.0
				} else {
					4.0
				}
			}
			FeatureKind::SurfaceLength => -(entry.surface_length().min(5) as f64),
			FeatureKind::CommonPatternPenalty => {
				if entry.headword.contains('〜') || entry.headword.contains('~') {
					-10.0
				} else {
					0.0
				}
			}
			FeatureKind::RareWordPenalty => {
				if entry.frequency_rank.map(|f| f > 20000).unwrap_or(true) {
					-8.0
				} else {
					0.0
				}
			}
			FeatureKind::ArchaicWordPenalty => {
				if has_marker(entry, ARCHAIC_MARKERS) {
					-12.0
				} else {
					0.0
				}
			}
			FeatureKind::SpecializedDomainPenalty => {
				if has_marker(entry, DOMAIN_MARKERS) {
					-6.0
				} else {
					0.0
				}
			}
			FeatureKind::VulgarSlangPenalty => {
				if has_marker(entry, VULGAR_MARKERS) {
					-8.0
				} else {
					0.0
				}
			}
		}
	}
}

fn pos_priority_raw(entry: &Entry) -> f64 {
	let text = sense_text(entry).to_lowercase();
	if text.contains("verb") {
		8.0
	} else if text.contains("adj") {
		6.0
	} else if text.contains("noun") {
		4.0
	} else if text.contains("particle") {
		2.0
	} else {
		0.0
	}
}

fn frequency_raw(rank: Option<u32>, params: &FrequencyParams) -> f64 {
	let rank = match rank {
		Some(r) => r as f64,
		None => return 0.0,
	};
	let max = params.max_score;
	// Stepwise/linear/logarithmic keep their legacy 0..15 curve shape and
	// scale it proportionally to the configured ceiling; sigmoid follows
	// spec.md's literal formula, which is parametric in max_score directly.
	let scale = max / 15.0;
	match params.smoothing {
		Smoothing::Stepwise => {
			let base = if rank <= 500.0 {
				15.0
			} else if rank <= 2000.0 {
				10.0
			} else if rank <= 10000.0 {
				5.0
			} else {
				0.0
			};
			base * scale
		}
		Smoothing::Linear => (15.0 - rank / 1000.0).max(0.0) * scale,
		Smoothing::Logarithmic => (15.0 - (rank + 1.0).ln() * 2.0).max(0.0) * scale,
		Smoothing::Sigmoid => max / (1.0 + ((rank + 1.0).ln() - params.midpoint).exp()),
	}
}

/// Decodes a [`FeatureConfig`] into a typed, evaluable [`Feature`].
pub fn build_feature(config: &FeatureConfig) -> Result<Feature, Error> {
	let kind = match config.type_name.as_str() {
		"exactMatch" => FeatureKind::ExactMatch,
		"lemmaMatch" => FeatureKind::LemmaMatch,
		"prefixMatch" => FeatureKind::PrefixMatch,
		"containsMatch" => FeatureKind::ContainsMatch,
		"jlpt" => FeatureKind::Jlpt,
		"frequency" => {
			let smoothing = match get_str("frequency", &config.parameters, "smoothing")?.as_str() {
				"stepwise" => Smoothing::Stepwise,
				"linear" => Smoothing::Linear,
				"logarithmic" => Smoothing::Logarithmic,
				"sigmoid" => Smoothing::Sigmoid,
				_ => {
					return Err(Error::InvalidParameterType {
						type_name: "frequency".to_string(),
						name: "smoothing".to_string(),
					})
				}
			};
			let midpoint = get_f64_or("frequency", &config.parameters, "midpoint", 5.0)?;
			FeatureKind::Frequency(FrequencyParams { smoothing, midpoint, max_score: config.max_score })
		}
		"posPriority" => FeatureKind::PosPriority,
		"commonWord" => FeatureKind::CommonWord,
		"entryType" => FeatureKind::EntryType,
		"surfaceLength" => FeatureKind::SurfaceLength,
		"commonPatternPenalty" => FeatureKind::CommonPatternPenalty,
		"rareWordPenalty" => FeatureKind::RareWordPenalty,
		"archaicWordPenalty" => FeatureKind::ArchaicWordPenalty,
		"specializedDomainPenalty" => FeatureKind::SpecializedDomainPenalty,
		"vulgarSlangPenalty" => FeatureKind::VulgarSlangPenalty,
		other => return Err(Error::UnknownFeatureType { type_name: other.to_string() }),
	};

	Ok(Feature {
		name: config.type_name.clone(),
		weight: config.weight,
		min_score: config.min_score,
		max_score: config.max_score,
		enabled: config.enabled,
		kind,
	})
}

// -- Hard rules -----------------------------------------------------------

#[derive(Clone, Debug)]
pub enum RuleKind {
	ExactMatchBucket,
	LemmaMatchBucket,
	ExpressionBucket,
	CommonPrefixBucket { max_frequency_rank: u32 },
	JlptBucket,
	SpecializedDomainBucket,
	ArchaicWordBucket,
}

/// A constructed, ready-to-evaluate hard rule.
#[derive(Clone, Debug)]
pub struct Rule {
	pub name: String,
	pub priority: i64,
	pub enabled: bool,
	pub kind: RuleKind,
}

impl Rule {
	/// Returns the bucket this rule assigns, if its condition holds.
	pub fn matches(&self, entry: &Entry, ctx: &ScoringContext) -> Option<Bucket> {
		if !self.enabled {
			return None;
		}
		use crate::model::MatchType;
		match &self.kind {
			RuleKind::ExactMatchBucket => ctx.is_exact_headword.then_some(Bucket::A),
			RuleKind::LemmaMatchBucket => (ctx.is_lemma_match && !ctx.is_exact_headword).then_some(Bucket::A),
			RuleKind::ExpressionBucket => is_expression(entry).then_some(Bucket::B),
			RuleKind::CommonPrefixBucket { max_frequency_rank } => {
				let is_common_prefix = ctx.match_type == MatchType::Prefix
					&& entry.frequency_rank.map(|f| f <= *max_frequency_rank).unwrap_or(false);
				is_common_prefix.then_some(Bucket::B)
			}
			RuleKind::JlptBucket => {
				matches!(entry.jlpt_level, Some(JlptLevel::N5) | Some(JlptLevel::N4)).then_some(Bucket::B)
			}
			RuleKind::SpecializedDomainBucket => has_marker(entry, DOMAIN_MARKERS).then_some(Bucket::D),
			RuleKind::ArchaicWordBucket => has_marker(entry, ARCHAIC_MARKERS).then_some(Bucket::D),
		}
	}
}

/// Decodes a [`HardRuleConfig`] into a typed, evaluable [`Rule`].
pub fn build_rule(config: &HardRuleConfig) -> Result<Rule, Error> {
	let kind = match config.type_name.as_str() {
		"exactMatchBucket" => RuleKind::ExactMatchBucket,
		"lemmaMatchBucket" => RuleKind::LemmaMatchBucket,
		"expressionBucket" => RuleKind::ExpressionBucket,
		"commonPrefixBucket" => {
			let max_frequency_rank = get_u32_or("commonPrefixBucket", &config.parameters, "maxFrequencyRank", 2000)?;
			RuleKind::CommonPrefixBucket { max_frequency_rank }
		}
		"jlptBucket" => RuleKind::JlptBucket,
		"specializedDomainBucket" => RuleKind::SpecializedDomainBucket,
		"archaicWordBucket" => RuleKind::ArchaicWordBucket,
		other => return Err(Error::UnknownRuleType { type_name: other.to_string() }),
	};

	Ok(Rule { name: config.type_name.clone(), priority: config.priority, enabled: config.enabled, kind })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Example, MatchType, Sense};
	use crate::script::ScriptType;

	fn entry(headword: &str, jlpt: Option<JlptLevel>, freq: Option<u32>) -> Entry {
		Entry {
			id: 1,
			headword: headword.to_string(),
			reading_hiragana: String::new(),
			reading_romaji: String::new(),
			frequency_rank: freq,
			jlpt_level: jlpt,
			pitch_accent: None,
			created_at: 0,
			senses: Vec::<Sense>::new(),
			source: "test".to_string(),
		}
	}

	fn ctx(exact: bool, match_type: MatchType) -> ScoringContext {
		ScoringContext {
			query_normalized: "x".to_string(),
			script_type: ScriptType::Hiragana,
			match_type,
			is_exact_headword: exact,
			is_lemma_match: false,
			use_reverse_search: false,
		}
	}

	#[test]
	fn test_build_feature_unknown() {
		let config = FeatureConfig {
			type_name: "bogus".to_string(),
			weight: 1.0,
			min_score: 0.0,
			max_score: 1.0,
			enabled: true,
			parameters: None,
		};
		assert!(matches!(build_feature(&config), Err(Error::UnknownFeatureType { .. })));
	}

	#[test]
	fn test_build_feature_frequency_missing_param() {
		let config = FeatureConfig {
			type_name: "frequency".to_string(),
			weight: 1.0,
			min_score: 0.0,
			max_score: 15.0,
			enabled: true,
			parameters: None,
		};
		assert!(matches!(build_feature(&config), Err(Error::MissingParameters { .. })));
	}

	#[test]
	fn test_exact_match_feature() {
		let config = FeatureConfig {
			type_name: "exactMatch".to_string(),
			weight: 1.0,
			min_score: 0.0,
			max_score: 100.0,
			enabled: true,
			parameters: None,
		};
		let feature = build_feature(&config).unwrap();
		let e = entry("食べる", None, None);
		assert_eq!(feature.evaluate(&e, &ctx(true, MatchType::Exact)), 100.0);
		assert_eq!(feature.evaluate(&e, &ctx(false, MatchType::Prefix)), 0.0);
	}

	#[test]
	fn test_exact_match_bucket_rule() {
		let config = HardRuleConfig { type_name: "exactMatchBucket".to_string(), priority: 1, enabled: true, parameters: None };
		let rule = build_rule(&config).unwrap();
		let e = entry("食べる", None, None);
		assert_eq!(rule.matches(&e, &ctx(true, MatchType::Exact)), Some(Bucket::A));
		assert_eq!(rule.matches(&e, &ctx(false, MatchType::Prefix)), None);
	}

	#[test]
	fn test_jlpt_bucket_rule() {
		let config = HardRuleConfig { type_name: "jlptBucket".to_string(), priority: 5, enabled: true, parameters: None };
		let rule = build_rule(&config).unwrap();
		let e = entry("火", Some(JlptLevel::N5), None);
		assert_eq!(rule.matches(&e, &ctx(false, MatchType::Prefix)), Some(Bucket::B));
	}

	#[test]
	fn test_archaic_word_bucket() {
		let mut e = entry("古語", None, None);
		e.senses.push(Sense {
			id: 1,
			entry_id: 1,
			sense_order: 1,
			definition_english: "an archaic word".to_string(),
			definition_chinese_simplified: None,
			definition_chinese_traditional: None,
			part_of_speech: "noun".to_string(),
			usage_notes: Some("archaic".to_string()),
			examples: Vec::<Example>::new(),
		});
		let config =
			HardRuleConfig { type_name: "archaicWordBucket".to_string(), priority: 7, enabled: true, parameters: None };
		let rule = build_rule(&config).unwrap();
		assert_eq!(rule.matches(&e, &ctx(false, MatchType::Contains)), Some(Bucket::D));
	}
}
