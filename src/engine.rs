//! Ranking engine (component C6): hard-rule bucketing, weighted feature
//! scoring, and the final lexicographic tie-breaker ordering.

use std::cmp::Ordering;

use slog::{trace, Logger};

use crate::config::{Configuration, TieBreakerConfig};
use crate::error::Error;
use crate::logging::time;
use crate::model::{Bucket, Entry, RankedEntry, ScoreBreakdown, ScoringContext};
use crate::registry::{build_feature, build_rule, Feature, Rule};

/// A built, ready-to-run instance of the ranking engine: an enabled
/// feature set, hard rules sorted by priority, and the configured
/// tie-breaker chain.
pub struct Engine {
	features: Vec<Feature>,
	rules: Vec<Rule>,
	tie_breakers: Vec<TieBreakerConfig>,
}

impl Engine {
	/// Builds an engine from a validated [`Configuration`]. Callers are
	/// expected to have already run [`Configuration::validate`].
	pub fn build(config: &Configuration) -> Result<Engine, Error> {
		let mut rules: Vec<Rule> = config
			.hard_rules
			.iter()
			.filter(|r| r.enabled)
			.map(build_rule)
			.collect::<Result<_, _>>()?;
		rules.sort_by_key(|r| r.priority);

		let features: Vec<Feature> = config.features.iter().map(build_feature).collect::<Result<_, _>>()?;

		Ok(Engine { features, rules, tie_breakers: config.tie_breakers.clone() })
	}

	/// Scores and orders a candidate vector (spec.md 4.6).
	pub fn rank(&self, candidates: Vec<(Entry, ScoringContext)>) -> Vec<RankedEntry> {
		self.rank_with_logger(candidates, &crate::logging::discard_logger())
	}

	pub fn rank_with_logger(&self, candidates: Vec<(Entry, ScoringContext)>, log: &Logger) -> Vec<RankedEntry> {
		time!(t_rank);
		let mut ranked: Vec<RankedEntry> =
			candidates.into_iter().map(|(entry, ctx)| self.score_one(entry, &ctx)).collect();
		ranked.sort_by(|a, b| self.compare(a, b));
		trace!(log, "ranked {} candidates", ranked.len(); t_rank);
		ranked
	}

	fn score_one(&self, entry: Entry, ctx: &ScoringContext) -> RankedEntry {
		let (bucket, bucket_rule) = self
			.rules
			.iter()
			.find_map(|r| r.matches(&entry, ctx).map(|b| (b, r.name.clone())))
			.unwrap_or((Bucket::default(), "default".to_string()));

		let mut feature_scores = Vec::with_capacity(self.features.len());
		let mut total = 0.0f64;
		for feature in &self.features {
			if !feature.enabled {
				continue;
			}
			let score = feature.evaluate(&entry, ctx);
			feature_scores.push((feature.name.clone(), score));
			total += score;
		}

		RankedEntry {
			score: total,
			bucket,
			match_type: ctx.match_type,
			group_type: crate::model::GroupType::Other,
			breakdown: ScoreBreakdown { total, bucket, bucket_rule, feature_scores },
			entry,
		}
	}

	fn compare(&self, a: &RankedEntry, b: &RankedEntry) -> Ordering {
		a.bucket
			.cmp(&b.bucket)
			.then_with(|| compare_scores_descending(a.score, b.score))
			.then_with(|| self.compare_tie_breakers(a, b))
			.then_with(|| a.entry.id.cmp(&b.entry.id))
	}

	fn compare_tie_breakers(&self, a: &RankedEntry, b: &RankedEntry) -> Ordering {
		for tb in &self.tie_breakers {
			let ascending = tb.ascending().unwrap_or(true);
			let key_a = tie_breaker_key(&a.entry, &tb.field);
			let key_b = tie_breaker_key(&b.entry, &tb.field);
			let ord = key_a.cmp(&key_b);
			let ord = if ascending { ord } else { ord.reverse() };
			if ord != Ordering::Equal {
				return ord;
			}
		}
		Ordering::Equal
	}
}

/// Descending score comparison with the 0.001 floating tolerance from
/// spec.md 4.6.
fn compare_scores_descending(a: f64, b: f64) -> Ordering {
	if (a - b).abs() <= 0.001 {
		Ordering::Equal
	} else {
		b.partial_cmp(&a).unwrap_or(Ordering::Equal)
	}
}

fn tie_breaker_key(entry: &Entry, field: &str) -> i64 {
	match field {
		"frequencyRank" => entry.frequency_rank.map(|f| f as i64).unwrap_or(i64::MAX),
		"surfaceLength" => entry.surface_length() as i64,
		"jlptBonus" => crate::model::jlpt_bonus(entry.jlpt_level) as i64,
		"id" => entry.id,
		"createdAt" => entry.created_at,
		_ => 0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::fallback_configuration;
	use crate::model::{MatchType, Sense};
	use crate::script::ScriptType;

	fn entry(id: i64, headword: &str, freq: Option<u32>) -> Entry {
		Entry {
			id,
			headword: headword.to_string(),
			reading_hiragana: headword.to_string(),
			reading_romaji: String::new(),
			frequency_rank: freq,
			jlpt_level: None,
			pitch_accent: None,
			created_at: id,
			senses: Vec::<Sense>::new(),
			source: "test".to_string(),
		}
	}

	fn ctx(is_exact: bool) -> ScoringContext {
		ScoringContext {
			query_normalized: "x".to_string(),
			script_type: ScriptType::Hiragana,
			match_type: if is_exact { MatchType::Exact } else { MatchType::Prefix },
			is_exact_headword: is_exact,
			is_lemma_match: false,
			use_reverse_search: false,
		}
	}

	#[test]
	fn test_exact_match_outranks_prefix() {
		let config = fallback_configuration();
		let engine = Engine::build(&config).unwrap();
		let candidates = vec![(entry(1, "a", None), ctx(false)), (entry(2, "x", Some(10)), ctx(true))];
		let ranked = engine.rank(candidates);
		assert_eq!(ranked[0].entry.id, 2);
		assert_eq!(ranked[0].bucket, Bucket::A);
	}

	#[test]
	fn test_stable_id_fallback() {
		let config = fallback_configuration();
		let engine = Engine::build(&config).unwrap();
		let candidates = vec![(entry(5, "a", None), ctx(false)), (entry(3, "b", None), ctx(false))];
		let ranked = engine.rank(candidates);
		assert_eq!(ranked[0].entry.id, 3);
		assert_eq!(ranked[1].entry.id, 5);
	}

	#[test]
	fn test_frequency_tie_breaker_orders_ascending() {
		let config = fallback_configuration();
		let engine = Engine::build(&config).unwrap();
		let candidates =
			vec![(entry(1, "a", Some(100)), ctx(false)), (entry(2, "b", Some(5)), ctx(false))];
		let ranked = engine.rank(candidates);
		assert_eq!(ranked[0].entry.id, 2);
	}
}
