//! The public search operation (spec.md 6): the only surface of the
//! ranking core. Glues query classification/normalization/intent
//! resolution (C1-C3), candidate retrieval (C4), the configured ranking
//! engine (C5/C6), the virtual-entry injector (C8), and the result
//! classifier (C9) into one call.

use slog::{o, trace, Logger};

use crate::classify;
use crate::config::ConfigManager;
use crate::engine::Engine;
use crate::error::Error;
use crate::intent;
use crate::kana::normalize;
use crate::logging::time;
use crate::model::{Bucket, Entry, GroupType, MatchType, ScoreBreakdown, ScoringContext};
use crate::retrieval;
use crate::script::{self, ScriptType};
use crate::store::Store;
use crate::virtual_entry;

/// A single result row, exposed to callers (spec.md 6).
#[derive(Clone, Debug)]
pub struct RankedResult {
	pub entry: Entry,
	pub match_type: MatchType,
	pub bucket: Bucket,
	pub group_type: GroupType,
	pub relevance_score: f64,
	pub breakdown: Option<ScoreBreakdown>,
}

/// Whether a search should carry its per-entry [`ScoreBreakdown`] (C10),
/// which is otherwise computed and discarded.
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchOptions {
	pub include_breakdown: bool,
}

/// Runs the public search operation (spec.md 6) against the currently
/// active configuration.
pub fn search(
	store: &dyn Store,
	config_manager: &ConfigManager,
	query: &str,
	max_results: usize,
) -> Result<Vec<RankedResult>, Error> {
	search_with(store, config_manager, query, max_results, SearchOptions::default(), &crate::logging::discard_logger())
}

pub fn search_with(
	store: &dyn Store,
	config_manager: &ConfigManager,
	query: &str,
	max_results: usize,
	options: SearchOptions,
	log: &Logger,
) -> Result<Vec<RankedResult>, Error> {
	let trimmed = query.trim();
	if trimmed.is_empty() {
		return Ok(Vec::new());
	}
	normalize::check_length(trimmed)?;

	let max_results = max_results.clamp(1, 100);
	let log = log.new(o!("query" => trimmed.to_string()));
	time!(t_search);

	let script_type = script::classify(trimmed);
	let sanitized = normalize::sanitize(trimmed)?;
	let is_english =
		script_type == ScriptType::Romaji && intent::is_likely_english(&sanitized.to_lowercase());
	let normalized = normalize::normalize_query(&sanitized, script_type, is_english);

	let resolved_intent = intent::resolve(&normalized, script_type);

	let raw_entries = if resolved_intent.use_reverse_search {
		retrieval::reverse_search(
			store,
			&normalized,
			max_results,
			resolved_intent.is_english,
			resolved_intent.hint.as_deref(),
			&resolved_intent.core_set,
		)?
	} else {
		let mut forward = retrieval::forward_search(store, &normalized, max_results)?;
		virtual_entry::inject(&normalized, &mut forward);
		forward
	};

	let candidates: Vec<(Entry, ScoringContext)> = raw_entries
		.into_iter()
		.map(|entry| {
			let is_exact_headword = entry.headword == normalized || retrieval::suru_override(&entry.headword, &normalized);
			let is_lemma_match = !is_exact_headword
				&& (entry.reading_hiragana == normalized || entry.reading_romaji == normalized);
			let match_type = if is_exact_headword {
				MatchType::Exact
			} else if entry.headword.starts_with(&normalized) || entry.reading_hiragana.starts_with(&normalized) {
				MatchType::Prefix
			} else {
				MatchType::Contains
			};
			let ctx = ScoringContext {
				query_normalized: normalized.clone(),
				script_type,
				match_type,
				is_exact_headword,
				is_lemma_match,
				use_reverse_search: resolved_intent.use_reverse_search,
			};
			(entry, ctx)
		})
		.collect();

	let config = config_manager.snapshot();
	let engine = Engine::build(&config)?;
	let mut ranked = engine.rank_with_logger(candidates, &log);
	classify::classify(&mut ranked, &normalized, resolved_intent.use_reverse_search);
	ranked.truncate(max_results);

	let results = ranked
		.into_iter()
		.map(|r| RankedResult {
			entry: r.entry,
			match_type: r.match_type,
			bucket: r.bucket,
			group_type: r.group_type,
			relevance_score: r.score,
			breakdown: if options.include_breakdown { Some(r.breakdown) } else { None },
		})
		.collect::<Vec<_>>();

	trace!(log, "search completed with {} results", results.len(); t_search);
	Ok(results)
}

/// Runs the store's startup-time integrity check, surfacing a failed
/// check as [`Error::IntegrityCheckFailed`] rather than `Ok(false)`, for
/// callers that want a single fallible call at boot.
pub fn validate_store(store: &dyn Store) -> Result<(), Error> {
	if store.validate_integrity()? {
		Ok(())
	} else {
		Err(Error::IntegrityCheckFailed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ConfigManager;
	use crate::fixtures::MemoryStore;
	use crate::model::{Example, JlptLevel, Sense};

	fn entry(id: i64, headword: &str, reading: &str, jlpt: Option<JlptLevel>, freq: Option<u32>) -> Entry {
		Entry {
			id,
			headword: headword.to_string(),
			reading_hiragana: reading.to_string(),
			reading_romaji: String::new(),
			frequency_rank: freq,
			jlpt_level: jlpt,
			pitch_accent: None,
			created_at: id,
			senses: Vec::new(),
			source: "test".to_string(),
		}
	}

	fn sense(def: &str, pos: &str, order: u32) -> Sense {
		Sense {
			id: order as i64,
			entry_id: 0,
			sense_order: order,
			definition_english: def.to_string(),
			definition_chinese_simplified: None,
			definition_chinese_traditional: None,
			part_of_speech: pos.to_string(),
			usage_notes: None,
			examples: Vec::<Example>::new(),
		}
	}

	#[test]
	fn test_empty_query_yields_empty_sequence() {
		let store = MemoryStore::new(vec![]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "   ", 10).unwrap();
		assert!(results.is_empty());
	}

	#[test]
	fn test_query_too_long_errors() {
		let store = MemoryStore::new(vec![]);
		let manager = ConfigManager::new(None).unwrap();
		let long_query = "あ".repeat(101);
		assert!(matches!(search(&store, &manager, &long_query, 10), Err(Error::QueryTooLong { .. })));
	}

	#[test]
	fn test_scenario_suru_verb_override() {
		let store = MemoryStore::new(vec![
			entry(1, "為る", "する", Some(JlptLevel::N3), None),
			entry(2, "する", "する", None, None),
			entry(3, "掏る", "する", Some(JlptLevel::N5), None),
			entry(4, "すると", "すると", Some(JlptLevel::N4), None),
			entry(5, "するめ", "するめ", Some(JlptLevel::N1), None),
		]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "する", 10).unwrap();
		assert_eq!(results[0].entry.headword, "為る");
		assert_eq!(results[0].bucket, Bucket::A);
	}

	#[test]
	fn test_scenario_exact_vs_expression_bucket() {
		let store = MemoryStore::new(vec![
			entry(1, "明日", "あした", None, Some(10)),
			entry(2, "また明日", "またあした", None, Some(500)),
			entry(3, "今明日", "こんみょうにち", None, Some(9000)),
			entry(4, "大明日", "だいみょうにち", None, Some(9500)),
		]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "明日", 10).unwrap();
		assert_eq!(results[0].entry.headword, "明日");
		assert_eq!(results[0].bucket, Bucket::A);
		assert_eq!(results[1].entry.headword, "また明日");
		assert_eq!(results[1].bucket, Bucket::B);
	}

	#[test]
	fn test_scenario_kana_variant_jlpt_tiebreak() {
		let store = MemoryStore::new(vec![
			entry(1, "元気", "げんき", Some(JlptLevel::N5), None),
			entry(2, "原器", "げんき", None, None),
		]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "げんき", 10).unwrap();
		let pos_genki = results.iter().position(|r| r.entry.headword == "元気").unwrap();
		let pos_genki2 = results.iter().position(|r| r.entry.headword == "原器").unwrap();
		assert!(pos_genki < pos_genki2);
	}

	#[test]
	fn test_scenario_english_core_headword() {
		let mut taberu = entry(1, "食べる", "たべる", Some(JlptLevel::N5), Some(10));
		taberu.senses.push(sense("to eat", "verb", 1));
		let mut kuu = entry(2, "食う", "くう", None, Some(5000));
		kuu.senses.push(sense("to eat (coarse)", "verb", 1));
		let mut itadaku = entry(3, "頂く", "いただく", None, Some(2000));
		itadaku.senses.push(sense("to eat (humble)", "verb", 1));
		let mut meshiagaru = entry(4, "召し上がる", "めしあがる", None, Some(3000));
		meshiagaru.senses.push(sense("to eat (honorific)", "verb", 1));
		let mut shokuji = entry(5, "食事", "しょくじ", Some(JlptLevel::N4), Some(100));
		shokuji.senses.push(sense("meal; a meal", "noun", 1));

		let store = MemoryStore::new(vec![taberu, kuu, itadaku, meshiagaru, shokuji]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "eat", 10).unwrap();
		assert_eq!(results[0].entry.headword, "食べる");
	}

	#[test]
	fn test_scenario_test_parenthetical_priority() {
		let mut shiken = entry(1, "試験", "しけん", None, None);
		shiken.senses.push(sense("examination; exam; test", "noun", 1));
		let mut mondai = entry(2, "問題", "もんだい", None, None);
		mondai.senses.push(sense("question (e.g. on a test)", "noun", 1));
		let mut ichiban = entry(3, "一番", "いちばん", None, None);
		ichiban.senses.push(sense("as a test; tentatively", "noun", 4));

		let store = MemoryStore::new(vec![shiken, mondai, ichiban]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "test", 10).unwrap();
		let headwords: Vec<&str> = results.iter().map(|r| r.entry.headword.as_str()).collect();
		assert_eq!(headwords, vec!["試験", "問題", "一番"]);
	}

	#[test]
	fn test_scenario_today_frequency_dominant_ordering() {
		let kyou = entry(1, "今日", "きょう", None, Some(1));
		let kyouha = entry(2, "今日は", "きょうは", None, Some(50));
		let kyouchuuni = entry(3, "今日中に", "きょうちゅうに", None, Some(800));
		let kyouichi = entry(4, "今日イチ", "きょうイチ", None, Some(5000));

		let store = MemoryStore::new(vec![kyou, kyouha, kyouchuuni, kyouichi]);
		let manager = ConfigManager::new(None).unwrap();
		let results = search(&store, &manager, "今日", 10).unwrap();
		let headwords: Vec<&str> = results.iter().map(|r| r.entry.headword.as_str()).collect();
		assert_eq!(headwords, vec!["今日", "今日は", "今日中に", "今日イチ"]);
		assert_eq!(results[0].bucket, Bucket::A);
		assert_eq!(results.last().unwrap().entry.headword, "今日イチ");
	}
}
