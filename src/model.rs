//! Core data model: immutable dictionary records and the per-query
//! scoring context (spec.md 3).

use serde::{Deserialize, Serialize};

/// Stable entry identifier. Negative values are reserved for synthetic
/// (virtual) entries that exist only within a single query's result.
pub type EntryId = i64;

pub type SenseId = i64;

/// Sentinel id used for virtual entries synthesized by the injector (C8).
pub const VIRTUAL_ENTRY_ID: EntryId = -1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum JlptLevel {
	N5,
	N4,
	N3,
	N2,
	N1,
}

impl JlptLevel {
	/// Ordering key where N5 (beginner) sorts before N1 (advanced); used
	/// by the forward-retrieval cascade's `jlpt_rank` key.
	pub fn rank(self) -> u8 {
		match self {
			JlptLevel::N5 => 0,
			JlptLevel::N4 => 1,
			JlptLevel::N3 => 2,
			JlptLevel::N2 => 3,
			JlptLevel::N1 => 4,
		}
	}

	/// Tie-breaker bonus: N5 is worth the most, absent JLPT is worth 0.
	pub fn bonus(self) -> u8 {
		match self {
			JlptLevel::N5 => 5,
			JlptLevel::N4 => 4,
			JlptLevel::N3 => 3,
			JlptLevel::N2 => 2,
			JlptLevel::N1 => 1,
		}
	}
}

/// Rank key for an optional JLPT level: present levels sort before
/// `None`, and among present levels N5 sorts first.
pub fn jlpt_rank(level: Option<JlptLevel>) -> u8 {
	level.map(JlptLevel::rank).unwrap_or(5)
}

/// Tie-breaker bonus for an optional JLPT level (spec.md 4.6).
pub fn jlpt_bonus(level: Option<JlptLevel>) -> u8 {
	level.map(JlptLevel::bonus).unwrap_or(0)
}

/// One meaning group of an [`Entry`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sense {
	pub id: SenseId,
	pub entry_id: EntryId,
	/// 1-based position of this sense within its entry.
	pub sense_order: u32,
	pub definition_english: String,
	pub definition_chinese_simplified: Option<String>,
	pub definition_chinese_traditional: Option<String>,
	/// May contain multiple tags separated by `;` (the store exposes no
	/// structured tag array, see spec.md 9 "tag-absent data model").
	pub part_of_speech: String,
	pub usage_notes: Option<String>,
	pub examples: Vec<Example>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Example {
	pub japanese: String,
	pub translation: String,
}

/// Immutable record of a dictionary headword.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
	pub id: EntryId,
	pub headword: String,
	pub reading_hiragana: String,
	pub reading_romaji: String,
	pub frequency_rank: Option<u32>,
	pub jlpt_level: Option<JlptLevel>,
	pub pitch_accent: Option<String>,
	pub created_at: i64,
	pub senses: Vec<Sense>,
	/// Opaque provenance tag; never affects ranking.
	pub source: String,
}

/// Tags that mark a sense as belonging to the "usually kana" vocabulary
/// (spec.md 4.5 `archaicWordBucket`/`specializedDomainBucket` style
/// substring checks apply the same way here).
const USUALLY_KANA_MARKERS: &[&str] = &["usually kana", "kana only", "仮名", "かな書き"];

impl Entry {
	/// True when some sense carries a "usually kana" usage note and the
	/// headword itself contains kanji -- i.e. this is the rare, kanji-
	/// spelled form of a word normally written in kana.
	pub fn is_rare_kanji(&self) -> bool {
		let has_kanji = self.headword.chars().any(crate::kana::is::is_kanji);
		has_kanji
			&& self.senses.iter().any(|s| {
				s.usage_notes
					.as_deref()
					.map(|notes| {
						let notes = notes.to_lowercase();
						USUALLY_KANA_MARKERS.iter().any(|m| notes.contains(m))
					})
					.unwrap_or(false)
			})
	}

	pub fn surface_length(&self) -> usize {
		self.headword.chars().count()
	}
}

/// forward-query match classification (prior to any bucket/feature
/// decision); also the basis for C9's `match_type` classification.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MatchType {
	Exact,
	Prefix,
	Contains,
}

/// Coarse ordering bucket assigned by a hard rule (spec.md 4.5/4.6). `A`
/// is best, `D` is worst; the declaration order is the total order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Bucket {
	A,
	B,
	C,
	D,
}

impl Default for Bucket {
	fn default() -> Bucket {
		Bucket::C
	}
}

/// Coarse, presentational grouping of a ranked result (spec.md 4.9).
/// Never affects ordering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GroupType {
	BasicWord,
	CommonPhrase,
	Derivative,
	Other,
}

/// Per-query evaluation input threaded through the feature/rule stages.
#[derive(Clone, Debug)]
pub struct ScoringContext {
	pub query_normalized: String,
	pub script_type: crate::script::ScriptType,
	pub match_type: MatchType,
	pub is_exact_headword: bool,
	pub is_lemma_match: bool,
	pub use_reverse_search: bool,
}

/// Per-entry score decomposition (spec.md 4.10).
///
/// `feature_scores` preserves registration order of the features that
/// contributed a non-zero-weight evaluation; it is not pre-sorted by
/// contribution (the debug renderer in [`crate::debug_breakdown`] does
/// that for display).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreBreakdown {
	pub total: f64,
	pub bucket: Bucket,
	pub bucket_rule: String,
	pub feature_scores: Vec<(String, f64)>,
}

/// An [`Entry`] annotated with its final ranking outcome.
#[derive(Clone, Debug)]
pub struct RankedEntry {
	pub entry: Entry,
	pub score: f64,
	pub bucket: Bucket,
	pub match_type: MatchType,
	pub group_type: GroupType,
	pub breakdown: ScoreBreakdown,
}
