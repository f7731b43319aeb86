//! Result classifier (component C9): stamps presentational `match_type`
//! and `group_type` attributes. Never affects ordering.

use crate::model::{Entry, GroupType, MatchType, RankedEntry};

fn classify_match_type(entry: &Entry, query_normalized: &str, use_reverse_search: bool) -> MatchType {
	if use_reverse_search {
		let q = query_normalized.to_lowercase();
		let mut best = MatchType::Contains;
		for sense in &entry.senses {
			let def = sense.definition_english.to_lowercase();
			if def.trim() == q || def.starts_with(&format!("{} (", q)) {
				return MatchType::Exact;
			}
			if def.starts_with(&q) {
				best = MatchType::Prefix;
			}
		}
		best
	} else if entry.headword == query_normalized
		|| entry.reading_hiragana == query_normalized
		|| entry.reading_romaji == query_normalized
	{
		MatchType::Exact
	} else if entry.headword.starts_with(query_normalized) || entry.reading_hiragana.starts_with(query_normalized) {
		MatchType::Prefix
	} else {
		MatchType::Contains
	}
}

fn classify_group_type(entry: &Entry, match_type: MatchType) -> GroupType {
	if match_type == MatchType::Exact {
		GroupType::BasicWord
	} else if entry.jlpt_level.is_some() || entry.frequency_rank.map(|f| f <= 200).unwrap_or(false) {
		GroupType::CommonPhrase
	} else if entry.frequency_rank.is_some() {
		GroupType::Derivative
	} else {
		GroupType::Other
	}
}

/// Stamps `match_type` and `group_type` on every ranked entry in place.
/// `bucket` and ordering are untouched.
pub fn classify(entries: &mut [RankedEntry], query_normalized: &str, use_reverse_search: bool) {
	for ranked in entries.iter_mut() {
		let match_type = classify_match_type(&ranked.entry, query_normalized, use_reverse_search);
		ranked.match_type = match_type;
		ranked.group_type = classify_group_type(&ranked.entry, match_type);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Bucket, ScoreBreakdown, Sense};

	fn ranked(headword: &str, reading: &str, jlpt: Option<crate::model::JlptLevel>, freq: Option<u32>) -> RankedEntry {
		RankedEntry {
			entry: Entry {
				id: 1,
				headword: headword.to_string(),
				reading_hiragana: reading.to_string(),
				reading_romaji: String::new(),
				frequency_rank: freq,
				jlpt_level: jlpt,
				pitch_accent: None,
				created_at: 0,
				senses: Vec::<Sense>::new(),
				source: "test".to_string(),
			},
			score: 0.0,
			bucket: Bucket::C,
			match_type: MatchType::Contains,
			group_type: GroupType::Other,
			breakdown: ScoreBreakdown { total: 0.0, bucket: Bucket::C, bucket_rule: "default".to_string(), feature_scores: Vec::new() },
		}
	}

	#[test]
	fn test_exact_forward_match() {
		let mut entries = vec![ranked("食べる", "たべる", None, None)];
		classify(&mut entries, "食べる", false);
		assert_eq!(entries[0].match_type, MatchType::Exact);
		assert_eq!(entries[0].group_type, GroupType::BasicWord);
	}

	#[test]
	fn test_prefix_forward_match() {
		let mut entries = vec![ranked("食べ物", "たべもの", Some(crate::model::JlptLevel::N5), None)];
		classify(&mut entries, "食べ", false);
		assert_eq!(entries[0].match_type, MatchType::Prefix);
		assert_eq!(entries[0].group_type, GroupType::CommonPhrase);
	}

	#[test]
	fn test_derivative_group() {
		let mut entries = vec![ranked("忘年会", "ぼうねんかい", None, Some(5000))];
		classify(&mut entries, "xyz", false);
		assert_eq!(entries[0].group_type, GroupType::Derivative);
	}
}
