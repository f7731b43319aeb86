//! Virtual-entry injector (component C8): synthesizes a pure-kana
//! headword variant for words that are conventionally written in kana
//! but only have a kanji entry in the dictionary.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::kana::is::is_kanji;
use crate::model::{Entry, JlptLevel, VIRTUAL_ENTRY_ID};

/// Editorial override applied to a synthesized entry.
#[derive(Copy, Clone, Debug)]
pub struct UsuallyKanaRule {
	pub jlpt_level: JlptLevel,
	pub is_adverb: bool,
}

lazy_static! {
	/// query (kana spelling) -> override applied to the synthesized entry.
	static ref USUALLY_KANA_TABLE: HashMap<&'static str, UsuallyKanaRule> = {
		let mut m = HashMap::new();
		m.insert("こと", UsuallyKanaRule { jlpt_level: JlptLevel::N5, is_adverb: false });
		m.insert("もの", UsuallyKanaRule { jlpt_level: JlptLevel::N5, is_adverb: false });
		m.insert("とき", UsuallyKanaRule { jlpt_level: JlptLevel::N5, is_adverb: false });
		m.insert("ため", UsuallyKanaRule { jlpt_level: JlptLevel::N4, is_adverb: false });
		m.insert("わけ", UsuallyKanaRule { jlpt_level: JlptLevel::N3, is_adverb: false });
		m.insert("はず", UsuallyKanaRule { jlpt_level: JlptLevel::N3, is_adverb: false });
		m.insert("つもり", UsuallyKanaRule { jlpt_level: JlptLevel::N4, is_adverb: false });
		m.insert("やはり", UsuallyKanaRule { jlpt_level: JlptLevel::N4, is_adverb: true });
		m
	};
}

/// If `query_normalized` is a key of the usually-kana table, no entry
/// exactly matching it (pure kana) already exists in `forward_results`,
/// and some entry has a kanji headword sharing that reading, clones the
/// first such entry into a synthetic `id = -1` entry with the kana
/// headword and inserts it at index 0 (spec.md 4.8).
pub fn inject(query_normalized: &str, forward_results: &mut Vec<Entry>) {
	let rule = match USUALLY_KANA_TABLE.get(query_normalized) {
		Some(r) => *r,
		None => return,
	};

	if forward_results.iter().any(|e| e.headword == query_normalized) {
		return;
	}

	let source = match forward_results
		.iter()
		.find(|e| e.reading_hiragana == query_normalized && e.headword.chars().any(is_kanji))
	{
		Some(e) => e.clone(),
		None => return,
	};

	let mut virtual_entry = source;
	virtual_entry.id = VIRTUAL_ENTRY_ID;
	virtual_entry.headword = query_normalized.to_string();
	virtual_entry.jlpt_level = Some(rule.jlpt_level);
	if rule.is_adverb {
		for sense in &mut virtual_entry.senses {
			if !sense.part_of_speech.to_lowercase().contains("adverb") {
				sense.part_of_speech = format!("{};adverb", sense.part_of_speech);
			}
		}
	}

	forward_results.insert(0, virtual_entry);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Sense;

	fn kanji_entry() -> Entry {
		Entry {
			id: 10,
			headword: "事".to_string(),
			reading_hiragana: "こと".to_string(),
			reading_romaji: "koto".to_string(),
			frequency_rank: Some(50),
			jlpt_level: Some(JlptLevel::N3),
			pitch_accent: None,
			created_at: 1000,
			senses: vec![Sense {
				id: 1,
				entry_id: 10,
				sense_order: 1,
				definition_english: "thing; matter".to_string(),
				definition_chinese_simplified: None,
				definition_chinese_traditional: None,
				part_of_speech: "noun".to_string(),
				usage_notes: None,
				examples: Vec::new(),
			}],
			source: "test".to_string(),
		}
	}

	#[test]
	fn test_synthesizes_virtual_entry() {
		let mut results = vec![kanji_entry()];
		inject("こと", &mut results);
		assert_eq!(results.len(), 2);
		assert_eq!(results[0].id, VIRTUAL_ENTRY_ID);
		assert_eq!(results[0].headword, "こと");
		assert_eq!(results[0].jlpt_level, Some(JlptLevel::N5));
	}

	#[test]
	fn test_skips_when_exact_kana_entry_present() {
		let mut results = vec![kanji_entry(), {
			let mut e = kanji_entry();
			e.id = 11;
			e.headword = "こと".to_string();
			e
		}];
		inject("こと", &mut results);
		assert_eq!(results.len(), 2);
	}

	#[test]
	fn test_no_op_for_unknown_query() {
		let mut results = vec![kanji_entry()];
		inject("ぜんぜん", &mut results);
		assert_eq!(results.len(), 1);
	}
}
