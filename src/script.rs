//! Script classification (component C1).

use crate::kana::is::{is_hiragana, is_kanji, is_katakana};

/// Classification of a query's script, used to select the retrieval
/// strategy and normalization rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScriptType {
	Hiragana,
	Katakana,
	Kanji,
	/// Three or fewer CJK characters and nothing else; presumed to be a
	/// short Japanese kanji-compound query rather than Chinese.
	JapaneseKanjiShort,
	Romaji,
	Mixed,
}

/// At or below this count of CJK-only characters, a pure-CJK query is
/// classified as [`ScriptType::JapaneseKanjiShort`] instead of
/// [`ScriptType::Kanji`].
const SHORT_KANJI_THRESHOLD: usize = 3;

/// Classifies a query's script per spec.md 4.1.
///
/// Numerals and the long-vowel mark `ー` are tolerated but ignored. An
/// empty (after trimming) query classifies as [`ScriptType::Mixed`].
pub fn classify(query: &str) -> ScriptType {
	let query = query.trim();
	if query.is_empty() {
		return ScriptType::Mixed;
	}

	let mut has_cjk = false;
	let mut has_hiragana = false;
	let mut has_katakana = false;
	let mut has_ascii_letter = false;
	let mut cjk_count = 0usize;

	for c in query.chars() {
		if c == 'ー' || c.is_numeric() {
			continue;
		}
		if is_kanji(c) {
			has_cjk = true;
			cjk_count += 1;
		} else if is_hiragana(c) {
			has_hiragana = true;
		} else if is_katakana(c) {
			has_katakana = true;
		} else if c.is_ascii_alphabetic() {
			has_ascii_letter = true;
		}
	}

	if has_cjk && (has_hiragana || has_katakana) {
		return ScriptType::Mixed;
	}
	if has_ascii_letter && !has_cjk && !has_hiragana && !has_katakana {
		return ScriptType::Romaji;
	}
	if has_hiragana && !has_katakana && !has_cjk {
		return ScriptType::Hiragana;
	}
	if has_katakana && !has_hiragana && !has_cjk {
		return ScriptType::Katakana;
	}
	if has_cjk && !has_hiragana && !has_katakana {
		return if cjk_count <= SHORT_KANJI_THRESHOLD {
			ScriptType::JapaneseKanjiShort
		} else {
			ScriptType::Kanji
		};
	}

	ScriptType::Mixed
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty() {
		assert_eq!(classify(""), ScriptType::Mixed);
		assert_eq!(classify("   "), ScriptType::Mixed);
	}

	#[test]
	fn test_pure_hiragana() {
		assert_eq!(classify("ともだち"), ScriptType::Hiragana);
	}

	#[test]
	fn test_pure_katakana() {
		assert_eq!(classify("トモダチ"), ScriptType::Katakana);
	}

	#[test]
	fn test_romaji() {
		assert_eq!(classify("tomodachi"), ScriptType::Romaji);
	}

	#[test]
	fn test_kanji_short_vs_long() {
		assert_eq!(classify("明日"), ScriptType::JapaneseKanjiShort);
		assert_eq!(classify("大学生活"), ScriptType::Kanji);
	}

	#[test]
	fn test_mixed() {
		assert_eq!(classify("明日は"), ScriptType::Mixed);
		assert_eq!(classify("食べるeat"), ScriptType::Mixed);
	}

	#[test]
	fn test_tolerates_long_vowel_and_digits() {
		assert_eq!(classify("ラーメン"), ScriptType::Katakana);
		assert_eq!(classify("123"), ScriptType::Mixed);
		assert_eq!(classify("ともだち123"), ScriptType::Hiragana);
	}
}
