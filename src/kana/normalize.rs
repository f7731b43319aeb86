//! Query orthography normalization (component C2).
//!
//! Folds katakana to hiragana, normalizes Kunrei-shiki romaji to Hepburn,
//! lowercases ASCII, and strips characters that cannot appear in a
//! searchable query.

use crate::error::Error;

const MAX_QUERY_CHARS: usize = 100;

/// Drop any character outside the allowed set: ASCII alphanumerics,
/// whitespace, the hiragana/katakana/CJK blocks, and the long-vowel mark
/// `ー`.
///
/// Fails with [`Error::InvalidCharacters`] if the result is empty while
/// the (trimmed) input was not.
pub fn sanitize(input: &str) -> Result<String, Error> {
	let out: String = input.chars().filter(|&c| is_allowed(c)).collect();
	if out.is_empty() && !input.is_empty() {
		return Err(Error::InvalidCharacters);
	}
	Ok(out)
}

fn is_allowed(c: char) -> bool {
	c.is_ascii_alphanumeric()
		|| c.is_whitespace()
		|| super::is::is_hiragana(c)
		|| super::is::is_katakana(c)
		|| super::is::is_kanji(c)
		|| c == 'ー'
}

/// Folds katakana to hiragana, character by character. Pure and
/// idempotent: `kana_fold(kana_fold(s)) == kana_fold(s)`.
pub fn kana_fold(s: &str) -> String {
	const START: u32 = 0x30A1;
	const END: u32 = 0x30F6;
	const OFFSET: u32 = 0x60;

	s.chars()
		.map(|c| {
			let code = c as u32;
			if code >= START && code <= END {
				unsafe { std::char::from_u32_unchecked(code - OFFSET) }
			} else {
				c
			}
		})
		.collect()
}

/// Substitutes Kunrei-shiki romaji digraphs for their Hepburn equivalent.
fn kunrei_to_hepburn(s: &str) -> String {
	let pairs: &[(&str, &str)] = &[
		("si", "shi"),
		("ti", "chi"),
		("tu", "tsu"),
		("hu", "fu"),
		("zi", "ji"),
		("di", "ji"),
		("du", "zu"),
	];
	let mut out = s.to_string();
	for (from, to) in pairs {
		out = out.replace(from, to);
	}
	out.replace("oo", "ou")
}

/// Normalizes a sanitized, non-empty query according to its classified
/// script and English intent, as described in spec.md 4.2.
///
/// - romaji + English intent: lowercased as-is (no romaji folding).
/// - romaji + non-English: lowercase, then Kunrei-to-Hepburn substitution,
///   then `oo` -> `ou`.
/// - otherwise: katakana folded to hiragana via [`kana_fold`].
///
/// `normalize(normalize(q)) == normalize(q)` for any valid output of this
/// function re-fed through it with the same script/intent classification.
pub fn normalize_query(sanitized: &str, script: crate::script::ScriptType, is_english: bool) -> String {
	use crate::script::ScriptType;
	match script {
		ScriptType::Romaji if is_english => sanitized.to_lowercase(),
		ScriptType::Romaji => kunrei_to_hepburn(&sanitized.to_lowercase()),
		_ => kana_fold(sanitized),
	}
}

/// Validates the trimmed, user-visible length of a query.
pub fn check_length(trimmed: &str) -> Result<(), Error> {
	let len = trimmed.chars().count();
	if len > MAX_QUERY_CHARS {
		return Err(Error::QueryTooLong { len });
	}
	Ok(())
}

/// Marker re-export kept for callers that want a typed alias; normalization
/// failures are ordinary [`Error`] values.
pub type NormalizeError = Error;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::script::ScriptType;

	#[test]
	fn test_sanitize_drops_disallowed() {
		assert_eq!(sanitize("to_mo-da''123''chi").unwrap(), "tomoda123chi");
		assert_eq!(sanitize("   ").unwrap(), "");
		assert!(sanitize("@#$%").is_err());
	}

	#[test]
	fn test_kana_fold_idempotent() {
		let s = "トモダチ";
		let once = kana_fold(s);
		assert_eq!(once, "ともだち");
		assert_eq!(kana_fold(&once), once);
	}

	#[test]
	fn test_kana_fold_passthrough() {
		assert_eq!(kana_fold("ともだち"), "ともだち");
		assert_eq!(kana_fold("・ー"), "・ー");
	}

	#[test]
	fn test_normalize_romaji_non_english() {
		assert_eq!(normalize_query("SIru", ScriptType::Romaji, false), "shiru");
		assert_eq!(normalize_query("ookii", ScriptType::Romaji, false), "oukii");
	}

	#[test]
	fn test_normalize_romaji_english_no_folding() {
		assert_eq!(normalize_query("Eat", ScriptType::Romaji, true), "eat");
	}

	#[test]
	fn test_normalize_katakana_folds() {
		assert_eq!(normalize_query("トモダチ", ScriptType::Katakana, false), "ともだち");
	}

	#[test]
	fn test_check_length() {
		assert!(check_length("a").is_ok());
		let long = "あ".repeat(101);
		assert!(check_length(&long).is_err());
		let ok = "あ".repeat(100);
		assert!(check_length(&ok).is_ok());
	}

	#[test]
	fn test_normalize_idempotent() {
		let n1 = normalize_query("トモダチ", ScriptType::Katakana, false);
		let n2 = normalize_query(&n1, ScriptType::Hiragana, false);
		assert_eq!(n1, n2);
	}
}
