//! Japanese character classification, kana/romaji conversion, and query
//! orthography normalization.
//!
//! This is largely based on https://github.com/PSeitz/wana_kana_rust but
//! provides an API specifically designed for this application.

mod constants;
mod util;

pub mod is;
pub mod normalize;
pub mod to;

pub use self::is::{is_hiragana, is_kanji, is_katakana, is_word_mark};
pub use self::normalize::{kana_fold, normalize_query, sanitize, NormalizeError};
pub use self::to::{to_hiragana, to_romaji};
