//! Error taxonomy for the ranking core.
//!
//! Every failure mode named in the specification is a distinct, pattern-
//! matchable variant. Input errors surface directly; configuration errors
//! are reported at load/validate time; store errors are wrapped as
//! [`Error::SearchFailed`] unless they represent a startup integrity
//! problem, in which case they surface as themselves.

use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
	// -- Input errors --------------------------------------------------
	#[snafu(display("query is too long ({len} characters, limit is 100)"))]
	QueryTooLong { len: usize },

	#[snafu(display("query contains no valid characters"))]
	InvalidCharacters,

	// -- Configuration errors -------------------------------------------
	#[snafu(display("unknown feature type `{type_name}`"))]
	UnknownFeatureType { type_name: String },

	#[snafu(display("unknown hard rule type `{type_name}`"))]
	UnknownRuleType { type_name: String },

	#[snafu(display("{type_name}: missing parameters"))]
	MissingParameters { type_name: String },

	#[snafu(display("{type_name}: missing parameter `{name}`"))]
	MissingParameter { type_name: String, name: String },

	#[snafu(display("{type_name}: parameter `{name}` has the wrong type"))]
	InvalidParameterType { type_name: String, name: String },

	#[snafu(display("feature `{name}`: min_score ({min}) must be <= max_score ({max})"))]
	InvalidRange { name: String, min: f64, max: f64 },

	#[snafu(display("feature `{name}`: weight {weight} is out of the [0, 10] range"))]
	InvalidWeight { name: String, weight: f64 },

	#[snafu(display("duplicate hard rule priority {priority}"))]
	DuplicatePriorities { priority: i64 },

	#[snafu(display("invalid tie-breaker field `{field}`"))]
	InvalidTieBreakerField { field: String },

	#[snafu(display("invalid tie-breaker order `{order}`"))]
	InvalidTieBreakerOrder { order: String },

	#[snafu(display("unknown configuration profile `{profile}`"))]
	InvalidProfile { profile: String },

	// -- Store errors -----------------------------------------------------
	#[snafu(display("the dictionary store could not be opened: {message}"))]
	StoreUnavailable { message: String },

	#[snafu(display("the dictionary store schema does not match what the core expects: {message}"))]
	SchemaMismatch { message: String },

	#[snafu(display("the dictionary store failed its integrity check"))]
	IntegrityCheckFailed,

	// -- Wrapping -----------------------------------------------------------
	#[snafu(display("search failed: {message}"))]
	SearchFailed {
		message: String,
		#[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
		source: Option<Box<dyn std::error::Error + Send + Sync>>,
	},
}

impl Error {
	/// Wraps an arbitrary lower-level cause as a [`Error::SearchFailed`].
	pub fn search_failed<E>(cause: E) -> Error
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Error::SearchFailed {
			message: cause.to_string(),
			source:  Some(Box::new(cause)),
		}
	}
}
