// Copyright 2026 Oxide Computer Company

//! Error types for git link parsing.

use thiserror::Error;

/// An error that occurs while parsing or constructing a
/// [`Reference`](crate::Reference) or [`AccessPoint`](crate::AccessPoint).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReferenceParseError {
    /// The `::` delimiter appeared more than once, so the split between
    /// location and object expression is ambiguous.
    #[error(
        "invalid git link {input:?}: expected at most one '::' \
         delimiter, found {count}"
    )]
    AmbiguousDelimiter {
        /// The raw input.
        input: String,
        /// How many times `::` occurred.
        count: usize,
    },

    /// The access point names a host starting with `-`, which a remote
    /// shell would take as an option rather than a host.
    #[error("git link access point {host:?} must not start with '-'")]
    OptionLikeHost {
        /// The rejected host.
        host: String,
    },

    /// A field passed to [`Reference::new`](crate::Reference::new) would
    /// introduce a delimiter into the textual form, so the reference would
    /// not survive a round trip through it.
    #[error("git link {field} {value:?} must not contain {delimiter:?}")]
    DelimiterInField {
        /// Which field was rejected (`"access point"`, `"location"` or
        /// `"object"`).
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The delimiter the field would introduce.
        delimiter: &'static str,
    },
}
