// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The answer value model.
//!
//! Every answer stored in a response is a [`Value`]. Consumers match on its
//! variants exhaustively; there is no untyped escape hatch.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Metadata for one uploaded file referenced by a response.
///
/// The core never sees file contents, only this descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// The upload identifier.
    pub id: String,
    /// The original file name.
    pub name: String,
    /// The MIME type reported by the uploader.
    pub mime_type: String,
    /// The file size in bytes.
    pub size_bytes: u64,
    /// Where the upload can be fetched from.
    pub url: String,
    /// When the file was uploaded.
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}

/// A single answer value.
///
/// Serialized untagged so that JSON answers read naturally: `null` is
/// [`Value::Absent`], `true` a boolean, `3.5` a number, `"x"` text, a list of
/// strings a string list and a list of file objects a file list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No answer recorded.
    #[default]
    Absent,
    /// A yes/no answer.
    Boolean(bool),
    /// A numeric answer.
    Number(f64),
    /// A free-text, single-choice or date answer.
    Text(String),
    /// A multi-select answer, kept in insertion order for display stability.
    StringList(Vec<String>),
    /// Uploaded file descriptors.
    FileRefList(Vec<FileRef>),
}

/// The discriminant of a [`Value`], without its payload.
///
/// The declaration order is the cross-kind sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// See [`Value::Absent`].
    Absent,
    /// See [`Value::Number`].
    Number,
    /// See [`Value::Boolean`].
    Boolean,
    /// See [`Value::Text`].
    Text,
    /// See [`Value::StringList`].
    StringList,
    /// See [`Value::FileRefList`].
    FileRefList,
}

impl ValueKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::StringList => "string_list",
            Self::FileRefList => "file_ref_list",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    /// Creates a string list value from anything iterable over string slices.
    #[must_use]
    pub fn list<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::StringList(items.into_iter().map(str::to_string).collect())
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Absent => ValueKind::Absent,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
            Self::StringList(_) => ValueKind::StringList,
            Self::FileRefList(_) => ValueKind::FileRefList,
        }
    }

    /// Returns true if no answer is recorded.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true if the value carries no usable answer.
    ///
    /// Absent values, blank text and empty lists are all considered empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Boolean(_) | Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
            Self::StringList(items) => items.is_empty(),
            Self::FileRefList(files) => files.is_empty(),
        }
    }

    /// Coerces the value to a number.
    ///
    /// Numbers are returned as-is and text is parsed after trimming.
    /// Every other kind yields `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Absent | Self::Boolean(_) | Self::StringList(_) | Self::FileRefList(_) => None,
        }
    }

    /// Renders the value to its canonical string form.
    ///
    /// Used for comparing scalars against rule strings. Group keys use
    /// [`Value::group_key_component`] instead.
    /// Returns `None` for [`Value::Absent`], which has no canonical form.
    #[must_use]
    pub fn canonical(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Boolean(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::StringList(items) => Some(items.join(",")),
            Self::FileRefList(files) => Some(
                files
                    .iter()
                    .map(|file| file.id.as_str())
                    .collect::<Vec<&str>>()
                    .join(","),
            ),
        }
    }

    /// Renders the value as one component of a group key.
    ///
    /// Like [`Value::canonical`], except that values equal under
    /// [`Value::loosely_equals`] within a kind share one form:
    /// - String lists are deduplicated and sorted, and each item escapes
    ///   `\\` and `,` so that distinct lists never collide
    /// - Negative zero renders as `0`
    #[must_use]
    pub fn group_key_component(&self) -> Option<String> {
        match self {
            #[allow(clippy::float_cmp)]
            Self::Number(n) if *n == 0.0 => Some(String::from("0")),
            Self::StringList(items) => {
                let mut members: Vec<&str> = items.iter().map(String::as_str).collect();
                members.sort_unstable();
                members.dedup();
                Some(
                    members
                        .into_iter()
                        .map(escape_list_item)
                        .collect::<Vec<String>>()
                        .join(","),
                )
            }
            _ => self.canonical(),
        }
    }

    /// Value-kind-aware equality.
    ///
    /// - Absent equals only Absent.
    /// - Same kinds compare by payload; string lists compare as sets.
    /// - A string list equals a text value when it contains that text.
    /// - Number and text compare numerically when the text parses.
    /// - Boolean and text compare against `"true"` / `"false"`.
    /// - Every other pairing is unequal.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::StringList(a), Self::StringList(b)) => same_members(a, b),
            (Self::FileRefList(a), Self::FileRefList(b)) => a == b,
            (Self::StringList(items), Self::Text(text))
            | (Self::Text(text), Self::StringList(items)) => items.contains(text),
            #[allow(clippy::float_cmp)]
            (Self::Number(n), Self::Text(text)) | (Self::Text(text), Self::Number(n)) => {
                text.trim().parse::<f64>().is_ok_and(|parsed| parsed == *n)
            }
            (Self::Boolean(b), Self::Text(text)) | (Self::Text(text), Self::Boolean(b)) => {
                text.trim() == b.to_string()
            }
            _ => false,
        }
    }
}

fn escape_list_item(item: &str) -> String {
    item.replace('\\', "\\\\").replace(',', "\\,")
}

/// Set equality over two string slices, ignoring order and duplicates.
fn same_members(a: &[String], b: &[String]) -> bool {
    a.iter().all(|item| b.contains(item)) && b.iter().all(|item| a.contains(item))
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<Option<Self>> for Value {
    fn from(value: Option<Self>) -> Self {
        value.unwrap_or_default()
    }
}
