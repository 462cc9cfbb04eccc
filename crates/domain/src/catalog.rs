// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog entities (center types, networks, professional families, ...).
//!
//! Entities arrive as already-parsed `(code, name)` rows and merge into an
//! existing collection keyed by code. The newest `updated_at` wins.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// One imported `(code, name)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// The deduplication key.
    pub code: String,
    /// The display name.
    pub name: String,
}

/// A catalog entity scoped to an academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    /// The entity identifier.
    pub id: String,
    /// The deduplication key.
    pub code: String,
    /// The display name.
    pub name: String,
    /// The academic year the entity belongs to.
    pub academic_year_id: String,
    /// Whether the entity is in use.
    #[serde(default = "default_active")]
    pub active: bool,
    /// When the entity was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the entity was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const fn default_active() -> bool {
    true
}

/// The outcome of merging catalog collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMerge {
    /// One entity per code, in first-occurrence order of codes.
    pub entities: Vec<CatalogEntity>,
    /// How many entries were dropped as duplicates.
    pub duplicates_removed: usize,
}

/// Builds entities from imported rows.
///
/// Codes and names are trimmed; rows with a blank code are skipped. The
/// entity id is `"{academic_year_id}:{code}"`.
///
/// # Arguments
///
/// * `rows` - The parsed import rows
/// * `academic_year_id` - The year the entities belong to
/// * `now` - Creation and update time for every entity
#[must_use]
pub fn catalog_from_rows(
    rows: &[CatalogRow],
    academic_year_id: &str,
    now: OffsetDateTime,
) -> Vec<CatalogEntity> {
    rows.iter()
        .filter(|row| !row.code.trim().is_empty())
        .map(|row| {
            let code: &str = row.code.trim();
            CatalogEntity {
                id: format!("{academic_year_id}:{code}"),
                code: code.to_string(),
                name: row.name.trim().to_string(),
                academic_year_id: academic_year_id.to_string(),
                active: true,
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

/// Merges imported entities into an existing collection.
///
/// Entities are deduplicated by code across both inputs. For each code the
/// entity with the newest `updated_at` is kept; on a tie the earlier entry
/// (existing before imported) wins. Output order follows the first
/// occurrence of each code.
///
/// # Arguments
///
/// * `existing` - The current collection
/// * `imported` - Newly imported entities
#[must_use]
pub fn merge_catalog(existing: &[CatalogEntity], imported: &[CatalogEntity]) -> CatalogMerge {
    let mut entities: Vec<CatalogEntity> = Vec::new();
    let mut slot_by_code: HashMap<&str, usize> = HashMap::new();

    for entity in existing.iter().chain(imported) {
        match slot_by_code.get(entity.code.as_str()) {
            Some(&slot) => {
                if entity.updated_at > entities[slot].updated_at {
                    entities[slot] = entity.clone();
                }
            }
            None => {
                slot_by_code.insert(entity.code.as_str(), entities.len());
                entities.push(entity.clone());
            }
        }
    }

    CatalogMerge {
        duplicates_removed: existing.len() + imported.len() - entities.len(),
        entities,
    }
}
