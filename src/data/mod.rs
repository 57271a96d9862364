//! Core data models for Amiibo of the Day
//!
//! This module contains the data types used throughout the application for
//! representing amiibo catalog entries and item identifiers, plus the API
//! client that fetches them.

pub mod api;

pub use api::{AmiiboApi, ApiError};

use serde::{Deserialize, Serialize};

/// A single amiibo catalog entry
///
/// The wire format is the camelCase JSON produced by amiiboapi.com. The `id`
/// field is not part of the wire format: identity is the entry's position in
/// the full catalog snapshot, assigned when the entry is looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amiibo {
    /// Position of this entry in the catalog snapshot, assigned at lookup
    #[serde(skip)]
    pub id: usize,
    /// Display name of the amiibo
    pub name: String,
    /// URL of the amiibo image
    pub image: String,
    /// Character depicted by the amiibo
    pub character: String,
    /// Game series the character belongs to
    pub game_series: String,
    /// Amiibo product series (drives the card background color)
    pub amiibo_series: String,
    /// Product kind reported by the API ("Figure" or "Yarn")
    #[serde(rename = "type")]
    pub kind: String,
}

/// The full ordered catalog, fetched and persisted as one snapshot
pub type Catalog = Vec<Amiibo>;

/// Identifier produced by selection and consumed by catalog lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    /// Positional index into the catalog snapshot
    Index(usize),
    /// Exact item name (pinned selection)
    Name(String),
}
