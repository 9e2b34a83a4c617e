//! ASAM ODS application model types.
//!
//! The application model is fetched from an ODS server by an upstream
//! component and handed to this crate read-only. The types mirror the
//! protobuf `ods.Model` message; field names follow the protobuf JSON
//! form so a model dumped as JSON loads directly via serde.

pub mod index;
pub mod suggest;

pub use index::{Member, ModelError, ModelIndex};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ods::DataType;

/// A complete application model: entities plus their enumerations.
///
/// `entities` is keyed by the entity application name, `enumerations`
/// by the enumeration name, exactly as the server delivers them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    pub entities: HashMap<String, Entity>,
    pub enumerations: HashMap<String, Enumeration>,
}

/// A queryable application element.
///
/// Names are case preserving but all lookups against them are case
/// insensitive. The `aid` is the stable numeric identity used in the
/// wire protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    pub aid: i64,
    pub name: String,
    pub base_name: String,
    pub attributes: HashMap<String, Attribute>,
    pub relations: HashMap<String, Relation>,
}

/// A scalar or vector field of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    pub name: String,
    pub base_name: String,
    pub data_type: DataType,
    /// Name of the enumeration attached to `DT_ENUM`/`DS_ENUM`
    /// attributes, empty otherwise.
    pub enumeration: String,
}

/// A typed link from one entity to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relation {
    pub name: String,
    pub base_name: String,
    /// Application name of the target entity.
    pub entity_name: String,
    /// Name of the relation on the target entity pointing back here.
    pub inverse_name: String,
    /// Maximum multiplicity of the target side, -1 for unbounded.
    pub range_max: i64,
    /// Maximum multiplicity of the inverse side, -1 for unbounded.
    pub inverse_range_max: i64,
}

impl Relation {
    /// True when traversing this relation walks from the "1" side to
    /// the "n" side. Joins over such a hop must be recorded through
    /// the inverse relation so the server sees them n to 1.
    pub fn is_to_many(&self) -> bool {
        self.range_max == -1 && self.inverse_range_max == 1
    }
}

/// A named value set with a bidirectional name/value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enumeration {
    pub name: String,
    pub items: HashMap<String, i32>,
}

impl Enumeration {
    /// Reverse lookup of an item name by its numeric value.
    pub fn key_for(&self, value: i32) -> Option<&str> {
        self.items
            .iter()
            .find(|(_, v)| **v == value)
            .map(|(k, _)| k.as_str())
    }
}
