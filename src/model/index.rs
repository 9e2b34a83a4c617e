//! Case-folded lookup index over an application model.
//!
//! The raw model is a bundle of name-keyed maps with case-preserving
//! keys, while every lookup the query language needs is case
//! insensitive and may go through base names as well. Instead of
//! scanning those maps linearly per lookup, `ModelIndex` folds all
//! names once at construction and resolves in O(1) afterwards.

use std::collections::HashMap;

use thiserror::Error;

use super::suggest;
use super::{Attribute, Entity, Enumeration, Model, Relation};

/// Lookup failures against the application model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Entity '{name}' is unknown in model.{suggestion}")]
    UnknownEntity { name: String, suggestion: String },

    #[error("'{aid}' is not a valid entity aid.")]
    UnknownEntityAid { aid: String },

    #[error("Enum entry for '{key}' does not exist.{suggestion}")]
    UnknownEnumEntry { key: String, suggestion: String },

    #[error("Attribute '{attribute}' of entity '{entity}' has no enumeration '{enumeration}' in the model.")]
    MissingEnumeration {
        entity: String,
        attribute: String,
        enumeration: String,
    },
}

/// An attribute or relation resolved on an entity.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Attribute(&'a Attribute),
    Relation(&'a Relation),
}

/// Per-entity case-folded member lookup tables.
#[derive(Debug, Default)]
struct MemberIndex<'a> {
    attributes_by_name: HashMap<String, &'a Attribute>,
    attributes_by_base: HashMap<String, &'a Attribute>,
    relations_by_name: HashMap<String, &'a Relation>,
    relations_by_base: HashMap<String, &'a Relation>,
}

/// Read-only, case-folded index over a [`Model`].
///
/// Construction walks the model once; all lookups afterwards are hash
/// lookups. The index never mutates the model and can be shared freely
/// between concurrent compilations.
#[derive(Debug)]
pub struct ModelIndex<'a> {
    model: &'a Model,
    entities_by_name: HashMap<String, &'a Entity>,
    entities_by_base: HashMap<String, &'a Entity>,
    entities_by_aid: HashMap<i64, &'a Entity>,
    members: HashMap<i64, MemberIndex<'a>>,
    /// enumeration name (lowercase) -> item name (lowercase) -> value
    enum_items: HashMap<String, HashMap<String, i32>>,
}

impl<'a> ModelIndex<'a> {
    pub fn new(model: &'a Model) -> Self {
        let mut entities_by_name = HashMap::new();
        let mut entities_by_base = HashMap::new();
        let mut entities_by_aid = HashMap::new();
        let mut members = HashMap::new();

        for entity in model.entities.values() {
            entities_by_name.insert(entity.name.to_lowercase(), entity);
            entities_by_base.insert(entity.base_name.to_lowercase(), entity);
            entities_by_aid.insert(entity.aid, entity);

            let mut index = MemberIndex::default();
            for attribute in entity.attributes.values() {
                index
                    .attributes_by_name
                    .insert(attribute.name.to_lowercase(), attribute);
                index
                    .attributes_by_base
                    .insert(attribute.base_name.to_lowercase(), attribute);
            }
            for relation in entity.relations.values() {
                index
                    .relations_by_name
                    .insert(relation.name.to_lowercase(), relation);
                index
                    .relations_by_base
                    .insert(relation.base_name.to_lowercase(), relation);
            }
            members.insert(entity.aid, index);
        }

        let mut enum_items: HashMap<String, HashMap<String, i32>> = HashMap::new();
        for (key, enumeration) in &model.enumerations {
            let items: HashMap<String, i32> = enumeration
                .items
                .iter()
                .map(|(item, value)| (item.to_lowercase(), *value))
                .collect();
            // Reachable under the map key and the declared name, which
            // are the same in a well-formed model.
            enum_items.insert(key.to_lowercase(), items.clone());
            enum_items.insert(enumeration.name.to_lowercase(), items);
        }

        Self {
            model,
            entities_by_name,
            entities_by_base,
            entities_by_aid,
            members,
            enum_items,
        }
    }

    /// The indexed model.
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// Resolve an entity from a query token, either a numeric aid or a
    /// case-insensitive application or base name.
    pub fn entity(&self, token: &str) -> Result<&'a Entity, ModelError> {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            let aid = token
                .parse::<i64>()
                .map_err(|_| ModelError::UnknownEntityAid {
                    aid: token.to_string(),
                })?;
            return self.entity_by_aid(aid);
        }
        self.entity_by_name(token)
            .ok_or_else(|| ModelError::UnknownEntity {
                name: token.to_string(),
                suggestion: self.entity_suggestion(token),
            })
    }

    /// Resolve an entity by aid.
    pub fn entity_by_aid(&self, aid: i64) -> Result<&'a Entity, ModelError> {
        self.entities_by_aid
            .get(&aid)
            .copied()
            .ok_or_else(|| ModelError::UnknownEntityAid {
                aid: aid.to_string(),
            })
    }

    /// Resolve an entity by application name, falling back to its base
    /// name. Returns `None` when neither matches.
    pub fn entity_by_name(&self, name: &str) -> Option<&'a Entity> {
        let folded = name.to_lowercase();
        self.entities_by_name
            .get(&folded)
            .or_else(|| self.entities_by_base.get(&folded))
            .copied()
    }

    /// Resolve an attribute of `entity` by application name, falling
    /// back to its base name.
    pub fn attribute(&self, entity: &Entity, token: &str) -> Option<&'a Attribute> {
        let index = self.members.get(&entity.aid)?;
        let folded = token.to_lowercase();
        index
            .attributes_by_name
            .get(&folded)
            .or_else(|| index.attributes_by_base.get(&folded))
            .copied()
    }

    /// Resolve a relation of `entity` by application name, falling
    /// back to its base name.
    pub fn relation(&self, entity: &Entity, token: &str) -> Option<&'a Relation> {
        let index = self.members.get(&entity.aid)?;
        let folded = token.to_lowercase();
        index
            .relations_by_name
            .get(&folded)
            .or_else(|| index.relations_by_base.get(&folded))
            .copied()
    }

    /// Resolve a member of `entity`, checking attribute application
    /// name, attribute base name, relation application name and
    /// relation base name, in that order.
    pub fn member(&self, entity: &Entity, token: &str) -> Option<Member<'a>> {
        self.attribute(entity, token)
            .map(Member::Attribute)
            .or_else(|| self.relation(entity, token).map(Member::Relation))
    }

    /// Look up an enumeration by name, case insensitively.
    pub fn enumeration(&self, name: &str) -> Option<&'a Enumeration> {
        let folded = name.to_lowercase();
        self.model
            .enumerations
            .iter()
            .find(|(key, e)| key.to_lowercase() == folded || e.name.to_lowercase() == folded)
            .map(|(_, e)| e)
    }

    /// Resolve an enumeration item of an enum-typed attribute to its
    /// numeric value, case insensitively.
    pub fn enum_value(
        &self,
        entity: &Entity,
        attribute: &Attribute,
        key: &str,
    ) -> Result<i32, ModelError> {
        let items = self
            .enum_items
            .get(&attribute.enumeration.to_lowercase())
            .ok_or_else(|| ModelError::MissingEnumeration {
                entity: entity.name.clone(),
                attribute: attribute.name.clone(),
                enumeration: attribute.enumeration.clone(),
            })?;
        items
            .get(&key.to_lowercase())
            .copied()
            .ok_or_else(|| ModelError::UnknownEnumEntry {
                key: key.to_string(),
                suggestion: self.enum_entry_suggestion(attribute, key),
            })
    }

    // ------------------------------------------------------------------
    // Suggestion vocabularies
    // ------------------------------------------------------------------

    /// Suggestion clause for a failed entity lookup.
    pub fn entity_suggestion(&self, token: &str) -> String {
        let candidates = self
            .model
            .entities
            .values()
            .flat_map(|e| [e.name.as_str(), e.base_name.as_str()]);
        suggest::did_you_mean(token, candidates)
    }

    /// Suggestion clause for a failed relation lookup on `entity`.
    pub fn relation_suggestion(&self, entity: &Entity, token: &str) -> String {
        let candidates = entity
            .relations
            .values()
            .flat_map(|r| [r.name.as_str(), r.base_name.as_str()]);
        suggest::did_you_mean(token, candidates)
    }

    /// Suggestion clause for a failed attribute-or-relation lookup.
    pub fn member_suggestion(&self, entity: &Entity, token: &str) -> String {
        let attributes = entity
            .attributes
            .values()
            .flat_map(|a| [a.name.as_str(), a.base_name.as_str()]);
        let relations = entity
            .relations
            .values()
            .flat_map(|r| [r.name.as_str(), r.base_name.as_str()]);
        suggest::did_you_mean(token, attributes.chain(relations))
    }

    /// Suggestion clause for a failed enumeration item lookup.
    fn enum_entry_suggestion(&self, attribute: &Attribute, key: &str) -> String {
        match self.enumeration(&attribute.enumeration) {
            Some(enumeration) => {
                suggest::did_you_mean(key, enumeration.items.keys().map(String::as_str))
            }
            None => String::new(),
        }
    }
}
