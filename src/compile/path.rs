//! Attribute path resolution.
//!
//! A path like `measurement.test.name` walks relations from a start
//! entity down to a terminal attribute, collecting the joins needed to
//! reach it. Any hop may carry an `:OUTER` suffix to request an outer
//! join for that hop.

use crate::model::{Entity, Member, ModelError, ModelIndex};
use crate::ods::{DataType, JoinType, SelectBuilder};

use super::error::{CompileError, CompileResult};

/// Suffix on a path segment requesting an outer join for that hop.
const OUTER_SUFFIX: &str = ":OUTER";

/// Terminal of a resolved path.
#[derive(Debug)]
pub struct ResolvedPath<'a> {
    /// Declared type of the terminal attribute. `DT_UNKNOWN` for the
    /// wildcard, `DT_LONGLONG` when the terminal is a relation used as
    /// a foreign key id.
    pub data_type: DataType,
    /// Resolved application name of the terminal, or `*`.
    pub attribute: String,
    /// Entity owning the terminal attribute.
    pub entity: &'a Entity,
}

fn split_outer(raw: &str) -> (&str, JoinType) {
    match raw.strip_suffix(OUTER_SUFFIX) {
        Some(stripped) => (stripped, JoinType::JtOuter),
        None => (raw, JoinType::JtDefault),
    }
}

/// Walk `path` relative to `start`, appending the joins for every
/// relation hop to `builder` (deduplicated there) and resolving the
/// terminal segment.
pub fn resolve_path<'m>(
    index: &ModelIndex<'m>,
    start: &'m Entity,
    path: &str,
    builder: &mut SelectBuilder,
) -> CompileResult<ResolvedPath<'m>> {
    let mut entity = start;
    let segments: Vec<&str> = path.split('.').collect();
    let (terminal, hops) = segments
        .split_last()
        .unwrap_or((&path, &[]));

    for raw_segment in hops {
        let (segment, join_type) = split_outer(raw_segment);
        let relation =
            index
                .relation(entity, segment)
                .ok_or_else(|| CompileError::NoSuchRelation {
                    segment: segment.to_string(),
                    entity: entity.name.clone(),
                    suggestion: index.relation_suggestion(entity, segment),
                })?;
        let target = target_entity(index, &relation.entity_name)?;

        if relation.is_to_many() {
            // Hop from the 1 side to the n side: the server's join
            // engine expects the directive n to 1, so record it
            // through the inverse relation on the target entity.
            let inverse = index
                .relation(target, &relation.inverse_name)
                .ok_or_else(|| CompileError::NoSuchRelation {
                    segment: relation.inverse_name.clone(),
                    entity: target.name.clone(),
                    suggestion: index.relation_suggestion(target, &relation.inverse_name),
                })?;
            let inverse_target = target_entity(index, &inverse.entity_name)?;
            builder.add_join(target.aid, inverse_target.aid, &inverse.name, join_type);
        } else {
            builder.add_join(entity.aid, target.aid, &relation.name, join_type);
        }

        entity = target;
    }

    let (segment, _) = split_outer(terminal);
    if segment == "*" {
        return Ok(ResolvedPath {
            data_type: DataType::DtUnknown,
            attribute: "*".to_string(),
            entity,
        });
    }
    match index.member(entity, segment) {
        Some(Member::Attribute(attribute)) => Ok(ResolvedPath {
            data_type: attribute.data_type,
            attribute: attribute.name.clone(),
            entity,
        }),
        // A relation in terminal position is queried as the foreign
        // key id it stores.
        Some(Member::Relation(relation)) => Ok(ResolvedPath {
            data_type: DataType::DtLonglong,
            attribute: relation.name.clone(),
            entity,
        }),
        None => Err(CompileError::NoSuchMember {
            segment: segment.to_string(),
            entity: entity.name.clone(),
            suggestion: index.member_suggestion(entity, segment),
        }),
    }
}

/// Look up the entity a relation points at. The model guarantees the
/// name resolves; a miss means the model itself is inconsistent.
fn target_entity<'m>(index: &ModelIndex<'m>, name: &str) -> CompileResult<&'m Entity> {
    index.entity_by_name(name).ok_or_else(|| {
        CompileError::Model(ModelError::UnknownEntity {
            name: name.to_string(),
            suggestion: index.entity_suggestion(name),
        })
    })
}
