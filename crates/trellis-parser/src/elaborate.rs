//! Elaboration of raw matches into the semantic diagram model.
//!
//! The elaborator turns the raw entity blocks and relation arrows produced
//! by [`extract`](super::extract) into a [`Diagram`]. It applies the
//! last-write-wins policy for duplicate entity names and drops body lines
//! that match neither the `shape:` prefix nor the field pattern.

use indexmap::IndexMap;
use log::trace;

use trellis_core::{
    identifier::Id,
    model::{Diagram, Entity, Field, Relation},
};

use crate::extract::{self, RawEntity, RawRelation};

/// Prefix marking a body line as a shape declaration.
const SHAPE_PREFIX: &str = "shape:";

/// Build a [`Diagram`] from raw matches.
///
/// Entities accumulate in an [`IndexMap`] keyed by name: a later block with
/// the same name replaces the earlier entity's content while keeping its
/// first-appearance position. Relations are appended verbatim in match
/// order, with no cross-referencing against the declared entities.
pub(crate) fn elaborate(blocks: Vec<RawEntity<'_>>, arrows: Vec<RawRelation<'_>>) -> Diagram {
    let mut entities: IndexMap<Id, Entity> = IndexMap::new();
    for block in blocks {
        let entity = elaborate_block(&block);
        // IndexMap::insert keeps the original slot on overwrite.
        entities.insert(entity.name(), entity);
    }

    let relations = arrows
        .into_iter()
        .map(|arrow| {
            Relation::new(
                Id::new(arrow.left_entity),
                Id::new(arrow.left_field),
                Id::new(arrow.right_entity),
                Id::new(arrow.right_field),
            )
        })
        .collect();

    Diagram::new(entities.into_values().collect(), relations)
}

/// Elaborate a single entity block body into an [`Entity`].
///
/// The body is split into non-empty trimmed lines. A line starting with
/// `shape:` sets the shape (last one wins); any other line goes through the
/// field pattern and is silently dropped when it does not match.
fn elaborate_block(block: &RawEntity<'_>) -> Entity {
    let mut shape = None;
    let mut fields = Vec::new();

    for line in block
        .body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        if let Some(rest) = line.strip_prefix(SHAPE_PREFIX) {
            shape = Some(rest.trim().to_string());
        } else if let Some(raw) = extract::field_line(line) {
            fields.push(Field::new(
                Id::new(raw.name),
                raw.ty.to_string(),
                raw.constraint.map(String::from),
            ));
        } else {
            trace!(line; "Dropping non-matching body line");
        }
    }

    Entity::new(Id::new(block.name), shape, fields)
}
