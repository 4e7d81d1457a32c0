//! Semantic diagram model types.
//!
//! This module contains the semantic representation of an entity-relationship
//! diagram after extraction and elaboration. These types are the hand-off
//! point between the parser and the markup renderer.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ extract
//! Raw Matches (entity blocks, relation arrows)
//!     ↓ elaborate
//! Semantic Model (these types)
//!     ↓ render
//! PlantUML Markup
//!     ↓ encode
//! URL-safe Token
//! ```
//!
//! The model is a transient compilation artifact: it is built once per
//! pipeline run, consumed once by the renderer, and never persisted.

use serde::Serialize;

use crate::identifier::Id;

/// Constraint tag that marks a field as a primary key in rendered markup.
pub const PRIMARY_KEY: &str = "primary_key";

/// A single typed field inside an entity block.
///
/// The constraint is an open string tag (for example `primary_key`); no
/// enumeration is enforced and any identifier-shaped token is passed through.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    name: Id,
    ty: String,
    constraint: Option<String>,
}

impl Field {
    /// Create a new Field with an optional constraint tag.
    pub fn new(name: Id, ty: String, constraint: Option<String>) -> Self {
        Self {
            name,
            ty,
            constraint,
        }
    }

    /// Get the field identifier.
    pub fn name(&self) -> Id {
        self.name
    }

    /// Get the field's declared type text.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Get the field's constraint tag, if one was declared.
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    /// Whether this field carries the `primary_key` constraint.
    ///
    /// Only this exact tag triggers the `*` prefix in rendered markup; any
    /// other or absent constraint renders with no prefix.
    pub fn is_primary_key(&self) -> bool {
        self.constraint.as_deref() == Some(PRIMARY_KEY)
    }
}

/// An entity declaration with an optional shape hint and ordered fields.
///
/// Field order is preserved exactly as encountered in the source body;
/// insertion order controls render order.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    name: Id,
    shape: Option<String>,
    fields: Vec<Field>,
}

impl Entity {
    /// Create a new Entity.
    pub fn new(name: Id, shape: Option<String>, fields: Vec<Field>) -> Self {
        Self {
            name,
            shape,
            fields,
        }
    }

    /// Get the entity identifier.
    pub fn name(&self) -> Id {
        self.name
    }

    /// Get the entity's shape hint, if one was declared.
    ///
    /// The shape is carried through the model but not emitted into the
    /// PlantUML markup.
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// Borrow the entity's fields in source order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A directed reference from one entity's field to another's.
///
/// Relations are preserved verbatim: a relation may reference an entity or
/// field that was never declared, and no referential-integrity check is
/// performed against the declared entities.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Relation {
    left_entity: Id,
    left_field: Id,
    right_entity: Id,
    right_field: Id,
}

impl Relation {
    /// Create a new Relation between two entity fields.
    pub fn new(left_entity: Id, left_field: Id, right_entity: Id, right_field: Id) -> Self {
        Self {
            left_entity,
            left_field,
            right_entity,
            right_field,
        }
    }

    /// Get the referencing entity identifier.
    pub fn left_entity(&self) -> Id {
        self.left_entity
    }

    /// Get the referencing field identifier.
    pub fn left_field(&self) -> Id {
        self.left_field
    }

    /// Get the referenced entity identifier.
    pub fn right_entity(&self) -> Id {
        self.right_entity
    }

    /// Get the referenced field identifier.
    pub fn right_field(&self) -> Id {
        self.right_field
    }
}

/// The complete diagram model: ordered entities and ordered relations.
///
/// Invariants:
///
/// - Entity order equals the order of first appearance in the source text.
///   A later block with the same name replaces the earlier entity's content
///   in place (last-write-wins) without moving it.
/// - Relation order equals match order in the source; relations are
///   append-only and never deduplicated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagram {
    entities: Vec<Entity>,
    relations: Vec<Relation>,
}

impl Diagram {
    /// Create a new Diagram from elaborated entities and relations.
    pub fn new(entities: Vec<Entity>, relations: Vec<Relation>) -> Self {
        Self {
            entities,
            relations,
        }
    }

    /// Borrow the entities in first-appearance order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Borrow the relations in match order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Whether the diagram contains no entities and no relations.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}
