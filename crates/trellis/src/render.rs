//! Rendering of the semantic diagram model into PlantUML markup.
//!
//! The output is a fixed, line-oriented textual protocol consumed by the
//! remote rendering service's markup interpreter. Line order, the `*`
//! prefix rule, the blank line after each entity block, and the `-->` arrow
//! token are all part of the wire format and must match byte-for-byte.

use trellis_core::model::Diagram;

/// Opening line of the markup document.
const MARKUP_START: &str = "@startuml";

/// Closing line of the markup document.
const MARKUP_END: &str = "@enduml";

/// Render a diagram model into PlantUML entity-diagram markup.
///
/// Entities render first in model order, one block per entity with a blank
/// line after each, then relations in model order, between `@startuml` and
/// `@enduml`. Fields render one per line in field order; a field carrying
/// the `primary_key` constraint gets a `*` prefix, any other or absent
/// constraint gets none. The entity shape hint is carried in the model but
/// not emitted.
///
/// Lines are joined with `\n` and the result has no trailing newline.
pub fn render_markup(diagram: &Diagram) -> String {
    let mut lines: Vec<String> = vec![MARKUP_START.to_string()];

    for entity in diagram.entities() {
        lines.push(format!("entity {} {{", entity.name()));
        for field in entity.fields() {
            let prefix = if field.is_primary_key() { "*" } else { "" };
            lines.push(format!("  {prefix}{} : {}", field.name(), field.ty()));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    for relation in diagram.relations() {
        lines.push(format!(
            "{}::{} --> {}::{}",
            relation.left_entity(),
            relation.left_field(),
            relation.right_entity(),
            relation.right_field()
        ));
    }

    lines.push(MARKUP_END.to_string());
    lines.join("\n")
}
