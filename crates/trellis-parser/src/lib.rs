//! # Trellis Parser
//!
//! Parser for the Trellis entity-relationship DSL. This crate provides the
//! pipeline from source text to the semantic diagram model.
//!
//! Parsing is best-effort by design: fragments that do not match the
//! expected shapes are skipped, never reported. The entry point is total
//! over arbitrary input and cannot fail.
//!
//! ## Usage
//!
//! ```
//! let source = r#"
//!     User: {
//!       shape: rectangle
//!       id: int {constraint: primary_key}
//!       name: string
//!     }
//!     Order: {
//!       id: int {constraint: primary_key}
//!       user_id: int
//!     }
//!     Order.user_id -> User.id
//! "#;
//!
//! let diagram = trellis_parser::parse(source);
//! assert_eq!(diagram.entities().len(), 2);
//! assert_eq!(diagram.relations().len(), 1);
//! ```

mod elaborate;
mod extract;

use log::debug;

use trellis_core::model::Diagram;

/// Parse DSL source text into a semantic diagram model.
///
/// This is the main entry point for parsing Trellis DSL source. It
/// orchestrates the two extraction scans and the elaboration step:
///
/// 1. **Extract** - Scan for entity blocks and relation arrows
/// 2. **Elaborate** - Build the diagram model, applying the
///    last-write-wins policy for duplicate entity names
///
/// The function is pure and infallible: malformed fragments are dropped
/// rather than raised, and each invocation depends only on its input.
///
/// # Arguments
///
/// * `source` - The Trellis DSL source text to parse
///
/// # Example
///
/// ```
/// let diagram = trellis_parser::parse("User.id -> Order.user_id");
/// assert!(diagram.entities().is_empty());
/// assert_eq!(diagram.relations().len(), 1);
/// ```
pub fn parse(source: &str) -> Diagram {
    let blocks = extract::entity_blocks(source);
    let arrows = extract::relation_arrows(source);

    debug!(
        entity_blocks = blocks.len(),
        relation_arrows = arrows.len();
        "Extracted raw matches"
    );

    elaborate::elaborate(blocks, arrows)
}
