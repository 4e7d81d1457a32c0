//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types for the Trellis
//! entity-relationship diagram pipeline. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Model**: The semantic diagram model ([`model`] module)

pub mod identifier;
pub mod model;
