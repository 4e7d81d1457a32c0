//! Lexical extraction of raw matches from DSL source text.
//!
//! This module finds the raw lexical units the elaborator works from:
//! entity blocks (`name: { ... }`), relation arrows
//! (`Left.field -> Right.field`), and field lines inside entity bodies.
//!
//! Matching is purely syntactic and best-effort: each scan walks the whole
//! source, attempting an anchored parser at every position and advancing one
//! character when it does not match. Non-matching text is skipped without
//! producing an error. The two scans are independent, so a relation arrow
//! inside an entity body is still found.

use winnow::{
    Parser,
    ascii::multispace0,
    combinator::{alt, delimited, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    token::take_while,
};

type IResult<O> = ModalResult<O>;

/// A raw entity block match: the leading identifier and the body between
/// the braces, not yet split into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawEntity<'src> {
    pub name: &'src str,
    pub body: &'src str,
}

/// A raw relation arrow match with its four identifier captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawRelation<'src> {
    pub left_entity: &'src str,
    pub left_field: &'src str,
    pub right_entity: &'src str,
    pub right_field: &'src str,
}

/// A raw field line match: name, type, and optional constraint tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawField<'src> {
    pub name: &'src str,
    pub ty: &'src str,
    pub constraint: Option<&'src str>,
}

/// Parse an identifier word: one or more ASCII alphanumerics or underscores.
fn word<'src>(input: &mut &'src str) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse an entity block body up to the block's closing brace.
///
/// The body spans any characters including newlines. One level of embedded
/// `{ ... }` groups (constraint clauses) is passed through; deeper nesting is
/// not supported, and a bare `}` inside the body closes the block early.
fn body_text<'src>(input: &mut &'src str) -> IResult<&'src str> {
    repeat::<_, _, (), _, _>(
        0..,
        alt((
            take_while(1.., |c: char| c != '{' && c != '}').void(),
            delimited('{', take_while(0.., |c: char| c != '{' && c != '}'), '}').void(),
        )),
    )
    .take()
    .parse_next(input)
}

/// Parse an entity block anchored at the current position: `name: { body }`.
///
/// No whitespace is permitted between the name and the colon.
fn entity_block<'src>(input: &mut &'src str) -> IResult<RawEntity<'src>> {
    let name = word.parse_next(input)?;
    ':'.parse_next(input)?;
    multispace0.parse_next(input)?;
    '{'.parse_next(input)?;
    let body = body_text.parse_next(input)?;
    '}'.parse_next(input)?;
    Ok(RawEntity { name, body })
}

/// Parse a relation arrow anchored at the current position:
/// `Left.field -> Right.field`.
fn relation_arrow<'src>(input: &mut &'src str) -> IResult<RawRelation<'src>> {
    let left_entity = word.parse_next(input)?;
    '.'.parse_next(input)?;
    let left_field = word.parse_next(input)?;
    multispace0.parse_next(input)?;
    "->".parse_next(input)?;
    multispace0.parse_next(input)?;
    let right_entity = word.parse_next(input)?;
    '.'.parse_next(input)?;
    let right_field = word.parse_next(input)?;
    Ok(RawRelation {
        left_entity,
        left_field,
        right_entity,
        right_field,
    })
}

/// Parse a constraint clause: `{constraint: tag}`.
///
/// The closing brace must immediately follow the tag word.
fn constraint_clause<'src>(input: &mut &'src str) -> IResult<&'src str> {
    preceded(
        (multispace0, "{constraint:", multispace0),
        terminated(word, '}'),
    )
    .parse_next(input)
}

/// Scan the whole source for non-overlapping matches of `matcher`.
///
/// Attempts the parser at every position; on a match the scan continues
/// after the consumed text, otherwise it advances one character. This gives
/// leftmost, non-overlapping matches in source order.
fn scan<'src, O, P>(source: &'src str, mut matcher: P) -> Vec<O>
where
    P: Parser<&'src str, O, ErrMode<ContextError>>,
{
    let mut rest = source;
    let mut matches = Vec::new();
    while !rest.is_empty() {
        match matcher.parse_peek(rest) {
            Ok((remaining, found)) => {
                matches.push(found);
                rest = remaining;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }
    matches
}

/// Extract every entity block from the source, in source order.
///
/// Blocks sharing a name are all yielded; the overwrite policy is applied
/// during elaboration.
pub(crate) fn entity_blocks(source: &str) -> Vec<RawEntity<'_>> {
    scan(source, entity_block)
}

/// Extract every relation arrow from the source, in source order.
pub(crate) fn relation_arrows(source: &str) -> Vec<RawRelation<'_>> {
    scan(source, relation_arrow)
}

/// Match a trimmed body line against the field pattern:
/// `name: type` optionally followed by `{constraint: tag}`.
///
/// This is a total function: lines that do not match yield `None` and are
/// dropped by the elaborator. Trailing text after a successful match is
/// ignored, and a malformed constraint clause leaves the field without a
/// constraint rather than rejecting the line.
pub(crate) fn field_line(line: &str) -> Option<RawField<'_>> {
    fn field<'src>(input: &mut &'src str) -> IResult<RawField<'src>> {
        let name = word.parse_next(input)?;
        ':'.parse_next(input)?;
        multispace0.parse_next(input)?;
        let ty = word.parse_next(input)?;
        let constraint = opt(constraint_clause).parse_next(input)?;
        Ok(RawField {
            name,
            ty,
            constraint,
        })
    }

    field.parse_peek(line).ok().map(|(_, found)| found)
}
