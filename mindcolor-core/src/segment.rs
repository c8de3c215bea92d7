//! Reading text segmenter.
//!
//! The long-form reading uses a lightweight two-level markup: blocks are
//! separated by blank lines, a block prefixed with `##` is a section
//! heading, and `**` marks emphasis. This module splits a raw reading
//! into typed, marker-stripped segments; classification is split-then-
//! classify with no hidden cursor state.

/// Two-character heading marker.
const HEADING_MARKER: &str = "##";

/// Two-character emphasis (bold) marker.
const EMPHASIS_MARKER: &str = "**";

/// Block delimiter: two consecutive line breaks.
const BLOCK_DELIMITER: &str = "\n\n";

/// Classification of one reading block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Section heading (`##`-prefixed block)
    Heading,
    /// Body paragraph
    Paragraph,
}

/// One classified, marker-stripped unit of the reading.
///
/// Segments have no identity beyond their position, which is stable
/// across re-renders of the same reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Split a raw reading into typed display segments.
///
/// Blocks are taken in document order and none is dropped: an
/// all-whitespace block yields an empty paragraph segment. Every literal
/// `**` is removed before classification; a block starting with `##`
/// (after emphasis stripping and trimming) becomes a heading with the
/// marker and any following whitespace removed.
///
/// Pure and deterministic. The empty string segments to a single empty
/// paragraph, mirroring the underlying split (splitting `""` yields one
/// empty block); callers wanting zero segments for empty input must
/// special-case it themselves.
pub fn segment(raw: &str) -> Vec<Segment> {
    raw.split(BLOCK_DELIMITER).map(classify_block).collect()
}

/// Strip emphasis markers and classify a single block.
fn classify_block(block: &str) -> Segment {
    let stripped = block.replace(EMPHASIS_MARKER, "");
    let trimmed = stripped.trim();

    match trimmed.strip_prefix(HEADING_MARKER) {
        Some(rest) => Segment {
            kind: SegmentKind::Heading,
            text: rest.trim_start().to_string(),
        },
        None => Segment {
            kind: SegmentKind::Paragraph,
            text: trimmed.to_string(),
        },
    }
}
