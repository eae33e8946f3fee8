//! Reply text formatting.
//!
//! Webhook replies arrive as plain text with lightweight visual markers:
//! emoji-prefixed headings, `-` bullet lists, and ALL-CAPS section labels.
//! [`format_reply`] classifies each line into a [`DisplayBlock`] so the
//! terminal renderer can style them independently.

pub mod renderer;

pub use renderer::{RenderStyle, ReplyRenderer};

/// Marker glyphs that promote a line to a heading.
///
/// Matching is done on the base character, so variation-selector forms
/// (e.g. `🛠️`) match as well.
pub const HEADING_GLYPHS: &[&str] = &[
    "🔧", "👥", "⏰", "🛠", "🎯", "🔹", "🔍", "❌", "💡", "🤖", "📄", "❓",
];

/// A classified line of reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// Line starting with a marker glyph, kept verbatim.
    Heading(String),
    /// `-` list item with the marker and surrounding whitespace stripped.
    BulletItem(String),
    /// Short ALL-CAPS line, trimmed.
    SectionLabel(String),
    /// Any other line, kept verbatim.
    Paragraph(String),
    /// Empty line.
    Break,
}

/// Split reply text into display blocks, one per input line.
///
/// Pure and deterministic: the same input always produces the same
/// block sequence. Empty lines are preserved as [`DisplayBlock::Break`].
pub fn format_reply(text: &str) -> Vec<DisplayBlock> {
    text.split('\n').map(classify_line).collect()
}

/// Classify a single line. First matching rule wins: heading glyph,
/// then bullet, then section label, then paragraph.
fn classify_line(line: &str) -> DisplayBlock {
    if line.is_empty() {
        return DisplayBlock::Break;
    }

    let trimmed = line.trim();

    if HEADING_GLYPHS.iter().any(|glyph| trimmed.starts_with(glyph)) {
        return DisplayBlock::Heading(line.to_string());
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        return DisplayBlock::BulletItem(rest.trim().to_string());
    }

    if !trimmed.is_empty() && trimmed.chars().count() >= 4 && trimmed == trimmed.to_uppercase() {
        return DisplayBlock::SectionLabel(trimmed.to_string());
    }

    DisplayBlock::Paragraph(line.to_string())
}
