//! Terminal rendering for formatted replies.

use crossterm::{
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    ExecutableCommand,
};
use std::io::stdout;

use super::{format_reply, DisplayBlock};

/// Colors and prefixes used when printing reply blocks.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub heading_color: Color,
    pub label_color: Color,
    pub bullet_color: Color,
    pub bullet_glyph: &'static str,
    pub bullet_indent: &'static str,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            heading_color: Color::Cyan,
            label_color: Color::Yellow,
            bullet_color: Color::Cyan,
            bullet_glyph: "•",
            bullet_indent: "  ",
        }
    }
}

/// Prints formatted reply text to stdout.
#[derive(Debug, Clone, Default)]
pub struct ReplyRenderer {
    style: RenderStyle,
}

impl ReplyRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Format and print raw reply text.
    pub fn render_text(&self, text: &str) -> std::io::Result<()> {
        self.render(&format_reply(text))
    }

    /// Print an already-classified block sequence.
    pub fn render(&self, blocks: &[DisplayBlock]) -> std::io::Result<()> {
        for block in blocks {
            self.render_block(block)?;
        }
        Ok(())
    }

    fn render_block(&self, block: &DisplayBlock) -> std::io::Result<()> {
        match block {
            DisplayBlock::Heading(text) => {
                stdout()
                    .execute(SetAttribute(Attribute::Bold))?
                    .execute(SetForegroundColor(self.style.heading_color))?
                    .execute(Print(text))?
                    .execute(ResetColor)?
                    .execute(SetAttribute(Attribute::Reset))?;
                println!();
            }
            DisplayBlock::SectionLabel(text) => {
                stdout()
                    .execute(SetAttribute(Attribute::Bold))?
                    .execute(SetForegroundColor(self.style.label_color))?
                    .execute(Print(text))?
                    .execute(ResetColor)?
                    .execute(SetAttribute(Attribute::Reset))?;
                println!();
            }
            DisplayBlock::BulletItem(text) => {
                stdout()
                    .execute(Print(self.style.bullet_indent))?
                    .execute(SetForegroundColor(self.style.bullet_color))?
                    .execute(Print(self.style.bullet_glyph))?
                    .execute(ResetColor)?
                    .execute(Print(" "))?
                    .execute(Print(text))?;
                println!();
            }
            DisplayBlock::Paragraph(text) => {
                println!("{}", text);
            }
            DisplayBlock::Break => {
                println!();
            }
        }
        Ok(())
    }
}
