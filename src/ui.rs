//! Console status lines.
//!
//! Every phase reports progress as a single indented line: a colored glyph
//! followed by a short message. Warnings go to stderr so they survive
//! redirected output.

use colored::*;

/// Which pipeline step a status line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    Fork,
    Pin,
    Build,
}

impl Step {
    fn glyph(self) -> ColoredString {
        match self {
            Step::Fetch => "↓".blue(),
            Step::Fork => "⑂".magenta(),
            Step::Pin => "📌".cyan(),
            Step::Build => "🔨".yellow(),
        }
    }
}

pub fn step(kind: Step, msg: &str) {
    println!("   {} {}", kind.glyph(), msg);
}

pub fn header(msg: &str) {
    println!("{} {}", "📦".blue(), msg.bold());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("   {} {}", "⚠".yellow(), msg.yellow());
}
