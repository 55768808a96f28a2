//! Semantic styles for terminal output.
//!
//! Render code asks for a style by what the text *is* (an attribute name, a
//! field label, a failure), never by colour. `console` drops the escape codes
//! when stdout is not a terminal.

use console::Style;

/// Attribute names and other primary identifiers.
pub fn name() -> Style {
    Style::new().bold()
}

/// Field labels and secondary metadata.
pub fn label() -> Style {
    Style::new().dim()
}

pub fn value() -> Style {
    Style::new().cyan()
}

pub fn error() -> Style {
    Style::new().red().bold()
}

/// Inputs echoed back next to a failure.
pub fn input() -> Style {
    Style::new().yellow()
}
