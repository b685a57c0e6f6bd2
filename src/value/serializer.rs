//! Pretty printer for catalog text.
//!
//! The layout is fixed so that catalogs diff cleanly and stay editable by hand:
//!
//! ```text
//! #fr =
//! [
//!     [
//!         #o = "Hello",
//!         #t = "Bonjour"
//!     ]
//! ]
//! ```

use super::{
    Value,
    ValueKind,
};

/// One indentation step.
const INDENT: &str = "    ";

/// Renders `value` as catalog text at the given nesting level.
#[must_use]
pub fn to_text(value: &Value, level: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, level);
    out
}

fn write_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_value(out: &mut String, value: &Value, level: usize) {
    if !value.name().is_empty() {
        write_indent(out, level);
        out.push('#');
        out.push_str(value.name());
        out.push_str(" = ");
        if value.is_array() {
            out.push('\n');
        }
    } else if !value.is_array() {
        write_indent(out, level);
    }

    match value.kind() {
        ValueKind::Void => {}
        ValueKind::Int(number) => out.push_str(&number.to_string()),
        ValueKind::Float(number) => out.push_str(&format_float(*number)),
        ValueKind::Str(text) => {
            out.push('"');
            out.push_str(text);
            out.push('"');
        }
        ValueKind::Array(elements) => {
            write_indent(out, level);
            out.push_str("[\n");
            let mut children = elements.iter().peekable();
            while let Some(child) = children.next() {
                write_value(out, child, level + 1);
                out.push_str(if children.peek().is_some() { ",\n" } else { "\n" });
            }
            write_indent(out, level);
            out.push(']');
        }
    }
}

/// Integral floats keep a trailing `.0` so they read back as the same number.
fn format_float(number: f64) -> String {
    let text = number.to_string();
    if number.is_finite() && !text.contains('.') { format!("{text}.0") } else { text }
}
