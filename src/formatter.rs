//! Serializer that turns a document back into dotenv text.
//!
//! Emission is value-preserving rather than byte-identical: escape
//! sequences decoded at parse time are written out literally, with only
//! the backslash and the delimiter re-escaped inside double/backtick
//! quotes so the output re-parses to the same values.

use std::fmt;

use crate::doc::{Element, EnvDoc};
use crate::token::Quote;

/// Serialize a document's elements in order.
///
/// A blank line per `Newline` element, `# text` lines for standalone
/// comments, and `key=value` lines for variables with the value wrapped
/// in its quote delimiters. An inline comment is consumed onto its
/// owning variable's line via one element of lookahead, never emitted
/// twice.
#[must_use]
pub fn format(doc: &EnvDoc) -> String {
    let mut out = String::new();
    let mut idx = 0;

    while idx < doc.elements.len() {
        match &doc.elements[idx] {
            Element::Newline => out.push('\n'),
            Element::Comment { text, .. } => {
                // An inline comment reaching this point has no owning
                // variable line; write it standalone.
                push_comment(&mut out, text);
                out.push('\n');
            }
            Element::Variable { key, value, quote } => {
                out.push_str(key);
                out.push('=');
                push_value(&mut out, value, *quote);
                if let Some(Element::Comment { text, inline: true }) = doc.elements.get(idx + 1) {
                    out.push(' ');
                    push_comment(&mut out, text);
                    idx += 1;
                }
                out.push('\n');
            }
        }
        idx += 1;
    }

    out
}

fn push_comment(out: &mut String, text: &str) {
    if text.is_empty() {
        out.push('#');
    } else {
        out.push_str("# ");
        out.push_str(text);
    }
}

fn push_value(out: &mut String, value: &str, quote: Quote) {
    let Some(delim) = quote.delimiter() else {
        out.push_str(value);
        return;
    };

    out.push(delim);
    if quote == Quote::Single {
        // Single-quoted bodies are written raw; values containing `'`
        // are not round-trippable in this style.
        out.push_str(value);
    } else {
        for ch in value.chars() {
            // A raw CR would be folded to LF on re-parse.
            if ch == '\r' {
                out.push_str("\\r");
                continue;
            }
            if ch == '\\' || ch == delim {
                out.push('\\');
            }
            out.push(ch);
        }
    }
    out.push(delim);
}

impl fmt::Display for EnvDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
