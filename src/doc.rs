use std::str::FromStr;

use indexmap::IndexMap;

use crate::token::Quote;

/// A single semantic element of a dotenv document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// `KEY=value` assignment with its quote style.
    Variable {
        key: String,
        value: String,
        quote: Quote,
    },
    /// `# ...` comment; `inline` when it trails a variable on the same
    /// line rather than standing alone.
    Comment { text: String, inline: bool },
    /// Blank line.
    Newline,
}

/// An ordered dotenv document.
///
/// The element sequence preserves document order exactly, including
/// blank lines and comment placement, which is what makes round-trip
/// serialization possible. Keys are not required to be unique:
/// [`get`](Self::get), [`set`](Self::set), and [`remove`](Self::remove)
/// operate on the first match, so shadowed duplicates from malformed
/// input stay where they were parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvDoc {
    pub elements: Vec<Element>,
}

impl EnvDoc {
    /// Create an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Value of the first variable named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.elements.iter().find_map(|element| match element {
            Element::Variable { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key` to `value`, choosing the quote style from the value.
    ///
    /// The style is resolved once, at call time.
    pub fn set(&mut self, key: &str, value: &str) {
        self.set_with_quote(key, value, Quote::auto_for(value));
    }

    /// Set `key` to `value` with an explicit quote style.
    ///
    /// Updates the first matching variable in place, preserving its
    /// position in the document; appends a new variable otherwise.
    pub fn set_with_quote(&mut self, key: &str, value: &str, quote: Quote) {
        for element in &mut self.elements {
            if let Element::Variable {
                key: k,
                value: v,
                quote: q,
            } = element
                && k.as_str() == key
            {
                *v = value.to_string();
                *q = quote;
                return;
            }
        }
        self.elements.push(Element::Variable {
            key: key.to_string(),
            value: value.to_string(),
            quote,
        });
    }

    /// Remove the first variable named `key`; returns whether anything
    /// was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let found = self
            .elements
            .iter()
            .position(|element| matches!(element, Element::Variable { key: k, .. } if k == key));
        found.is_some_and(|idx| {
            self.elements.remove(idx);
            true
        })
    }

    /// Append a standalone comment line.
    pub fn add_comment(&mut self, text: &str) {
        self.elements.push(Element::Comment {
            text: text.to_string(),
            inline: false,
        });
    }

    /// Append a blank line.
    pub fn add_newline(&mut self) {
        self.elements.push(Element::Newline);
    }

    /// Copy every variable of `other` into `self` in order, later values
    /// winning over earlier ones.
    ///
    /// Comments and blank lines of `other` are not merged.
    pub fn merge(&mut self, other: &Self) {
        for element in &other.elements {
            if let Element::Variable { key, value, quote } = element {
                self.set_with_quote(key, value, *quote);
            }
        }
    }

    /// Apply `expander` to every variable value in document order.
    ///
    /// Comments and blank lines are never visited. Returns `self` for
    /// chaining.
    pub fn expand<F>(&mut self, mut expander: F) -> &mut Self
    where
        F: FnMut(&str) -> String,
    {
        for element in &mut self.elements {
            if let Element::Variable { value, .. } = element {
                *value = expander(value);
            }
        }
        self
    }

    /// Like [`expand`](Self::expand), but on a deep copy, leaving the
    /// receiver untouched.
    #[must_use]
    pub fn expand_clone<F>(&self, expander: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        let mut clone = self.clone();
        clone.expand(expander);
        clone
    }

    /// Variable keys in document order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Variable { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Comment texts in document order.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Comment { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Key → value map in document order; duplicate keys keep the last
    /// value seen.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for element in &self.elements {
            if let Element::Variable { key, value, .. } = element {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    /// Number of elements (variables, comments, and blank lines).
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromStr for EnvDoc {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_str(s)
    }
}
