use crate::doc::{Element, EnvDoc};
use crate::token::{Quote, Token, TokenKind};

/// Build an [`EnvDoc`] from a token stream.
///
/// The walk is infallible: every syntax violation is already rejected by
/// the lexer, so the builder only has to resolve token ordering into
/// document elements.
#[must_use]
pub fn build(tokens: &[Token]) -> EnvDoc {
    Builder::new(tokens).build()
}

struct Builder<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Builder<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn build(mut self) -> EnvDoc {
        let mut doc = EnvDoc::new();
        // A name token waiting for its value; a bare `KEY` line resolves
        // to an empty value when anything other than a value follows.
        let mut pending: Option<String> = None;

        while self.pos < self.tokens.len() {
            let token = &self.tokens[self.pos];
            match &token.kind {
                TokenKind::Name => {
                    flush_pending(&mut doc, pending.take());
                    pending = Some(token.text.clone());
                }
                TokenKind::Value { quote } => {
                    // The lexer only emits a value after `KEY=`.
                    if let Some(key) = pending.take() {
                        doc.elements.push(Element::Variable {
                            key,
                            value: token.text.clone(),
                            quote: *quote,
                        });
                    }
                }
                TokenKind::Comment => {
                    flush_pending(&mut doc, pending.take());
                    doc.elements.push(Element::Comment {
                        text: token.text.clone(),
                        inline: self.is_inline_comment(),
                    });
                }
                TokenKind::Newline => {
                    flush_pending(&mut doc, pending.take());
                    doc.elements.push(Element::Newline);
                }
            }
            self.pos += 1;
        }

        flush_pending(&mut doc, pending);
        doc
    }

    /// A comment is inline when the token just before it is a name or
    /// value ending on the comment's starting line.
    fn is_inline_comment(&self) -> bool {
        let Some(prev) = self.pos.checked_sub(1).map(|idx| &self.tokens[idx]) else {
            return false;
        };
        matches!(prev.kind, TokenKind::Name | TokenKind::Value { .. })
            && prev.end.line == self.tokens[self.pos].start.line
    }
}

fn flush_pending(doc: &mut EnvDoc, pending: Option<String>) {
    if let Some(key) = pending {
        doc.elements.push(Element::Variable {
            key,
            value: String::new(),
            quote: Quote::None,
        });
    }
}
