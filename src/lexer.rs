use std::fmt;

use crate::token::{Quote, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start a line or continue a key.
    UnexpectedCharacter(char),
    /// Key continued after embedded whitespace.
    WhitespaceInKey,
    /// Quoted value never closed.
    UnterminatedQuote(char),
    /// Non-blank character after a closing quote.
    UnexpectedCharacterAfterQuote(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
            Self::WhitespaceInKey => {
                write!(f, "key contains embedded whitespace")
            }
            Self::UnterminatedQuote(delim) => {
                write!(f, "unterminated {delim}-quoted value")
            }
            Self::UnexpectedCharacterAfterQuote(ch) => {
                write!(f, "unexpected character after closing quote: {ch}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize dotenv source text into a sequence of tokens.
///
/// # Errors
///
/// Returns `LexError` on unterminated quotes, stray characters after a
/// closing quote, keys with embedded whitespace, or characters that
/// cannot start a line.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

/// Single-pass scanner over the input characters.
///
/// Line terminators that close a name, value, or comment are consumed
/// with that line; only a terminator seen between tokens (a blank line)
/// emits a `Newline` token. That split is what keeps blank lines
/// round-trippable without doubling every assignment line.
struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' => self.advance(),
                '\n' | '\r' => {
                    let start = self.span();
                    self.consume_newline();
                    tokens.push(Token {
                        kind: TokenKind::Newline,
                        text: "\n".to_string(),
                        start,
                        end: start,
                    });
                }
                '#' => {
                    let comment = self.read_comment();
                    tokens.push(comment);
                }
                _ if is_key_char(ch) => self.read_assignment(&mut tokens)?,
                _ => return Err(self.error(LexErrorKind::UnexpectedCharacter(ch))),
            }
        }

        Ok(tokens)
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    const fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            span: self.span(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consume one non-terminator character.
    fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
            self.col += 1;
        }
    }

    /// Consume one line terminator: LF, or CR optionally followed by LF.
    fn consume_newline(&mut self) {
        match self.peek() {
            Some('\r') => {
                self.pos += 1;
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            Some('\n') => self.pos += 1,
            _ => return,
        }
        self.line += 1;
        self.col = 0;
    }

    /// Read a `KEY`, `KEY=value`, or `KEY # comment` line starting at a
    /// key character.
    fn read_assignment(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let start = self.span();
        let mut name = String::new();
        let mut terminated = false;

        loop {
            match self.peek() {
                Some(ch) if is_key_char(ch) => {
                    if terminated {
                        return Err(self.error(LexErrorKind::WhitespaceInKey));
                    }
                    name.push(ch);
                    self.advance();
                }
                Some(' ' | '\t') => {
                    terminated = true;
                    self.advance();
                }
                Some('=') => {
                    let end = self.span();
                    self.advance();
                    tokens.push(Token {
                        kind: TokenKind::Name,
                        text: name,
                        start,
                        end,
                    });
                    return self.read_value(tokens);
                }
                Some('#') => {
                    // Bare key with a trailing comment; the builder
                    // resolves the key to an empty value.
                    tokens.push(Token {
                        kind: TokenKind::Name,
                        text: name,
                        start,
                        end: self.span(),
                    });
                    let comment = self.read_comment();
                    tokens.push(comment);
                    return Ok(());
                }
                Some('\n' | '\r') | None => {
                    tokens.push(Token {
                        kind: TokenKind::Name,
                        text: name,
                        start,
                        end: self.span(),
                    });
                    self.consume_newline();
                    return Ok(());
                }
                Some(ch) => {
                    return Err(self.error(LexErrorKind::UnexpectedCharacter(ch)));
                }
            }
        }
    }

    /// Read the value after `=`, dispatching on the first non-blank
    /// character.
    fn read_value(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }

        if let Some(delim @ ('"' | '\'' | '`')) = self.peek() {
            self.read_quoted(delim, tokens)
        } else {
            self.read_unquoted(tokens);
            Ok(())
        }
    }

    /// Unquoted value: runs to `#`, a line terminator, or end of input;
    /// trailing whitespace is trimmed.
    fn read_unquoted(&mut self, tokens: &mut Vec<Token>) {
        let start = self.span();
        let mut raw = String::new();

        while let Some(ch) = self.peek() {
            if matches!(ch, '#' | '\n' | '\r') {
                break;
            }
            raw.push(ch);
            self.advance();
        }

        tokens.push(Token {
            kind: TokenKind::Value { quote: Quote::None },
            text: raw.trim_end().to_string(),
            start,
            end: self.span(),
        });

        if self.peek() == Some('#') {
            let comment = self.read_comment();
            tokens.push(comment);
        } else {
            self.consume_newline();
        }
    }

    /// Quoted value: accumulates verbatim (newlines included) until the
    /// matching unescaped delimiter, then decodes the body per style and
    /// rejects anything but blanks or a comment on the rest of the line.
    fn read_quoted(&mut self, delim: char, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let start = self.span();
        self.advance(); // opening delimiter

        let mut raw = String::new();
        let mut escaped = false;

        loop {
            match self.peek() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedQuote(delim),
                        span: start,
                    });
                }
                Some('\n' | '\r') => {
                    self.consume_newline();
                    raw.push('\n');
                    escaped = false;
                }
                Some(ch) if escaped => {
                    raw.push(ch);
                    escaped = false;
                    self.advance();
                }
                Some('\\') => {
                    raw.push('\\');
                    escaped = true;
                    self.advance();
                }
                Some(ch) if ch == delim => break,
                Some(ch) => {
                    raw.push(ch);
                    self.advance();
                }
            }
        }

        let end = self.span();
        self.advance(); // closing delimiter

        let quote = match delim {
            '\'' => Quote::Single,
            '"' => Quote::Double,
            _ => Quote::Backtick,
        };
        let text = if quote == Quote::Single {
            raw.replace("\\'", "'")
        } else {
            decode_escapes(&raw)
        };

        tokens.push(Token {
            kind: TokenKind::Value { quote },
            text,
            start,
            end,
        });

        // Only blanks or a comment may follow the closing delimiter.
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
        match self.peek() {
            Some('#') => {
                let comment = self.read_comment();
                tokens.push(comment);
                Ok(())
            }
            Some('\n' | '\r') | None => {
                self.consume_newline();
                Ok(())
            }
            Some(ch) => Err(self.error(LexErrorKind::UnexpectedCharacterAfterQuote(ch))),
        }
    }

    /// Comment: `#`, leading blanks skipped, rest of the line verbatim.
    fn read_comment(&mut self) -> Token {
        let start = self.span();
        self.advance(); // '#'

        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }

        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if matches!(ch, '\n' | '\r') {
                break;
            }
            text.push(ch);
            self.advance();
        }

        let end = self.span();
        self.consume_newline();

        Token {
            kind: TokenKind::Comment,
            text,
            start,
            end,
        }
    }
}

const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Decode the double-quote/backtick escape table.
///
/// `\n \r \t \b \f \\ \" \' \`` become their one-character substitutions;
/// `\uXXXX` decodes a 4-hex-digit BMP code point and `\UXXXXXXXX` an
/// 8-hex-digit scalar. An unrecognized escape or malformed hex run is not
/// an error: the backslash passes through literally and scanning resumes
/// at the next character.
fn decode_escapes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 == chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        let simple = match next {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'b' => Some('\u{0008}'),
            'f' => Some('\u{000C}'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\'' => Some('\''),
            '`' => Some('`'),
            _ => None,
        };

        if let Some(ch) = simple {
            out.push(ch);
            i += 2;
            continue;
        }

        if next == 'u' || next == 'U' {
            let digits = if next == 'u' { 4 } else { 8 };
            if let Some(ch) = decode_unicode_escape(&chars[i + 2..], digits) {
                out.push(ch);
                i += 2 + digits;
                continue;
            }
        }

        out.push('\\');
        i += 1;
    }

    out
}

fn decode_unicode_escape(chars: &[char], digits: usize) -> Option<char> {
    if chars.len() < digits {
        return None;
    }
    let mut value = 0u32;
    for &ch in &chars[..digits] {
        value = value * 16 + ch.to_digit(16)?;
    }
    char::from_u32(value)
}
