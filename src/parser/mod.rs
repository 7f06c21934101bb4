use std::path::{Path, PathBuf};

use crate::error::HoconError;
use crate::lexer::{Lexer, Token};
use crate::resolver;
use crate::value::Value;

mod object;
mod value;


/// Characters that may not appear in unquoted keys and unquoted strings.
pub(crate) const FORBIDDEN_CHARACTERS: &[char] = &[
    '$', '"', '{', '}', '[', ']', ':', '=', ',', '+', '#', '`', '^', '?', '!', '@', '*', '&',
    '\\', '(', ')',
];

pub(crate) fn is_forbidden_char(c: char) -> bool {
    FORBIDDEN_CHARACTERS.contains(&c)
}

/// Strip one pair of surrounding double quotes from a lexeme.
pub(crate) fn strip_quotes(lexeme: &str) -> String {
    match lexeme.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner).to_string(),
        None => lexeme.to_string(),
    }
}

/// Recursive-descent parser over the token stream.
///
/// Every parse invocation owns its lexer; include processing spins up a
/// fresh parser over the included file's contents, so no scanner state is
/// ever shared between documents.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    /// Directory of the file being parsed, used to resolve include paths.
    file_dir: Option<PathBuf>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            token: Token::Eof,
            file_dir: None,
        }
    }

    pub(crate) fn with_file_dir(input: &'a str, file_dir: Option<&Path>) -> Self {
        Parser {
            lexer: Lexer::new(input),
            token: Token::Eof,
            file_dir: file_dir.map(Path::to_path_buf),
        }
    }

    /// Parse a full document and resolve its substitutions.
    ///
    /// A document whose first token is `[` is a top-level array; anything
    /// else is a top-level object whose outer braces may be omitted. Any
    /// token left over after the root value is an error.
    pub fn parse(&mut self) -> Result<Value, HoconError> {
        self.advance()?;

        let mut root = if self.token == Token::Punct('[') {
            let array = value::extract_array(self)?;

            if self.token != Token::Eof {
                return Err(HoconError::invalid_array(
                    format!("invalid token {}", self.token.text()),
                    self.line(),
                    self.column(),
                ));
            }

            Value::Array(array)
        } else {
            let object = object::extract_object(self)?;

            if self.token != Token::Eof {
                return Err(HoconError::invalid_object(
                    format!("invalid token {}", self.token.text()),
                    self.line(),
                    self.column(),
                ));
            }

            Value::Object(object)
        };

        resolver::resolve(&mut root)?;

        Ok(root)
    }

    pub(crate) fn advance(&mut self) -> Result<(), HoconError> {
        self.token = self.lexer.next_token()?;
        Ok(())
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn column(&self) -> usize {
        self.lexer.column()
    }

    /// Consume a `#` comment through raw character reads, then scan the
    /// first token after the newline.
    pub(crate) fn consume_comment(&mut self) -> Result<(), HoconError> {
        while let Some(c) = self.lexer.read_char() {
            if c == '\n' {
                break;
            }
        }
        self.advance()
    }

    /// Whether the current token separates a key from its value.
    pub(crate) fn is_separator(&self) -> bool {
        match self.token {
            Token::Punct('=') | Token::Punct(':') => true,
            Token::Punct('+') => self.lexer.peek_char() == Some('='),
            _ => false,
        }
    }

    /// Whether the current token may extend a value concatenation: a
    /// substitution start, unquoted text, or a quoted single-line string.
    pub(crate) fn is_token_concatenable(&self) -> bool {
        match &self.token {
            Token::Ident(_) => true,
            Token::String(lexeme) => !self.is_multi_line_start(lexeme),
            Token::Punct('$') => self.lexer.peek_char() == Some('{'),
            Token::Punct(c) => !is_forbidden_char(*c),
            _ => false,
        }
    }

    /// A lexed `""` immediately followed by a third quote opens a
    /// multi-line string.
    pub(crate) fn is_multi_line_start(&self, lexeme: &str) -> bool {
        lexeme == "\"\"" && self.lexer.peek_char() == Some('"')
    }
}
