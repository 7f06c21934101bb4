use super::*;

/// Advance the character iterator and update line/column tracking.
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip layout before a token: newlines and `//` comments are dropped,
/// tab/space runs are collected into the lexer's whitespace buffer.
pub(super) fn skip_layout(lexer: &mut Lexer) {
    lexer.whitespace.clear();

    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' => {
                lexer.whitespace.push(c);
                bump(lexer);
            }
            '\n' | '\r' => {
                bump(lexer);
            }
            '/' if peek_second(lexer) == Some('/') => {
                // line comment, leave the newline for the loop to count
                while let Some(ch) = lexer.peek {
                    if ch == '\n' {
                        break;
                    }
                    bump(lexer);
                }
            }
            _ => break,
        }
    }
}

/// Look one character past the current lookahead without consuming anything.
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}
