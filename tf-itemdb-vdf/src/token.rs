//! Normalization and tokenization of KeyValues text.

/// Kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Contents of a double-quoted string, quotes removed. Escape sequences
    /// are kept verbatim (`\"` stays as two characters).
    Str(String),
    /// `{`
    Open,
    /// `}`
    Close,
}

/// A token with the (1-based) line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Prepare raw KeyValues text for tokenization.
///
/// - strips a leading UTF-8 byte-order mark
/// - converts `\r\n` (and lone `\r`) to `\n`
/// - blanks `#include` / `#base` style directive lines
/// - removes `//` comments, both whole-line and trailing after a value
///
/// Lines are blanked instead of removed so token line numbers still point
/// at the original text. Surrounding whitespace is trimmed from the end;
/// leading whitespace is skipped by the tokenizer.
pub fn normalize(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with('#') {
            continue;
        }
        out.push_str(strip_comment(line));
    }

    out.truncate(out.trim_end().len());
    out
}

/// Cut a line at the first `//` that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quote => i += 1,
            b'"' => in_quote = !in_quote,
            b'/' if !in_quote && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
        i += 1;
    }
    line
}

/// Split normalized text into quoted strings and braces.
///
/// Anything else (unquoted words, conditionals, stray characters) is not part
/// of the supported grammar and is skipped. An unterminated quoted string
/// ends tokenization.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            '{' => tokens.push(Token {
                kind: TokenKind::Open,
                line,
            }),
            '}' => tokens.push(Token {
                kind: TokenKind::Close,
                line,
            }),
            '"' => {
                let start_line = line;
                let mut content = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            content.push(c);
                            if let Some(escaped) = chars.next() {
                                if escaped == '\n' {
                                    line += 1;
                                }
                                content.push(escaped);
                            }
                        }
                        '\n' => {
                            line += 1;
                            content.push(c);
                        }
                        _ => content.push(c),
                    }
                }
                if !closed {
                    log::debug!("Unterminated string starting on line {start_line}, ignoring rest of input");
                    break;
                }
                tokens.push(Token {
                    kind: TokenKind::Str(content),
                    line: start_line,
                });
            }
            _ => {}
        }
    }

    tokens
}
