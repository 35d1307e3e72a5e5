//! Display-only highlighting for code blocks in topic details.
//!
//! Recognises double-quoted strings, `//` line comments and a fixed set of
//! Java-flavoured keywords. Everything else is plain text. Escaping is left
//! to the renderer.

const KEYWORDS: &[&str] = &[
    "public",
    "class",
    "void",
    "int",
    "String",
    "new",
    "return",
    "if",
    "else",
    "static",
    "abstract",
    "interface",
    "extends",
    "implements",
    "super",
    "this",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    String,
    Comment,
    Keyword,
}

impl TokenKind {
    /// CSS class used by the code view.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Plain => "code-plain",
            TokenKind::String => "code-string",
            TokenKind::Comment => "code-comment",
            TokenKind::Keyword => "code-keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn push(tokens: &mut Vec<Token>, kind: TokenKind, text: &str) {
    if text.is_empty() {
        return;
    }
    if kind == TokenKind::Plain {
        if let Some(last) = tokens.last_mut().filter(|t| t.kind == TokenKind::Plain) {
            last.text.push_str(text);
            return;
        }
    }
    tokens.push(Token {
        kind,
        text: text.to_owned(),
    });
}

/// Split `code` into tokens. Concatenating the token texts yields `code`.
#[must_use]
pub fn highlight(code: &str) -> Vec<Token> {
    let bytes = code.as_bytes();
    let mut tokens: Vec<Token> = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'"' {
            // Strings close on the same line or are not strings at all.
            let close = bytes[i + 1..]
                .iter()
                .take_while(|&&c| c != b'\n')
                .position(|&c| c == b'"');
            if let Some(offset) = close {
                let end = i + 1 + offset + 1;
                push(&mut tokens, TokenKind::Plain, &code[plain_start..i]);
                push(&mut tokens, TokenKind::String, &code[i..end]);
                i = end;
                plain_start = i;
                continue;
            }
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            let end = code[i..].find('\n').map_or(code.len(), |n| i + n);
            push(&mut tokens, TokenKind::Plain, &code[plain_start..i]);
            push(&mut tokens, TokenKind::Comment, &code[i..end]);
            i = end;
            plain_start = i;
            continue;
        } else if is_word_byte(b) {
            let end = bytes[i..]
                .iter()
                .position(|&c| !is_word_byte(c))
                .map_or(bytes.len(), |n| i + n);
            let word = &code[i..end];
            if is_keyword(word) {
                push(&mut tokens, TokenKind::Plain, &code[plain_start..i]);
                push(&mut tokens, TokenKind::Keyword, word);
                plain_start = end;
            }
            i = end;
            continue;
        }

        i += 1;
    }

    push(&mut tokens, TokenKind::Plain, &code[plain_start..]);
    tokens
}
