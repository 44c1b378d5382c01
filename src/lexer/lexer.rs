use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::{LexError, LexErrorKind},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer<'_>, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    /// Every pattern is anchored so it only matches at the cursor.
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::new("[0-9]+(\\.[0-9]+)?", number_handler),
        RegexPattern::new("\\s+", skip_handler),
        RegexPattern::new("//[^\n]*", comment_handler),
        RegexPattern::new("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        RegexPattern::new("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        RegexPattern::new("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        RegexPattern::new("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        RegexPattern::new("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        RegexPattern::new("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        RegexPattern::new("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        RegexPattern::new("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        RegexPattern::new(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        RegexPattern::new(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        RegexPattern::new("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        RegexPattern::new("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        RegexPattern::new("&", MK_DEFAULT_HANDLER!(TokenKind::Amp, "&")),
        RegexPattern::new("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        RegexPattern::new(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        RegexPattern::new("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        RegexPattern::new("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

/// Output of [`tokenize`]. `tokens` always ends with an `EOF` token, even
/// when errors were reported.
#[derive(Debug)]
pub struct LexResult<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<LexError>,
}

pub struct Lexer<'a> {
    tokens: Vec<Token<'a>>,
    errors: Vec<LexError>,
    source: &'a str,
    pos: usize,
    keep_comments: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            errors: vec![],
            source,
            pos: 0,
            keep_comments: false,
        }
    }

    /// Emit `Comment` tokens instead of skipping comments.
    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token<'a>) {
        self.tokens.push(token);
    }

    /// Pushes a token covering the next `len` bytes and skips them.
    pub fn push_fixed(&mut self, kind: TokenKind, len: usize) {
        let span = Span::new(self.pos, self.pos + len);
        self.push(MK_TOKEN!(kind, span.text(self.source), span));
        self.advance_n(len);
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Length of `regex`'s match at the cursor.
    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map_or(0, |m| m.end())
    }

    pub fn tokenize(mut self) -> LexResult<'a> {
        while !self.at_eof() {
            let remainder = self.remainder();
            match PATTERNS.iter().find(|pattern| pattern.regex.is_match(remainder)) {
                Some(pattern) => (pattern.handler)(&mut self, &pattern.regex),
                None => self.invalid_character(),
            }
        }

        let eof = Span::new(self.pos, self.pos);
        self.push(MK_TOKEN!(TokenKind::EOF, "", eof));

        tracing::debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "lexing finished"
        );
        LexResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn invalid_character(&mut self) {
        let Some(character) = self.remainder().chars().next() else {
            return;
        };
        let len = character.len_utf8();
        self.errors.push(LexError::new(
            LexErrorKind::InvalidCharacter { character },
            Span::new(self.pos, self.pos + len),
        ));
        self.advance_n(len);
    }
}

fn number_handler(lexer: &mut Lexer<'_>, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.push_fixed(TokenKind::Number, len);
}

fn skip_handler(lexer: &mut Lexer<'_>, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
}

fn comment_handler(lexer: &mut Lexer<'_>, regex: &Regex) {
    let len = lexer.matched_len(regex);
    if lexer.keep_comments {
        lexer.push_fixed(TokenKind::Comment, len);
    } else {
        lexer.advance_n(len);
    }
}

fn symbol_handler(lexer: &mut Lexer<'_>, regex: &Regex) {
    let len = lexer.matched_len(regex);
    let value = &lexer.remainder()[..len];

    match RESERVED_LOOKUP.get(value) {
        Some(kind) => lexer.push_fixed(*kind, len),
        None => lexer.push_fixed(TokenKind::Identifier, len),
    }
}

pub fn tokenize(source: &str) -> LexResult<'_> {
    Lexer::new(source).tokenize()
}
