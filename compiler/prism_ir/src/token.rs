//! Tokens and their classification.
//!
//! Rule files name token categories with a `CLASS SUBCLASS` pair of strings.
//! Those pairs are resolved once, when rules are compiled, into the closed
//! [`TokenKind`] enum so every dispatch site can match exhaustively.

use std::fmt;

use crate::{BinaryOp, Span};

/// Top-level token category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenClass {
    Literal,
    Identifier,
    Operation,
    Delimiter,
    Function,
    Keyword,
    Loop,
    Ignore,
    Error,
}

impl TokenClass {
    pub const ALL: &[TokenClass] = &[
        TokenClass::Literal,
        TokenClass::Identifier,
        TokenClass::Operation,
        TokenClass::Delimiter,
        TokenClass::Function,
        TokenClass::Keyword,
        TokenClass::Loop,
        TokenClass::Ignore,
        TokenClass::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenClass::Literal => "LITERAL",
            TokenClass::Identifier => "IDENTIFIER",
            TokenClass::Operation => "OPERATION",
            TokenClass::Delimiter => "DELIMITER",
            TokenClass::Function => "FUNCTION",
            TokenClass::Keyword => "KEYWORD",
            TokenClass::Loop => "LOOP",
            TokenClass::Ignore => "IGNORE",
            TokenClass::Error => "ERROR",
        }
    }

    pub fn from_tag(tag: &str) -> Option<TokenClass> {
        Self::ALL.iter().copied().find(|class| class.as_str() == tag)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Delimiter {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::LParen => '(',
            Delimiter::RParen => ')',
            Delimiter::LBrace => '{',
            Delimiter::RBrace => '}',
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }
}

/// Statement keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    /// `set <name> = <expr> ;`
    Set,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LoopKind {
    Repeat,
    While,
}

impl LoopKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LoopKind::Repeat => "repeat",
            LoopKind::While => "while",
        }
    }
}

/// Resolved token kind.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Literal(LiteralKind),
    Variable,
    Operator(BinaryOp),
    /// The `=` of an assignment.
    Assign,
    Delimiter(Delimiter),
    /// A built-in callable, named by its subclass.
    Function(String),
    Keyword(Keyword),
    Loop(LoopKind),
    /// Whitespace, comments: skipped by the interpreter.
    Ignore(String),
    Error(String),
    /// A token with no meaning of its own, only useful as a group rule part
    /// (for example a lone `!` that is merged into `!=`).
    Fragment { class: TokenClass, subclass: String },
}

impl TokenKind {
    /// Subclass the tokenizer gives to trailing input no rule accepted.
    pub const UNFINISHED_TOKEN: &'static str = "UNFINISHED_TOKEN";

    /// Resolve a `CLASS SUBCLASS` pair.
    ///
    /// Returns `None` for statement classes (`KEYWORD`, `LOOP`) with an
    /// unknown subclass, since nothing could execute them.
    pub fn from_tags(class: TokenClass, subclass: &str) -> Option<TokenKind> {
        let fragment = || TokenKind::Fragment {
            class,
            subclass: subclass.to_owned(),
        };
        let kind = match class {
            TokenClass::Literal => match subclass {
                "NUMBER" => TokenKind::Literal(LiteralKind::Number),
                "STRING" => TokenKind::Literal(LiteralKind::String),
                "BOOLEAN" => TokenKind::Literal(LiteralKind::Boolean),
                _ => fragment(),
            },
            TokenClass::Identifier => match subclass {
                "VARIABLE" => TokenKind::Variable,
                _ => fragment(),
            },
            TokenClass::Operation => match subclass {
                "ASSIGN" => TokenKind::Assign,
                _ => BinaryOp::from_subclass(subclass).map_or_else(fragment, TokenKind::Operator),
            },
            TokenClass::Delimiter => match subclass {
                "LPAREN" => TokenKind::Delimiter(Delimiter::LParen),
                "RPAREN" => TokenKind::Delimiter(Delimiter::RParen),
                "LBRACE" => TokenKind::Delimiter(Delimiter::LBrace),
                "RBRACE" => TokenKind::Delimiter(Delimiter::RBrace),
                "COMMA" => TokenKind::Delimiter(Delimiter::Comma),
                "SEMICOLON" => TokenKind::Delimiter(Delimiter::Semicolon),
                _ => fragment(),
            },
            TokenClass::Function => TokenKind::Function(subclass.to_owned()),
            TokenClass::Keyword => match subclass {
                "SET" => TokenKind::Keyword(Keyword::Set),
                _ => return None,
            },
            TokenClass::Loop => match subclass {
                "REPEAT" => TokenKind::Loop(LoopKind::Repeat),
                "WHILE" => TokenKind::Loop(LoopKind::While),
                _ => return None,
            },
            TokenClass::Ignore => TokenKind::Ignore(subclass.to_owned()),
            TokenClass::Error => TokenKind::Error(subclass.to_owned()),
        };
        Some(kind)
    }

    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Literal(_) => TokenClass::Literal,
            TokenKind::Variable => TokenClass::Identifier,
            TokenKind::Operator(_) | TokenKind::Assign => TokenClass::Operation,
            TokenKind::Delimiter(_) => TokenClass::Delimiter,
            TokenKind::Function(_) => TokenClass::Function,
            TokenKind::Keyword(_) => TokenClass::Keyword,
            TokenKind::Loop(_) => TokenClass::Loop,
            TokenKind::Ignore(_) => TokenClass::Ignore,
            TokenKind::Error(_) => TokenClass::Error,
            TokenKind::Fragment { class, .. } => *class,
        }
    }

    pub fn subclass(&self) -> &str {
        match self {
            TokenKind::Literal(LiteralKind::Number) => "NUMBER",
            TokenKind::Literal(LiteralKind::String) => "STRING",
            TokenKind::Literal(LiteralKind::Boolean) => "BOOLEAN",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Operator(op) => op.subclass(),
            TokenKind::Assign => "ASSIGN",
            TokenKind::Delimiter(Delimiter::LParen) => "LPAREN",
            TokenKind::Delimiter(Delimiter::RParen) => "RPAREN",
            TokenKind::Delimiter(Delimiter::LBrace) => "LBRACE",
            TokenKind::Delimiter(Delimiter::RBrace) => "RBRACE",
            TokenKind::Delimiter(Delimiter::Comma) => "COMMA",
            TokenKind::Delimiter(Delimiter::Semicolon) => "SEMICOLON",
            TokenKind::Keyword(Keyword::Set) => "SET",
            TokenKind::Loop(LoopKind::Repeat) => "REPEAT",
            TokenKind::Loop(LoopKind::While) => "WHILE",
            TokenKind::Function(name)
            | TokenKind::Ignore(name)
            | TokenKind::Error(name)
            | TokenKind::Fragment { subclass: name, .. } => name,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class(), self.subclass())
    }
}

/// A classified, positioned piece of source text.
///
/// The token stream produced by the tokenizer is never mutated afterwards;
/// runtime values are derived from tokens, not stored in them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text covered by the token.
    pub content: String,
    pub span: Span,
    /// 1-based line of the token's first byte.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, span: Span, line: u32) -> Self {
        Token {
            kind,
            content: content.into(),
            span,
            line,
        }
    }

    #[inline]
    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }

    #[inline]
    pub fn subclass(&self) -> &str {
        self.kind.subclass()
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        matches!(self.kind, TokenKind::Ignore(_))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    #[inline]
    pub fn is_delimiter(&self, delimiter: Delimiter) -> bool {
        self.kind == TokenKind::Delimiter(delimiter)
    }

    /// Whether this token begins a statement (function call, keyword, loop).
    pub fn starts_statement(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Function(_) | TokenKind::Keyword(_) | TokenKind::Loop(_)
        )
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
