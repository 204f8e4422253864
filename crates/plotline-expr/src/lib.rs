//! # plotline-expr
//!
//! Parsing and vocabulary validation for single-variable plot expressions.
//!
//! This crate turns a user-typed string like `"sin(x) / x"` into an AST and
//! checks it against a closed, fixed vocabulary: the free variable `x`, the
//! constants `e` and `pi`, the operators `+ - * / ^`, and a fixed set of
//! real-valued functions (see [`vocab::Function`]). Anything outside that
//! vocabulary is rejected with a specific reason so the caller can give
//! precise feedback while the user is still typing.
//!
//! Evaluation and sampling live in the companion `plotline-graph` crate;
//! this crate is purely structural and has no runtime dependencies.
//!
//! ## Syntax Reference
//!
//! ### Operators (by precedence, low to high)
//!
//! | Precedence | Operators | Description |
//! |------------|-----------|-------------|
//! | 1 | `a + b`, `a - b` | Addition, subtraction |
//! | 2 | `a * b`, `a / b`, `a % b` | Multiplication, division, remainder |
//! | 3 | `a ^ b` | Exponentiation (right-associative) |
//! | 4 | `-a` | Negation |
//! | 5 | `(a)`, `f(a)` | Grouping, function calls |
//!
//! `%` parses but is outside the allowed vocabulary; the validator rejects
//! it with [`validate::InvalidReason::UnsupportedOperator`].
//!
//! ### Literals and Identifiers
//!
//! - **Numbers**: `42`, `3.14`, `.5`
//! - **Free variable**: `x`
//! - **Constants**: `e`, `pi`
//! - **Functions**: an allowed name followed by parentheses (`sin(x)`)
//!
//! ## Example
//!
//! ```
//! use plotline_expr::validate::{validate, ValidationResult};
//!
//! assert!(matches!(validate("x^2 - 2").unwrap(), ValidationResult::Valid(_)));
//! assert!(matches!(validate("   ").unwrap(), ValidationResult::Empty));
//! assert!(matches!(validate("y + 1").unwrap(), ValidationResult::Invalid(_)));
//! assert!(validate("1 +").is_err()); // dangling operator is a parse error
//! ```

pub mod validate;
pub mod vocab;

pub use validate::{validate, InvalidReason, ValidationResult};
pub use vocab::{Constant, Function, FREE_VARIABLE};

// ============================================================================
// Errors
// ============================================================================

/// Expression parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    UnexpectedToken(String),
    InvalidNumber(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedChar(c) => write!(f, "unexpected character: '{}'", c),
            ParseError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            ParseError::UnexpectedToken(t) => write!(f, "unexpected token: '{}'", t),
            ParseError::InvalidNumber(s) => write!(f, "invalid number: '{}'", s),
        }
    }
}

impl std::error::Error for ParseError {}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    LParen,
    RParen,
    Comma,
    Eof,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '.' {
                self.next_char();
            } else {
                break;
            }
        }
        let s = &self.input[start..self.pos];
        s.parse()
            .map_err(|_| ParseError::InvalidNumber(s.to_string()))
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                self.next_char();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        match c {
            '+' => {
                self.next_char();
                Ok(Token::Plus)
            }
            '-' => {
                self.next_char();
                Ok(Token::Minus)
            }
            '*' => {
                self.next_char();
                Ok(Token::Star)
            }
            '/' => {
                self.next_char();
                Ok(Token::Slash)
            }
            '^' => {
                self.next_char();
                Ok(Token::Caret)
            }
            '%' => {
                self.next_char();
                Ok(Token::Percent)
            }
            '(' => {
                self.next_char();
                Ok(Token::LParen)
            }
            ')' => {
                self.next_char();
                Ok(Token::RParen)
            }
            ',' => {
                self.next_char();
                Ok(Token::Comma)
            }
            '0'..='9' | '.' => Ok(Token::Number(self.read_number()?)),
            'a'..='z' | 'A'..='Z' | '_' => Ok(Token::Ident(self.read_ident())),
            _ => Err(ParseError::UnexpectedChar(c)),
        }
    }
}

// ============================================================================
// AST
// ============================================================================

/// Abstract syntax tree node for expressions.
///
/// The seven variants are the only node kinds this grammar can produce.
/// Consumers match exhaustively, so adding a kind forces every consumer
/// (validator, evaluator) to handle it.
///
/// # Example
///
/// ```
/// use plotline_expr::{Ast, BinaryOp, Expr};
///
/// let expr = Expr::parse("2 + x").unwrap();
/// match expr.ast() {
///     Ast::Binary(BinaryOp::Add, left, right) => {
///         assert!(matches!(left.as_ref(), Ast::Num(2.0)));
///         assert!(matches!(right.as_ref(), Ast::Var(name) if name == "x"));
///     }
///     _ => panic!("expected addition"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// Numeric literal (e.g., `42`, `3.14`).
    Num(f64),
    /// Bare identifier, resolved at evaluation time.
    Var(String),
    /// Named constant (`e`, `pi`), recognized at parse time.
    Const(Constant),
    /// Unary operation: `op operand`.
    Unary(UnaryOp, Box<Ast>),
    /// Binary operation: `left op right`.
    Binary(BinaryOp, Box<Ast>, Box<Ast>),
    /// Function call: `name(arg1, arg2, ...)`.
    Call(String, Vec<Ast>),
    /// Parenthesised grouping, kept explicit in the tree.
    Group(Box<Ast>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Exponentiation (`^`), right-associative.
    Pow,
    /// Remainder (`%`). Parses, but is outside the allowed vocabulary.
    Rem,
}

impl BinaryOp {
    /// The source symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Rem => "%",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Numeric negation (`-x`).
    Neg,
}

// ============================================================================
// AST Display (produces parseable expressions)
// ============================================================================

impl std::fmt::Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ast::Num(n) => write!(f, "{}", n),
            Ast::Var(name) => write!(f, "{}", name),
            Ast::Const(c) => write!(f, "{}", c.name()),
            Ast::Unary(op, inner) => write!(f, "{}{}", op, inner),
            Ast::Binary(op, left, right) => {
                write!(f, "{} {} {}", left, op, right)
            }
            Ast::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Ast::Group(inner) => write!(f, "({})", inner),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current == expected {
            self.advance()
        } else {
            Err(ParseError::UnexpectedToken(format!("{:?}", self.current)))
        }
    }

    // Precedence (low to high):
    // 1. add/sub (+, -)
    // 2. mul/div/rem (*, /, %)
    // 3. power (^)
    // 4. unary (-)
    // 5. primary

    fn parse_expr(&mut self) -> Result<Ast, ParseError> {
        self.parse_add_sub()
    }

    fn parse_add_sub(&mut self) -> Result<Ast, ParseError> {
        let mut left = self.parse_mul_div()?;

        loop {
            match &self.current {
                Token::Plus => {
                    self.advance()?;
                    let right = self.parse_mul_div()?;
                    left = Ast::Binary(BinaryOp::Add, Box::new(left), Box::new(right));
                }
                Token::Minus => {
                    self.advance()?;
                    let right = self.parse_mul_div()?;
                    left = Ast::Binary(BinaryOp::Sub, Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_mul_div(&mut self) -> Result<Ast, ParseError> {
        let mut left = self.parse_power()?;

        loop {
            match &self.current {
                Token::Star => {
                    self.advance()?;
                    let right = self.parse_power()?;
                    left = Ast::Binary(BinaryOp::Mul, Box::new(left), Box::new(right));
                }
                Token::Slash => {
                    self.advance()?;
                    let right = self.parse_power()?;
                    left = Ast::Binary(BinaryOp::Div, Box::new(left), Box::new(right));
                }
                Token::Percent => {
                    self.advance()?;
                    let right = self.parse_power()?;
                    left = Ast::Binary(BinaryOp::Rem, Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> Result<Ast, ParseError> {
        let base = self.parse_unary()?;

        if self.current == Token::Caret {
            self.advance()?;
            let exp = self.parse_power()?; // Right associative
            Ok(Ast::Binary(BinaryOp::Pow, Box::new(base), Box::new(exp)))
        } else {
            Ok(base)
        }
    }

    fn parse_unary(&mut self) -> Result<Ast, ParseError> {
        match &self.current {
            Token::Minus => {
                self.advance()?;
                let inner = self.parse_unary()?;
                Ok(Ast::Unary(UnaryOp::Neg, Box::new(inner)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Ast, ParseError> {
        match &self.current {
            Token::Number(n) => {
                let n = *n;
                self.advance()?;
                Ok(Ast::Num(n))
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.advance()?;

                // Call position: any identifier followed by parentheses.
                // Whether the name is actually callable is the validator's
                // concern, not the grammar's.
                if self.current == Token::LParen {
                    self.advance()?;
                    let mut args = Vec::new();
                    if self.current != Token::RParen {
                        args.push(self.parse_expr()?);
                        while self.current == Token::Comma {
                            self.advance()?;
                            args.push(self.parse_expr()?);
                        }
                    }
                    self.expect(Token::RParen)?;
                    return Ok(Ast::Call(name, args));
                }

                match Constant::from_name(&name) {
                    Some(c) => Ok(Ast::Const(c)),
                    None => Ok(Ast::Var(name)),
                }
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(Ast::Group(Box::new(inner)))
            }
            Token::Eof => Err(ParseError::UnexpectedEnd),
            _ => Err(ParseError::UnexpectedToken(format!("{:?}", self.current))),
        }
    }
}

// ============================================================================
// Expression
// ============================================================================

/// A parsed expression.
///
/// `Expr` is the entry point for the crate. Parse a string with
/// [`Expr::parse()`], then inspect the AST with [`Expr::ast()`] or run it
/// through [`validate::validate()`] to check it against the vocabulary.
///
/// # Example
///
/// ```
/// use plotline_expr::{Expr, ParseError};
///
/// assert!(Expr::parse("x^2 + 2*x + 1").is_ok());
///
/// // Invalid: unexpected character
/// assert!(matches!(Expr::parse("1 @ 2"), Err(ParseError::UnexpectedChar('@'))));
///
/// // Invalid: dangling operator
/// assert!(matches!(Expr::parse("1 +"), Err(ParseError::UnexpectedEnd)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parses an expression from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not a valid expression:
    /// - [`ParseError::UnexpectedChar`] for invalid characters
    /// - [`ParseError::UnexpectedEnd`] for incomplete expressions
    /// - [`ParseError::UnexpectedToken`] for syntax errors
    /// - [`ParseError::InvalidNumber`] for malformed numeric literals
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new(input)?;
        let ast = parser.parse_expr()?;
        if parser.current != Token::Eof {
            return Err(ParseError::UnexpectedToken(format!("{:?}", parser.current)));
        }
        Ok(Self { ast })
    }

    /// Returns a reference to the parsed AST.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Consumes the expression, returning its AST.
    pub fn into_ast(self) -> Ast {
        self.ast
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests (proptest)
// ============================================================================
