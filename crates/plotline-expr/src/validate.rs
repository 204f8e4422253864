//! Vocabulary validation of parsed expressions.
//!
//! Parsing only establishes shape; validation decides whether an expression
//! stays inside the closed vocabulary: the free variable `x`, the constants
//! `e` and `pi`, the operators `+ - * / ^`, and the allowed functions, each
//! of which must be invoked with exactly one argument. Function names are
//! legal only in call position: `sin(x)` is accepted, a bare `sin` is not.
//!
//! An empty or whitespace-only input is reported as [`ValidationResult::Empty`]
//! so a caller can distinguish "nothing typed yet" from a real failure.

use crate::vocab::{Constant, Function, FREE_VARIABLE};
use crate::{Ast, BinaryOp, Expr, ParseError, UnaryOp};

/// Why an expression was rejected by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReason {
    /// A node kind outside the admitted grammar. The closed [`Ast`] enum
    /// makes this unreachable for trees produced by this crate's parser;
    /// the code is kept so the full taxonomy is expressible.
    UnsupportedNodeKind,
    /// An operator outside `+ - * / ^`.
    UnsupportedOperator(String),
    /// An allowed function name used outside call position, or a call with
    /// the wrong argument count, or a call target that is not a function.
    UnsupportedFunctionUsage(String),
    /// A name that is not `x`, a constant, or an allowed function.
    UnsupportedSymbol(String),
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::UnsupportedNodeKind => {
                write!(f, "unsupported expression construct")
            }
            InvalidReason::UnsupportedOperator(op) => {
                write!(f, "unsupported operator: '{}'", op)
            }
            InvalidReason::UnsupportedFunctionUsage(name) => {
                write!(f, "unsupported use of function: '{}'", name)
            }
            InvalidReason::UnsupportedSymbol(name) => {
                write!(f, "unsupported symbol: '{}'", name)
            }
        }
    }
}

impl std::error::Error for InvalidReason {}

/// Outcome of validating a raw input string.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Nothing entered yet (empty or whitespace-only input).
    Empty,
    /// Parsed, but uses vocabulary outside the allowed sets.
    Invalid(InvalidReason),
    /// Accepted; the expression is ready to compile.
    Valid(Expr),
}

/// Parses and validates a raw input string.
///
/// Returns `Err` only for syntax errors; vocabulary violations are an
/// `Ok(Invalid(..))` so callers can treat the two differently (a syntax
/// error usually means the user is mid-edit, a vocabulary violation means
/// the finished expression is not plottable).
///
/// # Example
///
/// ```
/// use plotline_expr::validate::{validate, InvalidReason, ValidationResult};
///
/// assert!(matches!(validate("sin(x)").unwrap(), ValidationResult::Valid(_)));
///
/// // A bare function name is not a value
/// assert_eq!(
///     validate("sin").unwrap(),
///     ValidationResult::Invalid(InvalidReason::UnsupportedFunctionUsage("sin".into())),
/// );
/// ```
pub fn validate(source: &str) -> Result<ValidationResult, ParseError> {
    if source.trim().is_empty() {
        return Ok(ValidationResult::Empty);
    }
    let expr = Expr::parse(source)?;
    match check(expr.ast()) {
        Ok(()) => Ok(ValidationResult::Valid(expr)),
        Err(reason) => Ok(ValidationResult::Invalid(reason)),
    }
}

/// Checks a single tree against the vocabulary, depth-first, reporting the
/// first violation found.
pub fn check(ast: &Ast) -> Result<(), InvalidReason> {
    match ast {
        Ast::Num(_) | Ast::Const(_) => Ok(()),

        Ast::Var(name) => {
            if name == FREE_VARIABLE {
                Ok(())
            } else if Function::from_name(name).is_some() {
                // Function names are legal only in call position.
                Err(InvalidReason::UnsupportedFunctionUsage(name.clone()))
            } else {
                Err(InvalidReason::UnsupportedSymbol(name.clone()))
            }
        }

        Ast::Unary(UnaryOp::Neg, inner) => check(inner),

        Ast::Binary(op, left, right) => {
            match op {
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow => {}
                BinaryOp::Rem => {
                    return Err(InvalidReason::UnsupportedOperator(op.symbol().to_string()))
                }
            }
            check(left)?;
            check(right)
        }

        Ast::Call(name, args) => {
            if Function::from_name(name).is_some() {
                if args.len() != 1 {
                    return Err(InvalidReason::UnsupportedFunctionUsage(name.clone()));
                }
            } else if name == FREE_VARIABLE || Constant::from_name(name).is_some() {
                // A known symbol, but not a callable one.
                return Err(InvalidReason::UnsupportedFunctionUsage(name.clone()));
            } else {
                return Err(InvalidReason::UnsupportedSymbol(name.clone()));
            }
            for arg in args {
                check(arg)?;
            }
            Ok(())
        }

        Ast::Group(inner) => check(inner),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result(source: &str) -> ValidationResult {
        validate(source).unwrap()
    }

    fn reason(source: &str) -> InvalidReason {
        match result(source) {
            ValidationResult::Invalid(reason) => reason,
            other => panic!("expected Invalid for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(result(""), ValidationResult::Empty);
        assert_eq!(result("   \t\n"), ValidationResult::Empty);
    }

    #[test]
    fn test_valid_expressions() {
        let cases = [
            "x",
            "42",
            "pi",
            "e",
            "x^2 - 2",
            "-x",
            "sin(x)",
            "log(x) + exp(x)",
            "sqrt(x^2 + 1) / (x - pi)",
            "cbrt(-x)",
            "acoth(csch(x))",
            "sin(cos(tan(x)))",
            "((x))",
            "2 ^ -x",
        ];
        for case in cases {
            assert!(
                matches!(result(case), ValidationResult::Valid(_)),
                "expected Valid for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_every_allowed_function_in_call_position() {
        for func in Function::ALL {
            let source = format!("{}(x)", func.name());
            assert!(
                matches!(result(&source), ValidationResult::Valid(_)),
                "expected Valid for {:?}",
                source
            );
        }
    }

    #[test]
    fn test_unsupported_symbol() {
        assert_eq!(
            reason("log(x) + y"),
            InvalidReason::UnsupportedSymbol("y".to_string())
        );
        assert_eq!(
            reason("tau * x"),
            InvalidReason::UnsupportedSymbol("tau".to_string())
        );
        // Unknown call targets are symbol errors too
        assert_eq!(
            reason("foo(x)"),
            InvalidReason::UnsupportedSymbol("foo".to_string())
        );
    }

    #[test]
    fn test_bare_function_name() {
        assert_eq!(
            reason("sin"),
            InvalidReason::UnsupportedFunctionUsage("sin".to_string())
        );
        assert_eq!(
            reason("sin + 1"),
            InvalidReason::UnsupportedFunctionUsage("sin".to_string())
        );
        // ...even nested inside an otherwise valid call
        assert_eq!(
            reason("sqrt(cos)"),
            InvalidReason::UnsupportedFunctionUsage("cos".to_string())
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(
            reason("sin()"),
            InvalidReason::UnsupportedFunctionUsage("sin".to_string())
        );
        assert_eq!(
            reason("sin(x, 2)"),
            InvalidReason::UnsupportedFunctionUsage("sin".to_string())
        );
    }

    #[test]
    fn test_non_callable_symbols_called() {
        assert_eq!(
            reason("e(x)"),
            InvalidReason::UnsupportedFunctionUsage("e".to_string())
        );
        assert_eq!(
            reason("pi(1)"),
            InvalidReason::UnsupportedFunctionUsage("pi".to_string())
        );
        assert_eq!(
            reason("x(2)"),
            InvalidReason::UnsupportedFunctionUsage("x".to_string())
        );
    }

    #[test]
    fn test_unsupported_operator() {
        assert_eq!(
            reason("x % 2"),
            InvalidReason::UnsupportedOperator("%".to_string())
        );
    }

    #[test]
    fn test_violation_inside_argument_propagates() {
        assert_eq!(
            reason("sin(y)"),
            InvalidReason::UnsupportedSymbol("y".to_string())
        );
        assert_eq!(
            reason("sqrt(x % 2)"),
            InvalidReason::UnsupportedOperator("%".to_string())
        );
    }

    #[test]
    fn test_parse_error_is_not_invalid() {
        assert!(validate("x +").is_err());
        assert!(validate("(x").is_err());
    }
}

// ============================================================================
// Property-based tests (proptest)
// ============================================================================
