//! # plotline-graph
//!
//! Compilation, evaluation and windowed sampling of validated plot
//! expressions.
//!
//! A validated expression from `plotline-expr` is compiled into a
//! [`CompiledFunction`], a pure map from a binding of the free variable `x`
//! to a real number or an explicit undefined marker (`None`). A
//! [`PlotSession`](plot::PlotSession) then samples one or more named
//! functions across a pannable/zoomable viewport for a line renderer.
//!
//! Evaluation never raises: division by zero, logarithms or roots of
//! out-of-domain arguments, fractional powers of negative bases, and
//! overflow all collapse to `None`, which the sampler surfaces as a gap in
//! the curve rather than a plotted zero.
//!
//! ## Quick Start
//!
//! ```
//! use plotline_expr::validate::{validate, ValidationResult};
//! use plotline_graph::CompiledFunction;
//!
//! let ValidationResult::Valid(expr) = validate("x^2 - 2").unwrap() else {
//!     unreachable!();
//! };
//! let f = CompiledFunction::compile(expr);
//! assert_eq!(f.eval(5.0), Some(23.0));
//!
//! let ValidationResult::Valid(expr) = validate("1/x").unwrap() else {
//!     unreachable!();
//! };
//! let g = CompiledFunction::compile(expr);
//! assert_eq!(g.eval(0.0), None); // undefined, not a fault
//! ```
//!
//! ## Function Semantics
//!
//! | Group | Functions | Convention |
//! |-------|-----------|------------|
//! | Roots | `sqrt`, `cbrt` | `cbrt` is real-branched: `cbrt(-8) = -2` |
//! | Trigonometric | `sin`, `cos`, `tan`, `csc`, `sec`, `cot` | Radians |
//! | Hyperbolic | `sinh`, `cosh`, `tanh`, `csch`, `sech`, `coth` | |
//! | Inverse trig | `asin`, `acos`, `atan`, `acsc`, `asec`, `acot` | `acot(x) = atan(1/x)` |
//! | Inverse hyperbolic | `asinh`, `acosh`, `atanh`, `acsch`, `asech`, `acoth` | |
//! | Exponential | `log`, `exp` | `log` is the natural logarithm |

use num_traits::Float;
use plotline_expr::vocab::{Function, FREE_VARIABLE};
use plotline_expr::{Ast, BinaryOp, Expr, UnaryOp};

pub mod plot;

pub use plot::{sample, PlotSession, SamplePoint, Trace, Viewport, DEFAULT_POINT_COUNT};

// ============================================================================
// Compiled functions
// ============================================================================

/// A pure single-variable function compiled from a validated expression.
///
/// Compilation binds exactly one AST; evaluation is deterministic and
/// side-effect free, so a compiled function can be sampled any number of
/// times with identical results.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    ast: Ast,
}

impl CompiledFunction {
    /// Compiles a validated expression.
    ///
    /// The expression should have passed vocabulary validation; evaluation
    /// stays total either way (out-of-vocabulary constructs evaluate to
    /// `None` instead of panicking).
    pub fn compile(expr: Expr) -> Self {
        Self {
            ast: expr.into_ast(),
        }
    }

    /// Evaluates the function at `x`, returning `None` where the result is
    /// undefined.
    pub fn eval(&self, x: f64) -> Option<f64> {
        eval(&self.ast, x)
    }
}

/// Evaluates an AST at a binding for the free variable.
///
/// Generic over the float width; the plot pipeline uses `f64`. Every
/// intermediate result is finiteness-checked, so domain failures propagate
/// as `None` without faulting the evaluation of other points.
pub fn eval<T: Float>(ast: &Ast, x: T) -> Option<T> {
    match ast {
        Ast::Num(n) => finite(T::from(*n)?),

        Ast::Const(c) => T::from(c.value()),

        Ast::Var(name) => {
            if name == FREE_VARIABLE {
                finite(x)
            } else {
                // Rejected by the validator; undefined rather than a fault.
                None
            }
        }

        Ast::Unary(UnaryOp::Neg, inner) => Some(-eval(inner, x)?),

        Ast::Binary(op, left, right) => {
            let l = eval(left, x)?;
            let r = eval(right, x)?;
            let v = match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Pow => l.powf(r),
                BinaryOp::Rem => return None, // outside the vocabulary
            };
            finite(v)
        }

        Ast::Call(name, args) => {
            let func = Function::from_name(name)?;
            let [arg] = args.as_slice() else {
                return None;
            };
            let v = eval(arg, x)?;
            finite(apply(func, v))
        }

        Ast::Group(inner) => eval(inner, x),
    }
}

/// Applies a vocabulary function with conventional real-analysis semantics.
///
/// Out-of-domain arguments produce NaN or an infinity, which the caller's
/// finiteness check turns into an undefined result.
pub fn apply<T: Float>(func: Function, v: T) -> T {
    match func {
        Function::Sqrt => v.sqrt(),
        Function::Cbrt => v.cbrt(),
        Function::Sin => v.sin(),
        Function::Cos => v.cos(),
        Function::Tan => v.tan(),
        Function::Csc => v.sin().recip(),
        Function::Sec => v.cos().recip(),
        Function::Cot => v.tan().recip(),
        Function::Sinh => v.sinh(),
        Function::Cosh => v.cosh(),
        Function::Tanh => v.tanh(),
        Function::Csch => v.sinh().recip(),
        Function::Sech => v.cosh().recip(),
        Function::Coth => v.tanh().recip(),
        Function::Asin => v.asin(),
        Function::Acos => v.acos(),
        Function::Atan => v.atan(),
        Function::Acsc => v.recip().asin(),
        Function::Asec => v.recip().acos(),
        Function::Acot => v.recip().atan(),
        Function::Asinh => v.asinh(),
        Function::Acosh => v.acosh(),
        Function::Atanh => v.atanh(),
        Function::Acsch => v.recip().asinh(),
        Function::Asech => v.recip().acosh(),
        Function::Acoth => v.recip().atanh(),
        Function::Log => v.ln(),
        Function::Exp => v.exp(),
    }
}

fn finite<T: Float>(v: T) -> Option<T> {
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_expr::validate::{validate, ValidationResult};

    fn compile(source: &str) -> CompiledFunction {
        match validate(source).unwrap() {
            ValidationResult::Valid(expr) => CompiledFunction::compile(expr),
            other => panic!("expected Valid for {:?}, got {:?}", source, other),
        }
    }

    fn eval_at(source: &str, x: f64) -> Option<f64> {
        compile(source).eval(x)
    }

    #[test]
    fn test_polynomial() {
        let f = compile("x^2 - 2");
        assert_eq!(f.eval(-10.0), Some(98.0));
        assert_eq!(f.eval(-5.0), Some(23.0));
        assert_eq!(f.eval(0.0), Some(-2.0));
        assert_eq!(f.eval(5.0), Some(23.0));
        assert_eq!(f.eval(10.0), Some(98.0));
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval_at("pi", 0.0), Some(std::f64::consts::PI));
        assert_eq!(eval_at("e", 0.0), Some(std::f64::consts::E));
        assert_eq!(eval_at("2 * pi", 0.0), Some(std::f64::consts::TAU));
    }

    #[test]
    fn test_grouping_and_unary() {
        assert_eq!(eval_at("(x + 1) * (x - 1)", 3.0), Some(8.0));
        assert_eq!(eval_at("-x^2", 3.0), Some(9.0)); // (-x)^2, unary binds tighter
        assert_eq!(eval_at("-(x^2)", 3.0), Some(-9.0));
    }

    #[test]
    fn test_division_by_zero_is_undefined() {
        assert_eq!(eval_at("1/x", 0.0), None);
        assert_eq!(eval_at("1/x", -1.0), Some(-1.0));
        assert_eq!(eval_at("1/x", 1.0), Some(1.0));
        assert_eq!(eval_at("1/(x - 2)", 2.0), None);
    }

    #[test]
    fn test_out_of_domain_roots_and_logs() {
        assert_eq!(eval_at("sqrt(x)", -1.0), None);
        assert_eq!(eval_at("sqrt(x)", 4.0), Some(2.0));
        assert_eq!(eval_at("log(x)", 0.0), None);
        assert_eq!(eval_at("log(x)", -3.0), None);
        let ln2 = eval_at("log(x)", 2.0).unwrap();
        assert!((ln2 - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_log_is_natural() {
        assert_eq!(eval_at("log(e)", 0.0), Some(1.0));
    }

    #[test]
    fn test_cbrt_is_real_branched() {
        assert_eq!(eval_at("cbrt(x)", -8.0), Some(-2.0));
        assert_eq!(eval_at("cbrt(x)", 27.0), Some(3.0));
    }

    #[test]
    fn test_fractional_power_of_negative_base() {
        assert_eq!(eval_at("x ^ 0.5", -4.0), None);
        assert_eq!(eval_at("x ^ 2", -4.0), Some(16.0));
    }

    #[test]
    fn test_overflow_is_undefined() {
        assert_eq!(eval_at("exp(x)", 1000.0), None);
        assert_eq!(eval_at("cosh(x)", 1000.0), None);
    }

    #[test]
    fn test_undefined_propagates() {
        assert_eq!(eval_at("sin(1/x) + 2", 0.0), None);
        assert_eq!(eval_at("sqrt(x) * 0", -1.0), None); // never coerced to zero
    }

    #[test]
    fn test_trig() {
        assert_eq!(eval_at("sin(x)", 0.0), Some(0.0));
        assert_eq!(eval_at("cos(x)", 0.0), Some(1.0));
        let v = eval_at("sin(x)", std::f64::consts::FRAC_PI_2).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_trig() {
        let v = eval_at("csc(x)", std::f64::consts::FRAC_PI_2).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
        assert_eq!(eval_at("csc(x)", 0.0), None); // 1/sin(0)
        let v = eval_at("sec(x)", 0.0).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
        assert_eq!(eval_at("cot(x)", 0.0), None);
    }

    #[test]
    fn test_inverse_trig_domains() {
        assert_eq!(eval_at("asin(x)", 2.0), None);
        let v = eval_at("asin(x)", 1.0).unwrap();
        assert!((v - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        // acsc is undefined on (-1, 1), defined outside
        assert_eq!(eval_at("acsc(x)", 0.5), None);
        let v = eval_at("acsc(x)", 2.0).unwrap();
        assert!((v - 0.5f64.asin()).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_hyperbolic() {
        assert_eq!(eval_at("acosh(x)", 0.0), None);
        let v = eval_at("asinh(x)", 1.0).unwrap();
        assert!((v - 1.0f64.asinh()).abs() < 1e-12);
        assert_eq!(eval_at("atanh(x)", 1.0), None); // atanh(1) = +inf
        assert_eq!(eval_at("acoth(x)", 0.5), None); // atanh(2) is NaN
        let v = eval_at("acoth(x)", 2.0).unwrap();
        assert!((v - 0.5f64.atanh()).abs() < 1e-12);
    }

    #[test]
    fn test_eval_is_pure() {
        let f = compile("sin(x) * exp(-x^2) + pi");
        for &x in &[-2.0, -0.5, 0.0, 0.5, 2.0] {
            assert_eq!(f.eval(x), f.eval(x));
        }
    }

    #[test]
    fn test_eval_f32() {
        let expr = plotline_expr::Expr::parse("x * 2 + 1").unwrap();
        let v: Option<f32> = eval(expr.ast(), 3.0f32);
        assert_eq!(v, Some(7.0));
    }

    #[test]
    fn test_non_finite_binding_is_undefined() {
        assert_eq!(eval_at("x + 1", f64::NAN), None);
        assert_eq!(eval_at("x + 1", f64::INFINITY), None);
    }
}

// ============================================================================
// Property-based tests (proptest)
// ============================================================================
