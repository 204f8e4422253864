//! Windowed sampling and the plot session.
//!
//! A [`PlotSession`] owns the only state the pipeline carries between
//! events: the named function set (insertion-ordered, since the order
//! drives legend and coloring downstream) and the current [`Viewport`].
//! Both are mutated through exactly two operations, editing the function
//! set and applying a pan/zoom event; each one regenerates every trace
//! from scratch.

use crate::CompiledFunction;
use plotline_expr::Expr;

/// Default sampling resolution per trace.
pub const DEFAULT_POINT_COUNT: usize = 1000;

/// The numeric domain window currently sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: f64,
    pub max: f64,
}

impl Default for Viewport {
    /// The initial window, `[-10, 10]`.
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl Viewport {
    /// Builds a viewport from proposed pan/zoom bounds.
    ///
    /// Pan/zoom events may omit an axis, so both bounds are optional.
    /// Returns `None` when either bound is missing or non-finite, or when
    /// the window would be empty or inverted; callers discard such events
    /// wholesale rather than applying them partially.
    pub fn try_new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        let (Some(min), Some(max)) = (min, max) else {
            return None;
        };
        if !min.is_finite() || !max.is_finite() || min >= max {
            return None;
        }
        Some(Self { min, max })
    }
}

/// One sampled point; `y == None` marks a gap the renderer must not bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// The sampled curve of one named function.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub points: Vec<SamplePoint>,
}

/// Samples a compiled function across a viewport at a fixed resolution.
///
/// Produces exactly `point_count` points with `x` uniformly spaced over
/// `[min, max]`, both endpoints included. A pure function: identical
/// inputs yield a bit-identical sequence.
pub fn sample(func: &CompiledFunction, viewport: Viewport, point_count: usize) -> Vec<SamplePoint> {
    if point_count == 0 {
        return Vec::new();
    }
    if point_count == 1 {
        return vec![SamplePoint {
            x: viewport.min,
            y: func.eval(viewport.min),
        }];
    }
    let step = (viewport.max - viewport.min) / (point_count - 1) as f64;
    (0..point_count)
        .map(|i| {
            let x = viewport.min + i as f64 * step;
            SamplePoint {
                x,
                y: func.eval(x),
            }
        })
        .collect()
}

/// A plotting session: named functions, viewport, and the current traces.
///
/// The session is the single owner of cross-event state; there are no
/// globals. Every mutation regenerates all traces, so [`traces()`] is
/// always consistent with the current function set and viewport.
///
/// [`traces()`]: PlotSession::traces
///
/// # Example
///
/// ```
/// use plotline_expr::validate::{validate, ValidationResult};
/// use plotline_graph::PlotSession;
///
/// let mut session = PlotSession::with_point_count(5);
///
/// let ValidationResult::Valid(expr) = validate("x^2 - 2").unwrap() else {
///     unreachable!();
/// };
/// session.set_function("f(x)", expr);
///
/// let ys: Vec<_> = session.traces()[0].points.iter().map(|p| p.y).collect();
/// assert_eq!(ys, [Some(98.0), Some(23.0), Some(-2.0), Some(23.0), Some(98.0)]);
///
/// // Zoom in; traces are fully regenerated
/// assert!(session.apply_viewport(Some(-1.0), Some(1.0)));
/// // An inverted window is discarded wholesale
/// assert!(!session.apply_viewport(Some(1.0), Some(-1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct PlotSession {
    functions: Vec<(String, CompiledFunction)>,
    viewport: Viewport,
    point_count: usize,
    traces: Vec<Trace>,
}

impl Default for PlotSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotSession {
    /// Creates a session with the default viewport and resolution.
    pub fn new() -> Self {
        Self::with_point_count(DEFAULT_POINT_COUNT)
    }

    /// Creates a session sampling `point_count` points per trace.
    pub fn with_point_count(point_count: usize) -> Self {
        Self {
            functions: Vec::new(),
            viewport: Viewport::default(),
            point_count,
            traces: Vec::new(),
        }
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current traces, in function insertion order.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Compiles and stores a named function, then resamples everything.
    ///
    /// Replacing an existing name keeps its position in the ordering.
    pub fn set_function(&mut self, name: &str, expr: Expr) {
        let compiled = CompiledFunction::compile(expr);
        match self.functions.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = compiled,
            None => self.functions.push((name.to_string(), compiled)),
        }
        self.resample();
    }

    /// Removes a named function, if present, and resamples.
    pub fn remove_function(&mut self, name: &str) {
        let before = self.functions.len();
        self.functions.retain(|(n, _)| n != name);
        if self.functions.len() != before {
            self.resample();
        }
    }

    /// Removes every function and its traces. The viewport is kept.
    pub fn clear_functions(&mut self) {
        self.functions.clear();
        self.traces.clear();
    }

    /// Applies a pan/zoom event.
    ///
    /// Returns `true` and resamples when the proposed bounds form a valid
    /// window; otherwise returns `false` and leaves both the viewport and
    /// the traces untouched.
    pub fn apply_viewport(&mut self, min: Option<f64>, max: Option<f64>) -> bool {
        let Some(viewport) = Viewport::try_new(min, max) else {
            return false;
        };
        self.viewport = viewport;
        self.resample();
        true
    }

    fn resample(&mut self) {
        self.traces = self
            .functions
            .iter()
            .map(|(name, func)| Trace {
                name: name.clone(),
                points: sample(func, self.viewport, self.point_count),
            })
            .collect();
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests (proptest)
// ============================================================================

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use plotline_expr::validate::{validate, ValidationResult};
    use proptest::prelude::*;

    fn compiled(source: &str) -> CompiledFunction {
        let ValidationResult::Valid(expr) = validate(source).unwrap() else {
            unreachable!();
        };
        CompiledFunction::compile(expr)
    }

    proptest! {
        /// Identical viewport and function always yield a bit-identical
        /// sample sequence
        #[test]
        fn sampling_idempotent(
            min in -1e3..1e3f64,
            width in 1e-3..1e3f64,
            count in 2usize..200,
        ) {
            let viewport = Viewport { min, max: min + width };
            let f = compiled("sin(x) + 1/x");
            let a = sample(&f, viewport, count);
            let b = sample(&f, viewport, count);
            prop_assert_eq!(a, b);
        }

        /// Sample length and endpoints match the requested window
        #[test]
        fn sample_covers_window(
            min in -1e3..1e3f64,
            width in 1e-3..1e3f64,
            count in 2usize..200,
        ) {
            let viewport = Viewport { min, max: min + width };
            let points = sample(&compiled("x"), viewport, count);
            prop_assert_eq!(points.len(), count);
            prop_assert_eq!(points[0].x, viewport.min);
            let last = points[count - 1].x;
            prop_assert!((last - viewport.max).abs() <= 1e-9 * (1.0 + viewport.max.abs()));
        }

        /// Any rejected viewport event leaves the session untouched
        #[test]
        fn rejected_viewport_is_a_no_op(min in -1e3..1e3f64, delta in 0.0..1e3f64) {
            let mut session = PlotSession::with_point_count(16);
            session.set_function("f(x)", {
                let ValidationResult::Valid(expr) = validate("x^2").unwrap() else {
                    unreachable!();
                };
                expr
            });
            let before_viewport = session.viewport();
            let before_traces = session.traces().to_vec();

            // min >= max is always rejected
            let accepted = session.apply_viewport(Some(min), Some(min - delta));
            prop_assert!(!accepted);
            prop_assert_eq!(session.viewport(), before_viewport);
            prop_assert_eq!(session.traces(), before_traces.as_slice());
        }
    }
}
