//! The closed vocabulary: the free variable, named constants, and the
//! fixed set of callable functions.
//!
//! The sets here are process-wide and immutable. Everything a user types
//! must resolve into this vocabulary or be rejected by the validator.

/// Name of the single free variable expressions are evaluated over.
pub const FREE_VARIABLE: &str = "x";

/// Named real constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Euler's number, 2.71828...
    E,
    /// 3.14159...
    Pi,
}

impl Constant {
    /// Resolves a source name to a constant.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "e" => Some(Constant::E),
            "pi" => Some(Constant::Pi),
            _ => None,
        }
    }

    /// The source name of this constant.
    pub fn name(self) -> &'static str {
        match self {
            Constant::E => "e",
            Constant::Pi => "pi",
        }
    }

    /// The numeric value of this constant.
    pub fn value(self) -> f64 {
        match self {
            Constant::E => std::f64::consts::E,
            Constant::Pi => std::f64::consts::PI,
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The callable functions of the vocabulary.
///
/// All are real-valued and take exactly one argument. Trigonometric
/// functions work in radians; `log` is the natural logarithm and `exp`
/// is base e.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Cbrt,
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Csch,
    Sech,
    Coth,
    Asin,
    Acos,
    Atan,
    Acsc,
    Asec,
    Acot,
    Asinh,
    Acosh,
    Atanh,
    Acsch,
    Asech,
    Acoth,
    Log,
    Exp,
}

impl Function {
    /// Every function in the vocabulary, in a stable order.
    pub const ALL: [Function; 28] = [
        Function::Sqrt,
        Function::Cbrt,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Csc,
        Function::Sec,
        Function::Cot,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Csch,
        Function::Sech,
        Function::Coth,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Acsc,
        Function::Asec,
        Function::Acot,
        Function::Asinh,
        Function::Acosh,
        Function::Atanh,
        Function::Acsch,
        Function::Asech,
        Function::Acoth,
        Function::Log,
        Function::Exp,
    ];

    /// Resolves a source name to a function.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Function::Sqrt),
            "cbrt" => Some(Function::Cbrt),
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "csc" => Some(Function::Csc),
            "sec" => Some(Function::Sec),
            "cot" => Some(Function::Cot),
            "sinh" => Some(Function::Sinh),
            "cosh" => Some(Function::Cosh),
            "tanh" => Some(Function::Tanh),
            "csch" => Some(Function::Csch),
            "sech" => Some(Function::Sech),
            "coth" => Some(Function::Coth),
            "asin" => Some(Function::Asin),
            "acos" => Some(Function::Acos),
            "atan" => Some(Function::Atan),
            "acsc" => Some(Function::Acsc),
            "asec" => Some(Function::Asec),
            "acot" => Some(Function::Acot),
            "asinh" => Some(Function::Asinh),
            "acosh" => Some(Function::Acosh),
            "atanh" => Some(Function::Atanh),
            "acsch" => Some(Function::Acsch),
            "asech" => Some(Function::Asech),
            "acoth" => Some(Function::Acoth),
            "log" => Some(Function::Log),
            "exp" => Some(Function::Exp),
            _ => None,
        }
    }

    /// The source name of this function.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Csc => "csc",
            Function::Sec => "sec",
            Function::Cot => "cot",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Csch => "csch",
            Function::Sech => "sech",
            Function::Coth => "coth",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Acsc => "acsc",
            Function::Asec => "asec",
            Function::Acot => "acot",
            Function::Asinh => "asinh",
            Function::Acosh => "acosh",
            Function::Atanh => "atanh",
            Function::Acsch => "acsch",
            Function::Asech => "asech",
            Function::Acoth => "acoth",
            Function::Log => "log",
            Function::Exp => "exp",
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_values() {
        assert_eq!(Constant::E.value(), std::f64::consts::E);
        assert_eq!(Constant::Pi.value(), std::f64::consts::PI);
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("tau"), None);
    }

    #[test]
    fn test_function_names_roundtrip() {
        for func in Function::ALL {
            assert_eq!(Function::from_name(func.name()), Some(func));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Function::from_name("sine"), None);
        assert_eq!(Function::from_name("x"), None);
        assert_eq!(Function::from_name(""), None);
    }

    #[test]
    fn test_constants_are_not_functions() {
        assert_eq!(Function::from_name("e"), None);
        assert_eq!(Function::from_name("pi"), None);
    }
}
