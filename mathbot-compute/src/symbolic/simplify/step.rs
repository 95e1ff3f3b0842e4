use std::fmt::{self, Display, Formatter};

/// A single rewrite applied while simplifying an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + (b + c) = a + b + c`
    FlattenAdd,

    /// `a * (b * c) = a * b * c`
    FlattenMul,

    /// Numbers added together, such as `2 + 3 = 5` or `1/2 + 1/3 = 5/6`.
    FoldAdd,

    /// Numbers multiplied together, such as `2 * 3x = 6x` or `4 * 1/6 = 2/3`.
    FoldMul,

    /// A number raised to a number, such as `2^3 = 8`.
    FoldPower,

    /// A function called with numbers, such as `sqrt(16) = 4`.
    FoldCall,

    /// `a + 0 = a`
    AddZero,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    MultiplyOne,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    PowerOneLeft,

    /// `0^a = 0`, for positive `a`
    PowerZeroLeft,

    /// `(a^b)^n = a^(bn)`, for integer `n`
    PowerPower,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `a * a^2 = a^3`
    CombineLikeFactors,

    /// `a(b + c) = ab + ac`
    DistributiveProperty,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let description = match self {
            Self::FlattenAdd => "flatten nested sums",
            Self::FlattenMul => "flatten nested products",
            Self::FoldAdd => "add numbers",
            Self::FoldMul => "multiply numbers",
            Self::FoldPower => "evaluate a power of numbers",
            Self::FoldCall => "evaluate a function of numbers",
            Self::AddZero => "remove `+ 0`",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove `* 1`",
            Self::PowerZero => "`a^0 = 1`",
            Self::PowerOne => "`a^1 = a`",
            Self::PowerOneLeft => "`1^a = 1`",
            Self::PowerZeroLeft => "`0^a = 0`",
            Self::PowerPower => "`(a^b)^n = a^(bn)`",
            Self::CombineLikeTerms => "combine like terms",
            Self::CombineLikeFactors => "combine like factors",
            Self::DistributiveProperty => "distribute over a sum",
        };
        write!(f, "{}", description)
    }
}
