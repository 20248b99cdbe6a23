//! HardSoftCost - Two-level cost with hard and soft parts

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use super::{CostLevel, CostParseError};

/// A cost with separate hard and soft levels.
///
/// Both levels are minimized. Hard costs measure constraint violation and
/// must reach zero for a solution to be feasible; soft costs measure quality.
///
/// When comparing costs:
/// 1. Hard costs are compared first
/// 2. Soft costs are only compared when hard costs are equal
///
/// The lower cost is the better one.
///
/// # Examples
///
/// ```
/// use allocforge_core::HardSoftCost;
///
/// let infeasible = HardSoftCost::of(1, 100);
/// let feasible = HardSoftCost::of(0, 200);
///
/// assert!(feasible < infeasible);
/// assert!(HardSoftCost::of(0, 50) < feasible);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardSoftCost {
    hard: i64,
    soft: i64,
}

impl HardSoftCost {
    /// The zero cost.
    pub const ZERO: HardSoftCost = HardSoftCost { hard: 0, soft: 0 };

    /// Factor applied to the hard level when collapsing to a single number.
    pub const DEFAULT_HARD_WEIGHT: i64 = 1000;

    /// Creates a new HardSoftCost.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftCost { hard, soft }
    }

    /// Creates a cost with only a hard part.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftCost { hard, soft: 0 }
    }

    /// Creates a cost with only a soft part.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftCost { hard: 0, soft }
    }

    /// Places `value * weight` on the given level.
    ///
    /// The product saturates at `i64::MIN`/`i64::MAX` instead of wrapping.
    /// Instances are bounded so that raw component values fit in `i64`; only
    /// an extreme weight can reach saturation.
    #[inline]
    pub const fn weighted(value: i64, weight: i64, level: CostLevel) -> Self {
        let product = value.saturating_mul(weight);
        match level {
            CostLevel::Hard => HardSoftCost::of_hard(product),
            CostLevel::Soft => HardSoftCost::of_soft(product),
        }
    }

    /// Returns the hard part.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft part.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns true when no hard cost remains.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard == 0
    }

    /// Collapses both levels into one number, `hard * hard_weight + soft`,
    /// saturating on overflow.
    #[inline]
    pub const fn to_scalar(&self, hard_weight: i64) -> i64 {
        self.hard.saturating_mul(hard_weight).saturating_add(self.soft)
    }

    /// Collapses both levels with [`Self::DEFAULT_HARD_WEIGHT`].
    #[inline]
    pub const fn total(&self) -> i64 {
        self.to_scalar(Self::DEFAULT_HARD_WEIGHT)
    }

    /// Returns true if this cost is strictly below zero, i.e. an improving delta.
    pub fn is_improving(&self) -> bool {
        *self < HardSoftCost::ZERO
    }
}

impl Ord for HardSoftCost {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftCost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardSoftCost::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl Sub for HardSoftCost {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardSoftCost::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for HardSoftCost {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftCost::of(-self.hard, -self.soft)
    }
}

impl AddAssign for HardSoftCost {
    fn add_assign(&mut self, other: Self) {
        self.hard += other.hard;
        self.soft += other.soft;
    }
}

impl Sum for HardSoftCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftCost::ZERO, Add::add)
    }
}

impl fmt::Debug for HardSoftCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftCost({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

/// Parses one `<number><suffix>` half of a `"Xhard/Ysoft"` string.
fn parse_level(part: &str, suffix: &str) -> Result<i64, CostParseError> {
    let number = part
        .trim()
        .strip_suffix(suffix)
        .ok_or_else(|| CostParseError {
            message: format!("expected '{}' level, got '{}'", suffix, part.trim()),
        })?;
    number.parse().map_err(|e| CostParseError {
        message: format!("bad {} value '{}': {}", suffix, number, e),
    })
}

impl FromStr for HardSoftCost {
    type Err = CostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (hard, soft) = s.split_once('/').ok_or_else(|| CostParseError {
            message: format!("'{}' is not of the form Xhard/Ysoft", s),
        })?;
        Ok(HardSoftCost::of(
            parse_level(hard, "hard")?,
            parse_level(soft, "soft")?,
        ))
    }
}
