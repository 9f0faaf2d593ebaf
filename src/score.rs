/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::MAX_DEPTH;

/// A numerical representation of the evaluation of a position / move, in tenths of a
/// ["centipawn"](https://www.chessprogramming.org/Score).
///
/// The extra digit keeps the piece-square adjustments exact: they are a tenth of their table entry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Number of [`Score`] units in one centipawn.
    pub const UNITS_PER_CENTIPAWN: i32 = 10;

    /// Largest possible score ever achievable.
    pub const INF: Self = Self(1_000_000);

    /// Score of being checkmated in the current position, negated.
    ///
    /// Equivalent to 20000 centipawns: the value of a King.
    pub const MATE: Self = Self(20_000 * Self::UNITS_PER_CENTIPAWN);

    /// Score of a draw.
    pub const DRAW: Self = Self(0);

    /// Lowest possible score for mate.
    ///
    /// This is only obtainable if mate is possible in [`MAX_DEPTH`] plies.
    pub const LOWEST_MATE: Self = Self(Self::MATE.0 - MAX_DEPTH as i32);

    /// Creates a [`Score`] from a value in centipawns.
    #[inline(always)]
    pub const fn from_centipawns(cp: i32) -> Self {
        Self(cp * Self::UNITS_PER_CENTIPAWN)
    }

    /// This score in whole centipawns, truncated towards zero.
    #[inline(always)]
    pub const fn centipawns(&self) -> i32 {
        self.0 / Self::UNITS_PER_CENTIPAWN
    }

    /// Returns `true` if the score is a mate score.
    #[inline(always)]
    pub fn is_mate(&self) -> bool {
        self.abs() >= Self::LOWEST_MATE
    }

    /// Returns the number of plies (half moves) this score is from mate.
    #[inline(always)]
    pub const fn plies_to_mate(&self) -> i32 {
        Self::MATE.0 - self.0.abs()
    }

    /// Returns the number of moves (full moves) this score is from mate.
    #[inline(always)]
    pub const fn moves_to_mate(&self) -> i32 {
        let plies = self.plies_to_mate();

        // If this score is in favor of the side-to-move, it will be positive
        // so we add 1 (because we need to make the current move in order for it's score to take effect).
        // Otherwise, the score is for our opponent, so we need to negate it.
        let relative_to_side = if self.0 > 0 { plies + 1 } else { -plies };

        // Divide by 2 to obtain the number of moves (1 move = 2 ply)
        relative_to_side / 2
    }

    /// Returns the absolute value of this [`Score`].
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// "Normalizes" a score so that it can be printed as a float, in pawns.
    #[inline(always)]
    pub fn normalize(&self) -> f32 {
        self.0 as f32 / (100 * Self::UNITS_PER_CENTIPAWN) as f32
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl PartialEq<i32> for Score {
    fn eq(&self, other: &i32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<i32> for Score {
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Score {
    /// Mate scores display as `#N` (`#-N` when being mated), others in pawns.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "#{}", self.moves_to_mate())
        } else {
            write!(f, "{:+.2}", self.normalize())
        }
    }
}

impl fmt::Debug for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(
                f,
                "{} (mate in {} plies {} moves)",
                self.0,
                self.plies_to_mate(),
                self.moves_to_mate()
            )
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_distances() {
        let plies = 3;

        let our_mate = Score::MATE - plies;
        assert!(our_mate.is_mate());
        assert_eq!(our_mate.plies_to_mate(), plies);
        assert_eq!(our_mate.moves_to_mate(), 2);

        let their_mate = -(Score::MATE - plies);
        assert_eq!(their_mate.plies_to_mate(), plies);
        assert_eq!(their_mate.moves_to_mate(), -1);

        assert!(!Score::from_centipawns(900).is_mate());
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::from_centipawns(150).to_string(), "+1.50");
        assert_eq!(Score(-250).to_string(), "-0.25");
        assert_eq!((Score::MATE - 1).to_string(), "#1");
        assert_eq!(Score::from_centipawns(-42).centipawns(), -42);
    }
}
