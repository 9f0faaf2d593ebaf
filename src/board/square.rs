/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

/// Represents a single square on an `8x8` chess board.
///
/// Squares are addressed by `(row, col)`, both in `[0, 7]`.
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank (rank 1).
/// Column 0 is the a-file.
///
/// Internally this is the index `row * 8 + col`, so iterating over [`Square::iter`]
/// visits the board row-major, then column-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Number of rows (and columns) on the board.
    pub const SIDE: u8 = 8;

    /// Creates a new [`Square`] from a row and a column.
    ///
    /// # Panics
    /// If either value is outside `[0, 7]` and debug assertions are enabled.
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::SIDE && col < Self::SIDE);
        Self(row * Self::SIDE + col)
    }

    /// Creates a new [`Square`] from an index in `[0, 63]`.
    ///
    /// # Example
    /// ```
    /// # use newt::Square;
    /// assert_eq!(Square::from_index(12).unwrap().to_string(), "e7");
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            bail!("Invalid square index {index}: must be between [0, 63]")
        }
    }

    /// Returns an iterator over every square, in row-major order starting at `a8`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Row of this square, `0` being rank 8.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::SIDE
    }

    /// Column of this square, `0` being the a-file.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % Self::SIDE
    }

    /// Index of this square in `[0, 63]`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// This square reflected across the horizontal center line.
    ///
    /// Used to read piece-square tables from Black's point of view.
    #[inline(always)]
    pub const fn flipped_row(self) -> Self {
        Self::new(Self::SIDE - 1 - self.row(), self.col())
    }

    /// Returns the square `drow` rows and `dcol` columns away, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use newt::Square;
    /// let e2: Square = "e2".parse().unwrap();
    /// assert_eq!(e2.offset(-2, 0).unwrap().to_string(), "e4");
    /// assert!(e2.offset(2, 0).is_none());
    /// ```
    #[inline(always)]
    pub const fn offset(&self, drow: i8, dcol: i8) -> Option<Self> {
        let row = self.row() as i8 + drow;
        let col = self.col() as i8 + dcol;

        if row < 0 || row >= Self::SIDE as i8 || col < 0 || col >= Self::SIDE as i8 {
            None
        } else {
            Some(Self::new(row as u8, col as u8))
        }
    }

    /// File letter of this square (`'a'..='h'`).
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// Rank digit of this square (`'1'..='8'`).
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row()) as char
    }

    /// Parses a square from coordinate notation, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use newt::Square;
    /// let e4 = Square::from_uci("e4").unwrap();
    /// assert_eq!((e4.row(), e4.col()), (4, 4));
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be two characters, like \"e4\". Got {square:?}");
        };

        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("Invalid file {file:?} in square {square:?}"),
        };
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .with_context(|| format!("Invalid rank {rank:?} in square {square:?}"))?;

        Ok(Self::new(Self::SIDE - rank as u8, col))
    }

    /// Converts this square to coordinate notation, such as `"e4"`.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row(), self.col())
    }
}
