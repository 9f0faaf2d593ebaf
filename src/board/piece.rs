/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Neg, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Represents the color of a player or piece.
///
/// White moves first and therefore [`Color`] defaults to [`Color::White`].
/// Serializes as `"w"` / `"b"`, matching the `turn` field of a save file.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use newt::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns a multiplier for negating numbers relative to this color.
    ///
    /// White is `1`, Black is `-1`.
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Direction a pawn of this color travels along the rows.
    ///
    /// Row 0 is Black's back rank, so White pawns move towards lower rows.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row on which this color's pawns start.
    #[inline(always)]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`Color`] from a `char`, `'w'` or `'b'` (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use newt::Color;
    /// assert_eq!(Color::from_char('b').unwrap(), Color::Black);
    /// assert!(Color::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color:?}"),
        }
    }

    /// Converts this [`Color`] to a char: `'w'` or `'b'`.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`PieceKind`] from its lowercase letter: `p`, `n`, `b`, `r`, `q`, `k`.
    pub fn from_char(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: {kind:?}. Must be one of [p, n, b, r, q, k]"),
        }
    }

    /// Lowercase letter for this [`PieceKind`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use newt::PieceKind;
    /// assert_eq!(PieceKind::Knight.name(), "Knight");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chess piece: a [`Color`] and a [`PieceKind`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);
    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a copy of this piece with its kind replaced by `promotion`.
    #[inline(always)]
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::new(self.color, promotion)
    }

    /// Parses the two-letter code used by save files: color then kind, e.g. `"wp"` or `"bk"`.
    ///
    /// # Example
    /// ```
    /// # use newt::Piece;
    /// assert_eq!(Piece::from_code("bk").unwrap(), Piece::BLACK_KING);
    /// assert!(Piece::from_code("xq").is_err());
    /// assert!(Piece::from_code("wqq").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self> {
        let mut chars = code.chars();
        let (Some(color), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Piece code must be exactly two characters. Got {code:?}");
        };

        Ok(Self::new(Color::from_char(color)?, PieceKind::from_char(kind)?))
    }

    /// Two-letter save-file code of this piece.
    #[inline(always)]
    pub fn code(&self) -> String {
        format!("{}{}", self.color.char(), self.kind.char())
    }

    /// Parses a FEN piece letter: uppercase for White, lowercase for Black.
    pub fn from_fen_char(c: char) -> Result<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, PieceKind::from_char(c)?))
    }

    /// FEN letter of this piece: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    /// Fetches a human-readable name for this [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use newt::Piece;
    /// assert_eq!(Piece::WHITE_QUEEN.name(), "white Queen");
    /// ```
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;
    /// Accepts either a save-file code (`"wn"`) or a single FEN letter (`"N"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_fen_char(c),
            _ => Self::from_code(s),
        }
    }
}

impl fmt::Display for Piece {
    /// By default, a piece displays as its FEN letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
