/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, DEFAULT_TIME_CONTROL};

/// Seconds remaining on each side's clock.
///
/// The clock is driven from outside: something calls [`Clock::tick`] once per second for the side
/// to move. There is no increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clock {
    /// White's remaining time in seconds
    pub white: u32,
    /// Black's remaining time in seconds
    pub black: u32,
}

impl Clock {
    /// Both sides start with `seconds` on their clock.
    #[inline(always)]
    pub const fn new(seconds: u32) -> Self {
        Self {
            white: seconds,
            black: seconds,
        }
    }

    /// Seconds remaining for `color`.
    #[inline(always)]
    pub const fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Removes one second from `color`'s clock.
    ///
    /// Returns `true` if `color` has run out of time.
    #[inline(always)]
    pub fn tick(&mut self, color: Color) -> bool {
        let remaining = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        *remaining = remaining.saturating_sub(1);
        *remaining == 0
    }
}

impl Default for Clock {
    /// Ten minutes each.
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_TIME_CONTROL)
    }
}

/// Formats seconds as `m:ss`.
struct MinSec(u32);

impl fmt::Display for MinSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "White {} | Black {}",
            MinSec(self.white),
            MinSec(self.black)
        )
    }
}
