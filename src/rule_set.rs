use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    ///
    /// Big endian is used here (i.e. `b = 0b1` means b1, and `b = 0b1_0000_0000` means b8).
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// The state of a cell in the next generation, given its current state and how many of its
    /// eight neighbors are alive.
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        // anything past 8 neighbors can't happen, and would shift out of the mask anyway
        let Some(n) = 1u16.checked_shl(neighbors as u32) else {
            return false;
        };

        if alive {
            self.survivals() & n == n
        } else {
            self.births() & n == n
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("Expected a rule like B3/S23, got an empty string")]
    Empty,

    #[error("Neighbor count {got} is out of range, expected 0 through 8")]
    OutOfRange { got: char },

    #[error("Unexpected character '{got}'")]
    UnexpectedChar { got: char },

    #[error("Rule is missing its survival part")]
    NoSurvival,
}

/// Parses rulestrings in B/S notation, e.g. `B3/S23` or `b3s23`
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[derive(Clone, Copy)]
        enum State {
            Start,
            Birth,
            Survival,
        }

        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut state = State::Start;
        let (mut b, mut s_) = (0u16, 0u16);

        for c in s.chars() {
            match (state, c) {
                (State::Start, 'b' | 'B') => state = State::Birth,
                (State::Birth, '/') => {}
                (State::Birth, 's' | 'S') => state = State::Survival,
                (State::Birth | State::Survival, n) if n.is_ascii_digit() => {
                    let d = n as u8 - b'0';

                    if d > 8 {
                        return Err(RuleError::OutOfRange { got: n });
                    }

                    match state {
                        State::Birth => b |= 1 << d,
                        _ => s_ |= 1 << d,
                    }
                }
                (_, got) => return Err(RuleError::UnexpectedChar { got }),
            }
        }

        let State::Survival = state else {
            return Err(RuleError::NoSurvival);
        };

        Ok(RuleSet::new(b, s_))
    }
}

/// Writes the canonical `B3/S23` form
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0u8..=8)
                .filter(|n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}
