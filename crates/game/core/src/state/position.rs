//! Board coordinates and the packed position codec.
//!
//! Inside the engine a position is always a [`Coordinate`], a pair whose
//! constructor enforces the board bounds. The packed integer form
//! (`x * SCALE + y`) only exists at the boundary: commitment hashing,
//! witness export, and interop with verifiers that read packed values.

use core::fmt;

use crate::action::CardinalDirection;
use crate::config::GameConfig;

/// Errors raised while validating or converting board positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodecError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i64, y: i64 },

    #[error("packed position {0} does not decode to a board tile")]
    InvalidEncoding(u32),
}

/// Validated tile coordinate with `0 <= x, y <= BOARD_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate", into = "RawCoordinate"))]
pub struct Coordinate {
    x: u32,
    y: u32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Builds a coordinate, rejecting negative or oversized components.
    pub fn new(x: i64, y: i64) -> Result<Self, CodecError> {
        let max = i64::from(GameConfig::BOARD_MAX);
        if !(0..=max).contains(&x) || !(0..=max).contains(&y) {
            return Err(CodecError::OutOfBounds { x, y });
        }
        // Both components fit in u32 after the range check.
        Ok(Self {
            x: x as u32,
            y: y as u32,
        })
    }

    pub const fn x(self) -> u32 {
        self.x
    }

    pub const fn y(self) -> u32 {
        self.y
    }

    /// Returns the neighbouring tile in `direction`, failing at the edge.
    pub fn step(self, direction: CardinalDirection) -> Result<Self, CodecError> {
        let (dx, dy) = direction.delta();
        Self::new(i64::from(self.x) + dx, i64::from(self.y) + dy)
    }

    /// Packs the coordinate into its single-integer form.
    pub const fn encode(self) -> EncodedPosition {
        EncodedPosition(self.x * GameConfig::SCALE + self.y)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TryFrom<(i64, i64)> for Coordinate {
    type Error = CodecError;

    fn try_from((x, y): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

/// Unvalidated mirror of [`Coordinate`] used for deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    x: i64,
    y: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CodecError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            x: i64::from(coordinate.x),
            y: i64::from(coordinate.y),
        }
    }
}

/// Packed position `x * SCALE + y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EncodedPosition(u32);

impl EncodedPosition {
    /// Wraps a raw packed value without validating it.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Unpacks into a validated coordinate.
    pub fn decode(self) -> Result<Coordinate, CodecError> {
        decode(self)
    }
}

impl fmt::Display for EncodedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Coordinate> for EncodedPosition {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.encode()
    }
}

impl From<EncodedPosition> for u64 {
    fn from(position: EncodedPosition) -> Self {
        u64::from(position.0)
    }
}

/// Validates `(x, y)` and packs it.
pub fn encode(x: i64, y: i64) -> Result<EncodedPosition, CodecError> {
    Coordinate::new(x, y).map(Coordinate::encode)
}

/// Exact inverse of [`encode`].
///
/// Values that `encode` can never produce (a `y` digit of `SCALE` or more,
/// or components beyond the board) are rejected rather than wrapped.
pub fn decode(position: EncodedPosition) -> Result<Coordinate, CodecError> {
    let raw = position.value();
    let x = raw / GameConfig::SCALE;
    let y = raw % GameConfig::SCALE;
    Coordinate::new(i64::from(x), i64::from(y)).map_err(|_| CodecError::InvalidEncoding(raw))
}
