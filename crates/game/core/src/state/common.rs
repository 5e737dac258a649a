use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Unique identifier for any entity placed on the grid (actors, walls, floors, pickups).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid coordinate.
///
/// Used both for absolute tiles and for offsets relative to a caster; every
/// resolved spell target is such an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        (self.magnitude_squared() as f64).sqrt()
    }

    pub const fn magnitude_squared(self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// Chebyshev length, the number of king moves needed to cover the offset.
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Rotates a quarter turn counter-clockwise about the origin.
    pub const fn rotate_quarter(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rescales to the given length and rounds half-to-even.
    ///
    /// The zero vector has no direction and stays zero.
    pub fn scaled_to(self, length: f64) -> Self {
        if self.is_zero() {
            return self;
        }
        let factor = length / self.magnitude();
        Self::new(
            round_half_even(self.x as f64 * factor),
            round_half_even(self.y as f64 * factor),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Position;
    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Position {
    type Output = Position;
    fn mul(self, rhs: i32) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

/// Rounds to the nearest integer, ties to even.
///
/// All grid geometry rounds this way so that line stepping, snapping and
/// knockback agree on which square a fractional coordinate belongs to.
pub fn round_half_even(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Integer resource meter (health) tracked per actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}
