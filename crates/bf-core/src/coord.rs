//! Grid coordinates and the shape transforms used to place parts.
//!
//! Parts sit on a grid of unit squares. A shape is a rectangle of one or more
//! squares and its anchor is the top-left corner, which always has integer
//! coordinates. Connection points ("edges") may sit anywhere inside or on the
//! border of a square.
//!
//! Rotating a shape keeps its anchor in place: the shape is first rotated
//! around the anchor, then shifted in the positive direction until its new
//! top-left corner coincides with the old anchor.
//!
//! ```text
//!   start        rotate 90      shift
//!     X            X              X
//!      1 2 3    4 1                4 1
//!      4 5 6    5 2                5 2
//!               6 3                6 3
//! ```
//!
//! Values are stored as integer thousandths. Equality, ordering and hashing
//! are therefore exact, and match the canonical `"x,y,z"` key.

use core::fmt;
use core::ops::{Add, Neg};
use core::str::FromStr;

use crate::{CoreError, CoreResult, Real};

/// Thousandths per grid unit.
const SCALE: i64 = 1000;

/// Coordinates beyond this magnitude (in grid units) are rejected on input.
const MAX_UNITS: Real = 1e12;

const HALF: Coord = Coord::from_millis(500, 500, 0);

/// A point on the layout grid.
///
/// Points with a negative `z` are static: shape transforms leave them in
/// place. Parts use them for connection points that must not follow the part
/// when it is rotated or flipped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Coord {
    x: i64,
    y: i64,
    z: i64,
}

impl Coord {
    pub const ORIGIN: Coord = Coord::from_millis(0, 0, 0);

    /// Build from values already expressed in thousandths of a grid unit.
    pub const fn from_millis(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Integer grid point on the `z = 0` plane (e.g. a part anchor).
    pub const fn grid(x: i32, y: i32) -> Self {
        Self::from_millis(x as i64 * SCALE, y as i64 * SCALE, 0)
    }

    /// Build from floating point components, rounding to three decimals.
    pub fn new(x: Real, y: Real, z: Real) -> CoreResult<Self> {
        Ok(Self {
            x: to_millis(x, "coordinate x")?,
            y: to_millis(y, "coordinate y")?,
            z: to_millis(z, "coordinate z")?,
        })
    }

    pub fn x(&self) -> Real {
        self.x as Real / SCALE as Real
    }

    pub fn y(&self) -> Real {
        self.y as Real / SCALE as Real
    }

    pub fn z(&self) -> Real {
        self.z as Real / SCALE as Real
    }

    /// Raw components in thousandths.
    pub fn millis(&self) -> (i64, i64, i64) {
        (self.x, self.y, self.z)
    }

    pub fn is_static(&self) -> bool {
        self.z < 0
    }

    /// Shift by `offset`. Static points stay where they are.
    pub fn translate(self, offset: Coord) -> Self {
        if self.is_static() {
            return self;
        }
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }

    /// Rotate clockwise (in screen space, y pointing down) around `pivot`.
    ///
    /// Results are rounded to one decimal, which snaps edge points back onto
    /// the grid they started on.
    pub fn rotate(self, rotation: Rotation, pivot: Coord) -> Self {
        if self.is_static() || rotation == Rotation::Deg0 {
            return self;
        }
        let (sin, cos) = rotation.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self {
            x: round_tenth(dx * cos - dy * sin + pivot.x),
            y: round_tenth(dx * sin + dy * cos + pivot.y),
            z: self.z,
        }
    }

    /// Rotate the square anchored at `self` as part of a shape anchored at
    /// `shape_anchor`, returning the anchor of the rotated square.
    pub fn rotate_shape_square(
        self,
        rotation: Rotation,
        shape_rotation: Rotation,
        shape_size: ShapeSize,
        shape_anchor: Coord,
    ) -> Self {
        if self.is_static() || rotation == Rotation::Deg0 {
            return self;
        }

        let new_size = shape_size.rotated(rotation + shape_rotation);
        let center = self.translate(HALF).rotate(rotation, shape_anchor);

        // Everything that ended up left of / above the anchor moves back by
        // one full shape width / height.
        let shift = Coord::from_millis(
            if center.x < shape_anchor.x {
                new_size.width_millis()
            } else {
                0
            },
            if center.y < shape_anchor.y {
                new_size.height_millis()
            } else {
                0
            },
            0,
        );

        center.translate(shift).translate(-HALF)
    }

    /// Rotate an edge point as part of a shape anchored at `shape_anchor`.
    ///
    /// The containing square is rotated with [`Coord::rotate_shape_square`],
    /// after which the point is rotated around that square's center.
    pub fn rotate_shape_edge(
        self,
        rotation: Rotation,
        shape_rotation: Rotation,
        shape_size: ShapeSize,
        shape_anchor: Coord,
    ) -> Self {
        if self.is_static() || rotation == Rotation::Deg0 {
            return self;
        }

        let square = Coord::from_millis(floor_unit(self.x), floor_unit(self.y), self.z);
        let offset = Coord::from_millis(self.x - square.x, self.y - square.y, 0);

        let rotated_square =
            square.rotate_shape_square(rotation, shape_rotation, shape_size, shape_anchor);

        rotated_square
            .translate(offset)
            .rotate(rotation, rotated_square.translate(HALF))
    }

    /// Mirror horizontally within the shape anchored at `shape_anchor`.
    pub fn flip_shape_edge(
        self,
        flip: bool,
        shape_rotation: Rotation,
        shape_size: ShapeSize,
        shape_anchor: Coord,
    ) -> Self {
        if self.is_static() || !flip {
            return self;
        }
        let width = shape_size.rotated(shape_rotation).width_millis();
        let shift_x = (shape_anchor.x + width / 2 - self.x) * 2;
        self.translate(Coord::from_millis(shift_x, 0, 0))
    }
}

fn to_millis(v: Real, what: &'static str) -> CoreResult<i64> {
    if !v.is_finite() {
        return Err(CoreError::NonFinite { what, value: v });
    }
    if v.abs() > MAX_UNITS {
        return Err(CoreError::InvalidArg { what });
    }
    Ok((v * SCALE as Real).round() as i64)
}

/// Round thousandths to the nearest tenth of a unit, halves away from zero.
fn round_tenth(millis: i64) -> i64 {
    const STEP: i64 = SCALE / 10;
    let rounded = (millis.abs() + STEP / 2) / STEP * STEP;
    if millis < 0 { -rounded } else { rounded }
}

fn floor_unit(millis: i64) -> i64 {
    millis.div_euclid(SCALE) * SCALE
}

fn write_component(f: &mut fmt::Formatter<'_>, millis: i64) -> fmt::Result {
    if millis < 0 {
        f.write_str("-")?;
    }
    let abs = millis.unsigned_abs();
    let units = abs / SCALE as u64;
    let frac = abs % SCALE as u64;
    if frac == 0 {
        write!(f, "{units}")
    } else {
        let digits = format!("{frac:03}");
        write!(f, "{units}.{}", digits.trim_end_matches('0'))
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::from_millis(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::from_millis(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self.x)?;
        f.write_str(",")?;
        write_component(f, self.y)?;
        f.write_str(",")?;
        write_component(f, self.z)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({self})")
    }
}

impl FromStr for Coord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidCoordinate {
            input: s.to_owned(),
        };
        let parts: Vec<&str> = s.split(',').collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(invalid());
        };
        let parse = |v: &str| v.trim().parse::<Real>().map_err(|_| invalid());
        Coord::new(parse(x)?, parse(y)?, parse(z)?).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Coord {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Coord> for String {
    fn from(c: Coord) -> Self {
        c.to_string()
    }
}

/// Quarter-turn rotation of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Clamp any multiple of 90 into `[0, 360)`. Other values are rejected.
    pub fn from_degrees(degrees: i64) -> CoreResult<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(CoreError::InvalidRotation { degrees }),
        }
    }

    pub fn degrees(self) -> i64 {
        i64::from(self.quarter_turns()) * 90
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// True for 90 and 270, where width and height trade places.
    pub fn swaps_axes(self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Exact `(sin, cos)` for the quarter turn.
    fn sin_cos(self) -> (i64, i64) {
        match self {
            Rotation::Deg0 => (0, 1),
            Rotation::Deg90 => (1, 0),
            Rotation::Deg180 => (0, -1),
            Rotation::Deg270 => (-1, 0),
        }
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::ALL[usize::from((self.quarter_turns() + rhs.quarter_turns()) % 4)]
    }
}

impl TryFrom<i64> for Rotation {
    type Error = CoreError;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i64 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Footprint of a part in grid squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeSize {
    pub width: u32,
    pub height: u32,
}

impl ShapeSize {
    pub const UNIT: ShapeSize = ShapeSize::new(1, 1);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn rotated(self, rotation: Rotation) -> Self {
        if rotation.swaps_axes() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }

    fn width_millis(self) -> i64 {
        i64::from(self.width) * SCALE
    }

    fn height_millis(self) -> i64 {
        i64::from(self.height) * SCALE
    }
}

impl Default for ShapeSize {
    fn default() -> Self {
        Self::UNIT
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Edge points of a unit square on the half-unit lattice.
    fn unit_edge() -> impl Strategy<Value = (i64, i64)> {
        (0_i64..=2, 0_i64..=2).prop_map(|(x, y)| (x * 500, y * 500))
    }

    proptest! {
        #[test]
        fn four_quarter_turns_are_identity(
            (ex, ey) in unit_edge(),
            ax in -20_i32..20,
            ay in -20_i32..20,
        ) {
            let anchor = Coord::grid(ax, ay);
            let start = Coord::from_millis(ex, ey, 0).translate(anchor);
            let mut p = start;
            for _ in 0..4 {
                p = p.rotate_shape_edge(Rotation::Deg90, Rotation::Deg0, ShapeSize::UNIT, anchor);
            }
            prop_assert_eq!(p, start);
        }

        #[test]
        fn double_flip_is_identity(
            x in -5_000_i64..5_000,
            y in -5_000_i64..5_000,
            w in 1_u32..6,
            h in 1_u32..6,
            quarter in 0_usize..4,
        ) {
            let size = ShapeSize::new(w, h);
            let rotation = Rotation::ALL[quarter];
            let p = Coord::from_millis(x, y, 0);
            let back = p
                .flip_shape_edge(true, rotation, size, Coord::ORIGIN)
                .flip_shape_edge(true, rotation, size, Coord::ORIGIN);
            prop_assert_eq!(back, p);
        }

        #[test]
        fn static_points_stay_put(
            x in -5_000_i64..5_000,
            y in -5_000_i64..5_000,
            z in -3_i64..0,
            ax in -20_i32..20,
            ay in -20_i32..20,
            quarter in 0_usize..4,
        ) {
            let p = Coord::from_millis(x, y, z * 1000);
            let anchor = Coord::grid(ax, ay);
            let rotation = Rotation::ALL[quarter];
            let size = ShapeSize::new(2, 3);
            prop_assert_eq!(p.translate(anchor), p);
            prop_assert_eq!(p.rotate(rotation, anchor), p);
            prop_assert_eq!(p.rotate_shape_edge(rotation, Rotation::Deg0, size, anchor), p);
            prop_assert_eq!(p.flip_shape_edge(true, rotation, size, anchor), p);
        }

        #[test]
        fn canonical_key_parses_back(x in -100_000_i64..100_000, y in -100_000_i64..100_000, z in -3_i64..3) {
            let p = Coord::from_millis(x, y, z * 1000);
            let parsed: Coord = p.to_string().parse().unwrap();
            prop_assert_eq!(parsed, p);
        }
    }
}
