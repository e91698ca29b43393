//!
//! # Geometry Module
//!
//! Defines the core geometric types [Point], [Rotation], and [Placement],
//! and the coordinate transform applied through instance hierarchies.
//!

// Std-Lib
use std::convert::TryFrom;

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::{Int, LayoutError, LayoutResult};

/// # Point in two-dimensional layout-space
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: Int,
    pub y: Int,
}
impl Point {
    /// Create a new [Point] from (x,y) coordinates
    pub fn new(x: Int, y: Int) -> Self {
        Self { x, y }
    }
    /// Create a new point shifted by `p.x` in the x-dimension and by `p.y` in the y-dimension
    pub fn shift(&self, p: &Point) -> LayoutResult<Point> {
        match (self.x.checked_add(p.x), self.y.checked_add(p.y)) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(LayoutError::CoordinateOverflow { point: *self }),
        }
    }
    /// Create a new [Point], rotated counter-clockwise about the origin by `rot`
    pub fn rotate(&self, rot: Rotation) -> LayoutResult<Point> {
        let (x, y) = (self.x, self.y);
        let rotated = match rot {
            Rotation::R0 => Some((x, y)),
            Rotation::R90 => y.checked_neg().map(|ny| (ny, x)),
            Rotation::R180 => x.checked_neg().zip(y.checked_neg()),
            Rotation::R270 => x.checked_neg().map(|nx| (y, nx)),
        };
        rotated
            .map(Point::from)
            .ok_or(LayoutError::CoordinateOverflow { point: *self })
    }
    /// Create a new [Point], reflected about the x-axis
    pub fn reflect_vert(&self) -> LayoutResult<Point> {
        match self.y.checked_neg() {
            Some(y) => Ok(Point::new(self.x, y)),
            None => Err(LayoutError::CoordinateOverflow { point: *self }),
        }
    }
    /// Create a new [Point], transformed from our original location by `placement`
    pub fn transform(&self, placement: &Placement) -> LayoutResult<Point> {
        apply(self, placement.angle, placement.mirror, &placement.offset)
    }
    /// Convert to floating-point coordinates, divided by `scale`
    pub fn scaled(&self, scale: f64) -> (f64, f64) {
        (self.x as f64 / scale, self.y as f64 / scale)
    }
}
impl From<(Int, Int)> for Point {
    fn from(tup: (Int, Int)) -> Self {
        Self::new(tup.0, tup.1)
    }
}

/// # Apply a Placement Transform to `point`
///
/// * Rotate counter-clockwise by `angle` degrees, which must be a right angle,
/// * then negate y if `mirror` is set,
/// * then translate by `offset`.
///
/// Fails with [LayoutError::UnsupportedAngle] for any non-right `angle`,
/// and with [LayoutError::CoordinateOverflow] if a result leaves the [Int] range.
///
pub fn apply(point: &Point, angle: f64, mirror: bool, offset: &Point) -> LayoutResult<Point> {
    let rot = Rotation::try_from(angle)?;
    let mut p = point.rotate(rot)?;
    if mirror {
        p = p.reflect_vert()?;
    }
    p.shift(offset)
}

/// # Right-Angle Rotations
/// Counter-clockwise.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}
impl Rotation {
    /// Every rotation, in increasing-angle order
    pub const ALL: [Rotation; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];
    /// Angle in degrees, in `[0, 360)`
    pub fn degrees(&self) -> f64 {
        match self {
            Self::R0 => 0.,
            Self::R90 => 90.,
            Self::R180 => 180.,
            Self::R270 => 270.,
        }
    }
}
impl TryFrom<f64> for Rotation {
    type Error = LayoutError;
    /// Convert from degrees. Angles are taken modulo 360, so that e.g. -90 is 270.
    fn try_from(angle: f64) -> Result<Self, Self::Error> {
        let norm = angle.rem_euclid(360.);
        if norm == 0. {
            Ok(Self::R0)
        } else if norm == 90. {
            Ok(Self::R90)
        } else if norm == 180. {
            Ok(Self::R180)
        } else if norm == 270. {
            Ok(Self::R270)
        } else {
            Err(LayoutError::UnsupportedAngle { angle })
        }
    }
}

/// # Placement
///
/// Position of a child within its parent's frame:
/// offset, counter-clockwise angle in degrees, and reflection about the x-axis.
/// The angle is kept as written, and only checked when the placement is applied.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub offset: Point,
    pub angle: f64,
    pub mirror: bool,
}
impl Placement {
    /// The identity placement, leaving any transformed object unmodified
    pub fn identity() -> Self {
        Self::default()
    }
    pub fn new(offset: impl Into<Point>, angle: f64, mirror: bool) -> Self {
        Self {
            offset: offset.into(),
            angle,
            mirror,
        }
    }
    /// Create the effective [Placement] of `child`, placed inside a frame itself placed at `parent`.
    ///
    /// * The offset is the child's offset, transformed by the parent.
    /// * Angles add, modulo 360.
    /// * Mirrors combine by exclusive-or, so that double-mirroring cancels.
    ///
    /// Note this operation *is not* commutative.
    ///
    pub fn cascade(parent: &Placement, child: &Placement) -> LayoutResult<Placement> {
        Ok(Placement {
            offset: child.offset.transform(parent)?,
            angle: (child.angle + parent.angle).rem_euclid(360.),
            mirror: child.mirror ^ parent.mirror,
        })
    }
}
