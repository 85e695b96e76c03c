use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Cell coordinate on the wrap-around grid
///
/// Positions handed out by the grid are always canonical, i.e. inside
/// `[0, width) x [0, height)`. Arithmetic results must go through
/// [`Position::wrapped`] before being used as an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonicalize into `[0, width) x [0, height)`
    #[inline]
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        Self {
            x: wrap(self.x, width),
            y: wrap(self.y, height),
        }
    }
}

impl Add<(i32, i32)> for Position {
    type Output = Position;

    #[inline]
    fn add(self, (dx, dy): (i32, i32)) -> Position {
        Position::new(self.x + dx, self.y + dy)
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

/// Reduce `v` into `[0, modulus)`
///
/// A zero modulus has no valid range; it is returned as 0 so callers on an
/// empty grid never divide by zero.
#[inline]
pub fn wrap(v: i32, modulus: i32) -> i32 {
    if modulus <= 0 {
        return 0;
    }
    v.rem_euclid(modulus)
}

/// Signed shortest displacement along one axis of length `modulus`
#[inline]
fn axis_offset(target: i32, source: i32, modulus: i32) -> i32 {
    let mut d = wrap(target - source, modulus);
    if d > modulus / 2 {
        d -= modulus;
    }
    d
}

/// Shortest signed displacement from `source` to `target` on the torus,
/// computed independently per axis
///
/// Each component's magnitude is at most `modulus / 2`. On an even axis the
/// half-way point resolves to the positive direction.
#[inline]
pub fn shortest_offset(target: Position, source: Position, width: i32, height: i32) -> (i32, i32) {
    (
        axis_offset(target.x, source.x, width),
        axis_offset(target.y, source.y, height),
    )
}

/// Manhattan distance over the shortest wrapped offsets
///
/// Exact movement cost on an open torus; with walls it is only a lower bound.
#[inline]
pub fn manhattan_range(a: Position, b: Position, width: i32, height: i32) -> u32 {
    let (dx, dy) = shortest_offset(a, b, width, height);
    dx.unsigned_abs() + dy.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_positive_and_negative() {
        assert_eq!(wrap(0, 5), 0);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(7, 5), 2);
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-11, 5), 4);
    }

    #[test]
    fn test_wrap_zero_modulus() {
        assert_eq!(wrap(3, 0), 0);
    }

    #[test]
    fn test_position_wrapped() {
        let p = Position::new(-1, 7).wrapped(5, 4);
        assert_eq!(p, Position::new(4, 3));
    }

    #[test]
    fn test_shortest_offset_wraps_instead_of_long_way() {
        let offset = shortest_offset(Position::new(4, 0), Position::new(0, 0), 5, 5);
        assert_eq!(offset, (-1, 0));
    }

    #[test]
    fn test_shortest_offset_direct() {
        let offset = shortest_offset(Position::new(2, 3), Position::new(1, 1), 10, 10);
        assert_eq!(offset, (1, 2));
    }

    #[test]
    fn test_shortest_offset_bounded_by_half_modulus() {
        for (width, height) in [(5, 5), (4, 6), (7, 3), (1, 1), (2, 9)] {
            for sx in 0..width {
                for sy in 0..height {
                    for tx in 0..width {
                        for ty in 0..height {
                            let (dx, dy) = shortest_offset(
                                Position::new(tx, ty),
                                Position::new(sx, sy),
                                width,
                                height,
                            );
                            assert!(dx.abs() <= width / 2);
                            assert!(dy.abs() <= height / 2);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_manhattan_range_symmetric() {
        for (width, height) in [(5, 5), (4, 4), (6, 3)] {
            for ax in 0..width {
                for ay in 0..height {
                    for bx in 0..width {
                        for by in 0..height {
                            let a = Position::new(ax, ay);
                            let b = Position::new(bx, by);
                            assert_eq!(
                                manhattan_range(a, b, width, height),
                                manhattan_range(b, a, width, height)
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_manhattan_range_across_edges() {
        let a = Position::new(0, 0);
        let b = Position::new(9, 9);
        assert_eq!(manhattan_range(a, b, 10, 10), 2);
        assert_eq!(manhattan_range(a, a, 10, 10), 0);
    }
}
