use thiserror::Error;

/// Hard limit on logical coordinates, in cells from the origin.
///
/// The plane is conceptually infinite, but viewport math runs in f64 and a
/// center that drifts past ~1e6 cells starts losing sub-cell precision.
/// Coordinates outside the bound are clamped on construction, never rejected.
pub const COORD_BOUND: i32 = 1_000_000;

/// Errors produced by the coordinate model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    /// A packed cell key decoded to a pair outside the coordinate bound.
    /// Can only arise from an internal encoding bug, so callers skip the
    /// offending entry rather than aborting.
    #[error("malformed cell key {0:#018x}: decoded pair exceeds coordinate bound")]
    MalformedKey(u64),
}

/// One cell of the infinite logical plane, addressed as (row, col).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Create a coordinate, clamping both axes to the coordinate bound.
    pub const fn new(row: i32, col: i32) -> Self {
        Self {
            row: clamp_axis(row, COORD_BOUND),
            col: clamp_axis(col, COORD_BOUND),
        }
    }

    /// Clamp against a caller-supplied bound instead of the default.
    pub const fn new_bounded(row: i32, col: i32, bound: i32) -> Self {
        Self {
            row: clamp_axis(row, bound),
            col: clamp_axis(col, bound),
        }
    }

    /// Translate by a signed offset, re-clamping the result.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// The Moore neighborhood: 8 horizontally, vertically, and diagonally
    /// adjacent cells. At the clamp boundary some entries fold back onto
    /// this cell; neighbor-counting passes skip those.
    pub fn neighbors(self) -> [Coord; 8] {
        [
            self.offset(-1, -1),
            self.offset(-1, 0),
            self.offset(-1, 1),
            self.offset(0, -1),
            self.offset(0, 1),
            self.offset(1, -1),
            self.offset(1, 0),
            self.offset(1, 1),
        ]
    }

    /// Pack into a stable, order-independent set key.
    pub const fn key(self) -> CellKey {
        CellKey(((self.row as u32 as u64) << 32) | (self.col as u32 as u64))
    }
}

/// Injective 64-bit packing of a coordinate pair: row in the high half,
/// col in the low half. Reversible for every in-bound coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellKey(pub u64);

impl CellKey {
    /// Unpack back into a coordinate.
    ///
    /// Fails with [`CoordError::MalformedKey`] when the unpacked pair lies
    /// outside the coordinate bound, which no valid encoder can produce.
    pub fn decode(self) -> Result<Coord, CoordError> {
        let row = (self.0 >> 32) as u32 as i32;
        let col = self.0 as u32 as i32;
        if row.unsigned_abs() > COORD_BOUND as u32 || col.unsigned_abs() > COORD_BOUND as u32 {
            return Err(CoordError::MalformedKey(self.0));
        }
        Ok(Coord { row, col })
    }
}

/// Clamp a fractional viewport center to the coordinate bound.
pub fn clamp_fractional(value: f64, bound: i32) -> f64 {
    value.clamp(-(bound as f64), bound as f64)
}

const fn clamp_axis(v: i32, bound: i32) -> i32 {
    if v > bound {
        bound
    } else if v < -bound {
        -bound
    } else {
        v
    }
}
