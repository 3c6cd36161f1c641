use super::direction::Direction;
use thiserror::Error;

/// A position in grid units.  Entity positions are always multiples of the
/// grid's cell size.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Coordinate {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Coordinate {
    pub(crate) const ORIGIN: Coordinate = Coordinate { x: 0, y: 0 };

    pub(crate) const fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }
}

/// The square play area.
///
/// `extent` is the length of a side in grid units.  A coordinate is in
/// bounds when both of its components lie in `0..extent - cell_size`; the
/// last cell band along each axis is the wall.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    extent: i32,
    cell_size: i32,
}

impl Grid {
    pub(crate) fn new(extent: i32, cell_size: i32) -> Result<Grid, GridError> {
        if cell_size <= 0 {
            return Err(GridError::CellSize(cell_size));
        }
        if extent % cell_size != 0 {
            return Err(GridError::Misaligned { extent, cell_size });
        }
        if cell_size.checked_mul(2).is_none_or(|min| extent < min) {
            return Err(GridError::TooSmall { extent, cell_size });
        }
        Ok(Grid { extent, cell_size })
    }

    pub(crate) fn extent(self) -> i32 {
        self.extent
    }

    pub(crate) fn cell_size(self) -> i32 {
        self.cell_size
    }

    /// The exclusive upper limit of in-bounds coordinates on either axis
    pub(crate) fn limit(self) -> i32 {
        self.extent - self.cell_size
    }

    /// Number of playable cells along one side
    pub(crate) fn cells_per_side(self) -> i32 {
        self.limit() / self.cell_size
    }

    pub(crate) fn contains(self, pos: Coordinate) -> bool {
        (0..self.limit()).contains(&pos.x) && (0..self.limit()).contains(&pos.y)
    }

    /// Return the coordinate one cell away from `pos` in `direction`.  The
    /// result may be out of bounds.
    pub(crate) fn offset(self, pos: Coordinate, direction: Direction) -> Coordinate {
        let (dx, dy) = direction.delta();
        Coordinate::new(pos.x + dx * self.cell_size, pos.y + dy * self.cell_size)
    }

    /// Return the (column, row) of the cell containing `pos`
    pub(crate) fn cell_of(self, pos: Coordinate) -> (i32, i32) {
        (pos.x / self.cell_size, pos.y / self.cell_size)
    }

    /// Iterate over every in-bounds, cell-aligned coordinate in row-major
    /// order
    pub(crate) fn cells(self) -> impl Iterator<Item = Coordinate> {
        let n = self.cells_per_side();
        let size = self.cell_size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coordinate::new(col * size, row * size)))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("extent {extent} is not a multiple of cell size {cell_size}")]
    Misaligned { extent: i32, cell_size: i32 },
    #[error("extent {extent} leaves no playable cells for cell size {cell_size}")]
    TooSmall { extent: i32, cell_size: i32 },
}
