//! Dense fixed-shape 2D storage for per-cell simulation values.

use crate::core::error::Error;
use crate::core::types::Result;

/// Smallest extent along either axis. The relaxation stencil reads
/// neighbours at `i - 1` and `i + 1`, so anything smaller has no valid update.
pub const MIN_EXTENT: usize = 2;

/// Width x length grid stored in one contiguous buffer.
///
/// Cells are addressed as `(i, j)` with `i` in `[0, width)` along X and
/// `j` in `[0, length)` along Z. Storage is row-major over `i`, so
/// iterating `i` outer and `j` inner walks memory linearly.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2<T> {
    width: usize,
    length: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid2<T> {
    /// Allocate a grid with every cell set to `value`.
    pub fn filled(width: usize, length: usize, value: T) -> Result<Self> {
        check_dimensions(width, length)?;
        Ok(Self {
            width,
            length,
            cells: vec![value; width * length],
        })
    }

    /// Allocate a grid by evaluating `f(i, j)` for every cell in storage order.
    pub fn from_fn(width: usize, length: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        check_dimensions(width, length)?;
        let mut cells = Vec::with_capacity(width * length);
        for i in 0..width {
            for j in 0..length {
                cells.push(f(i, j));
            }
        }
        Ok(Self { width, length, cells })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Linear index of cell `(i, j)`. Panics in debug builds when out of range.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.width && j < self.length, "cell ({i}, {j}) out of range");
        i * self.length + j
    }

    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.width && j < self.length
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.cells[self.index(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let idx = self.index(i, j);
        self.cells[idx] = value;
    }

    /// Bounds-checked read.
    pub fn try_get(&self, i: usize, j: usize) -> Option<T> {
        self.contains(i, j).then(|| self.get(i, j))
    }

    /// Overwrite every cell without reallocating.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Copy another grid of the same shape into this one.
    ///
    /// Panics if the shapes differ; every grid inside a `HeightField` shares
    /// one shape for its whole lifetime.
    pub fn copy_from(&mut self, other: &Grid2<T>) {
        assert_eq!(
            (self.width, self.length),
            (other.width, other.length),
            "grid shape mismatch"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

fn check_dimensions(width: usize, length: usize) -> Result<()> {
    if width < MIN_EXTENT || length < MIN_EXTENT {
        return Err(Error::InvalidDimensions { width, length });
    }
    Ok(())
}
