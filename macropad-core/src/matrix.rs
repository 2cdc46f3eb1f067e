//! Typed matrix coordinates.
//!
//! Row and column indices are newtypes with asserting constructors, so a bad
//! coordinate fails loudly at construction (in const position where the keymap
//! builds them) instead of as an out-of-bounds read later. [`MatrixIndex`] is
//! the flattened row-major form, used where one compact key id is wanted.

#[repr(transparent)]
#[derive(Debug, Copy, Clone)]
pub struct RowIndex<const ROWS: usize>(u8);

impl<const ROWS: usize> RowIndex<ROWS> {
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            (ind as usize) < ROWS,
            "Tried to construct row index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every row, in scan order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS as u8).map(Self)
    }
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone)]
pub struct ColIndex<const COLS: usize>(u8);

impl<const COLS: usize> ColIndex<COLS> {
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub const fn from_value(ind: u8) -> Self {
        assert!(
            (ind as usize) < COLS,
            "Tried to construct col index from a bad value"
        );
        Self(ind)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every column, in scan order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Self> {
        (0..COLS as u8).map(Self)
    }
}

/// Row-major flattened coordinate, `row * COLS + col`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone)]
pub struct MatrixIndex<const ROWS: usize, const COLS: usize>(u8);

impl<const ROWS: usize, const COLS: usize> MatrixIndex<ROWS, COLS> {
    #[inline]
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_row_col(row_index: RowIndex<ROWS>, col_index: ColIndex<COLS>) -> Self {
        Self(row_index.0 * COLS as u8 + col_index.0)
    }

    #[inline]
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn row(self) -> RowIndex<ROWS> {
        RowIndex(self.0 / COLS as u8)
    }

    #[inline]
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn col(self) -> ColIndex<COLS> {
        ColIndex(self.0 % COLS as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
