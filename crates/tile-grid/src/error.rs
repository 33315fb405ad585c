// SPDX-License-Identifier: MIT
//
// Grid and layer errors.
//
// Coordinates out of range fail loudly instead of wrapping or clamping, and
// a layer that has been detached from its surface refuses further writes.

use tile_color::ColorError;

/// Errors produced by buffers, layers and grid configuration.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A cell or tile coordinate outside the grid.
    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: u16,
        /// Grid height.
        height: u16,
    },

    /// Two grids that must agree in size do not.
    #[error("size mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    SizeMismatch {
        /// `(width, height)` of the receiver.
        expected: (u16, u16),
        /// `(width, height)` of the argument.
        actual: (u16, u16),
    },

    /// The layer's surface was released; nothing can be drawn any more.
    #[error("layer is detached from its surface")]
    Detached,

    /// Glyph tables only hold characters exactly one column wide.
    #[error("glyph {0:?} is not a single-column character")]
    WideGlyph(char),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("invalid grid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias for grid operations.
pub type Result<T, E = GridError> = std::result::Result<T, E>;
