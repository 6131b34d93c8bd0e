//! Interface for describing how many glyph cells make up one logical character.

use core::{error, fmt, str::FromStr};

/// The number of glyph cells a logical character spans along one axis.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScaleFactor {
    /// The character spans a single cell.
    #[default]
    One,
    /// The character spans two cells.
    Two,
}

impl ScaleFactor {
    /// Returns the [`ScaleFactor`] corresponding to `value`, or `None` if `value` is neither `1`
    /// nor `2`.
    pub const fn from_cells(value: usize) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    /// Returns the number of cells this [`ScaleFactor`] represents.
    pub const fn cells(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// The number of glyph cells composing one logical character, horizontally and vertically.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scale {
    /// The number of cells across.
    pub x: ScaleFactor,
    /// The number of cells down.
    pub y: ScaleFactor,
}

impl Scale {
    /// Creates a new [`Scale`].
    pub const fn new(x: ScaleFactor, y: ScaleFactor) -> Self {
        Self { x, y }
    }

    /// Returns the number of cells horizontally.
    pub const fn width(self) -> usize {
        self.x.cells()
    }

    /// Returns the number of cells vertically.
    pub const fn height(self) -> usize {
        self.y.cells()
    }

    /// Returns the number of cells that make up one logical character.
    pub const fn cells_per_char(self) -> usize {
        self.width() * self.height()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

impl FromStr for Scale {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once('x').ok_or(ScaleError)?;

        let parse = |part: &str| {
            // `usize::from_str` accepts a leading `+`.
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<usize>().ok().and_then(ScaleFactor::from_cells)
        };

        match (parse(x), parse(y)) {
            (Some(x), Some(y)) => Ok(Self { x, y }),
            _ => Err(ScaleError),
        }
    }
}

/// Error returned when a `WxH` size token cannot be parsed into a [`Scale`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ScaleError;

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("size must be one of 1x1, 1x2, 2x1 or 2x2")
    }
}

impl error::Error for ScaleError {}
