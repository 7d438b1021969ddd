//! Block identity and colour types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unique identifier of a placed block.
///
/// Ids are handed out in increasing order by the block store and never reused.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(pub u64);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index into the [`Palette`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    /// Palette slot as a usize
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Fixed palette of block colours (0xRRGGBB).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [u32; Self::LEN],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [0x4A_90E2, 0xFF_8C42, 0x50_C878, 0xE0_40FB],
        }
    }
}

impl Palette {
    /// Number of colours in the palette
    pub const LEN: usize = 4;

    /// Validate a raw index against the palette.
    #[allow(clippy::cast_possible_truncation)]
    pub fn index(&self, index: usize) -> Result<ColorIndex> {
        if index < Self::LEN {
            Ok(ColorIndex(index as u8))
        } else {
            Err(Error::ColorOutOfRange {
                index,
                len: Self::LEN,
            })
        }
    }

    /// RGB value of a palette entry.
    #[must_use]
    pub const fn rgb(&self, index: ColorIndex) -> u32 {
        self.colors[index.slot() % Self::LEN]
    }
}
