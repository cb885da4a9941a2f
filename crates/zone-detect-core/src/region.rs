//! Axis-aligned image regions.
//!
//! A [`Region`] is given by two corners `(x1, y1)` and `(x2, y2)`. The end
//! coordinates are exclusive when cropping (`x1..x2`, `y1..y2`), so a region
//! is usable on a `w × h` image when `0 <= x1 < x2 <= w` and
//! `0 <= y1 < y2 <= h`.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangle `(x1, y1)-(x2, y2)` in image pixel coordinates.
///
/// With the `serde` feature it (de)serializes as `[x1, y1, x2, y2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "[i32; 4]", into = "[i32; 4]")
)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Reason a region cannot be used on a given image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("corners are inverted or empty (need x1 < x2 and y1 < y2)")]
    Inverted,
    #[error("region exceeds image bounds {width}x{height}")]
    OutOfBounds { width: u32, height: u32 },
}

/// Validated, in-bounds crop window in `usize` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Roi {
    #[inline]
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

impl Region {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Check the region against a `width × height` image and return the
    /// corresponding crop window.
    pub fn roi(&self, width: u32, height: u32) -> Result<Roi, RegionError> {
        if self.x1 >= self.x2 || self.y1 >= self.y2 {
            return Err(RegionError::Inverted);
        }
        let w = i64::from(width);
        let h = i64::from(height);
        if self.x1 < 0 || self.y1 < 0 || i64::from(self.x2) > w || i64::from(self.y2) > h {
            return Err(RegionError::OutOfBounds { width, height });
        }
        Ok(Roi {
            x0: self.x1 as usize,
            y0: self.y1 as usize,
            x1: self.x2 as usize,
            y1: self.y2 as usize,
        })
    }
}

impl From<[i32; 4]> for Region {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<Region> for [i32; 4] {
    fn from(r: Region) -> Self {
        [r.x1, r.y1, r.x2, r.y2]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}
