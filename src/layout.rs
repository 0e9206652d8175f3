//! Proportional splitting of a rectangle into columns or rows
//!
//! All values are centimeters, the unit every placement helper takes.

use crate::error::{Error, Result};
use log::debug;

/// Proportions may drift from 1.0 by this much from float summation
const PROPORTION_TOLERANCE: f64 = 1e-9;

/// A 1-D sub-extent produced by [`split`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub length: f64,
}

/// An axis-aligned box on a page or slide
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fail unless `proportions` sum to 1.0
pub fn check_proportions(proportions: &[f64]) -> Result<()> {
    let sum: f64 = proportions.iter().sum();
    if (sum - 1.0).abs() > PROPORTION_TOLERANCE {
        return Err(Error::InvalidProportions(sum));
    }
    Ok(())
}

/// Split `[start, start + length)` into contiguous segments sized by `proportions`.
///
/// Segment `i` starts where segment `i - 1` ends; the first starts at `start`.
pub fn split(start: f64, length: f64, proportions: &[f64]) -> Result<Vec<Segment>> {
    check_proportions(proportions)?;

    let mut segments = Vec::with_capacity(proportions.len());
    let mut cumulative = 0.0;
    for p in proportions {
        segments.push(Segment {
            start: start + cumulative * length,
            length: p * length,
        });
        cumulative += p;
    }
    Ok(segments)
}

/// Side-by-side columns of a box, all sharing `top` and `height`
pub fn column_dims(
    left: f64,
    width: f64,
    proportions: &[f64],
    top: f64,
    height: f64,
) -> Result<Vec<Rect>> {
    let rects: Vec<Rect> = split(left, width, proportions)?
        .into_iter()
        .map(|s| Rect::new(s.start, top, s.length, height))
        .collect();
    debug!("column dims: {:?}", rects);
    Ok(rects)
}

/// Stacked rows of a box, all sharing `left` and `width`
pub fn row_dims(
    top: f64,
    height: f64,
    proportions: &[f64],
    left: f64,
    width: f64,
) -> Result<Vec<Rect>> {
    let rects: Vec<Rect> = split(top, height, proportions)?
        .into_iter()
        .map(|s| Rect::new(left, s.start, width, s.length))
        .collect();
    debug!("row dims: {:?}", rects);
    Ok(rects)
}
