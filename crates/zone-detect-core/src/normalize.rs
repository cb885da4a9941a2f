//! Contrast limited adaptive histogram equalization (CLAHE) on 8-bit buffers.
//!
//! The image is split into a grid of equally sized tiles. Each tile gets its
//! own clipped-histogram equalization LUT, and every output pixel blends the
//! LUTs of the four tiles whose centers surround it. When the image size is
//! not a multiple of the grid, the histograms are computed on a virtual
//! reflect-101 extension of the image so all tiles have the same area.

use crate::error::{check_buffer, Result};
use crate::DetectParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

const BINS: usize = 256;

/// Equalize a row-major grayscale buffer with the clip limit and tile grid
/// from `params`. The output has the same dimensions as the input.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, params))
)]
pub fn clahe_u8(img: &[u8], w: usize, h: usize, params: &DetectParams) -> Result<Vec<u8>> {
    check_buffer(img, w, h)?;

    let tiles_x = params.tile_grid[0].max(1);
    let tiles_y = params.tile_grid[1].max(1);
    let tile_w = w.div_ceil(tiles_x);
    let tile_h = h.div_ceil(tiles_y);
    let tile_area = tile_w * tile_h;

    let clip = if params.clip_limit > 0.0 {
        Some(((params.clip_limit * tile_area as f32 / BINS as f32) as usize).max(1))
    } else {
        None
    };
    let lut_scale = (BINS - 1) as f32 / tile_area as f32;

    let mut luts = vec![[0u8; BINS]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0usize; BINS];
            for yy in ty * tile_h..(ty + 1) * tile_h {
                let row = reflect101(yy, h) * w;
                for xx in tx * tile_w..(tx + 1) * tile_w {
                    hist[img[row + reflect101(xx, w)] as usize] += 1;
                }
            }
            if let Some(clip) = clip {
                clip_histogram(&mut hist, clip);
            }
            let lut = &mut luts[ty * tiles_x + tx];
            let mut sum = 0usize;
            for (bin, count) in hist.iter().enumerate() {
                sum += count;
                lut[bin] = (sum as f32 * lut_scale).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    let inv_tw = 1.0 / tile_w as f32;
    let inv_th = 1.0 / tile_h as f32;
    // Horizontal tile pair and weight only depend on x.
    let cols: Vec<(usize, usize, f32)> = (0..w)
        .map(|x| neighbour_tiles(x as f32 * inv_tw - 0.5, tiles_x))
        .collect();

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        let (ty1, ty2, ya) = neighbour_tiles(y as f32 * inv_th - 0.5, tiles_y);
        let top = &luts[ty1 * tiles_x..(ty1 + 1) * tiles_x];
        let bottom = &luts[ty2 * tiles_x..(ty2 + 1) * tiles_x];
        let src = &img[y * w..(y + 1) * w];
        let dst = &mut out[y * w..(y + 1) * w];
        for (x, (&v, d)) in src.iter().zip(dst.iter_mut()).enumerate() {
            let (tx1, tx2, xa) = cols[x];
            let v = v as usize;
            let t = top[tx1][v] as f32 * (1.0 - xa) + top[tx2][v] as f32 * xa;
            let b = bottom[tx1][v] as f32 * (1.0 - xa) + bottom[tx2][v] as f32 * xa;
            *d = (t * (1.0 - ya) + b * ya).round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

/// Clip every bin at `clip` and spread the excess back over the histogram.
fn clip_histogram(hist: &mut [usize; BINS], clip: usize) {
    let mut excess = 0usize;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }

    let batch = excess / BINS;
    let mut residual = excess - batch * BINS;
    for bin in hist.iter_mut() {
        *bin += batch;
    }

    if residual > 0 {
        let step = (BINS / residual).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            i += step;
            residual -= 1;
        }
    }
}

/// Tile indices left/right (or above/below) of a tile-space coordinate and
/// the blend weight of the second one.
#[inline]
fn neighbour_tiles(t: f32, tiles: usize) -> (usize, usize, f32) {
    let t1 = t.floor() as isize;
    let weight = t - t1 as f32;
    let last = tiles as isize - 1;
    let first = t1.clamp(0, last) as usize;
    let second = (t1 + 1).clamp(0, last) as usize;
    (first, second, weight)
}

/// Reflect-101 border index (`dcb|abcd|cba`).
#[inline]
fn reflect101(i: usize, n: usize) -> usize {
    if i < n {
        return i;
    }
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let m = i % period;
    if m < n {
        m
    } else {
        period - m
    }
}
