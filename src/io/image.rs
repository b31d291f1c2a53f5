//! PNG export of covers through a per-pixel label raster
//!
//! Each pixel is labelled 0 outside the region, 1 for an uncovered region
//! cell and 2+ for the n-th piece of the cover. Edges are drawn wherever two
//! neighbouring pixels carry different labels, which outlines pieces and the
//! region without drawing the cell grid inside a piece.

use crate::algorithm::translation::Cover;
use crate::io::configuration::{
    CELL_PIXELS, EDGE_COLOR, EDGE_PIXELS, IMAGE_MARGIN, UNCOVERED_COLOR,
};
use crate::io::error::{CoverError, Result};
use crate::spatial::cells::Cell;
use crate::spatial::lattice::Lattice;
use crate::spatial::region::Region;
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

// Labels: 0=outside, 1=uncovered cell, 2+=piece
const OUTSIDE: u32 = 0;
const UNCOVERED: u32 = 1;

/// Maps lattice coordinates to pixel centres of the output image
#[derive(Debug, Clone, Copy)]
struct Canvas {
    lattice: Lattice,
    min: [f64; 2],
    max: [f64; 2],
    width: usize,
    height: usize,
}

impl Canvas {
    fn fit(region: &Region) -> Option<Self> {
        let lattice = region.lattice();
        let mut points = region.points().iter().map(|&point| lattice.to_cartesian(point));
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), [x, y]| {
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        });

        let scale = f64::from(CELL_PIXELS);
        let margin = 2 * IMAGE_MARGIN as usize;
        Some(Self {
            lattice,
            min,
            max,
            width: ((max[0] - min[0]) * scale).ceil() as usize + margin,
            height: ((max[1] - min[1]) * scale).ceil() as usize + margin,
        })
    }

    /// Cartesian position of a pixel centre; image rows grow downwards
    fn position(&self, row: usize, col: usize) -> [f64; 2] {
        let scale = f64::from(CELL_PIXELS);
        let margin = f64::from(IMAGE_MARGIN);
        [
            (col as f64 + 0.5 - margin) / scale + self.min[0],
            self.max[1] - (row as f64 + 0.5 - margin) / scale,
        ]
    }

    /// Pixel rectangle `(rows, cols)` enclosing a Cartesian polygon
    fn pixel_bounds(&self, polygon: &[[f64; 2]]) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let scale = f64::from(CELL_PIXELS);
        let margin = f64::from(IMAGE_MARGIN);
        let (mut min_x, mut max_x, mut min_y, mut max_y) =
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for &[x, y] in polygon {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let col_start = ((min_x - self.min[0]) * scale + margin).floor().max(0.0) as usize;
        let col_end = (((max_x - self.min[0]) * scale + margin).ceil() as usize).min(self.width);
        let row_start = ((self.max[1] - max_y) * scale + margin).floor().max(0.0) as usize;
        let row_end = (((self.max[1] - min_y) * scale + margin).ceil() as usize).min(self.height);
        (row_start..row_end, col_start..col_end)
    }

    fn polygon(&self, cell: &Cell) -> Vec<[f64; 2]> {
        cell.corners()
            .into_iter()
            .map(|corner| self.lattice.to_cartesian(corner))
            .collect()
    }
}

/// Point-in-convex-polygon test, independent of winding direction
fn inside_convex(polygon: &[[f64; 2]], point: [f64; 2]) -> bool {
    let next = polygon.iter().skip(1).chain(polygon.first());
    let mut positive = false;
    let mut negative = false;
    for (from, to) in polygon.iter().zip(next) {
        let cross =
            (to[0] - from[0]) * (point[1] - from[1]) - (to[1] - from[1]) * (point[0] - from[0]);
        positive |= cross > 0.0;
        negative |= cross < 0.0;
    }
    !(positive && negative)
}

/// Label every pixel of the rendered cover
///
/// Pieces are numbered in the cover's name order starting at 2.
pub fn rasterize_cover(cover: &Cover, region: &Region) -> Array2<u32> {
    let Some(canvas) = Canvas::fit(region) else {
        return Array2::zeros((0, 0));
    };
    let mut labels = Array2::from_elem((canvas.height, canvas.width), OUTSIDE);

    for cell in region.cells() {
        let label = cover
            .pieces()
            .values()
            .position(|piece| piece.cells.contains(cell))
            .map_or(UNCOVERED, |index| index as u32 + 2);

        let polygon = canvas.polygon(cell);
        let (rows, cols) = canvas.pixel_bounds(&polygon);
        for row in rows {
            for col in cols.clone() {
                if inside_convex(&polygon, canvas.position(row, col))
                    && let Some(pixel) = labels.get_mut([row, col])
                {
                    *pixel = label;
                }
            }
        }
    }

    labels
}

/// Evenly spaced hues, one per piece
pub fn piece_palette(count: usize) -> Vec<[u8; 4]> {
    (0..count)
        .map(|index| {
            let hue = index as f64 / count.max(1) as f64;
            hsv_to_rgba(hue, 0.55, 0.95)
        })
        .collect()
}

fn hsv_to_rgba(hue: f64, saturation: f64, value: f64) -> [u8; 4] {
    let sector = (hue * 6.0).floor();
    let fraction = hue.mul_add(6.0, -sector);
    let p = value * (1.0 - saturation);
    let q = value * fraction.mul_add(-saturation, 1.0);
    let t = value * (1.0 - fraction).mul_add(-saturation, 1.0);

    let (r, g, b) = match sector as i64 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b), 255]
}

/// Test whether a pixel lies on a boundary between different labels
fn is_edge(labels: &Array2<u32>, row: usize, col: usize) -> bool {
    let Some(&label) = labels.get([row, col]) else {
        return false;
    };
    let reach = EDGE_PIXELS.max(1.0) as usize;
    (1..=reach).any(|offset| {
        [
            row.checked_sub(offset).map(|r| [r, col]),
            Some([row + offset, col]),
            col.checked_sub(offset).map(|c| [row, c]),
            Some([row, col + offset]),
        ]
        .into_iter()
        .flatten()
        .any(|index| labels.get(index).is_some_and(|&other| other < label))
    })
}

/// Render a cover as a PNG with transparent background
///
/// # Errors
///
/// Returns an error if:
/// - The region has no cells to draw
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_cover_as_png(cover: &Cover, region: &Region, output_path: &Path) -> Result<()> {
    let labels = rasterize_cover(cover, region);
    let (height, width) = labels.dim();
    if width == 0 || height == 0 {
        return Err(CoverError::InvalidRegion {
            reason: "region has nothing to draw".to_string(),
        });
    }

    let palette = piece_palette(cover.len());
    let mut img = ImageBuffer::new(width as u32, height as u32);

    for ((row, col), &label) in labels.indexed_iter() {
        let rgba = if is_edge(&labels, row, col) {
            EDGE_COLOR
        } else {
            match label {
                OUTSIDE => [0, 0, 0, 0],
                UNCOVERED => UNCOVERED_COLOR,
                piece => palette
                    .get((piece - 2) as usize)
                    .copied()
                    .unwrap_or(UNCOVERED_COLOR),
            }
        };
        img.put_pixel(col as u32, row as u32, Rgba(rgba));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CoverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| CoverError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
