//! CPU preview rasterizer: fills each region's compound path under the
//! even-odd rule by sampling pixel centers. Plenty for previews and
//! exports; this pipeline has no real-time redraw requirement.

use crate::geometry::Point;
use crate::regions::{CompoundPath, PathForest};

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const INK: [u8; 4] = [0, 0, 0, 255];

/// RGBA8 pixels, row 0 at the top.
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Rasterizes the forest onto a white canvas sized to its extent.
///
/// Target space is y-up while raster rows grow downward, so sample points
/// are flipped against the canvas height.
pub fn render_forest(forest: &PathForest, scale: f64) -> Raster {
    let mut extent_x = 0.0f64;
    let mut extent_y = 0.0f64;
    for region in forest.regions() {
        let bbox = region.outer().bounding_box();
        extent_x = extent_x.max(bbox.right());
        extent_y = extent_y.max(bbox.bottom());
    }
    let width = (extent_x * scale).ceil().max(1.0) as u32;
    let height = (extent_y * scale).ceil().max(1.0) as u32;

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend_from_slice(&BACKGROUND);
    }

    for region in forest.regions() {
        fill_compound(
            &region.to_compound_path(),
            scale,
            width,
            height,
            &mut pixels,
        );
    }
    Raster {
        width,
        height,
        pixels,
    }
}

fn fill_compound(compound: &CompoundPath, scale: f64, width: u32, height: u32, pixels: &mut [u8]) {
    let Some(outer) = compound.subpaths().first() else {
        return;
    };
    let bbox = outer.bounding_box();

    let col_start = ((bbox.left() * scale).floor().max(0.0)) as u32;
    let col_end = ((bbox.right() * scale).ceil().min(width as f64)) as u32;
    // Numeric bottom is the visual top after the flip.
    let row_start = ((height as f64 - bbox.bottom() * scale).floor().max(0.0)) as u32;
    let row_end = ((height as f64 - bbox.top() * scale).ceil().min(height as f64)) as u32;

    for py in row_start..row_end {
        for px in col_start..col_end {
            let sample = Point::new(
                (px as f64 + 0.5) / scale,
                (height as f64 - py as f64 - 0.5) / scale,
            );
            if compound.fills(sample) {
                let base = ((py * width + px) * 4) as usize;
                pixels[base..base + 4].copy_from_slice(&INK);
            }
        }
    }
}
