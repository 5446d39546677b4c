use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;

pub fn save_png_rgba8<P: AsRef<Path>>(path: P, w: u32, h: u32, rgba: &[u8]) -> anyhow::Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("create {}", path.as_ref().display()))?;
    let wtr = BufWriter::new(file);

    let mut encoder = png::Encoder::new(wtr, w, h);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
