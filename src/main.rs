use anyhow::Context;
use bezier_tracing::Tracing;
use bezier_tracing::png_writer::save_png_rgba8;
use bezier_tracing::renderer::render_forest;

const PREVIEW_SCALE: f64 = 4.0;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .context("usage: bezier-tracing <image> [preview.png]")?;
    let preview = args.next();

    let mut tracing = Tracing::open(&input)?;
    let forest = tracing.path_forest()?;

    println!("{input}: {} filled regions", forest.len());
    for (i, region) in forest.regions().iter().enumerate() {
        println!(
            "  region {i}: {} segments, {} holes",
            region.outer().segments().len(),
            region.holes().len()
        );
    }

    if let Some(path) = preview {
        let raster = render_forest(forest, PREVIEW_SCALE);
        save_png_rgba8(&path, raster.width, raster.height, &raster.pixels)?;
        println!("wrote {path}");
    }
    Ok(())
}
