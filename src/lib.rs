use anyhow::Result;
use image::DynamicImage;
use log::{info, warn};
use std::path::{Path, PathBuf};

mod barrier;
mod pipeline;
mod queue;
mod raster;

pub use barrier::RowBarrier;
pub use pipeline::{transform_rows, Message, RowTask};
pub use queue::TaskQueue;
pub use raster::RasterImage;

/// Upper bound on the default pool size; the actual default is capped by
/// the machine's core count and never below one.
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub num_threads: usize,
}

pub fn default_config() -> Config {
    Config { num_threads: num_cpus::get().min(DEFAULT_WORKERS).max(1) }
}

#[derive(Debug, Clone)]
pub struct Params {
    pub in_image_name: String,
    pub config: Config,
}

/// Per-channel inversion; applying it twice restores the input byte.
pub fn invert(value: u8) -> u8 {
    u8::MAX - value
}

/// Output path derived from the input: `<stem>_inverted.png` alongside it.
pub fn inverted_output_name(input: &str) -> String {
    let p = Path::new(input);
    let parent: PathBuf = p.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    parent.join(format!("{}_inverted.png", stem)).to_string_lossy().into_owned()
}

/// Loads the input image, inverts every row across the worker pool, and
/// writes `<stem>_inverted.png` next to the input. A failed load still
/// tears the pool down cleanly before the error is returned; the save
/// only runs once every row has been transformed and every worker joined.
pub fn process(params: Params) -> Result<()> {
    let Params { in_image_name, config } = params;
    let workers = config.num_threads.max(1);
    info!("Input image: {}", in_image_name);
    info!("Worker threads: {}", workers);

    let mut loaded = RasterImage::load(Path::new(&in_image_name));
    if loaded.is_err() {
        warn!("Load failed; releasing {} workers before reporting", workers);
    }
    transform_rows(loaded.as_mut().ok(), workers, invert);
    let image = loaded?;

    let out_name = inverted_output_name(&in_image_name);
    image.save(Path::new(&out_name))?;
    info!("Saved {}", out_name);
    Ok(())
}

/// In-memory variant of `process`: inverts a decoded image through the
/// same pool and returns the result instead of touching the filesystem.
pub fn invert_dynamic(dyn_img: &DynamicImage, config: &Config) -> Result<DynamicImage> {
    let workers = config.num_threads.max(1);
    let mut raster = RasterImage::from_dynamic(dyn_img.clone());
    transform_rows(Some(&mut raster), workers, invert);
    raster.into_dynamic()
}
