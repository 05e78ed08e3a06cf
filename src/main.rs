// CLI entry for pixel_invert
use anyhow::Result;
use clap::{Parser, ValueHint};
use pixel_invert::{default_config, process, Params};

#[derive(Parser, Debug)]
#[command(name = "pixel_invert", version, about = "Threaded per-row image inverter")]
struct Cli {
    /// Number of worker threads
    #[arg(long = "threads")]
    threads: Option<usize>,

    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut cfg = default_config();
    if let Some(v) = cli.threads {
        cfg.num_threads = v.max(1);
    }
    process(Params { in_image_name: cli.input, config: cfg })
}
