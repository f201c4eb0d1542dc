use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use softblit::{
    AssetLoader, DEFAULT_SHEET_SAMPLES, FsAssetLoader, OutputRegistry, PixelBuffer, PngSink,
    PngSinkOpts, SceneConfig, blend_test_sheet, render_scene,
};

#[derive(Parser, Debug)]
#[command(name = "softblit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON scene and write it as PNG frames.
    Render(RenderArgs),
    /// Render the blend factor comparison sheet for an overlay image.
    BlendSheet(BlendSheetArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Directory receiving `<name>-<seq>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to submit.
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

#[derive(Parser, Debug)]
struct BlendSheetArgs {
    /// Overlay image blended onto the gradient base; its alpha drives the samples.
    #[arg(long)]
    overlay: PathBuf,

    /// Directory receiving the sheet PNG.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output name, also used as the file stem.
    #[arg(long, default_value = "Render Blend Test")]
    name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::BlendSheet(args) => cmd_blend_sheet(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = SceneConfig::from_path(&args.scene)?;
    let scene_dir = args.scene.parent().unwrap_or_else(|| Path::new("."));
    let loader = FsAssetLoader::new(scene_dir);

    let frame = render_scene(&cfg, &loader)?;
    present(&cfg.name, &frame, &args.out_dir, args.frames)
}

fn cmd_blend_sheet(args: BlendSheetArgs) -> anyhow::Result<()> {
    let loader = FsAssetLoader::new(".");
    let overlay = loader
        .load(&args.overlay)
        .with_context(|| format!("load overlay '{}'", args.overlay.display()))?;

    let sheet = blend_test_sheet(&overlay, &DEFAULT_SHEET_SAMPLES)?;
    present(&args.name, &sheet, &args.out_dir, 1)
}

/// Register one output, submit `frames` copies of `frame`, and tear the output down.
fn present(name: &str, frame: &PixelBuffer, out_dir: &Path, frames: u32) -> anyhow::Result<()> {
    let mut registry = OutputRegistry::new(PngSink::new(PngSinkOpts::new(out_dir)));
    let handle = registry.create_output(name)?;

    for _ in 0..frames {
        registry.submit_frame(handle, frame)?;
    }
    registry.destroy_output(handle)?;

    for path in registry.sink().written() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
