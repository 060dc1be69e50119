use anyhow::Context;
use clap::{ArgAction, Parser};
use drawpp::Config;
use drawpp::draw::{MAX_DIMENSION, StrokeStyle, write_png};
use drawpp::script::Interpreter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drawpp")]
#[command(version, about = "Render turtle-style drawing scripts to PNG")]
struct Cli {
    /// Drawing script to run
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Output PNG path
    #[arg(long, short = 'o', value_name = "FILE", default_value = "drawing.png")]
    output: PathBuf,

    /// Canvas width in pixels (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DIMENSION)))]
    width: Option<u32>,

    /// Canvas height in pixels (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DIMENSION)))]
    height: Option<u32>,

    /// Use the legacy y-offset thick lines and sampled outlines
    #[arg(long, action = ArgAction::SetTrue)]
    legacy_strokes: bool,

    /// Config file to use instead of ~/.config/drawpp/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut options = config.engine_options();
    if cli.legacy_strokes {
        options.stroke_style = StrokeStyle::Legacy;
    }
    let width = cli.width.unwrap_or(config.canvas.width);
    let height = cli.height.unwrap_or(config.canvas.height);

    let source = fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;

    log::info!(
        "Rendering {} on a {width}x{height} canvas ({:?} strokes)",
        cli.script.display(),
        options.stroke_style
    );
    let mut interpreter = Interpreter::new(options, width, height);
    interpreter
        .run_source(&source)
        .with_context(|| format!("Script {} failed", cli.script.display()))?;

    for line in interpreter.positions() {
        println!("{line}");
    }

    let path = write_png(interpreter.canvas(), &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Saved drawing to {}", path.display());

    Ok(())
}
