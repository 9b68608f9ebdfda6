//! tint - color conversion and gamut mapping from the command line

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tint")]
#[command(author, version, about = "Color conversion and gamut mapping")]
#[command(long_about = "
Convert colors between spaces, test gamut membership, map out of gamut
colors back into a target gamut and measure color differences.

Coordinates use the channel ranges of the space: sRGB in 0..1, Oklch
lightness in 0..1, Lab lightness in 0..100, hues in degrees. Pass 'none'
for an undefined channel.

Examples:
  tint convert oklch 0.7 0.35 150 --to srgb
  tint check display-p3 1 0 0 --in srgb
  tint fit oklch 0.9 0.4 270 --to srgb               # ray trace (default)
  tint fit lch-d65 50 130 300 --to srgb -m chroma-bisect --jnd 1
  tint fit oklch 0.7 0.4 30 --to rec2100-pq --config fit.yaml
  tint fit-batch colors.txt --to srgb -m oklch-raytrace -j 8
  tint delta srgb 1 0 0 --other display-p3 1 0 0 -m ok
  tint spaces
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a color to another space
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Test whether a color is inside a gamut
    #[command(visible_alias = "g")]
    Check(CheckArgs),

    /// Map a color into a gamut
    #[command(visible_alias = "f")]
    Fit(FitArgs),

    /// Map every color of a file into a gamut
    FitBatch(FitBatchArgs),

    /// Color difference between two colors
    #[command(visible_alias = "d")]
    Delta(DeltaArgs),

    /// List the registered color spaces
    Spaces,
}

/// A color given on the command line as `<space> <c1> <c2> <c3>`.
#[derive(Args)]
struct ColorArg {
    /// Color space of the input coordinates
    space: String,

    /// Three channel values ('none' marks an undefined channel)
    #[arg(num_args = 3, value_parser = commands::parse_coord, allow_negative_numbers = true)]
    coords: Vec<f64>,

    /// Alpha
    #[arg(short, long, default_value = "1.0")]
    alpha: f64,
}

#[derive(Args)]
struct ConvertArgs {
    #[command(flatten)]
    color: ColorArg,

    /// Target space
    #[arg(short, long)]
    to: String,

    /// Reset undefined hues after converting
    #[arg(short, long)]
    normalize: bool,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    color: ColorArg,

    /// Gamut to test against (defaults to the color's own space)
    #[arg(short = 'i', long = "in")]
    gamut: Option<String>,

    /// Per channel tolerance
    #[arg(short, long, default_value = "0.000075")]
    tolerance: f64,
}

/// Options shared by the fitting commands.
#[derive(Args)]
struct FitFlags {
    /// Target gamut
    #[arg(short, long)]
    to: String,

    /// Mapping method: clip, chroma-bisect, oklch-chroma, raytrace, oklch-raytrace, lch-raytrace, scale
    #[arg(short, long, default_value = "raytrace")]
    method: String,

    /// YAML file with fit options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Just noticeable difference for bisection
    #[arg(long)]
    jnd: Option<f64>,

    /// Bisection convergence width
    #[arg(long)]
    epsilon: Option<f64>,

    /// Delta E formula for bisection: 76, ok, 2000
    #[arg(long = "delta-e")]
    delta_e: Option<String>,

    /// Perceptual space for chroma reduction
    #[arg(long)]
    pspace: Option<String>,

    /// Adaptive lightness strength for ray tracing
    #[arg(long)]
    adaptive: Option<f64>,

    /// Ray trace correction rounds
    #[arg(long = "max-iterations")]
    max_iterations: Option<usize>,

    /// Cube traces for oklch-raytrace and lch-raytrace (1 to 3)
    #[arg(long)]
    traces: Option<usize>,

    /// Scale in the encoded space instead of the linear one
    #[arg(long)]
    encoded: bool,

    /// Zero negative channels before scaling
    #[arg(long = "clip-negative")]
    clip_negative: bool,
}

#[derive(Args)]
struct FitArgs {
    #[command(flatten)]
    color: ColorArg,

    #[command(flatten)]
    fit: FitFlags,

    /// Report coordinates in the target space instead of the input space
    #[arg(long = "target-coords")]
    target_coords: bool,
}

#[derive(Args)]
struct FitBatchArgs {
    /// Text file with one `<space> <c1> <c2> <c3> [alpha]` color per line
    input: PathBuf,

    #[command(flatten)]
    fit: FitFlags,
}

#[derive(Args)]
struct DeltaArgs {
    #[command(flatten)]
    color: ColorArg,

    /// Color to compare against: SPACE C1 C2 C3
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["SPACE", "C1", "C2", "C3"],
        allow_hyphen_values = true,
        required = true
    )]
    other: Vec<String>,

    /// Formula: 76, ok, 2000
    #[arg(short, long, default_value = "2000")]
    method: String,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.verbose),
        Commands::Fit(args) => commands::fit::run(args, cli.verbose),
        Commands::FitBatch(args) => commands::fit::run_batch(args, cli.verbose),
        Commands::Delta(args) => commands::delta::run(args, cli.verbose),
        Commands::Spaces => commands::spaces::run(cli.verbose),
    }
}
