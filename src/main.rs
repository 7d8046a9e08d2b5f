use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facecue::{config, stream, Expressions, FaceLandmarks, Point, ShapeMeasurements};
use log::info;

#[derive(Parser)]
#[command(name = "facecue")]
#[command(
    version,
    about = "Face shape and dominant emotion overlays from landmark detections"
)]
struct Cli {
    /// Config file (defaults to the user config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a JSON-lines stream of detection frames
    Annotate {
        /// Detection frames (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Annotation output (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pace output at the configured frame interval
        #[arg(long)]
        realtime: bool,
    },
    /// Classify the face shape of a 68-point landmark array
    Shape {
        /// Landmark JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Log the measured widths and ratios
        #[arg(short, long)]
        verbose: bool,
    },
    /// Pick the dominant emotion from an expression object
    Emotion {
        /// Expression JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Annotate {
            input,
            output,
            realtime,
        } => {
            let cfg = config::load_config(config_path)?;
            annotate(&cfg, input.as_deref(), output.as_deref(), realtime)
        }
        Commands::Shape { input, verbose } => shape(input.as_deref(), verbose),
        Commands::Emotion { input } => emotion(input.as_deref()),
        Commands::Config => open_config(config_path),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("opening {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut raw = String::new();
    open_input(path)?
        .read_to_string(&mut raw)
        .context("reading input")?;
    Ok(raw)
}

fn annotate(
    cfg: &config::Config,
    input: Option<&Path>,
    output: Option<&Path>,
    realtime: bool,
) -> Result<()> {
    let reader = open_input(input)?;
    let writer: Box<dyn Write> = match output {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let stats = stream::run(reader, writer, cfg, realtime)?;
    info!(
        "Annotated {} frame(s), {} face(s), skipped {}",
        stats.frames, stats.faces, stats.skipped
    );
    Ok(())
}

fn shape(input: Option<&Path>, verbose: bool) -> Result<()> {
    let raw = read_input(input)?;
    let points: Vec<Point> = serde_json::from_str(&raw).context("parsing landmarks")?;
    let landmarks = FaceLandmarks::new(points)?;
    let m = ShapeMeasurements::measure(landmarks.jaw_outline(), landmarks.face_contour())?;

    if verbose {
        info!(
            "jaw width {:.1}, jaw height {:.1}, cheekbones {:.1}, forehead {:.1}",
            m.jaw_width, m.jaw_height, m.cheekbone_width, m.forehead_width
        );
        info!(
            "jaw/cheek {:.3}, jaw/height {:.3}, cheek/forehead {:.3}",
            m.jaw_to_cheek, m.jaw_to_height, m.cheek_to_forehead
        );
    }

    println!("{}", m.shape());
    Ok(())
}

fn emotion(input: Option<&Path>) -> Result<()> {
    let raw = read_input(input)?;
    let expressions: Expressions = serde_json::from_str(&raw).context("parsing expressions")?;
    println!("{}", expressions.dominant());
    Ok(())
}

fn open_config(path: Option<&Path>) -> Result<()> {
    let config_path = path.unwrap_or(config::CONFIG_PATH.as_path());
    if !config_path.exists() {
        info!("Writing default config to {}", config_path.display());
        config::save_config(&config::Config::default(), Some(config_path))?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
