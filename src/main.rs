//! # osilabel CLI
//!
//! Command-line interface for gap-aligned label printing.
//!
//! ## Usage
//!
//! ```bash
//! # Equipment intake label on 50mm labels with 5mm gaps
//! osilabel print equipment-intake --id 123456
//!
//! # Outbound label on 40mm stock, show the bytes instead of printing
//! osilabel print part-outbound --id 123456 --claim C-99 --fru 01AB234 --height 40 --dry-run
//!
//! # Free text
//! osilabel print free-form --line "RACK 4" --line "SHELF B"
//!
//! # Job from JSON
//! osilabel print --job job.json
//!
//! # One outbound label per row of a table
//! osilabel batch rows.json
//!
//! # Nudge the stock by hand
//! osilabel feed backward --mm 0.5
//!
//! # Render to PNG
//! osilabel preview equipment-intake --id 123456 --output label.png
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use osilabel::{
    LabelError,
    ir::FeedDirection,
    label::{self, GapSize, LabelComposer, LabelGeometry, LabelHeight, LabelVariant, OutboundFields},
    logging,
    preview::render_label_preview,
    printer::{PrinterConfig, PrinterSession},
    transport::{DeviceTransport, MemorySink, PrintSink, device::DEFAULT_DEVICE},
};

/// osilabel - label printing for Nippon NP-3511D printers
#[derive(Parser, Debug)]
#[command(name = "osilabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a single label job
    Print {
        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        stock: StockArgs,

        #[command(flatten)]
        quality: QualityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print one outbound label per row of a JSON table
    Batch {
        /// JSON array of rows: {"identifier","claim","fru"} or [identifier, claim, fru]
        file: PathBuf,

        #[command(flatten)]
        stock: StockArgs,

        #[command(flatten)]
        quality: QualityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Feed the stock by a small amount
    Feed {
        direction: Direction,

        /// Distance in mm
        #[arg(long, default_value = "0.5")]
        mm: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a label job to PNG instead of printing
    Preview {
        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        stock: StockArgs,

        /// Output PNG path. Batch jobs write one file per label (name-1.png, ...)
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Label template (omit when using --job)
    #[arg(value_enum, required_unless_present = "job")]
    variant: Option<VariantName>,

    /// Read the job from a JSON file instead
    #[arg(long, value_name = "FILE", conflicts_with = "variant")]
    job: Option<PathBuf>,

    /// OSI / golden unit identifier
    #[arg(long, default_value = "")]
    id: String,

    /// Claim number (outbound)
    #[arg(long, default_value = "")]
    claim: String,

    /// FRU number (outbound)
    #[arg(long, default_value = "")]
    fru: String,

    /// Free-form line, up to five
    #[arg(long = "line", value_name = "TEXT")]
    lines: Vec<String>,
}

#[derive(Args, Debug)]
struct StockArgs {
    /// Label height in mm (40, 49 or 50)
    #[arg(long, default_value = "50")]
    height: LabelHeight,

    /// Gap between labels in mm (4, 5 or 6)
    #[arg(long, default_value = "5")]
    gap: GapSize,
}

#[derive(Args, Debug, Default)]
struct QualityArgs {
    /// Maximum print speed in mm/s (200, 150, 125, 100 or 75)
    #[arg(long)]
    speed: Option<i32>,

    /// Print density in percent (65-130)
    #[arg(long)]
    density: Option<f32>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Printer device path
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Print the command bytes as hex instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantName {
    EquipmentIntake,
    GoldenUnitIntake,
    PartOutbound,
    FreeForm,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    Forward,
    Backward,
}

impl From<Direction> for FeedDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => FeedDirection::Forward,
            Direction::Backward => FeedDirection::Backward,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), LabelError> {
    match command {
        Commands::Print {
            job,
            stock,
            quality,
            output,
        } => {
            let job = job.into_variant()?;
            let mut composer = composer(&stock, &quality);
            send(&output, |sink| composer.print(&job, sink).map(|_| ()))
        }

        Commands::Batch {
            file,
            stock,
            quality,
            output,
        } => {
            let rows = label::batch::load_rows(&file)?;
            let job = LabelVariant::BatchFromTable { rows };
            let mut composer = composer(&stock, &quality);
            send(&output, |sink| {
                let report = composer.print(&job, sink)?;
                println!("Printed {} labels", report.labels);
                Ok(())
            })
        }

        Commands::Feed {
            direction,
            mm,
            output,
        } => {
            let buffer = label::nudge(direction.into(), mm);
            send(&output, |sink| sink.send(&buffer))
        }

        Commands::Preview { job, stock, output } => {
            let job = job.into_variant()?;
            let mut composer = composer(&stock, &QualityArgs::default());
            let labels = composer.compose(&job)?;
            let geometry = *composer.geometry();

            for (i, composed) in labels.iter().enumerate() {
                let path = if labels.len() == 1 {
                    output.clone()
                } else {
                    numbered_path(&output, i + 1)
                };
                let png = render_label_preview(&composed.program, &geometry)?;
                std::fs::write(&path, png)?;
                println!("Saved preview to {}", path.display());
            }
            Ok(())
        }
    }
}

impl JobArgs {
    fn into_variant(self) -> Result<LabelVariant, LabelError> {
        if let Some(path) = self.job {
            let json = std::fs::read_to_string(&path)?;
            return Ok(serde_json::from_str(&json)?);
        }

        let variant = self
            .variant
            .ok_or_else(|| LabelError::InvalidInput("no label variant given".to_string()))?;

        Ok(match variant {
            VariantName::EquipmentIntake => LabelVariant::EquipmentIntake {
                identifier: self.id,
            },
            VariantName::GoldenUnitIntake => LabelVariant::GoldenUnitIntake {
                identifier: self.id,
            },
            VariantName::PartOutbound => {
                LabelVariant::PartOutbound(OutboundFields::new(self.id, self.claim, self.fru))
            }
            VariantName::FreeForm => LabelVariant::FreeForm { lines: self.lines },
        })
    }
}

fn composer(stock: &StockArgs, quality: &QualityArgs) -> LabelComposer {
    let config = PrinterConfig::NP3511D;
    let mut session = PrinterSession::for_printer(&config);
    if let Some(speed) = quality.speed {
        session = session.with_speed(speed);
    }
    if let Some(density) = quality.density {
        session = session.with_density(density);
    }

    let geometry = LabelGeometry::new(stock.height, stock.gap, &config);
    LabelComposer::new(config, geometry).with_session(session)
}

/// Run `f` against the device, or against memory and dump hex for dry runs.
fn send<F>(output: &OutputArgs, f: F) -> Result<(), LabelError>
where
    F: FnOnce(&mut dyn PrintSink) -> Result<(), LabelError>,
{
    if output.dry_run {
        let mut sink = MemorySink::new();
        f(&mut sink)?;
        for buffer in sink.buffers() {
            println!("{}", buffer.to_hex());
        }
        return Ok(());
    }

    let mut transport = DeviceTransport::open(&output.device)?;
    f(&mut transport)
}

fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "label".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!("{}-{}.{}", stem, n, ext))
}
