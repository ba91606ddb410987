//! unibar CLI - barcode generation tool

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::info;

use unibar::{registry, BarcodeGenerator, BitmapCanvas, Configuration, EpsCanvas, SvgCanvas};

#[derive(Parser)]
#[command(name = "unibar")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Generate barcodes as SVG, EPS, PNG, JPEG, or BMP", long_about = None)]
struct Cli {
    /// Symbology name (e.g. code39, codabar, intl2of5, postnet,
    /// royal-mail-cbc)
    #[arg(value_name = "SYMBOLOGY")]
    symbology: Option<String>,

    /// Message to encode
    #[arg(value_name = "MESSAGE")]
    message: Option<String>,

    /// Output file (stdout if not specified; raster formats require a file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (inferred from the output extension if not specified)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// JSON configuration file with symbology settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolution for raster output
    #[arg(long, default_value = "300")]
    dpi: f64,

    /// Module width in millimeters
    #[arg(long, value_name = "MM")]
    module_width: Option<f64>,

    /// Bar height in millimeters
    #[arg(long, value_name = "MM")]
    height: Option<f64>,

    /// Checksum mode: auto, add, check, or ignore
    #[arg(long)]
    checksum: Option<String>,

    /// Rotation in degrees (multiples of 90)
    #[arg(long)]
    orientation: Option<i32>,

    /// Suppress the human-readable text
    #[arg(long)]
    no_text: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported symbology names
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Eps,
    Png,
    Jpeg,
    Bmp,
}

impl Format {
    fn from_extension(path: &PathBuf) -> Option<Self> {
        match path.extension()?.to_str()? {
            "svg" => Some(Format::Svg),
            "eps" | "ps" => Some(Format::Eps),
            "png" => Some(Format::Png),
            "jpg" | "jpeg" => Some(Format::Jpeg),
            "bmp" => Some(Format::Bmp),
            _ => None,
        }
    }

    fn mime(self) -> &'static str {
        match self {
            Format::Png => "image/png",
            Format::Jpeg => "image/jpeg",
            Format::Bmp => "image/bmp",
            Format::Svg | Format::Eps => unreachable!(),
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Commands::List) = cli.command {
        for name in registry::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let symbology = cli
        .symbology
        .as_deref()
        .ok_or("missing symbology name (try 'unibar list')")?;
    let message = cli.message.as_deref().ok_or("missing message to encode")?;

    let cfg = build_config(&cli, symbology)?;
    let generator = registry::create(symbology, &cfg).map(BarcodeGenerator::new)?;

    let format = match (cli.format, &cli.output) {
        (Some(format), _) => format,
        (None, Some(path)) => Format::from_extension(path)
            .ok_or("cannot infer output format; use --format")?,
        (None, None) => Format::Svg,
    };

    let dim = generator.calc_dimensions(message)?;
    info!(
        "Generating {} symbol, {:.2} x {:.2} mm",
        generator.name(),
        dim.width_plus_quiet,
        dim.height_plus_quiet
    );

    match format {
        Format::Svg => {
            let mut canvas = SvgCanvas::new();
            generator.generate(&mut canvas, message)?;
            write_output(cli.output.as_deref(), canvas.to_xml()?.as_bytes())?;
        }
        Format::Eps => {
            let mut bytes = Vec::new();
            let mut canvas = EpsCanvas::new(&mut bytes);
            // Finish the stream even when generation fails.
            let outcome = generator.generate(&mut canvas, message);
            let finished = canvas.finish();
            outcome.and(finished)?;
            write_output(cli.output.as_deref(), &bytes)?;
        }
        Format::Png | Format::Jpeg | Format::Bmp => {
            let path = cli
                .output
                .as_ref()
                .ok_or("raster output requires --output")?;
            let mut canvas = BitmapCanvas::new(format.mime(), cli.dpi)?;
            generator.generate(&mut canvas, message)?;
            fs::write(path, canvas.to_vec()?)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
    }

    Ok(())
}

/// Assemble the configuration tree from the optional JSON file plus
/// command-line overrides. Overrides win.
fn build_config(cli: &Cli, symbology: &str) -> Result<Configuration, Box<dyn std::error::Error>> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Configuration::from_json_str(symbology, &json)?
        }
        None => Configuration::new(symbology),
    };

    if let Some(width) = cli.module_width {
        cfg = cfg.with_attribute("module-width", format!("{width}mm"));
    }
    if let Some(height) = cli.height {
        cfg = cfg.with_attribute("height", format!("{height}mm"));
    }
    if let Some(checksum) = &cli.checksum {
        cfg = cfg.with_attribute("checksum", checksum.clone());
    }
    if let Some(degrees) = cli.orientation {
        cfg = cfg.with_attribute("orientation", degrees.to_string());
    }
    if cli.no_text {
        cfg = cfg.with_attribute("human-readable", "none");
    }
    Ok(cfg)
}

fn write_output(path: Option<&std::path::Path>, bytes: &[u8]) -> std::io::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes)?;
            println!("{} {}", "Saved to".green(), path.display());
            Ok(())
        }
        None => std::io::stdout().write_all(bytes),
    }
}
