//! figure-kit CLI
//!
//! Usage:
//!   figure-kit combine <FIGURES>... -o <OUT> --rows 2,1 [--labels a,b,c] [--gap 2]
//!   figure-kit palette [NAME] [-n N] [--style FILE]
//!   figure-kit get <FILE> <KEY>...
//!
//! Set `RUST_LOG=info` to see source timestamps and output summaries.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use figure_kit::compose::{combine_pdf_figures, ComposeConfig};
use figure_kit::json_reader::JsonDataReader;
use figure_kit::style::{default_size, palette_colors, to_hex, FigureStyle};

#[derive(Parser)]
#[command(name = "figure-kit")]
#[command(about = "Utilities for assembling and styling publication figures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Combine single-page PDF figures into one labelled grid page
    Combine {
        /// Input figures, placed left to right, top to bottom
        #[arg(required = true)]
        figures: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Figures per row, e.g. 2,1
        #[arg(short, long, value_delimiter = ',', required = true)]
        rows: Vec<usize>,

        /// Figure labels (defaults to a, b, c, ...)
        #[arg(short, long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Vertical gap added below each row, in points
        #[arg(short, long, default_value_t = 2.0)]
        gap: f64,
    },

    /// Print the colors of a named palette as hex codes
    Palette {
        /// Palette name (deep, muted, pastel, bright, dark, colorblind, tab10, hls, husl)
        name: Option<String>,

        /// Number of colors (defaults to the palette size)
        #[arg(short, long)]
        n: Option<usize>,

        /// Style bundle (TOML) providing the palette
        #[arg(short, long)]
        style: Option<PathBuf>,
    },

    /// Print a value from a JSON config file
    Get {
        /// JSON file
        file: PathBuf,

        /// Key path, outermost first
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Combine {
            figures,
            output,
            rows,
            labels,
            gap,
        } => combine(figures, output, rows, labels, gap),
        Command::Palette { name, n, style } => palette(name, n, style),
        Command::Get { file, keys } => get(file, keys),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn combine(
    figures: Vec<PathBuf>,
    output: PathBuf,
    rows: Vec<usize>,
    labels: Option<Vec<String>>,
    gap: f64,
) -> CliResult {
    let labels = labels.unwrap_or_else(|| default_labels(figures.len()));
    let config = ComposeConfig::new().with_row_gap(gap);
    let layout = combine_pdf_figures(&figures, &output, &labels, &rows, &config)?;
    println!("{}", layout);
    Ok(())
}

fn palette(name: Option<String>, n: Option<usize>, style: Option<PathBuf>) -> CliResult {
    let bundle = match &style {
        Some(path) => FigureStyle::from_file(path)
            .map_err(|e| format!("cannot load style '{}': {}", path.display(), e))?,
        None => FigureStyle::default(),
    };
    let name = name.unwrap_or_else(|| bundle.palette().to_string());
    let n = match n {
        Some(n) => n,
        None => default_size(&name)?,
    };
    for color in palette_colors(&name, n)? {
        println!("{}", to_hex(color));
    }
    Ok(())
}

fn get(file: PathBuf, keys: Vec<String>) -> CliResult {
    let mut reader = JsonDataReader::new(file);
    // Top-level lookups go through `get` so the file is read fresh
    let value = match keys.as_slice() {
        [key] => reader.get(key)?.cloned(),
        _ => {
            reader.load()?;
            reader.get_nested(keys.as_slice()).cloned()
        }
    };
    match value {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => Err(format!("no value at '{}'", keys.join(".")).into()),
    }
}

/// Labels `a`, `b`, ..., `z`, `aa`, `ab`, ...
fn default_labels(count: usize) -> Vec<String> {
    (0..count)
        .map(|mut index| {
            let mut label = Vec::new();
            loop {
                label.push(b'a' + (index % 26) as u8);
                if index < 26 {
                    break;
                }
                index = index / 26 - 1;
            }
            label.reverse();
            String::from_utf8_lossy(&label).into_owned()
        })
        .collect()
}
