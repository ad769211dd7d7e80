//! hocr2pdf CLI - hOCR text layer overlay tool

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use hocr2pdf::{overlay_file_with_options, OverlayOptions, StandardFont};

#[derive(Parser)]
#[command(name = "hocr2pdf")]
#[command(version)]
#[command(about = "Overlay an hOCR text layer onto an image-based PDF", long_about = None)]
struct Cli {
    /// Input hOCR file (Tesseract `-c tessedit_create_hocr=1` output)
    #[arg(value_name = "HOCR")]
    hocr: PathBuf,

    /// Input PDF file to overlay
    #[arg(value_name = "PDF")]
    pdf: PathBuf,

    /// Output file (defaults to <PDF>.searchable.pdf)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Draw the text layer visibly instead of invisible
    #[arg(long)]
    visible: bool,

    /// Overlay font (helvetica, helvetica-bold, times, times-bold, courier)
    #[arg(long, value_name = "NAME", default_value = "helvetica")]
    font: String,

    /// Stretch each word's vertical extent to its enclosing line's
    #[arg(long)]
    sloppy_lines: bool,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> hocr2pdf::Result<()> {
    let font = StandardFont::from_name(&cli.font)?;

    let mut options = OverlayOptions::new()
        .with_font(font)
        .with_line_extent(cli.sloppy_lines);
    if cli.visible {
        options = options.visible();
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.pdf.with_extension("searchable.pdf"));

    overlay_file_with_options(&cli.hocr, &cli.pdf, &output, options)?;

    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}
