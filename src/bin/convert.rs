//! Command-line converter: `convert --input photo.heic --output photo.jpg`.

use std::path::PathBuf;

use clap::Parser;

use imgconv::processing;
use imgconv::utils::validation::{validate_input_path, validate_output_path};

#[derive(Parser, Debug)]
#[command(
    name = "convert",
    version,
    about = "Image format converter with HEIC support"
)]
struct Args {
    /// Path to the input image file
    #[arg(short, long)]
    input: PathBuf,

    /// Path for the output image file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    validate_input_path(&args.input)?;
    validate_output_path(&args.output)?;
    processing::convert(&args.input, &args.output)?;

    println!(
        "Successfully converted '{}' to '{}'",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}
