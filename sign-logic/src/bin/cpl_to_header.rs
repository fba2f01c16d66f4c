use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use sign_logic::canvas::Canvas;
use sign_logic::cpl::{read_cpl_file, split_banks};
use sign_logic::emit::write_coordinates_header;

/// Emit the LED placement coordinates as a C header.
#[derive(Debug, Parser)]
struct Args {
    /// CPL spreadsheet export (CSV)
    cpl: PathBuf,
    /// Output header
    #[clap(long, default_value = "square_coordinates.h")]
    out: PathBuf,
    /// Emit the matrix bank instead of the sign bank
    #[clap(long)]
    matrix: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let points = read_cpl_file(&args.cpl)?;
    let (matrix, sign) = split_banks(points);
    log::info!(
        "loaded {} matrix and {} sign placements",
        matrix.len(),
        sign.len()
    );

    let bank = if args.matrix { matrix } else { sign };
    let canvas = Canvas::new(bank);
    let mut writer = BufWriter::new(File::create(&args.out)?);
    write_coordinates_header(&mut writer, &canvas)?;

    log::info!("coordinate header saved to {}", args.out.display());
    Ok(())
}
