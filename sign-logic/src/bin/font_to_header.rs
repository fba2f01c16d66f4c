use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use sign_logic::emit::write_font_header;
use sign_logic::gfx::{convert_font, DEFAULT_FIRST_CODE_POINT, DEFAULT_LAST_CODE_POINT};

/// Convert a TrueType font into a GFX bitmap font header.
#[derive(Debug, Parser)]
struct Args {
    /// TrueType font file
    font: PathBuf,
    /// Output header; defaults to `<stem><size>.h` next to the font
    #[clap(long)]
    out: Option<PathBuf>,
    /// Font size in points
    #[clap(long, default_value_t = 8)]
    size: u32,
    /// First code point to convert
    #[clap(long, default_value_t = DEFAULT_FIRST_CODE_POINT)]
    first: u32,
    /// Last code point to convert
    #[clap(long, default_value_t = DEFAULT_LAST_CODE_POINT)]
    last: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let data = std::fs::read(&args.font)?;
    let stem = args
        .font
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font");
    let name = format!("{}{}pt7b", stem, args.size);
    let font = convert_font(&data, &name, args.size, args.first, args.last)?;

    let out_path = args
        .out
        .unwrap_or_else(|| args.font.with_file_name(format!("{}{}.h", stem, args.size)));
    let mut writer = BufWriter::new(File::create(&out_path)?);
    write_font_header(&mut writer, &font)?;

    log::info!(
        "converted {} glyphs ({} bitmap bytes), output saved to {}",
        font.glyphs.len(),
        font.bitmaps.len(),
        out_path.display()
    );
    Ok(())
}
