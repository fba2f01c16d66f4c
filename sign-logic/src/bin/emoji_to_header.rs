use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use sign_logic::emit::write_emoji_header;
use sign_logic::emoji::{convert_image, load_export};

/// Convert exported emoji PNGs into the firmware's bitmap header.
#[derive(Debug, Parser)]
struct Args {
    /// Directory of `NNN_<codepoints>.png` exports
    export: PathBuf,
    /// Output header
    #[clap(long, default_value = "emoji_bitmaps.h")]
    out: PathBuf,
    /// Directory for the converted 7x7 previews; cleared before each run
    #[clap(long)]
    conv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let conv_dir = args
        .conv
        .unwrap_or_else(|| args.export.with_file_name("conv"));
    std::fs::create_dir_all(&conv_dir)?;
    for entry in std::fs::read_dir(&conv_dir)? {
        std::fs::remove_file(entry?.path())?;
    }

    let mut exports: Vec<PathBuf> = std::fs::read_dir(&args.export)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    exports.sort();

    let mut emojis = Vec::with_capacity(exports.len());
    for path in &exports {
        let emoji = load_export(path)?;
        if let Some(file_name) = path.file_name() {
            convert_image(path)?.save(conv_dir.join(file_name))?;
        }
        emojis.push(emoji);
    }

    let mut writer = BufWriter::new(File::create(&args.out)?);
    write_emoji_header(&mut writer, &emojis)?;

    log::info!(
        "converted {} emojis, header file generated: {}",
        emojis.len(),
        args.out.display()
    );
    Ok(())
}
