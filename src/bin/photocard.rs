use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use photocard::{Card, CardLayout, FilterKey, FontLibrary};

#[derive(Parser, Debug)]
#[command(name = "photocard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a card JSON plus a source image to a PNG.
    Export(ExportArgs),
    /// List the available filters and their CSS shorthand.
    Filters,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input card JSON. Omit to export with default card settings.
    #[arg(long)]
    card: Option<PathBuf>,

    /// Source image (any format the decoder understands).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path. Defaults to the title-derived file name in the
    /// current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Extra font directory to scan before the system locations.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Export the high-quality (2x) profile.
    #[arg(long)]
    hq: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Filters => cmd_filters(),
    }
}

fn read_card_json(path: &Path) -> anyhow::Result<Card> {
    let f = File::open(path).with_context(|| format!("open card '{}'", path.display()))?;
    let card: Card = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse card JSON '{}'", path.display()))?;
    Ok(card)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let card = match &args.card {
        Some(path) => read_card_json(path)?,
        None => Card::default(),
    };
    card.validate()?;

    let image = photocard::decode_image_file(&args.image)?;

    let mut fonts = FontLibrary::new();
    if let Some(dir) = &args.fonts {
        fonts.load_dir(dir);
    }
    if fonts.is_empty() {
        fonts.load_system_dirs();
    }
    if fonts.is_empty() {
        anyhow::bail!("no usable fonts found; pass --fonts with a directory of ttf/otf files");
    }

    let layout = if args.hq {
        CardLayout::hq()
    } else {
        CardLayout::baseline()
    };

    let exported = photocard::export_card(&card, &image, &layout, &fonts)?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&exported.file_name));
    std::fs::write(&out, &exported.png_bytes)
        .with_context(|| format!("write png '{}'", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn cmd_filters() -> anyhow::Result<()> {
    for key in FilterKey::all() {
        println!("{:<10} {}", key.as_str(), key.css());
    }
    Ok(())
}
