use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rasterkit::{Font, ImageFormat, OutlineFont, Scene, DEFAULT_JPEG_QUALITY};

const DEFAULT_OUTPUT: &str = "out.png";
const DEFAULT_FAMILY: &str = "Arial";
const DEFAULT_FONT_SIZE: f32 = 10.0;

struct Options {
    scene: Option<PathBuf>,
    output: PathBuf,
    format: Option<ImageFormat>,
    quality: u8,
    font: Option<PathBuf>,
    family: String,
    font_size: f32,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        scene: None,
        output: PathBuf::from(DEFAULT_OUTPUT),
        format: None,
        quality: DEFAULT_JPEG_QUALITY,
        font: None,
        family: DEFAULT_FAMILY.to_string(),
        font_size: DEFAULT_FONT_SIZE,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--scene" | "-s", Some(v)) => {
                opts.scene = Some(PathBuf::from(v));
                i += 1;
            },
            ("--output" | "-o", Some(v)) => {
                opts.output = PathBuf::from(v);
                i += 1;
            },
            ("--format" | "-f", Some(v)) => {
                opts.format = ImageFormat::from_extension(v);
                if opts.format.is_none() {
                    log::warn!("unknown format {:?}, inferring from output path", v);
                }
                i += 1;
            },
            ("--quality" | "-q", Some(v)) => {
                if let Ok(q) = v.parse::<u8>() {
                    opts.quality = q;
                }
                i += 1;
            },
            ("--font", Some(v)) => {
                opts.font = Some(PathBuf::from(v));
                i += 1;
            },
            ("--family", Some(v)) => {
                opts.family.clone_from(v);
                i += 1;
            },
            ("--font-size", Some(v)) => {
                if let Ok(size) = v.parse::<f32>() {
                    opts.font_size = size;
                }
                i += 1;
            },
            ("--help" | "-h", _) => {
                println!("Usage: rasterkit [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --scene FILE, -s FILE   Render a JSON scene (default: built-in demo)");
                println!(
                    "  --output FILE, -o FILE  Output image (default: {})",
                    DEFAULT_OUTPUT
                );
                println!("  --format png|jpeg       Output format (default: from extension)");
                println!(
                    "  --quality N, -q N       JPEG quality 1-100 (default: {})",
                    DEFAULT_JPEG_QUALITY
                );
                println!("  --font FILE             TrueType/OpenType file for text");
                println!(
                    "  --family NAME           Installed font family (default: {})",
                    DEFAULT_FAMILY
                );
                println!(
                    "  --font-size PT          Font size in points (default: {})",
                    DEFAULT_FONT_SIZE
                );
                println!("  --help, -h              Show this help message");
                std::process::exit(0);
            },
            (other, _) => log::warn!("ignoring argument {:?}", other),
        }
        i += 1;
    }

    opts
}

fn load_font(opts: &Options) -> Result<OutlineFont> {
    match &opts.font {
        Some(path) => OutlineFont::from_file(path, opts.font_size)
            .with_context(|| format!("loading font {}", path.display())),
        None => OutlineFont::from_system(&opts.family, opts.font_size)
            .with_context(|| format!("finding font family {:?}", opts.family)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = parse_args();

    let (scene, assets) = match &opts.scene {
        Some(path) => {
            let scene = Scene::load(path)
                .with_context(|| format!("loading scene {}", path.display()))?;
            let assets = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (scene, assets)
        },
        None => (Scene::demo(), PathBuf::from(".")),
    };

    let font = if scene.needs_font() {
        Some(load_font(&opts)?)
    } else {
        None
    };

    let buffer = scene
        .render(font.as_ref().map(|f| f as &dyn Font), &assets)
        .with_context(|| format!("rendering scene {:?}", scene.name))?;

    let format = match opts.format {
        Some(format) => format,
        None => ImageFormat::from_path(&opts.output)
            .with_context(|| format!("choosing format for {}", opts.output.display()))?,
    };
    let bytes = buffer
        .encode_with(&rasterkit::ImageCodec, format, opts.quality)
        .context("encoding output")?;
    std::fs::write(&opts.output, &bytes)
        .with_context(|| format!("writing {}", opts.output.display()))?;

    log::info!(
        "wrote {} ({}x{}, {} bytes)",
        opts.output.display(),
        buffer.width(),
        buffer.height(),
        bytes.len()
    );
    Ok(())
}
