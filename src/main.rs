// src/main.rs
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use fontplat::{
    ensure_initialized, FontDescription, FontOptionsSource, FontPlatformData, GenericFamily, GtkSettingsOptions,
    NoAmbientOptions,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Generic {
    Serif,
    SansSerif,
    Monospace,
    Standard,
    None,
}

impl From<Generic> for GenericFamily {
    fn from(generic: Generic) -> Self {
        match generic {
            Generic::Serif => GenericFamily::Serif,
            Generic::SansSerif => GenericFamily::SansSerif,
            Generic::Monospace => GenericFamily::Monospace,
            Generic::Standard => GenericFamily::Standard,
            Generic::None => GenericFamily::None,
        }
    }
}

/// Resolve a font request the way a renderer would and print the result.
#[derive(Parser, Debug)]
#[command(name = "fontplat", version)]
struct Args {
    /// Requested family name
    family: String,

    /// Pixel size
    #[arg(long, default_value_t = 16.0)]
    size: f64,

    /// Weight on the 100-900 scale
    #[arg(long, default_value_t = 400)]
    weight: u16,

    #[arg(long)]
    italic: bool,

    /// Generic family hint added after the requested family
    #[arg(long, value_enum, default_value_t = Generic::None)]
    generic: Generic,

    /// Also list fallback families
    #[arg(long)]
    fallbacks: bool,

    /// Use the desktop's rendering options (needs a display)
    #[arg(long)]
    gtk: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !ensure_initialized() {
        bail!("fontconfig is not available");
    }

    let source: Box<dyn FontOptionsSource> = if args.gtk {
        match gtk4::init() {
            Ok(()) => Box::new(GtkSettingsOptions::new()),
            Err(e) => {
                tracing::warn!("GTK unavailable, using default rendering options: {}", e);
                Box::new(NoAmbientOptions)
            }
        }
    } else {
        Box::new(NoAmbientOptions)
    };

    let description = FontDescription::new(&args.family, args.size)
        .with_weight(args.weight)
        .with_italic(args.italic)
        .with_generic(args.generic.into());

    let mut data = FontPlatformData::new(&description, Some(source.as_ref()));
    if data.pattern().is_none() {
        bail!("no installed font matched {:?}", args.family);
    }

    println!("family:      {}", data.family_name().unwrap_or_default());
    println!("file:        {}", data.file_path().unwrap_or_default());
    println!("size:        {}", data.size());
    println!("fixed pitch: {}", data.is_fixed_pitch());
    println!("scaled font: {}", if data.has_font() { "yes" } else { "no" });

    if args.fallbacks {
        match data.fallbacks() {
            Some(set) => {
                println!("fallbacks:");
                for (i, name) in set.family_names().iter().enumerate() {
                    println!("  {:>3}  {}", i, name);
                }
            }
            None => println!("fallbacks:   none"),
        }
    }

    Ok(())
}
