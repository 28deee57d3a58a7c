//! rematrix CLI: offline channel remixing of WAV files.
//!
//! Usage:
//!   rematrix-cli render in.wav out.wav --route 0=1 --route 1=0 --gain 1=-6
//!   rematrix-cli render in.wav out.wav --settings rematrix.json
//!   rematrix-cli show --channels 6 --settings rematrix.json
//!   rematrix-cli defaults --out rematrix.json

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmx_core::MAX_PLANES;
use rmx_host::{
    read_wav, write_wav, AudioInfo, FilterHost, SettingValue, SettingsStore, SpeakerLayout,
};

#[derive(Parser)]
#[command(name = "rematrix-cli", about = "Route and gain audio channels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a WAV file through the rematrix filter
    Render {
        /// Input WAV file (1-6 or 8 channels)
        input: PathBuf,
        /// Output WAV file (32-bit float)
        output: PathBuf,
        /// Settings file to start from
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Route override, OUT=SRC (SRC of -1 mutes)
        #[arg(short, long = "route", value_parser = parse_assignment::<i64>)]
        routes: Vec<(usize, i64)>,
        /// Gain override in dB, OUT=DB
        #[arg(short, long = "gain", value_parser = parse_assignment::<f64>, allow_hyphen_values = true)]
        gains: Vec<(usize, f64)>,
        /// Frames per host block (0 = one quantum)
        #[arg(short, long, default_value_t = 0)]
        block: usize,
        /// Save the effective settings here
        #[arg(long)]
        save_settings: Option<PathBuf>,
    },
    /// Print the per-channel routing table
    Show {
        /// Active output channels
        #[arg(short, long, default_value_t = 2)]
        channels: usize,
        /// Settings file to show
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// Print or save the default settings
    Defaults {
        /// Write the defaults to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Set RUST_LOG=debug for per-cell route/gain changes
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            input,
            output,
            settings,
            routes,
            gains,
            block,
            save_settings,
        } => render(
            &input,
            &output,
            settings.as_deref(),
            &routes,
            &gains,
            block,
            save_settings.as_deref(),
        ),
        Commands::Show { channels, settings } => show(channels, settings.as_deref()),
        Commands::Defaults { out } => defaults(out.as_deref()),
    }
}

fn parse_assignment<T: FromStr>(s: &str) -> Result<(usize, T), String> {
    let (out, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected OUT=VALUE, got '{}'", s))?;
    let out: usize = out
        .trim()
        .parse()
        .map_err(|_| format!("invalid output channel '{}'", out))?;
    if out >= MAX_PLANES {
        return Err(format!("output channel {} out of range (0-{})", out, MAX_PLANES - 1));
    }
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}'", value))?;
    Ok((out, value))
}

fn load_settings(path: Option<&Path>) -> Result<rmx_core::SettingsMap> {
    match path {
        Some(path) => SettingsStore::new(path)
            .load()
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(FilterHost::defaults()),
    }
}

fn render(
    input: &Path,
    output: &Path,
    settings_path: Option<&Path>,
    routes: &[(usize, i64)],
    gains: &[(usize, f64)],
    block: usize,
    save_settings: Option<&Path>,
) -> Result<()> {
    let (mut buffer, sample_rate) =
        read_wav(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let speakers = SpeakerLayout::from_channel_count(buffer.channels() as usize)?;

    let mut settings = load_settings(settings_path)?;
    for &(out, src) in routes {
        settings.insert(rmx_core::settings::ROUTE_KEYS[out].to_string(), SettingValue::Int(src));
    }
    for &(out, db) in gains {
        settings.insert(rmx_core::settings::GAIN_KEYS[out].to_string(), SettingValue::Float(db));
    }

    let mut host = FilterHost::attach(AudioInfo::new(sample_rate, speakers), settings)?;
    log::info!(
        "Rendering {} frames ({:?}) to {}",
        buffer.frames(),
        speakers,
        output.display()
    );
    host.render(&mut buffer, block);

    write_wav(output, &buffer, sample_rate)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(path) = save_settings {
        SettingsStore::new(path).save(host.settings())?;
    }

    println!("Done.");
    Ok(())
}

fn show(channels: usize, settings_path: Option<&Path>) -> Result<()> {
    let speakers = SpeakerLayout::from_channel_count(channels)?;
    let settings = load_settings(settings_path)?;
    let host = FilterHost::attach(AudioInfo::new(48_000, speakers), settings)?;

    let profile = host.remix_settings()?.profile_name;
    println!("Profile:  {}", profile);
    println!("Layout:   {:?} ({} ch)", speakers, channels);
    println!();
    for control in host.panel().controls() {
        let route = &control.options[control.selected()];
        println!(
            "{:<18} <- {:<16} {:+6.1} dB",
            control.title,
            route.label,
            control.gain_db()
        );
    }
    Ok(())
}

fn defaults(out: Option<&Path>) -> Result<()> {
    let map = FilterHost::defaults();
    match out {
        Some(path) => {
            SettingsStore::new(path).save(&map)?;
            println!("Wrote defaults to {}", path.display());
        }
        None => println!("{}", SettingsStore::to_json(&map)?),
    }
    Ok(())
}
