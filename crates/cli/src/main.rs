#![deny(unsafe_code)]
//! CLI binary for diverging color maps.
//!
//! Subcommands:
//! - `table`: print or write sampled CSV tables
//! - `swatch`: write a gradient PNG
//! - `info`: describe how a map was built
//! - `list`: print presets and working spaces
//!
//! The map comes from `--preset`, `--config FILE` or explicit `--low/--high`
//! hex colors; with none of them the cool-warm preset is used.

mod error;

use clap::{Args, Parser, Subcommand};
use diverge_core::mapper::WorkingSpace;
use diverge_core::{DivergingMap, Interpolation, MapConfig, Msh, Preset, Srgb};
use diverge_export::table::{self, Channels, DEFAULT_SAMPLE_COUNTS};
use error::CliError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Samples used by `info` to check the map against the sRGB gamut.
const GAMUT_CHECK_SAMPLES: usize = 257;

#[derive(Parser)]
#[command(name = "diverge", about = "Smooth diverging color maps in Msh space")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Interpolation space (msh, lab, linear, srgb). Overrides the config.
    #[arg(long, global = true)]
    space: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Where the map's endpoint colors come from.
#[derive(Args, Debug, Default)]
struct Source {
    /// Built-in preset name (e.g. "cool-warm").
    #[arg(long, conflicts_with_all = ["config", "low", "high", "mid"])]
    preset: Option<String>,

    /// JSON map configuration file.
    #[arg(long, conflicts_with_all = ["low", "high", "mid"])]
    config: Option<PathBuf>,

    /// Low endpoint as "#rrggbb".
    #[arg(long, requires = "high")]
    low: Option<String>,

    /// High endpoint as "#rrggbb".
    #[arg(long, requires = "low")]
    high: Option<String>,

    /// Neutral midpoint as "#rrggbb".
    #[arg(long, requires = "low")]
    mid: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print (or write) sampled color tables as CSV.
    Table {
        #[command(flatten)]
        source: Source,

        /// Number of samples; repeat for several tables. Defaults to 8..1024.
        #[arg(short, long)]
        samples: Vec<usize>,

        /// Write 8-bit channels instead of floats in [0, 1].
        #[arg(long)]
        bytes: bool,

        /// Write one `<prefix>-<n>.csv` file per table into this directory.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// File name prefix used with --out-dir.
        #[arg(long, default_value = "diverging")]
        prefix: String,
    },
    /// Write a horizontal gradient swatch as a PNG.
    Swatch {
        #[command(flatten)]
        source: Source,

        /// Swatch width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Swatch height in pixels.
        #[arg(short = 'H', long, default_value_t = 64)]
        height: usize,

        /// Output file path.
        #[arg(short, long, default_value = "swatch.png")]
        output: PathBuf,
    },
    /// Describe the endpoint case, interpolation mode and Msh parameters.
    Info {
        #[command(flatten)]
        source: Source,
    },
    /// List presets and working spaces.
    List,
}

fn load_config(source: &Source) -> Result<MapConfig, CliError> {
    if let Some(name) = &source.preset {
        return Ok(Preset::from_name(name)?.config());
    }
    if let Some(path) = &source.config {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
        return Ok(MapConfig::from_json(&text)?);
    }
    match (&source.low, &source.high) {
        (Some(low), Some(high)) => {
            let mid = source.mid.as_deref().map(Srgb::from_hex).transpose()?;
            Ok(MapConfig::new(Srgb::from_hex(low)?, Srgb::from_hex(high)?, mid))
        }
        (None, None) => Ok(Preset::CoolWarm.config()),
        _ => Err(CliError::Input("--low and --high must be given together".into())),
    }
}

/// Builds the map and picks the working space; `--space` wins over the config.
fn resolve(source: &Source, space: Option<&str>) -> Result<(DivergingMap, WorkingSpace), CliError> {
    let config = load_config(source)?;
    let space = match space {
        Some(name) => WorkingSpace::from_name(name)?,
        None => config.space,
    };
    Ok((config.build(), space))
}

fn out_of_gamut_count(rows: &[table::Row]) -> usize {
    rows.iter().filter(|r| !r.in_gamut).count()
}

fn run_table(
    map: &DivergingMap,
    space: WorkingSpace,
    counts: &[usize],
    channels: Channels,
    out_dir: Option<&Path>,
    prefix: &str,
    json: bool,
) -> Result<(), CliError> {
    let counts = if counts.is_empty() {
        &DEFAULT_SAMPLE_COUNTS[..]
    } else {
        counts
    };

    let mut tables = Vec::with_capacity(counts.len());
    for &n in counts {
        tables.push((n, table::sample_rows(map, n, space)?));
    }

    let mut written = Vec::new();
    match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .map_err(|e| CliError::Io(format!("cannot create {}: {e}", dir.display())))?;
            for (n, rows) in &tables {
                let path = dir.join(format!("{prefix}-{n}.csv"));
                let mut file = io::BufWriter::new(
                    fs::File::create(&path)
                        .map_err(|e| CliError::Io(format!("cannot create {}: {e}", path.display())))?,
                );
                table::write_csv(rows, channels, &mut file)?;
                file.flush().map_err(|e| CliError::Io(e.to_string()))?;
                written.push(path);
            }
        }
        None if !json => {
            let mut out = io::stdout().lock();
            for (i, (_, rows)) in tables.iter().enumerate() {
                if i > 0 {
                    writeln!(out).map_err(|e| CliError::Io(e.to_string()))?;
                }
                table::write_csv(rows, channels, &mut out)?;
            }
        }
        None => {}
    }

    if json {
        let mut entries = Vec::with_capacity(tables.len());
        for (n, rows) in &tables {
            let rows_json = match out_dir {
                Some(_) => serde_json::Value::Null,
                None => serde_json::to_value(rows)?,
            };
            entries.push(serde_json::json!({
                "samples": n,
                "out_of_gamut": out_of_gamut_count(rows),
                "rows": rows_json,
            }));
        }
        let info = serde_json::json!({
            "space": space.name(),
            "tables": entries,
            "files": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        for (n, rows) in &tables {
            let bad = out_of_gamut_count(rows);
            if bad > 0 {
                eprintln!("warning: {bad} of {n} samples out of gamut (clamped)");
            }
        }
        for path in &written {
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn msh_json(c: Msh) -> serde_json::Value {
    serde_json::json!({ "m": c.m, "s": c.s, "h": c.h })
}

fn run_info(map: &DivergingMap, space: WorkingSpace, json: bool) -> Result<(), CliError> {
    let rows = table::sample_rows(map, GAMUT_CHECK_SAMPLES, space)?;
    let bad = out_of_gamut_count(&rows);

    if json {
        let info = serde_json::json!({
            "case": map.case().name(),
            "interpolation": map.interpolation(),
            "space": space.name(),
            "low": { "srgb": map.low_srgb().to_hex(), "msh": msh_json(map.low()) },
            "high": { "srgb": map.high_srgb().to_hex(), "msh": msh_json(map.high()) },
            "midpoint_from_low": map.midpoint_from_low().map(msh_json),
            "midpoint_from_high": map.midpoint_from_high().map(msh_json),
            "gamut_samples": GAMUT_CHECK_SAMPLES,
            "out_of_gamut": bad,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let fmt_msh = |c: Msh| format!("M={:.4} s={:.4} h={:.4}", c.m, c.s, c.h);
    println!("case:  {}", map.case().name());
    match map.interpolation() {
        Interpolation::Direct => println!("mode:  direct"),
        Interpolation::Midpoint {
            magnitude,
            low_hue,
            high_hue,
        } => println!(
            "mode:  midpoint (M={magnitude:.4}, low hue {low_hue:.4}, high hue {high_hue:.4})"
        ),
    }
    println!("space: {}", space.name());
    println!("low:   {}  {}", map.low_srgb().to_hex(), fmt_msh(map.low()));
    println!("high:  {}  {}", map.high_srgb().to_hex(), fmt_msh(map.high()));
    println!("gamut: {} of {GAMUT_CHECK_SAMPLES} samples in gamut", GAMUT_CHECK_SAMPLES - bad);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let space = cli.space.as_deref();
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let spaces = WorkingSpace::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "spaces": spaces,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Spaces:");
                println!("  {}", spaces.join(", "));
            }
        }
        Command::Table {
            source,
            samples,
            bytes,
            out_dir,
            prefix,
        } => {
            let (map, space) = resolve(&source, space)?;
            let channels = if bytes { Channels::Byte } else { Channels::Float };
            run_table(&map, space, &samples, channels, out_dir.as_deref(), &prefix, cli.json)?;
        }
        Command::Swatch {
            source,
            width,
            height,
            output,
        } => {
            let (map, space) = resolve(&source, space)?;
            diverge_export::snapshot::write_png(&map, width, height, space, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "case": map.case().name(),
                    "space": space.name(),
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "wrote {width}x{height} {} swatch -> {}",
                    map.case().name(),
                    output.display()
                );
            }
        }
        Command::Info { source } => {
            let (map, space) = resolve(&source, space)?;
            run_info(&map, space, cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
