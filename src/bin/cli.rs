//! storemap CLI - Debug tool for the grouping and marker pipeline
//!
//! Usage:
//!   storemap-cli group <file> [--snap-radius <m>] [--json]
//!   storemap-cli synth [--count <n>] [--seed <n>] [--output <file>]
//!
//! `group` loads a merchant JSON file, runs location grouping, and prints
//! how the groups would render. `synth` writes a deterministic synthetic
//! merchant dataset for testing.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use storemap::icon::{classify, MarkerRendering};
use storemap::synthetic::{generate_merchants, SyntheticConfig};
use storemap::{group_merchants, MapConfig, Merchant, Result};

#[derive(Parser)]
#[command(name = "storemap-cli")]
#[command(about = "Debug tool for merchant grouping and marker rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group merchants from a JSON file and summarize the marker set
    Group {
        /// JSON file containing an array of merchants
        file: PathBuf,

        /// Snap radius in meters
        #[arg(long, default_value_t = MapConfig::default().snap_radius_m)]
        snap_radius: f64,

        /// Print the full group list as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic merchant dataset
    Synth {
        /// Number of merchants to generate
        #[arg(long, default_value = "1000")]
        count: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Group {
            file,
            snap_radius,
            json,
        } => run_group(&file, snap_radius, json),
        Commands::Synth {
            count,
            seed,
            output,
        } => run_synth(count, seed, output.as_deref()),
    }
}

fn run_group(file: &PathBuf, snap_radius: f64, json: bool) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let merchants: Vec<Merchant> = serde_json::from_reader(reader)?;

    let groups = group_merchants(&merchants, snap_radius);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    let with_coords = merchants
        .iter()
        .filter(|m| m.coords.map(|c| c.is_valid()).unwrap_or(false))
        .count();
    let multi = groups.iter().filter(|g| g.members.len() > 1).count();
    let largest = groups.iter().map(|g| g.members.len()).max().unwrap_or(0);

    let mut renderings: BTreeMap<&str, usize> = BTreeMap::new();
    for group in &groups {
        let label = match classify(&group.members, &group.key) {
            Ok(MarkerRendering::Single { .. }) => "single",
            Ok(MarkerRendering::SingleWithBadge { .. }) => "badge",
            Ok(MarkerRendering::Multi { .. }) => "multi",
            Err(_) => "empty",
        };
        *renderings.entry(label).or_insert(0) += 1;
    }

    println!("Merchants:        {}", merchants.len());
    println!("  with coords:    {with_coords}");
    println!("  skipped:        {}", merchants.len() - with_coords);
    println!("Groups:           {}", groups.len());
    println!("  multi-merchant: {multi}");
    println!("  largest group:  {largest}");
    println!("Renderings:");
    for (label, count) in renderings {
        println!("  {label:8} {count}");
    }

    Ok(())
}

fn run_synth(count: usize, seed: u64, output: Option<&std::path::Path>) -> Result<()> {
    let merchants = generate_merchants(&SyntheticConfig {
        count,
        seed,
        ..SyntheticConfig::default()
    });

    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &merchants)?;
            eprintln!("wrote {} merchants to {}", merchants.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&merchants)?),
    }

    Ok(())
}
