use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use one_brc::generate::Generator;
use one_brc::{aggregate, write_report, MappedFile};

#[derive(Parser, Debug)]
#[command(name = "one-brc")]
#[command(about = "Per-station min/mean/max over a <station>;<value> file")]
#[command(version)]
struct Args {
    /// Path to the measurements file
    #[arg(short, long, env = "BRC_FILE", default_value = "data.txt")]
    file: PathBuf,

    /// Parallel workers (0 = number of logical CPUs)
    #[arg(short, long, env = "BRC_WORKERS", default_value_t = 0)]
    workers: usize,

    /// Generate the data file instead of processing it
    #[arg(long)]
    generate: bool,

    /// Station list used by --generate (`name` or `name;mean` per line)
    #[arg(long, default_value = "weather_stations.csv")]
    stations: PathBuf,

    /// Rows written by --generate
    #[arg(long, default_value_t = 1_000_000_000)]
    rows: u64,

    /// Seed for --generate
    #[arg(long, default_value_t = 0x1b_c0de)]
    seed: u64,

    /// Overwrite an existing file with --generate
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let workers = match args.workers {
        0 => thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };

    eprintln!("Billion row challenge, Rust version");
    eprintln!("Using {workers} parallel workers");

    if args.generate {
        return generate(&args);
    }

    let start = Instant::now();
    let input = MappedFile::open(&args.file)
        .with_context(|| format!("opening {}", args.file.display()))?;
    let size = input.len();

    let mapping = aggregate(input.bytes(), workers)?;
    let elapsed = start.elapsed();

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    write_report(&mapping, &mut out).context("writing results")?;
    out.flush().context("writing results")?;

    input.release();
    print_run_stats(elapsed, size, mapping.rows());
    Ok(())
}

fn generate(args: &Args) -> Result<()> {
    let generator = Generator::load_stations(&args.stations)
        .with_context(|| format!("loading stations from {}", args.stations.display()))?;

    let start = Instant::now();
    generator
        .generate_file(&args.file, args.rows, args.seed, args.force)
        .context("generating data")?;

    eprintln!("\nGENERATION COMPLETE");
    eprintln!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn print_run_stats(elapsed: Duration, size: u64, rows: u64) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    eprintln!("\nRESULTS");
    eprintln!("Total Time: {elapsed:?}");
    eprintln!("Rows: {rows}");
    eprintln!("Speed: {:.2} million rows/second", rows as f64 / secs / 1_000_000.0);
    eprintln!("I/O Rate: {:.2} GB/second", size as f64 / (1024.0 * 1024.0 * 1024.0) / secs);
}
