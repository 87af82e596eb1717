use std::thread;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use enumsafe::{
    EnumerationConfig, EnumerationError, EnumerationPolicy, Enumerator, SafeEnumerable,
    SliceTraversal,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "enumsafe", about = "Exercise enumeration policies across threads")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request enumerators over `0..items` from the origin thread and from workers.
    Walk {
        /// Enumeration policy (normal, safe, strict).
        #[arg(long, default_value = "safe")]
        policy: EnumerationPolicy,
        /// Number of elements in the collection.
        #[arg(long, default_value_t = 5)]
        items: u64,
        /// Worker threads requesting while the origin pass is still open.
        #[arg(long, default_value_t = 2)]
        threads: usize,
        /// Issue a second request on the origin thread before releasing the first.
        #[arg(long)]
        overlap: bool,
        /// Claim the root with compare-and-swap.
        #[arg(long)]
        atomic: bool,
    },
}

type Numbers = SafeEnumerable<SliceTraversal<u64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Walk {
            policy,
            items,
            threads,
            overlap,
            atomic,
        } => run_walk(policy, items, threads, overlap, atomic)?,
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run_walk(
    policy: EnumerationPolicy,
    items: u64,
    threads: usize,
    overlap: bool,
    atomic: bool,
) -> Result<()> {
    let config = EnumerationConfig::new(policy).with_atomic_reuse(atomic);
    let numbers: Numbers = SafeEnumerable::with_config(SliceTraversal::new((0..items).collect()), config);

    println!("policy={}\titems={}\tatomic={}", policy, items, atomic);

    // Held open so every later request sees an active root
    let first = numbers.request();
    let second = overlap.then(|| numbers.request());

    let shared = &numbers;
    let worker_lines = thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|idx| {
                scope.spawn(move || describe(&format!("worker {}", idx + 1), shared.request()))
            })
            .collect();

        workers
            .into_iter()
            .enumerate()
            .map(|(idx, worker)| {
                worker
                    .join()
                    .map_err(|_| anyhow!("worker {} panicked", idx + 1))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    if let Some(second) = second {
        println!("{}", describe("origin (overlap)", second));
    }
    for line in worker_lines {
        println!("{}", line);
    }

    println!("{}", describe("origin", first));
    println!("{}", describe("origin (after release)", numbers.request()));

    Ok(())
}

fn describe(
    label: &str,
    request: Result<Enumerator<'_, SliceTraversal<u64>>, EnumerationError>,
) -> String {
    match request {
        Ok(enumerator) => {
            let kind = if enumerator.is_root() { "root" } else { "clone" };
            let elements: Vec<String> = enumerator.map(|n| n.to_string()).collect();
            format!("{}\t{}\t[{}]", label, kind, elements.join(", "))
        }
        Err(err) => format!("{}\terror\t{}", label, err),
    }
}
