use arbor::{Config, Replacement};
use arbor_utils::{bench, build, dump, Keys};
use structopt::StructOpt;
use tracing::Level;

pub type Result<T> = anyhow::Result<T>;

#[derive(StructOpt)]
#[structopt(about = "CLI to inspect and benchmark arbor trees")]
struct Opts {
    #[structopt(short, parse(from_occurrences = set_log_level), global = true)]
    #[allow(dead_code)] // log level will be set in [`set_log_level`]
    /// Increase verbosity
    verbosity: u64,
    #[structopt(long, global = true)]
    /// Erase inner nodes by pulling up their successor instead of their predecessor
    successor: bool,
    #[structopt(subcommand)]
    cmd: Command,
}

fn set_log_level(verbosity: u64) -> u64 {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    verbosity
}

#[derive(StructOpt)]
enum Command {
    /// Build a tree and print its shape
    Dump {
        #[structopt(long)]
        /// Comma separated keys to insert, in order
        insert: Keys,
        #[structopt(long, default_value = "")]
        /// Comma separated keys to erase after inserting
        erase: Keys,
    },
    /// Build a tree and print it as dot. Can be piped directly:
    /// `arbor-cli graph --insert 5,3,8 | dot -Tpng -o tree.png`.
    Graph {
        #[structopt(long)]
        /// Comma separated keys to insert, in order
        insert: Keys,
        #[structopt(long, default_value = "")]
        /// Comma separated keys to erase after inserting
        erase: Keys,
    },
    /// Benchmark
    Bench {
        #[structopt(long)]
        /// The number of random keys to insert
        count: usize,
        #[structopt(long, default_value = "0")]
        /// Seed for the key generator
        seed: u64,
    },
}

fn main() -> Result<()> {
    let opts = Opts::from_args();
    let config = Config {
        replacement: if opts.successor {
            Replacement::Successor
        } else {
            Replacement::Predecessor
        },
        check_invariants: false,
    };
    match opts.cmd {
        Command::Dump { insert, erase } => {
            let tree = build(&insert.0, &erase.0, config)?;
            print!("{}", tree.dump());
        }
        Command::Graph { insert, erase } => {
            let tree = build(&insert.0, &erase.0, config)?;
            let mut stdout = std::io::stdout();
            dump::graph(&tree, &mut stdout)?;
        }
        Command::Bench { count, seed } => {
            println!("inserting {} keys with seed {}", count, seed);
            let report = bench(count, seed, config);
            println!("{}", report);
            report.invariants?;
        }
    }
    Ok(())
}
