use std::{
    io::{self, Write},
    process,
};

use bucket_collider::{
    config::{ScanConfig, ScanLimits},
    error::{ConfigError, Result},
    report::{AddressFormat, RecordStyle, TextReporter},
    Alphabet, Collider, Encoding, Key, KeySpace, MultiplicativeHash, TableGeometry,
};
use slog::{crit, info, o, Drain, Level, LevelFilter, Logger};
use structopt::StructOpt;

/// Enumerates every key over an alphabet and reports pairs of keys that land
/// on the same bucket address of a multiplicative-hash table
#[derive(Debug, StructOpt)]
#[structopt(name = "bucket-collider")]
struct Cli {
    /// Initial hash accumulator
    #[structopt(long, default_value = "19780211")]
    seed: u64,
    /// Factor applied to the accumulator before each character
    #[structopt(long, default_value = "37")]
    multiplier: u64,
    /// Number of buckets in the table
    #[structopt(long, default_value = "131071")]
    bucket_count: u64,
    /// Bytes per bucket slot
    #[structopt(long, default_value = "4")]
    slot_stride: u64,
    /// Bytes before the first slot
    #[structopt(long, default_value = "256")]
    base_offset: u64,
    /// letters, lower, upper, digits, alnum, or a literal list of symbols
    #[structopt(long, default_value = "letters")]
    alphabet: Alphabet,
    /// Characters per key
    #[structopt(long, default_value = "2")]
    key_length: usize,
    /// code-point or byte
    #[structopt(long, default_value = "code-point")]
    encoding: Encoding,
    /// Stop after hashing this many keys
    #[structopt(long)]
    max_keys: Option<u64>,
    /// Stop after reporting this many collisions
    #[structopt(long)]
    max_collisions: Option<u64>,
    /// Record layout: line or block
    #[structopt(long, default_value = "line")]
    style: RecordStyle,
    /// Print addresses in hexadecimal
    #[structopt(long)]
    hex: bool,
    /// Log every collision to stderr (debug level)
    #[structopt(short, long)]
    verbose: bool,
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Print the hash, bucket index and address of each key
    Locate {
        #[structopt(required = true)]
        keys: Vec<Key>,
    },
}

impl Cli {
    fn config(&self) -> std::result::Result<ScanConfig, ConfigError> {
        Ok(ScanConfig {
            hash: MultiplicativeHash::new(self.seed, self.multiplier).with_encoding(self.encoding),
            geometry: TableGeometry::new(self.bucket_count, self.slot_stride, self.base_offset)?,
            key_space: KeySpace::new(self.alphabet.clone(), self.key_length)?,
            limits: ScanLimits {
                max_keys: self.max_keys,
                max_collisions: self.max_collisions,
            },
        })
    }

    fn address_format(&self) -> AddressFormat {
        if self.hex {
            AddressFormat::Hex
        } else {
            AddressFormat::Decimal
        }
    }
}

fn build_logger(verbose: bool) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let level = if verbose { Level::Debug } else { Level::Info };
    let drain = LevelFilter::new(drain, level).fuse();
    Logger::root(drain, o!())
}

fn run(cli: Cli, logger: &Logger) -> Result<()> {
    let collider = Collider::new(cli.config()?)?.with_logger(logger.new(o!("component" => "collider")));
    let address_format = cli.address_format();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Command::Locate { keys }) => {
            for key in &keys {
                let (hash, address) = collider.locate(key.as_str())?;
                let index = collider.mapper().bucket_index(hash);
                match address_format {
                    AddressFormat::Decimal => writeln!(
                        out,
                        "{} hash={} index={} address={}",
                        key, hash, index, address
                    )?,
                    AddressFormat::Hex => writeln!(
                        out,
                        "{} hash={:#x} index={:#x} address={:#x}",
                        key, hash, index, address
                    )?,
                }
            }
        }
        None => {
            let mut reporter = TextReporter::new(out)
                .with_style(cli.style)
                .with_address_format(address_format);
            let summary = collider.scan(&mut reporter)?;
            info!(logger, "done";
                "records" => reporter.written(),
                "collisions" => summary.collisions,
                "stopped_early" => summary.stopped_early);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::from_args();

    let code = {
        let logger = build_logger(cli.verbose);
        info!(logger, "starting bucket-collider"; "version" => env!("CARGO_PKG_VERSION"));
        match run(cli, &logger) {
            Ok(()) => 0,
            Err(err) => {
                crit!(logger, "bucket-collider failed"; "error" => %err, "detail" => ?err);
                1
            }
        }
        // logger dropped here so the async drain flushes before exit
    };

    process::exit(code);
}
