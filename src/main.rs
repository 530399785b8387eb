//! bytefluo CLI - decode integer scalars and UUIDs from binary files.
//!
//! This is the main entry point for the bytefluo command-line application.

use std::fmt::{Display, LowerHex};
use std::fs::File;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use memmap2::Mmap;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bytefluo::{ByteCursor, ByteOrder, ErrorKind, Scalar};
use bytefluo_uuid::Uuid;

/// bytefluo - bounds-checked binary decoding tool
#[derive(Parser)]
#[command(name = "bytefluo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct OrderArg {
    /// Byte order for scalar reads (big, little)
    #[arg(long, env = "BYTEFLUO_ORDER", default_value_t = ByteOrder::Big)]
    order: ByteOrder,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file as a sequence of integer scalars
    Dump {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Scalar width in bits
        #[arg(short, long, value_enum, default_value_t = Width::W8)]
        width: Width,

        /// Interpret scalars as two's complement signed integers
        #[arg(short, long)]
        signed: bool,

        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Stop after this many values
        #[arg(short, long)]
        count: Option<usize>,

        #[command(flatten)]
        order: OrderArg,
    },

    /// Decode an RFC 4122 UUID record
    Uuid {
        /// 16 bytes as hex digits (hyphens and spaces are ignored)
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        hex: Option<String>,

        /// Input file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Byte offset of the record within the input file
        #[arg(long, default_value_t = 0, requires = "input")]
        offset: usize,

        #[command(flatten)]
        order: OrderArg,
    },

    /// Compare cursor reads with direct slice decoding
    Bench {
        /// Payload size in MiB
        #[arg(long, default_value_t = 64)]
        size_mib: usize,

        /// Timed passes per method
        #[arg(short, long, default_value_t = 10)]
        rounds: u32,

        /// Scalar width in bits
        #[arg(short, long, value_enum, default_value_t = Width::W32)]
        width: Width,

        #[command(flatten)]
        order: OrderArg,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Width {
    #[value(name = "8")]
    W8,
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Dump {
            input,
            width,
            signed,
            offset,
            count,
            order,
        } => {
            cmd_dump(&input, width, signed, offset, count, order.order)?;
        }
        Commands::Uuid {
            hex,
            input,
            offset,
            order,
        } => {
            cmd_uuid(hex.as_deref(), input.as_deref(), offset, order.order)?;
        }
        Commands::Bench {
            size_mib,
            rounds,
            width,
            order,
        } => {
            cmd_bench(size_mib, rounds, width, order.order)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map {}", path.display()))?;
    debug!(path = %path.display(), bytes = mmap.len(), "mapped input");
    Ok(mmap)
}

fn cmd_dump(
    input: &Path,
    width: Width,
    signed: bool,
    offset: usize,
    count: Option<usize>,
    order: ByteOrder,
) -> Result<()> {
    let mmap = map_file(input)?;
    let mut cursor = ByteCursor::new(&mmap, order);
    cursor
        .seek_begin(offset)
        .with_context(|| format!("Offset {} is outside {}", offset, input.display()))?;
    debug!(offset, %order, "seeked to start offset");

    let mut printed = 0usize;
    while !cursor.eos() && count.map_or(true, |limit| printed < limit) {
        let at = cursor.tell();
        match format_scalar(&mut cursor, width, signed) {
            Ok(text) => println!("{:08x}: {}", at, text),
            Err(err) if err.kind() == ErrorKind::AttemptToReadPastEnd => {
                println!("{:08x}: {} trailing bytes", at, cursor.remaining());
                break;
            }
            Err(err) => return Err(err.into()),
        }
        printed += 1;
    }

    info!(values = printed, "dump finished");
    Ok(())
}

/// Read one scalar and render it as `value (0xhex)`.
fn format_scalar(
    cursor: &mut ByteCursor<'_>,
    width: Width,
    signed: bool,
) -> bytefluo::Result<String> {
    match (width, signed) {
        (Width::W8, false) => show::<u8>(cursor),
        (Width::W8, true) => show::<i8>(cursor),
        (Width::W16, false) => show::<u16>(cursor),
        (Width::W16, true) => show::<i16>(cursor),
        (Width::W32, false) => show::<u32>(cursor),
        (Width::W32, true) => show::<i32>(cursor),
        (Width::W64, false) => show::<u64>(cursor),
        (Width::W64, true) => show::<i64>(cursor),
    }
}

fn show<T: Scalar + Display + LowerHex>(cursor: &mut ByteCursor<'_>) -> bytefluo::Result<String> {
    let value: T = cursor.read()?;
    Ok(format!("{} (0x{:0digits$x})", value, value, digits = T::SIZE * 2))
}

fn cmd_uuid(hex: Option<&str>, input: Option<&Path>, offset: usize, order: ByteOrder) -> Result<()> {
    let uuid = match (hex, input) {
        (Some(hex), _) => {
            let bytes = parse_hex(hex)?;
            if bytes.len() != Uuid::SIZE {
                bail!("Expected {} bytes of hex, got {}", Uuid::SIZE, bytes.len());
            }
            Uuid::from_bytes(&bytes, order)?
        }
        (None, Some(path)) => {
            let mmap = map_file(path)?;
            let mut cursor = ByteCursor::new(&mmap, order);
            cursor
                .seek_begin(offset)
                .with_context(|| format!("Offset {} is outside {}", offset, path.display()))?;
            Uuid::read(&mut cursor)
                .with_context(|| format!("Failed to read UUID at offset {}", offset))?
        }
        (None, None) => bail!("Either --hex or --input is required"),
    };

    println!("uuid:                      {}", uuid);
    println!("byte order:                {}", order);
    println!("time_low:                  0x{:08x}", uuid.time_low);
    println!("time_mid:                  0x{:04x}", uuid.time_mid);
    println!("time_hi_and_version:       0x{:04x}", uuid.time_hi_and_version);
    println!("clock_seq_hi_and_reserved: 0x{:02x}", uuid.clock_seq_hi_and_reserved);
    println!("clock_seq_low:             0x{:02x}", uuid.clock_seq_low);
    println!("node:                      {}", hex_string(&uuid.node));
    println!("version:                   {}", uuid.version());
    println!("variant:                   {:?}", uuid.variant());

    Ok(())
}

fn cmd_bench(size_mib: usize, rounds: u32, width: Width, order: ByteOrder) -> Result<()> {
    if size_mib == 0 || rounds == 0 {
        bail!("--size-mib and --rounds must be positive");
    }
    let len = size_mib
        .checked_mul(1 << 20)
        .context("Payload size overflows usize")?;

    println!("Generating {} MiB payload...", size_mib);
    let payload = make_payload(len);

    let (cursor_fn, direct_fn): (SumFn, SumFn) = match width {
        Width::W8 => (cursor_sum::<u8>, direct_sum::<u8>),
        Width::W16 => (cursor_sum::<u16>, direct_sum::<u16>),
        Width::W32 => (cursor_sum::<u32>, direct_sum::<u32>),
        Width::W64 => (cursor_sum::<u64>, direct_sum::<u64>),
    };

    if cursor_fn(&payload, order) != direct_fn(&payload, order) {
        bail!("Cursor and direct decoding disagree");
    }

    let pb = ProgressBar::new(u64::from(rounds) * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut cursor_time = Duration::ZERO;
    let mut direct_time = Duration::ZERO;
    for round in 0..rounds {
        pb.set_message("cursor");
        let start = Instant::now();
        black_box(cursor_fn(black_box(&payload), order));
        let cursor_elapsed = start.elapsed();
        cursor_time += cursor_elapsed;
        pb.inc(1);

        pb.set_message("direct");
        let start = Instant::now();
        black_box(direct_fn(black_box(&payload), order));
        let direct_elapsed = start.elapsed();
        direct_time += direct_elapsed;
        pb.inc(1);

        debug!(round, ?cursor_elapsed, ?direct_elapsed, "bench round");
    }
    pb.finish_with_message("Done");

    let processed = (len as f64 / (1 << 20) as f64) * f64::from(rounds);
    let cursor_rate = processed / cursor_time.as_secs_f64();
    let direct_rate = processed / direct_time.as_secs_f64();

    println!("cursor: {:>10.1} MiB/s ({:?})", cursor_rate, cursor_time);
    println!("direct: {:>10.1} MiB/s ({:?})", direct_rate, direct_time);
    println!("ratio:  {:>10.3}", cursor_time.as_secs_f64() / direct_time.as_secs_f64());

    if cursor_time > direct_time * 2 {
        warn!("cursor reads are more than twice as slow as direct decoding");
    }

    Ok(())
}

type SumFn = fn(&[u8], ByteOrder) -> u64;

/// Sum every scalar in `data` through a bounds-checked cursor.
fn cursor_sum<T: Scalar + Into<u64>>(data: &[u8], order: ByteOrder) -> u64 {
    let mut cursor = ByteCursor::new(data, order);
    let mut sum = 0u64;
    while let Ok(value) = cursor.read::<T>() {
        sum = sum.wrapping_add(value.into());
    }
    sum
}

/// Sum every scalar in `data` by decoding fixed-size chunks directly.
fn direct_sum<T: Scalar + Into<u64>>(data: &[u8], order: ByteOrder) -> u64 {
    data.chunks_exact(T::SIZE)
        .filter_map(|chunk| T::decode(chunk, order))
        .map(Into::into)
        .fold(0u64, u64::wrapping_add)
}

/// Deterministic xorshift payload.
fn make_payload(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

/// Parse hex digits, ignoring hyphens and whitespace.
fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| *b != b'-' && !b.is_ascii_whitespace())
        .collect();

    if digits.len() % 2 != 0 {
        bail!("Odd number of hex digits ({})", digits.len());
    }

    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let (hi, lo) = (hex_digit(pair[0]), hex_digit(pair[1]));
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => bail!("Invalid hex digit in byte {}", i),
            }
        })
        .collect()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("00ff10").unwrap(), vec![0x00, 0xFF, 0x10]);
        assert_eq!(
            parse_hex("0011-2233 44AA").unwrap(),
            vec![0x00, 0x11, 0x22, 0x33, 0x44, 0xAA]
        );
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[rstest]
    #[case("abc")]
    #[case("zz")]
    #[case("0x")]
    fn test_parse_hex_invalid(#[case] text: &str) {
        assert!(parse_hex(text).is_err());
    }

    #[test]
    fn test_format_scalar() {
        let data = [0xFF, 0xFE, 0x00, 0x01];
        let mut cursor = ByteCursor::new(&data, ByteOrder::Big);

        assert_eq!(
            format_scalar(&mut cursor, Width::W8, true).unwrap(),
            "-1 (0xff)"
        );
        assert_eq!(
            format_scalar(&mut cursor, Width::W8, false).unwrap(),
            "254 (0xfe)"
        );
        assert_eq!(
            format_scalar(&mut cursor, Width::W16, false).unwrap(),
            "1 (0x0001)"
        );
        assert_eq!(
            format_scalar(&mut cursor, Width::W8, false).unwrap_err().kind(),
            ErrorKind::AttemptToReadPastEnd
        );
    }

    #[rstest]
    #[case(ByteOrder::Big)]
    #[case(ByteOrder::Little)]
    fn test_bench_paths_agree(#[case] order: ByteOrder) {
        let payload = make_payload(4096 + 3);
        assert_eq!(
            cursor_sum::<u16>(&payload, order),
            direct_sum::<u16>(&payload, order)
        );
        assert_eq!(
            cursor_sum::<u64>(&payload, order),
            direct_sum::<u64>(&payload, order)
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "bytefluo", "dump", "--input", "data.bin", "--width", "32", "--order", "little",
        ])
        .unwrap();
        match cli.command {
            Commands::Dump { width, order, .. } => {
                assert!(width == Width::W32);
                assert_eq!(order.order, ByteOrder::Little);
            }
            _ => panic!("expected dump"),
        }

        assert!(
            Cli::try_parse_from(["bytefluo", "dump", "--input", "x", "--order", "middle"]).is_err()
        );
        assert!(Cli::try_parse_from(["bytefluo", "uuid"]).is_err());
    }
}
