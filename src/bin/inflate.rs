use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gzinflate::{metadata, read_header};

const EXIT_ERROR: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "inflate")]
#[command(about = "Decompress a single-member GZIP file")]
#[command(version)]
struct Args {
    /// GZIP file to decompress
    file: PathBuf,

    /// Print diagnostic tracing (filename, mtime, byte counts) to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("inflate: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        eprintln!("reading {}", args.file.display());
    }

    let input = BufReader::new(File::open(&args.file)?);
    let (header, parser) = read_header(input)?;

    let output_name = match &header.filename {
        Some(name) if !name.is_empty() => name.clone(),
        _ => return Err("gzip member has no usable filename".into()),
    };
    let output_path = PathBuf::from(&output_name);

    if args.verbose {
        eprintln!("output filename: {}", output_name);
        eprintln!("mtime: {}", header.mtime);
    }

    let stats = {
        let mut writer = BufWriter::new(File::create(&output_path)?);
        gzinflate::inflate_body(parser, &mut writer)?
    };

    if args.verbose {
        eprintln!("uncompressed bytes: {}", stats.bytes_written);
        eprintln!("crc32: 0x{:08x}", stats.crc32);
    }

    metadata::set_mtime(&output_path, header.mtime)?;

    Ok(())
}
