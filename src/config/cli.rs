use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "utilkit")]
#[command(about = "File, digest and archive utilities")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the digest of a file
    Digest {
        file: PathBuf,
        #[arg(long, short, help = "MD5, SHA-1, SHA-256 or SHA-512")]
        algorithm: Option<String>,
    },
    /// Zip a file or a directory tree
    Zip {
        source: PathBuf,
        dest: PathBuf,
        #[arg(long, help = "Prefix entries with the source directory name")]
        include_root: bool,
    },
    /// Extract a zip archive
    Unzip { archive: PathBuf, dest: PathBuf },
    /// List the entries of a zip archive
    LsZip { archive: PathBuf },
    /// Gzip a file
    Gzip {
        file: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Decompress a .gz file
    Gunzip {
        file: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Copy a file, reporting progress
    Copy { src: PathBuf, dest: PathBuf },
    /// Human-readable size of a file or directory
    Size { path: PathBuf },
    /// List files below a directory
    Ls {
        dir: PathBuf,
        #[arg(long, short)]
        recursive: bool,
    },
    /// Generate an RSA key pair as PEM files
    Keygen {
        out_dir: PathBuf,
        #[arg(long, default_value_t = 2048)]
        bits: usize,
    },
}
