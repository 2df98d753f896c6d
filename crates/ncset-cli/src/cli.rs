use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ncset_core::Mode;

#[derive(Parser)]
#[command(name = "ncset")]
#[command(about = "Inspect and edit NCSET camera menu-settings dumps", version)]
pub struct Args {
    /// Detection settings (TOML)
    #[arg(short, long, global = true, env = "NCSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra generation profiles (JSON)
    #[arg(long, global = true, env = "NCSET_GENERATIONS")]
    pub generations: Option<PathBuf>,

    /// Generation profile to use instead of guessing from the file size
    #[arg(short, long, global = true)]
    pub generation: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Locate every mode's section and print the result
    Detect {
        file: PathBuf,
        /// Write a JSON detection report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the i-menu of each detected section
    Show {
        file: PathBuf,
        /// Only this mode (e.g., M, U1)
        #[arg(short, long)]
        mode: Option<Mode>,
    },
    /// Set one i-menu slot
    SetSlot {
        file: PathBuf,
        #[arg(short, long)]
        mode: Mode,
        /// Slot number as shown on the camera (1-12)
        #[arg(short, long)]
        slot: usize,
        /// Item ID (0 clears the slot)
        #[arg(short, long)]
        item: u32,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Set the file-name prefix of a section
    SetPrefix {
        file: PathBuf,
        #[arg(short, long)]
        mode: Mode,
        prefix: String,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Copy one section over another, keeping the target's mode byte
    CopySection {
        file: PathBuf,
        #[arg(long)]
        from: Mode,
        #[arg(long)]
        to: Mode,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Reset a section to defaults
    ResetSection {
        file: PathBuf,
        #[arg(short, long)]
        mode: Mode,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Check the CRC footer
    Verify { file: PathBuf },
    /// Rewrite the CRC footer
    Repair {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export detected sections as JSON
    Export {
        file: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List differing bytes between two dumps
    Compare {
        before: PathBuf,
        after: PathBuf,
        /// Show at most this many differences
        #[arg(short, long, default_value = "200")]
        limit: usize,
    },
    /// Dump raw bytes
    Hexdump {
        file: PathBuf,
        /// Start offset (decimal, or hex with 0x)
        offset: String,
        #[arg(short, long, default_value = "256")]
        size: usize,
        /// Show ASCII column
        #[arg(short, long)]
        ascii: bool,
    },
    /// Score one offset as a section start for every mode
    Probe {
        file: PathBuf,
        /// Offset (decimal, or hex with 0x)
        offset: String,
    },
    /// Calculate the distance between two offsets
    Offset { from: String, to: String },
}

#[derive(clap::Args)]
pub struct WriteArgs {
    /// Write here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edit sections that overlap another mode's section
    #[arg(long)]
    pub force: bool,
}
