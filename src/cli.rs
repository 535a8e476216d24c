use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{ReportKind, ScanRequest};

#[derive(Parser, Debug)]
#[command(name = "patchscan")]
#[command(about = "Harmony patch inventory and conflict scanner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every patch grouped by the mod that owns it
    Scan(ScanArgs),

    /// Report methods patched by more than one mod, ranked by risk
    Conflicts(ScanArgs),

    /// Write both the inventory and the conflict report
    All(ScanArgs),

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Report kind for scan commands; `None` for `init`.
    pub fn report_kind(&self) -> Option<ReportKind> {
        match self {
            Self::Scan(_) => Some(ReportKind::Inventory),
            Self::Conflicts(_) => Some(ReportKind::Conflicts),
            Self::All(_) => Some(ReportKind::Both),
            Self::Init { .. } => None,
        }
    }

    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Scan(args) | Self::Conflicts(args) | Self::All(args) => args.verbosity,
            Self::Init { .. } => 0,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Patch registry snapshot (.json, .yaml or .yml)
    pub snapshot: PathBuf,

    /// Directory the reports are written to (overrides config)
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (defaults to .patchscan.toml discovery)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep patches on common lifecycle methods
    #[arg(long = "include-lifecycle")]
    pub include_lifecycle: bool,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    ///
    /// -v: Show scan progress
    /// -vv: Show per-target decisions
    /// -vvv: Show all debug information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl ScanArgs {
    pub fn into_request(self, kind: ReportKind) -> ScanRequest {
        ScanRequest {
            snapshot: self.snapshot,
            kind,
            output_dir: self.output_dir,
            config: self.config,
            include_lifecycle: self.include_lifecycle,
            plain: self.plain,
        }
    }
}
