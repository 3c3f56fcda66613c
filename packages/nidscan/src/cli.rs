//! Command line arguments backing the `nidscan` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "nidscan",
  about = "Scan national ID cards and verify ambassador onboarding details",
  version
)]
pub struct Args {
  /// Log debug output to stderr
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Scan an ID card image and reconcile it into an onboarding draft
  Scan(ScanArgs),
  /// Show the onboarding audit log
  Audit {
    /// Audit log file
    #[arg(long, short = 'f', env = "NIDSCAN_AUDIT_LOG", default_value = "nid_audit.json")]
    file: PathBuf,

    /// Print the records and statistics as JSON
    #[arg(long)]
    json: bool,
  },
}

#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
  /// Image of the ID card
  pub image: PathBuf,

  /// Treat the file as base64 text (a bare payload or a data: URL)
  #[arg(long)]
  pub base64: bool,

  /// Full name typed by the ambassador
  #[arg(long)]
  pub name: Option<String>,

  /// NID number typed by the ambassador
  #[arg(long)]
  pub nid: Option<String>,

  #[arg(long)]
  pub address: Option<String>,

  #[arg(long)]
  pub phone: Option<String>,

  #[arg(long)]
  pub email: Option<String>,

  /// Print the resulting draft as JSON
  #[arg(long)]
  pub json: bool,

  /// Seconds before a recognition attempt is abandoned
  #[arg(long, env = "NIDSCAN_TIMEOUT_SECS", default_value = "30")]
  pub timeout_secs: u64,

  /// Path to the tesseract executable
  #[arg(long, env = "NIDSCAN_TESSERACT", default_value = "tesseract")]
  pub tesseract: PathBuf,

  /// Finalize the draft and append it to the audit log
  #[arg(long)]
  pub record: bool,

  /// Audit log file used with --record
  #[arg(long, env = "NIDSCAN_AUDIT_LOG", default_value = "nid_audit.json")]
  pub audit_log: PathBuf,
}
