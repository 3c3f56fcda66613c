mod cli;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, ScanArgs};
use nidscan::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
  let default = if verbose { "nidscan=debug,nidscan_ocr=debug" } else { "nidscan=info,nidscan_ocr=warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

async fn read_image(args: &ScanArgs) -> Result<OcrInput> {
  let image = if args.base64 {
    let text = tokio::fs::read_to_string(&args.image)
      .await
      .with_context(|| format!("Failed to read {}", args.image.display()))?;
    decode_base64_image(&text)
  } else {
    let bytes = tokio::fs::read(&args.image)
      .await
      .with_context(|| format!("Failed to read {}", args.image.display()))?;
    image_from_bytes(bytes)
  };
  image.with_context(|| format!("Unusable image {}", args.image.display()))
}

fn print_draft(draft: &OnboardingDraft) {
  println!("NID status: {}", draft.nid_status);
  println!("Full name:  {}", draft.full_name);
  println!("NID number: {}", draft.nid_number);
  if let Some(data) = &draft.nid_data {
    println!(
      "Scan:       name={} id={} confidence={:.0}%",
      data.extracted_name,
      data.extracted_id,
      data.match_confidence * 100.0
    );
  }
}

async fn scan(args: ScanArgs) -> Result<ExitCode> {
  let image = read_image(&args).await?;

  let options = VerifierOptions::default()
    .with_timeout(Duration::from_secs(args.timeout_secs))
    .with_tesseract_binary(&args.tesseract);
  let verifier = Verifier::tesseract(options);

  let mut session = ScanSession::new();
  session.set_full_name(args.name.clone().unwrap_or_default());
  session.set_nid_number(args.nid.clone().unwrap_or_default());
  session.set_address(args.address.clone().unwrap_or_default());
  session.set_phone(args.phone.clone().unwrap_or_default());
  session.set_email(args.email.clone().unwrap_or_default());

  let cancel = CancellationToken::new();
  let on_interrupt = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      on_interrupt.cancel();
    }
  });

  let scanned = session.scan_with_cancel(&verifier, &image, cancel).await;
  if let Err(e) = &scanned {
    eprintln!("Error: {}", e);
  }

  if args.json {
    println!("{}", serde_json::to_string_pretty(session.draft())?);
  } else {
    print_draft(session.draft());
  }

  let status = session.status();
  if args.record {
    let mut log = AuditLog::open(&args.audit_log).await?;
    let record = session.finalize(fingerprint());
    if !args.json {
      println!("Recorded {} ({})", record.id, record.signature_fingerprint);
    }
    log.append(record).await?;
  }

  Ok(match (scanned, status) {
    (Err(_), _) => ExitCode::FAILURE,
    (Ok(_), NidStatus::Verified) => ExitCode::SUCCESS,
    (Ok(_), _) => ExitCode::from(2),
  })
}

async fn audit(file: std::path::PathBuf, json: bool) -> Result<ExitCode> {
  let log = AuditLog::open(&file).await?;
  let stats = log.stats();

  if json {
    let out = serde_json::json!({ "records": log.records(), "stats": stats });
    println!("{}", serde_json::to_string_pretty(&out)?);
    return Ok(ExitCode::SUCCESS);
  }

  println!("{} records in {}", stats.total, log.path().display());
  for record in log.records() {
    let confidence = record.nid_data.as_ref().map(|d| d.match_confidence).unwrap_or(0.0);
    println!(
      "{}  {:<24} {:<11} {:>3.0}%  {}",
      record.signed_at.format("%Y-%m-%d %H:%M"),
      record.full_name,
      record.nid_status.as_str(),
      confidence * 100.0,
      record.signature_fingerprint
    );
  }
  println!(
    "Verified: {}  Rejected: {}  Rejection rate: {:.0}%",
    stats.verified,
    stats.rejected,
    stats.rejection_rate * 100.0
  );
  Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Args::parse();
  init_tracing(args.verbose);

  let result = match args.command {
    Commands::Version => {
      println!("nidscan {}", env!("CARGO_PKG_VERSION"));
      Ok(ExitCode::SUCCESS)
    }
    Commands::Scan(scan_args) => scan(scan_args).await,
    Commands::Audit { file, json } => audit(file, json).await,
  };

  match result {
    Ok(code) => code,
    Err(e) => {
      eprintln!("Error: {:#}", e);
      ExitCode::FAILURE
    }
  }
}
