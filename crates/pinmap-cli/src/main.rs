// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use pinmap_geocode::{run_process_job, HttpGeocoder, ProcessOptions};
use pinmap_store::CsvAddressStore;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinmap")]
#[command(about = "Pinmap operations CLI", version)]
struct Cli {
    /// Emit machine-readable JSON instead of human output.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Geocode a raw address list into the CSV store.
    Process {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        csv: PathBuf,
        /// Where unresolvable addresses are reported. Defaults to
        /// `addresses_failed.txt` next to the CSV.
        #[arg(long)]
        failed: Option<PathBuf>,
        /// Keep existing records and continue id assignment after them.
        #[arg(long, default_value_t = false)]
        append: bool,
    },
    /// Print the records in the CSV store.
    List {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Re-validate every record in the CSV store.
    Validate {
        #[arg(long)]
        csv: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Process {
            input,
            csv,
            failed,
            append,
        } => run_process(input, csv, failed, append, cli.json),
        Commands::List { csv } => run_list(&csv, cli.json),
        Commands::Validate { csv } => run_validate(&csv, cli.json),
    }
}

fn default_failed_path(csv: &PathBuf) -> PathBuf {
    csv.parent()
        .map(|dir| dir.join("addresses_failed.txt"))
        .unwrap_or_else(|| PathBuf::from("addresses_failed.txt"))
}

fn run_process(
    input: PathBuf,
    csv: PathBuf,
    failed: Option<PathBuf>,
    append: bool,
    machine_json: bool,
) -> Result<(), String> {
    let geocoder = HttpGeocoder::from_env().map_err(|e| e.to_string())?;
    let failed_path = failed.unwrap_or_else(|| default_failed_path(&csv));
    let options = ProcessOptions {
        input_path: input,
        csv_path: csv,
        failed_path,
        append,
    };
    let report = run_process_job(&options, &geocoder).map_err(|e| e.to_string())?;
    if machine_json {
        println!(
            "{}",
            json!({
                "processed": report.processed,
                "successful": report.successful,
                "failed": report.failed,
            })
        );
    } else {
        println!(
            "processed {} addresses: {} successful, {} failed",
            report.processed,
            report.successful,
            report.failed.len()
        );
        for query in &report.failed {
            println!("  failed: {query}");
        }
    }
    Ok(())
}

fn run_list(csv: &PathBuf, machine_json: bool) -> Result<(), String> {
    let store = CsvAddressStore::new(csv);
    let records = store.list().map_err(|e| e.to_string())?;
    if machine_json {
        let body = serde_json::to_string(&records).map_err(|e| e.to_string())?;
        println!("{body}");
    } else {
        for record in &records {
            let marker = if record.visible { "shown" } else { "hidden" };
            println!(
                "{:>4}  {:<40}  ({:.6}, {:.6})  {}",
                record.id, record.name, record.lat, record.lng, marker
            );
        }
        println!("{} records", records.len());
    }
    Ok(())
}

fn run_validate(csv: &PathBuf, machine_json: bool) -> Result<(), String> {
    let store = CsvAddressStore::new(csv);
    let records = store.list().map_err(|e| e.to_string())?;
    let mut violations = Vec::new();
    let mut seen = std::collections::BTreeSet::new();
    for record in &records {
        if !seen.insert(record.id) {
            violations.push(format!("id {} appears more than once", record.id));
        }
        if let Err(e) = record.validate() {
            violations.push(format!("id {}: {e}", record.id));
        }
    }
    if machine_json {
        println!(
            "{}",
            json!({
                "records": records.len(),
                "valid": violations.is_empty(),
                "violations": violations,
            })
        );
    } else {
        println!("{} records checked", records.len());
        for violation in &violations {
            println!("  violation: {violation}");
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(format!("{} validation violations", violations.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_process_flags() {
        let cli = Cli::try_parse_from([
            "pinmap", "process", "--input", "raw.txt", "--csv", "out.csv", "--append", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Process { append, failed, .. } => {
                assert!(append);
                assert!(failed.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["pinmap", "frobnicate"]).is_err());
    }

    #[test]
    fn failed_path_defaults_next_to_csv() {
        let p = default_failed_path(&PathBuf::from("data/addresses.csv"));
        assert_eq!(p, PathBuf::from("data/addresses_failed.txt"));
    }

    #[test]
    fn validate_reports_clean_store() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("addresses.csv");
        let store = CsvAddressStore::new(&csv);
        let candidate =
            pinmap_model::Candidate::new("Spot", "1 Main St, Washington, DC", 38.9, -77.0)
                .unwrap();
        store.create(candidate).unwrap();
        assert!(run_validate(&csv, true).is_ok());
    }
}
