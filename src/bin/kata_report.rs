//! Validates the interface segregation katas and reports the findings.
//!
//! # Environment Variables
//!
//! - `SEGREGATE_STRICT`: `1`/`true` makes `check` fail on any warning
//! - `SEGREGATE_CAPABILITIES`: extra capability YAML directory (default: "capabilities")
//! - `RUST_LOG`: Tracing filter (default: "info,segregate=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin kata_report            # human-readable report
//! cargo run --bin kata_report -- list    # registered capabilities
//! SEGREGATE_STRICT=1 cargo run --bin kata_report -- check
//! ```

use anyhow::bail;
use segregate::capabilities::global;
use segregate::cli::{parse_args, CliCommand};
use segregate::katas::catalog;
use segregate::katas::Stage;
use segregate::validation::ValidationPolicy;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,segregate=debug".into()),
        )
        .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => bail!(message),
    };

    if command == CliCommand::Version {
        println!("segregate {}", segregate::VERSION);
        return Ok(());
    }

    let extra_dir =
        std::env::var("SEGREGATE_CAPABILITIES").unwrap_or_else(|_| "capabilities".to_string());
    let registry = global();
    let (katas, extra) = registry.write(|r| -> anyhow::Result<(usize, usize)> {
        r.add_search_path(&extra_dir);
        let katas = catalog::register_all(r)?;
        let extra = r.load_all()?;
        Ok((katas, extra))
    })?;
    tracing::debug!(
        "Registered {} kata capabilities and {} from {}",
        katas,
        extra,
        extra_dir
    );

    match command {
        CliCommand::List => {
            registry.read(|r| {
                for capability in r.all() {
                    let ops: Vec<String> =
                        capability.operations.iter().map(ToString::to_string).collect();
                    println!("{}: {}", capability.name, ops.join(", "));
                }
            });
        }
        CliCommand::Report => {
            let mut current = None;
            for entry in catalog::validate_all(registry)? {
                if current != Some(entry.kata) {
                    println!("== {}: {} ==", entry.kata, entry.kata.title());
                    current = Some(entry.kata);
                }
                println!("[{}/{}] {}", entry.kata, entry.stage, entry.report);
            }
        }
        CliCommand::Json => {
            let reports = catalog::validate_all(registry)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        CliCommand::Check => {
            let policy = ValidationPolicy::from_env();
            let mut failures = 0;
            for entry in catalog::validate_all(registry)? {
                let applied = match entry.stage {
                    Stage::After => ValidationPolicy::strict(),
                    Stage::Before => policy,
                };
                if let Err(e) = entry.report.enforce(&applied) {
                    tracing::error!("[{}/{}] {}", entry.kata, entry.stage, e);
                    failures += 1;
                }
            }
            if failures > 0 {
                bail!("{} entities failed validation", failures);
            }
            tracing::info!("All kata entities passed validation");
        }
        CliCommand::Version => {}
    }

    Ok(())
}
