//! Persisted record image generator.
//!
//! Builds the 3-byte range record a device would hold after an operator saved
//! the given range, so boards can be provisioned before first boot.
//!
//! ```bash
//! cargo run --features imagegen --bin cellarstat-imagegen -- cellar.toml [record.bin]
//! ```
//!
//! `cellar.toml`:
//!
//! ```toml
//! [range]
//! lower = 8
//! upper = 16
//! ```
//!
//! The image is printed in hex and, when an output path is given, written as
//! raw bytes.

use cellarstat::store::RECORD_SIZE;
use cellarstat::{DefaultConfig, RamMedium, RangeController, RangeStore, UpdateOutcome};
use serde::Deserialize;
use std::process::ExitCode;
use std::{env, fs};

#[derive(Debug, Deserialize)]
struct Provisioning {
    range: RangeSection,
}

#[derive(Debug, Deserialize)]
struct RangeSection {
    lower: i8,
    upper: i8,
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(config_path) = args.next() else {
        eprintln!("usage: cellarstat-imagegen <config.toml> [output.bin]");
        return ExitCode::FAILURE;
    };
    let output_path = args.next();

    match run(&config_path, output_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str, output_path: Option<&str>) -> Result<(), String> {
    let text = fs::read_to_string(config_path)
        .map_err(|e| format!("cannot read {}: {}", config_path, e))?;
    let provisioning: Provisioning =
        toml::from_str(&text).map_err(|e| format!("invalid {}: {}", config_path, e))?;

    let image = build_image(&provisioning.range)?;

    let hex: Vec<String> = image.iter().map(|b| format!("{:02x}", b)).collect();
    println!("{}", hex.join(" "));

    if let Some(path) = output_path {
        fs::write(path, image).map_err(|e| format!("cannot write {}: {}", path, e))?;
        println!("written to {}", path);
    }

    Ok(())
}

fn build_image(range: &RangeSection) -> Result<[u8; RECORD_SIZE], String> {
    let mut controller = RangeController::<_, DefaultConfig>::new(RangeStore::new(
        RamMedium::<RECORD_SIZE>::new(),
    ));

    let outcome = controller
        .update(range.lower, range.upper)
        .map_err(|e| e.to_string())?;

    if outcome == UpdateOutcome::Unchanged {
        println!("range equals the factory range, record left erased");
    }

    Ok(*controller.store().medium().committed())
}
