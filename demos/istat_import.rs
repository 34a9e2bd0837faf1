//! Load the ISTAT municipality list and encode against it.
//!
//! Usage: `cargo run --example istat_import --features istat -- Elenco-comuni-italiani.csv`

use std::process::ExitCode;

use chrono::NaiveDate;
use codice_fiscale::registry::PlaceRegistry;
use codice_fiscale::registry::istat::decode_latin1;
use codice_fiscale::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_target(false)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: istat_import <Elenco-comuni-italiani.csv>");
        return ExitCode::FAILURE;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("cannot read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let registry = match PlaceRegistry::from_istat_csv(&decode_latin1(&bytes)) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("cannot load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{} places loaded", registry.len());

    for place in registry.search("reggio", 5) {
        println!("  {} = {}", place.label(), place.code);
    }

    let identity = IdentityBuilder::new()
        .surname("Ferrari")
        .name("Luca")
        .sex(Sex::Male)
        .birth_date(NaiveDate::from_ymd_opt(1990, 5, 20).unwrap())
        .born_in_province("Reggio nell'Emilia", "RE")
        .build();
    match encode(&identity, &registry) {
        Ok(code) => println!("Luca Ferrari: {code}"),
        Err(e) => println!("Luca Ferrari: {e}"),
    }
    ExitCode::SUCCESS
}
