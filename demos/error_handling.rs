use chrono::NaiveDate;
use codice_fiscale::registry::{PlaceRegistry, RegistryError};
use codice_fiscale::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // ── 1. Encoding errors ────────────────────────────────────────────
    println!("=== Encoding ===");
    let registry = PlaceRegistry::with_foreign_countries(vec![
        Place::municipality("Castro", PlaceCode::parse("C336").unwrap(), "BG"),
        Place::municipality("Castro", PlaceCode::parse("M261").unwrap(), "LE"),
    ])
    .unwrap();

    let incomplete = IdentityBuilder::new().surname("Rossi").build();
    match encode(&incomplete, &registry) {
        Ok(code) => println!("  unexpected: {code}"),
        Err(e) => println!("  {e}"),
    }

    let ambiguous = IdentityBuilder::new()
        .surname("Rossi")
        .name("Mario")
        .sex(Sex::Male)
        .birth_date(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
        .born_in("Castro")
        .build();
    match encode(&ambiguous, &registry) {
        Ok(code) => println!("  unexpected: {code}"),
        Err(e @ CodeError::UnresolvedPlace(_)) => println!("  {e} (add a province)"),
        Err(e) => println!("  {e}"),
    }

    // ── 2. Structural vs field errors ─────────────────────────────────
    println!("\n=== Validation ===");
    for code in ["RSSMRA80A01H5", "RSSMRA80Z01H501U", "RSSMRA80A01H501X"] {
        let report = validate_with(code, None, &registry, &ValidationOptions::default());
        let kind = if report.is_structural_failure() {
            "structural"
        } else {
            "recoverable"
        };
        for error in &report.errors {
            println!("  {code}: [{kind}] {error}");
        }
    }

    // ── 3. Registry errors ────────────────────────────────────────────
    println!("\n=== Registry ===");
    let result = PlaceRegistry::new(vec![
        Place::municipality("Roma", PlaceCode::parse("H501").unwrap(), "RM"),
        Place::municipality("Roma", PlaceCode::parse("H501").unwrap(), "RM"),
    ]);
    if let Err(e @ RegistryError::DuplicateCode(_)) = result {
        println!("  {e}");
    }

    match "H5O1".parse::<PlaceCode>() {
        Ok(code) => println!("  unexpected: {code}"),
        Err(e) => println!("  {e}"),
    }
}
