use chrono::NaiveDate;
use codice_fiscale::registry::PlaceRegistry;
use codice_fiscale::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let registry = PlaceRegistry::with_foreign_countries(vec![
        Place::municipality("Roma", PlaceCode::parse("H501").unwrap(), "RM"),
        Place::municipality("Milano", PlaceCode::parse("F205").unwrap(), "MI"),
    ])
    .unwrap();

    let identity = IdentityBuilder::new()
        .surname("Bianchi")
        .name("Maria")
        .sex(Sex::Female)
        .birth_date(NaiveDate::from_ymd_opt(1985, 6, 15).unwrap())
        .born_in("Milano")
        .build();

    for code in [
        "BNCMRA85H55F205Q",
        "bncmra85h55f205q",
        "BNCMRA85H55F205X",
        "RSSMRA80A01H501U",
        "BNCMRA85H55F2LRW",
    ] {
        let report = validate_with(code, Some(&identity), &registry, &ValidationOptions::default());
        if report.is_valid() {
            println!("{code}: valid");
        } else {
            println!("{code}: {} error(s), stopped at {:?}", report.errors.len(), report.stage);
            for error in &report.errors {
                println!("  - {error}");
            }
        }
    }

    // User input is cleaned explicitly; parsing itself is strict.
    let typed = " bncmra 85h55 f205q ";
    let cleaned = clean_code(typed);
    println!("\n{typed:?} cleaned to {cleaned}: {:?}", cleaned.parse::<FiscalCode>().is_ok());

    // Strict options: no omocodia, legacy century rule, every field required.
    let strict = ValidationOptionsBuilder::new()
        .allow_omocodia(false)
        .century(CenturyPolicy::Twentieth)
        .require_all()
        .build();
    let partial = IdentityBuilder::new().surname("Bianchi").build();
    let report = validate_with("BNCMRA85H55F205Q", Some(&partial), &registry, &strict);
    println!("\nStrict validation of a partial identity:");
    for error in &report.errors {
        println!("  - {error}");
    }
}
