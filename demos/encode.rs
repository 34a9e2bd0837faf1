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
        Place::municipality("Samone", PlaceCode::parse("H753").unwrap(), "TO"),
        Place::municipality("Samone", PlaceCode::parse("H754").unwrap(), "TN"),
    ])
    .unwrap();

    // ── 1. Born in a municipality, looked up by name ──────────────────
    let mario = IdentityBuilder::new()
        .surname("Rossi")
        .name("Mario")
        .sex(Sex::Male)
        .birth_date(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
        .born_in("Roma")
        .build();
    let code = encode(&mario, &registry).unwrap();
    println!("Mario Rossi:        {code}");

    // ── 2. Ambiguous name, disambiguated by province ──────────────────
    let anna = IdentityBuilder::new()
        .surname("D'Àngelo")
        .name("Anna")
        .sex(Sex::Female)
        .birth_date(NaiveDate::from_ymd_opt(2000, 2, 29).unwrap())
        .born_in_province("Samone", "TN")
        .build();
    println!("Anna D'Àngelo:      {}", encode(&anna, &registry).unwrap());

    // ── 3. Born abroad ────────────────────────────────────────────────
    let giuseppe = IdentityBuilder::new()
        .surname("Verdi")
        .name("Giuseppe")
        .sex(Sex::Male)
        .birth_date(NaiveDate::from_ymd_opt(1930, 10, 10).unwrap())
        .born_abroad("US")
        .build();
    println!("Giuseppe Verdi:     {}", encode(&giuseppe, &registry).unwrap());

    // ── 4. Omocodia variants ──────────────────────────────────────────
    println!("\nOmocode variants of {code}:");
    for level in 1..=7 {
        let variant = code.omocode(level);
        println!("  level {level}: {variant} (same person: {})", variant.same_person(&code));
    }

    // ── 5. Decoding ───────────────────────────────────────────────────
    let decoded = decode(code.as_str(), &ValidationOptions::default()).unwrap();
    let place = decode_place(&decoded, &registry).unwrap();
    println!(
        "\n{} → born {} ({}) in {}",
        decoded.code,
        decoded.birth_date,
        decoded.sex,
        place.label()
    );
}
