//! End-to-end tests of the compile pipeline through the public API.

use std::io::Read;

use flate2::read::DeflateDecoder;

use trellis::{DiagramBuilder, config::AppConfig, decode_token};

fn builder() -> DiagramBuilder {
    DiagramBuilder::new(AppConfig::default())
}

#[test]
fn entity_with_primary_key_compiles() {
    let source = "User: {\n  shape: rectangle\n  id: int {constraint: primary_key}\n  name: string\n}";
    let compiled = builder().compile(source).unwrap();

    let markup = compiled.markup();
    let entity_pos = markup.find("entity User {").expect("entity header");
    let pk_pos = markup.find("  *id : int").expect("primary key field");
    let name_pos = markup.find("  name : string").expect("plain field");
    let close_pos = markup[entity_pos..].find("\n}").expect("block close") + entity_pos;
    let end_pos = markup.find("@enduml").expect("document close");

    assert!(entity_pos < pk_pos);
    assert!(pk_pos < name_pos);
    assert!(name_pos < close_pos);
    assert!(close_pos < end_pos);
    assert!(!compiled.token().is_empty());
}

#[test]
fn relation_only_source_compiles() {
    let compiled = builder()
        .compile("User.id -> Order.user_id")
        .unwrap();

    let body: Vec<&str> = compiled.markup().lines().collect();
    assert_eq!(
        body,
        vec!["@startuml", "User::id --> Order::user_id", "@enduml"]
    );
}

#[test]
fn empty_source_compiles_to_bare_document() {
    let compiled = builder().compile("").unwrap();

    assert_eq!(compiled.markup(), "@startuml\n@enduml");
    assert!(!compiled.token().is_empty());
}

#[test]
fn url_is_default_base_plus_token() {
    let compiled = builder().compile("A: { x: int }").unwrap();

    assert_eq!(
        compiled.url(),
        format!("http://www.plantuml.com/plantuml/png/{}", compiled.token())
    );
}

#[test]
fn configured_base_url_is_used() {
    let config: AppConfig =
        toml::from_str("[server]\nbase_url = \"https://uml.internal/png/\"\n").unwrap();
    let compiled = DiagramBuilder::new(config).compile("").unwrap();

    assert!(compiled.url().starts_with("https://uml.internal/png/"));
}

#[test]
fn token_round_trips_through_service_decoder() {
    let source = "User: {\n  id: int {constraint: primary_key}\n}\nOrder: {\n  user_id: int\n}\nOrder.user_id -> User.id";
    let compiled = builder().compile(source).unwrap();

    // What the remote service does: undo the alphabet, inflate the raw
    // DEFLATE payload, interpret the markup.
    let payload = decode_token(compiled.token()).unwrap();
    let mut recovered = Vec::new();
    DeflateDecoder::new(&payload[..])
        .read_to_end(&mut recovered)
        .expect("payload should inflate");

    // The encoder may have zero-padded the final symbol group; inflation
    // stops at the end of the DEFLATE stream, so the markup is exact.
    assert_eq!(recovered, compiled.markup().as_bytes());
}

#[test]
fn compilation_is_deterministic() {
    let source = "A: { x: int }\nB: { y: int }\nA.x -> B.y";
    let first = builder().compile(source).unwrap();
    let second = builder().compile(source).unwrap();

    assert_eq!(first.markup(), second.markup());
    assert_eq!(first.token(), second.token());
    assert_eq!(first.url(), second.url());
}

#[test]
fn token_is_url_safe() {
    let compiled = builder()
        .compile("Account: {\n  iban: string {constraint: unique}\n}")
        .unwrap();

    assert!(
        compiled
            .token()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    );
}
