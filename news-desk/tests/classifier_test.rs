use news_desk::{KeywordSets, RelevanceClassifier, Verdict};
use std::sync::Arc;

fn classifier() -> RelevanceClassifier {
    RelevanceClassifier::new(Arc::new(KeywordSets::default()))
}

#[test]
fn test_security_and_location_is_accepted() {
    let verdict = classifier().classify_text(
        "PM apreende drogas em Vitória",
        "policiais militares apreenderam crack",
        "Google News",
    );
    assert_eq!(verdict, Verdict::Accept);
}

#[test]
fn test_blacklist_rejects_off_topic() {
    let verdict = classifier().classify_text("Novela bate recorde de audiência", "", "Google News");
    assert_eq!(verdict, Verdict::Reject);
}

#[test]
fn test_blacklist_veto_beats_security_and_location() {
    // security ("polícia"), location ("vitória") and blacklist ("jogo") all match
    let verdict = classifier().classify_text("Polícia investiga briga após jogo em Vitória", "", "Google News");
    assert_eq!(verdict, Verdict::Reject);
}

#[test]
fn test_security_without_location_or_local_source_is_rejected() {
    let verdict = classifier().classify_text("Polícia prende suspeito em Curitiba", "", "Google News");
    assert_eq!(verdict, Verdict::Reject);
}

#[test]
fn test_local_source_stands_in_for_location() {
    let in_text = classifier().classify_text("Polícia prende suspeito em Curitiba", "segundo a Tribuna", "Google News");
    assert_eq!(in_text, Verdict::Accept);

    let in_label = classifier().classify_text("Polícia prende suspeito em Curitiba", "", "Tribuna Online");
    assert_eq!(in_label, Verdict::Accept);
}

#[test]
fn test_location_without_security_is_rejected() {
    let verdict = classifier().classify_text("Festival de inverno em Domingos Martins", "", "A Gazeta");
    assert_eq!(verdict, Verdict::Reject);
}

#[test]
fn test_matching_is_case_insensitive() {
    let verdict = classifier().classify_text("TIROTEIO EM CARIACICA", "", "Google News");
    assert_eq!(verdict, Verdict::Accept);
}

#[test]
fn test_verdict_is_a_function_of_text_only() {
    let c = classifier();
    let first = c.classify_text("Homicídio em Linhares", "corpo encontrado", "Google News");
    for _ in 0..5 {
        assert_eq!(c.classify_text("Homicídio em Linhares", "corpo encontrado", "Google News"), first);
    }
    assert_eq!(first, Verdict::Accept);
}

#[test]
fn test_custom_keyword_sets() {
    let keywords = KeywordSets {
        blacklist: vec!["lottery".to_string()],
        security_terms: vec!["police".to_string()],
        location_terms: vec!["springfield".to_string()],
        local_sources: vec![],
    };
    let c = RelevanceClassifier::new(Arc::new(keywords));

    assert_eq!(c.classify_text("Police close road in Springfield", "", ""), Verdict::Accept);
    assert_eq!(c.classify_text("Police lottery in Springfield", "", ""), Verdict::Reject);
    assert_eq!(c.classify_text("Police close road in Shelbyville", "", ""), Verdict::Reject);
}

#[test]
fn test_keyword_sets_from_file_lowercases_terms() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    std::fs::write(
        &path,
        r#"{
            "blacklist": ["Loteria", "  "],
            "security_terms": ["Polícia"],
            "location_terms": ["Vitória"],
            "local_sources": ["Gazeta"]
        }"#,
    )
    .unwrap();

    let keywords = KeywordSets::from_file(&path).unwrap();
    assert_eq!(keywords.blacklist, vec!["loteria".to_string()]);
    assert_eq!(keywords.security_terms, vec!["polícia".to_string()]);

    let c = RelevanceClassifier::new(Arc::new(keywords));
    assert_eq!(c.classify_text("POLÍCIA fecha rua em VITÓRIA", "", ""), Verdict::Accept);
    assert_eq!(c.classify_text("Polícia sorteia loteria em Vitória", "", ""), Verdict::Reject);
}

#[test]
fn test_keyword_sets_from_file_requires_security_terms() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    std::fs::write(&path, r#"{"security_terms": []}"#).unwrap();

    assert!(KeywordSets::from_file(&path).is_err());
}

#[test]
fn test_keyword_sets_missing_lists_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    std::fs::write(&path, r#"{"blacklist": ["loteria"]}"#).unwrap();

    let keywords = KeywordSets::from_file(&path).unwrap();
    assert_eq!(keywords.blacklist, vec!["loteria".to_string()]);
    assert_eq!(keywords.security_terms, KeywordSets::default().security_terms);
}

#[test]
fn test_mixed_case_terms_built_in_code_still_match() {
    let keywords = KeywordSets {
        blacklist: vec!["Lottery".to_string(), "".to_string()],
        security_terms: vec!["POLICE".to_string()],
        location_terms: vec!["Springfield".to_string()],
        local_sources: vec!["Shelbyville Herald".to_string()],
    };
    assert!(!keywords.is_lowercased());
    let c = RelevanceClassifier::new(Arc::new(keywords));

    assert_eq!(c.classify_text("Police close road in Springfield", "", ""), Verdict::Accept);
    assert_eq!(c.classify_text("Police close road", "", "Shelbyville Herald"), Verdict::Accept);
    assert_eq!(c.classify_text("Police lottery in Springfield", "", ""), Verdict::Reject);
}

#[test]
fn test_default_keyword_sets_are_already_lowercase() {
    assert!(KeywordSets::default().is_lowercased());
}
