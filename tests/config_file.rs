// tests/config_file.rs
//
// The shipped config must parse and match the built-in defaults, so running
// with or without the file gives the same labels.

use std::path::Path;

use mood_personalizer::config::DEFAULT_PERSONALIZATION_CONFIG_PATH;
use mood_personalizer::{DiaryEntry, PersonalizationConfig, Personalizer};

fn shipped() -> PersonalizationConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_PERSONALIZATION_CONFIG_PATH);
    PersonalizationConfig::load_from_file(&path).expect("shipped config should parse")
}

#[test]
fn shipped_config_equals_defaults() {
    assert_eq!(shipped(), PersonalizationConfig::default());
}

#[test]
fn shipped_config_drives_same_decisions() {
    let entries: Vec<DiaryEntry> = ["pleasant", "neutral", "unpleasant", "pleasant", "pleasant"]
        .iter()
        .map(|c| DiaryEntry::new(*c))
        .collect();

    let from_file = Personalizer::new(shipped()).personalize(&entries);
    let built_in = Personalizer::default().personalize(&entries);
    assert_eq!(from_file, built_in);
}
