use std::fs;

pub fn settings_export() {
    print!("{}", hex_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        hex_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: ranking.usage_boost={}, ranking.max_limit={}, macros.slots={}, {} supplementary dictionaries",
        s.ranking.usage_boost,
        s.ranking.max_limit,
        s.macros.slots,
        s.corpus.supplementary.len()
    );
}

/// Install a custom settings file before anything reads `settings()`.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        hex_core::settings::init_custom(content),
        "Error loading settings: {}"
    );
}
