use hexkeys_engine::DataPaths;

use super::open_store;

pub fn macros_get(paths: &DataPaths) {
    let store = open_store(paths);
    let macros = die!(store.macros(), "Error reading macros: {}");
    for (i, value) in macros.iter().enumerate() {
        // JSON-quoted so empty slots and embedded newlines stay visible.
        let shown = serde_json::to_string(value).unwrap_or_default();
        println!("{}\t{shown}", i + 1);
    }
}

pub fn macros_set(paths: &DataPaths, values: &[String]) {
    let store = open_store(paths);
    if die!(store.set_macros(values), "Error saving macros: {}") {
        println!("Saved {} of {} macro slots", values.len(), store.macro_slots());
    } else {
        eprintln!(
            "Error: {} values given, only {} macro slots",
            values.len(),
            store.macro_slots()
        );
        std::process::exit(1);
    }
}
