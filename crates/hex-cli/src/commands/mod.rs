//! Implementations behind the `hexkeys` subcommands. Each prints to
//! stdout/stderr and exits the process on error.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod corpus_ops;
pub mod macro_ops;
pub mod suggest_ops;
pub mod usage_ops;

use std::sync::Arc;

use hex_core::config_store::ConfigStore;
use hex_core::settings::settings;
use hexkeys_engine::DataPaths;

/// Config store at the resolved path with the configured slot count.
pub(crate) fn open_store(paths: &DataPaths) -> Arc<ConfigStore> {
    Arc::new(ConfigStore::new(
        paths.config_file.clone(),
        settings().macros.slots,
    ))
}
