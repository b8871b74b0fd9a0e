use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use hex_cli::commands::{config_ops, corpus_ops, macro_ops, suggest_ops, usage_ops};
use hexkeys_engine::DataPaths;

#[derive(Parser)]
#[command(name = "hexkeys", about = "Hexkeys word suggestion tool")]
struct Cli {
    #[command(flatten)]
    locations: Locations,
    /// Custom settings TOML (default: embedded settings)
    #[arg(long, global = true)]
    settings_file: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Locations {
    /// Config document (default: ~/.config/hexkeys/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory of bundled supplementary dictionaries
    #[arg(long, global = true)]
    resources: Option<PathBuf>,
    /// Directory of user-editable dictionaries (default: ~/.config/hexkeys/dictionaries)
    #[arg(long, global = true)]
    user_dicts: Option<PathBuf>,
    /// Cache directory for the base word list (default: ~/.cache/hexkeys)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,
}

impl Locations {
    fn resolve(self) -> DataPaths {
        let mut paths = DataPaths::for_user(self.resources);
        if let Some(config) = self.config {
            paths.config_file = config;
        }
        if let Some(dir) = self.user_dicts {
            paths.user_dict_dir = dir;
        }
        if let Some(dir) = self.cache {
            paths.cache_dir = dir;
        }
        paths
    }
}

#[derive(Subcommand)]
enum Command {
    /// Suggest completions for a prefix
    Suggest {
        /// Typed prefix
        prefix: String,
        /// Number of suggestions
        #[arg(short, long, default_value = "10")]
        n: i64,
    },
    /// Record that a term was used
    Record {
        /// Term as typed
        term: String,
    },
    /// List usage counts, most used first
    Usage,
    /// Manage macro slots
    Macros {
        #[command(subcommand)]
        action: MacroAction,
    },
    /// Inspect or download the corpus
    Corpus {
        #[command(subcommand)]
        action: CorpusAction,
    },
    /// Export or validate settings TOML
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum MacroAction {
    /// Print every macro slot
    Get,
    /// Replace the macro slots (missing trailing slots become empty)
    Set {
        /// Slot values in order
        values: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Export default settings as TOML
    Export,
    /// Validate a custom settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum CorpusAction {
    /// Show corpus sources and indexed term count
    Info,
    /// Download the base word list if it is not cached
    Fetch,
}

fn main() {
    hexkeys_engine::trace_init::init_tracing(&std::env::temp_dir());

    let cli = Cli::parse();

    if let Some(file) = &cli.settings_file {
        config_ops::settings_load(file);
    }
    let paths = cli.locations.resolve();

    match cli.command {
        Command::Suggest { prefix, n } => suggest_ops::suggest(paths, &prefix, n),
        Command::Record { term } => usage_ops::record(&paths, &term),
        Command::Usage => usage_ops::list(&paths),
        Command::Macros { action } => match action {
            MacroAction::Get => macro_ops::macros_get(&paths),
            MacroAction::Set { values } => macro_ops::macros_set(&paths, &values),
        },
        Command::Corpus { action } => match action {
            CorpusAction::Info => corpus_ops::info(&paths),
            CorpusAction::Fetch => corpus_ops::fetch(&paths),
        },
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
}
