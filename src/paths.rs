//! Per-user file locations.

use std::env;
use std::path::{Path, PathBuf};

use hex_core::corpus::CorpusSource;
use hex_core::settings::CorpusSettings;

const APP_DIR: &str = "hexkeys";
const CONFIG_FILE: &str = "config.json";
const USER_DICT_DIR: &str = "dictionaries";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// The JSON config document (macros + usage).
    pub config_file: PathBuf,
    /// Holds the downloaded base word list.
    pub cache_dir: PathBuf,
    /// Read-only supplementary dictionaries shipped with the application.
    pub bundled_dir: Option<PathBuf>,
    /// User-editable copies of the supplementary dictionaries.
    pub user_dict_dir: PathBuf,
}

impl DataPaths {
    /// Standard per-user locations. `bundled_dir` is the application's
    /// resource directory, if it ships dictionaries.
    pub fn for_user(bundled_dir: Option<PathBuf>) -> Self {
        let config_root = first_env_dir(&["XDG_CONFIG_HOME", "APPDATA"])
            .or_else(|| home_subdir(".config"))
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR);
        let cache_root = first_env_dir(&["XDG_CACHE_HOME", "LOCALAPPDATA"])
            .or_else(|| home_subdir(".cache"))
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR);
        Self {
            config_file: config_root.join(CONFIG_FILE),
            cache_dir: cache_root,
            bundled_dir,
            user_dict_dir: config_root.join(USER_DICT_DIR),
        }
    }

    /// Everything under one directory (portable installs, tests).
    pub fn in_dir(root: &Path) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE),
            cache_dir: root.join("cache"),
            bundled_dir: Some(root.join("bundled")),
            user_dict_dir: root.join(USER_DICT_DIR),
        }
    }

    pub fn base_cache_file(&self, corpus: &CorpusSettings) -> PathBuf {
        self.cache_dir.join(&corpus.base_file)
    }

    /// Base list, then every bundled dictionary, then every user
    /// dictionary, each group in `corpus.supplementary` order.
    pub fn corpus_sources(&self, corpus: &CorpusSettings) -> Vec<CorpusSource> {
        let mut sources = vec![CorpusSource::base(self.base_cache_file(corpus))];
        if let Some(bundled) = &self.bundled_dir {
            sources.extend(
                corpus
                    .supplementary
                    .iter()
                    .map(|name| CorpusSource::bundled(bundled.join(name))),
            );
        }
        sources.extend(
            corpus
                .supplementary
                .iter()
                .map(|name| CorpusSource::user(self.user_dict_dir.join(name))),
        );
        sources
    }
}

fn first_env_dir(vars: &[&str]) -> Option<PathBuf> {
    vars.iter()
        .filter_map(|v| env::var_os(v))
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_subdir(name: &str) -> Option<PathBuf> {
    first_env_dir(&["HOME", "USERPROFILE"]).map(|h| h.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_core::corpus::SourceKind;

    fn corpus(names: &[&str]) -> CorpusSettings {
        CorpusSettings {
            base_file: "words.txt".into(),
            base_url: String::new(),
            supplementary: names.iter().map(|s| s.to_string()).collect(),
            fetch_timeout_secs: 60,
        }
    }

    #[test]
    fn sources_are_grouped_by_kind() {
        let paths = DataPaths::in_dir(Path::new("/data"));
        let sources = paths.corpus_sources(&corpus(&["names.txt", "tech.txt"]));
        let kinds: Vec<SourceKind> = sources.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                SourceKind::Base,
                SourceKind::Bundled,
                SourceKind::Bundled,
                SourceKind::User,
                SourceKind::User
            ]
        );
        assert_eq!(sources[0].path, Path::new("/data/cache/words.txt"));
        assert_eq!(sources[1].path, Path::new("/data/bundled/names.txt"));
        assert_eq!(sources[4].path, Path::new("/data/dictionaries/tech.txt"));
    }

    #[test]
    fn no_bundled_dir_means_no_bundled_sources() {
        let mut paths = DataPaths::in_dir(Path::new("/data"));
        paths.bundled_dir = None;
        let sources = paths.corpus_sources(&corpus(&["names.txt"]));
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].kind, SourceKind::User);
    }

    #[test]
    fn user_paths_end_in_app_dir() {
        let paths = DataPaths::for_user(None);
        assert!(paths.config_file.ends_with("hexkeys/config.json"));
        assert!(paths.cache_dir.ends_with("hexkeys"));
        assert!(paths.user_dict_dir.ends_with("hexkeys/dictionaries"));
    }
}
