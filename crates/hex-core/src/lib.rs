pub mod config_store;
pub mod corpus;
pub mod index;
pub mod lexicon;
#[cfg(test)]
mod proptests;
pub mod ranking;
pub mod settings;
pub mod term;
pub mod unicode;
pub mod usage;
