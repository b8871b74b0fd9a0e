use hex_core::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
    #[error("internal error: {msg}")]
    Internal { msg: String },
}

impl From<SettingsError> for EngineError {
    fn from(e: SettingsError) -> Self {
        EngineError::InvalidData { msg: e.to_string() }
    }
}
