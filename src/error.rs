/// Typed errors for configuration and catalog loading.
///
/// Neither is fatal: the loaders log a warning and fall back to defaults.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{key} must be greater than zero")]
    NotPositive { key: &'static str },
    #[error("intro offsets must increase: forming < glow < fadeout < complete")]
    IntroOrder,
    #[error("reveal threshold {0} is outside (0, 1]")]
    Threshold(f32),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content file parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate project id {0}")]
    DuplicateProject(u32),
    #[error("typing phrase list is empty")]
    NoPhrases,
}
