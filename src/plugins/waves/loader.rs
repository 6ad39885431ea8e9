//! Loads a `WaveScript` from RON. Missing fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use ron::Options;
use thiserror::Error;

use super::script::WaveScript;

pub const WAVE_SCRIPT_PATH: &str = "assets/data/waves.ron";

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

pub fn parse_wave_script(src: &str) -> Result<WaveScript, ron::error::SpannedError> {
    ron_options().from_str(src)
}

pub fn load_wave_script(path: impl AsRef<Path>) -> Result<WaveScript, ScriptError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_wave_script(&contents).map_err(|source| ScriptError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
