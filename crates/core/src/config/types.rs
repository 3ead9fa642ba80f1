use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::pool::PoolConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub exit: ExitConfig,
}

/// Output tree configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub naming: OutputNaming,
}

/// How output file names are derived from input file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputNaming {
    /// Keep the input's file name and extension (`a/b.flac` -> `a/b.flac`).
    #[default]
    Preserve,
    /// Replace the extension with the encoded format's (`a/b.flac` -> `a/b.mp3`).
    TargetExtension,
}

/// Process exit code policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExitConfig {
    /// Exit non-zero when any item failed or was skipped.
    #[serde(default = "default_fail_on_item_errors")]
    pub fail_on_item_errors: bool,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            fail_on_item_errors: default_fail_on_item_errors(),
        }
    }
}

fn default_fail_on_item_errors() -> bool {
    true
}
