use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
pub use sov_state::config::Config as StorageConfig;

/// Configuration of the ballot command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BallotCliConfig {
    /// Where the ballot state lives.
    pub storage: StorageConfig,
}

/// Reads and deserializes a TOML file.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
