//! Configuration of the state storage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::FileStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory holding the state snapshot.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_toml() {
        let config: Config = toml::from_str(r#"path = "/tmp/ballot""#).unwrap();
        assert_eq!(
            config,
            Config {
                path: PathBuf::from("/tmp/ballot")
            }
        );
    }
}
