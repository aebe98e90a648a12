//! Configuration file loading
//!
//! Config files may be TOML, JSON or YAML; the format is picked from the
//! file extension.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yml" | "yaml" => Ok(Self::Yaml),
            _ => Err(crate::UtilError::Config(format!(
                "Unsupported config format: '{extension}' ({})",
                path.display()
            ))),
        }
    }

    /// Deserialize `content` in this format
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> crate::Result<T> {
        match self {
            Self::Toml => toml::from_str(content)
                .map_err(|e| crate::UtilError::Config(format!("TOML parse error: {e}"))),
            Self::Json => serde_json::from_str(content)
                .map_err(|e| crate::UtilError::Config(format!("JSON parse error: {e}"))),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| crate::UtilError::Config(format!("YAML parse error: {e}"))),
        }
    }
}

/// Load configuration from file
pub fn load_config<T>(path: &Path) -> crate::Result<T>
where
    T: DeserializeOwned,
{
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!("Loading {:?} config from {}", format, path.display());
    format.parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        retries: u32,
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).ok(), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")).ok(), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).ok(), Some(ConfigFormat::Json));
        assert!(ConfigFormat::from_path(Path::new("a.ini")).is_err());
    }

    #[test]
    fn test_load_each_format() -> crate::Result<()> {
        let dir = tempdir()?;

        let toml_path = dir.path().join("c.toml");
        std::fs::write(&toml_path, "name = \"t\"\nretries = 2\n")?;
        let json_path = dir.path().join("c.json");
        std::fs::write(&json_path, r#"{"name": "j"}"#)?;
        let yaml_path = dir.path().join("c.yaml");
        std::fs::write(&yaml_path, "name: y\nretries: 5\n")?;

        assert_eq!(load_config::<Sample>(&toml_path)?, Sample { name: "t".into(), retries: 2 });
        assert_eq!(load_config::<Sample>(&json_path)?, Sample { name: "j".into(), retries: 0 });
        assert_eq!(load_config::<Sample>(&yaml_path)?, Sample { name: "y".into(), retries: 5 });
        Ok(())
    }

    #[test]
    fn test_invalid_content_is_config_error() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json")?;

        let err = load_config::<Sample>(&path).unwrap_err();
        assert!(matches!(err, crate::UtilError::Config(_)));
        Ok(())
    }
}
