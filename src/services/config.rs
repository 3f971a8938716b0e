//! Personal access token configuration
//!
//! This service owns the single secret the tool needs: a GitHub personal
//! access token, persisted as a minimal TOML file with one `[general]`
//! section holding one `token` key. When no configuration exists yet, the
//! store runs a one-time interactive setup instead of failing.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk layout of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub general: GeneralSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSection {
    pub token: String,
}

/// Token configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenConfigError {
    /// IO error during persistence
    IoError(String),
    /// Serialization error
    SerializationError(String),
    /// The interactive setup received an empty token
    EmptyToken,
}

impl std::fmt::Display for TokenConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "IO error: {}", msg),
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::EmptyToken => write!(f, "The supplied token is empty"),
        }
    }
}

impl std::error::Error for TokenConfigError {}

/// Reads and writes the token configuration file
#[derive(Debug, Clone)]
pub struct TokenStore {
    config_path: PathBuf,
}

impl TokenStore {
    /// Create a store over `config_dir/config.toml`
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join("config.toml"),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the persisted token, `None` when no configuration file exists yet
    pub fn load(&self) -> Result<Option<String>, TokenConfigError> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.config_path)
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;

        let config: TokenConfig = toml::from_str(&content)
            .map_err(|e| TokenConfigError::SerializationError(e.to_string()))?;

        Ok(Some(config.general.token))
    }

    /// Persist the token, creating the configuration directory if needed
    pub fn save(&self, token: &str) -> Result<(), TokenConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        }

        let config = TokenConfig {
            general: GeneralSection {
                token: token.to_string(),
            },
        };
        let toml_content = toml::to_string(&config)
            .map_err(|e| TokenConfigError::SerializationError(e.to_string()))?;

        std::fs::write(&self.config_path, toml_content)
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Load the token, running first-run setup on stdin/stdout when no
    /// configuration exists yet
    pub fn load_or_init_interactive(&self) -> Result<String, TokenConfigError> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        self.load_or_init_with(&mut input, &mut output)
    }

    /// Load the token, prompting through the given reader/writer when no
    /// configuration exists yet
    pub fn load_or_init_with<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<String, TokenConfigError> {
        if let Some(token) = self.load()? {
            return Ok(token);
        }

        writeln!(output, "No configuration found. Starting initial setup.")
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        writeln!(
            output,
            "github-changelog needs a token to communicate with GitHub."
        )
        .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        writeln!(
            output,
            "Please create a token on https://github.com/settings/tokens"
        )
        .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        write!(output, "Your personal access token: ")
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        output
            .flush()
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;

        let mut line = String::new();
        input
            .read_line(&mut line)
            .map_err(|e| TokenConfigError::IoError(e.to_string()))?;
        let token = line.trim();

        if token.is_empty() {
            return Err(TokenConfigError::EmptyToken);
        }

        self.save(token)?;
        tracing::info!("Token configuration written to {:?}", self.config_path);

        Ok(token.to_string())
    }
}

/// Get the default configuration directory
///
/// Returns `~/.config/github-changelog/` on Unix-like systems
pub fn default_config_dir() -> Result<PathBuf, TokenConfigError> {
    let base = dirs::config_dir().ok_or_else(|| {
        TokenConfigError::IoError("Unable to determine configuration directory".to_string())
    })?;

    Ok(base.join("github-changelog"))
}
