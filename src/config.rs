//! Driver configuration, persisted as TOML.
//!
//! ```toml
//! log_filter = "info"
//! elicitation = "fail"
//! knowledge_base = "kb.toml"
//!
//! [context]
//! agent = "John"
//! ```
//!
//! Relative knowledge base paths resolve against the config file's directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CdResult, ConfigError};
use crate::infer::{FailUnresolved, InferenceEngine, PromptProvider};
use crate::knowledge::KnowledgeBase;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// What to do when nothing but an operator could fill a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Elicitation {
    /// Ask on stdin and block until answered.
    #[default]
    Prompt,
    /// Fail the run with an unresolved-slot error.
    Fail,
}

impl FromStr for Elicitation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Elicitation::Prompt),
            "fail" => Ok(Elicitation::Fail),
            _ => Err(ConfigError::InvalidElicitation {
                value: s.to_string(),
            }),
        }
    }
}

/// Driver configuration. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// `"prompt"` or `"fail"`.
    #[serde(default = "default_elicitation")]
    pub elicitation: String,
    /// Knowledge base file to attach to the engine.
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
    /// Initial inference context (slot name to literal value).
    #[serde(default)]
    pub context: IndexMap<String, String>,
}

fn default_log_filter() -> String {
    "info".into()
}
fn default_elicitation() -> String {
    "prompt".into()
}

impl Default for CdConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            elicitation: default_elicitation(),
            knowledge_base: None,
            context: IndexMap::new(),
        }
    }
}

impl CdConfig {
    /// Parse from TOML text. Relative paths stay as written.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config = Self::parse(&content, &path.display().to_string())?;
        if let Some(dir) = path.parent() {
            config.knowledge_base = config
                .knowledge_base
                .take()
                .map(|kb| if kb.is_relative() { dir.join(kb) } else { kb });
        }
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn parse(content: &str, origin: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.elicitation()?;
        Ok(config)
    }

    /// The parsed elicitation policy.
    pub fn elicitation(&self) -> ConfigResult<Elicitation> {
        self.elicitation.parse()
    }

    /// An engine with the configured knowledge base, context and policy.
    pub fn build_engine(&self) -> CdResult<InferenceEngine> {
        let knowledge_base = match &self.knowledge_base {
            Some(path) => Some(KnowledgeBase::load(path)?),
            None => None,
        };
        let mut engine = InferenceEngine::new(knowledge_base);
        match self.elicitation()? {
            Elicitation::Prompt => engine.set_provider(PromptProvider::stdio()),
            Elicitation::Fail => engine.set_provider(FailUnresolved),
        }
        engine.set_context(self.context.clone());
        Ok(engine)
    }
}
