use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::MAX_TOTAL_SCORE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub lexicon: String,
    pub wordlist: Option<String>,
    pub challenges: Option<String>,
    pub validate: bool,
    pub strict_parse: bool,
    pub challenge_probability: f64,
    pub goal: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lexicon: "norsk".to_string(),
            wordlist: None,
            challenges: None,
            validate: false,
            strict_parse: false,
            challenge_probability: 0.3,
            goal: MAX_TOTAL_SCORE,
        }
    }
}

/// CLI-provided values layered on top of the stored config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub lexicon: Option<String>,
    pub wordlist: Option<String>,
    pub challenges: Option<String>,
    pub validate: Option<bool>,
    pub strict_parse: Option<bool>,
    pub challenge_probability: Option<f64>,
    pub goal: Option<f64>,
}

impl Config {
    pub fn overridden_by(mut self, overrides: &Overrides) -> Self {
        if let Some(ref lexicon) = overrides.lexicon {
            self.lexicon = lexicon.clone();
        }
        if let Some(ref wordlist) = overrides.wordlist {
            self.wordlist = Some(wordlist.clone());
        }
        if let Some(ref challenges) = overrides.challenges {
            self.challenges = Some(challenges.clone());
        }
        if let Some(validate) = overrides.validate {
            self.validate = validate;
        }
        if let Some(strict_parse) = overrides.strict_parse {
            self.strict_parse = strict_parse;
        }
        if let Some(probability) = overrides.challenge_probability {
            self.challenge_probability = probability.clamp(0.0, 1.0);
        }
        if let Some(goal) = overrides.goal {
            self.goal = goal;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "skriv") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("skriv_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
