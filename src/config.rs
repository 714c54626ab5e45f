use crate::carousel::{CarouselError, CarouselOptions, CarouselSettings, StartPosition, WordList};
use crate::render::color::Color;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// The whole page, as read from a YAML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FolioConfig {
    pub(crate) hero: HeroConfig,
    pub(crate) style: StyleConfig,
    pub(crate) page: PageConfig,
}

/// The "I like to make ... work." line.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HeroConfig {
    pub(crate) prefix: String,
    pub(crate) suffix: String,
    pub(crate) words: Vec<String>,
    pub(crate) transition_delay_ms: u64,
    pub(crate) transition_speed_sec: f64,
    pub(crate) width_padding: u16,
    pub(crate) start: StartPosition,

    /// A FIGlet font name or `.flf` path. Words are drawn as plain text when unset.
    pub(crate) font: Option<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            prefix: "I like to make".into(),
            suffix: "work.".into(),
            words: ["experiments", "virtual reality", "websites", "things", "video games", "mobile apps", "technology"]
                .map(String::from)
                .into(),
            transition_delay_ms: 1000,
            transition_speed_sec: 0.3,
            width_padding: 2,
            start: StartPosition::default(),
            font: None,
        }
    }
}

impl HeroConfig {
    pub(crate) fn word_list(&self) -> Result<WordList, CarouselError> {
        WordList::new(self.words.iter().cloned())
    }

    pub(crate) fn carousel_settings(&self) -> Result<CarouselSettings, CarouselError> {
        let options = CarouselOptions { start: self.start, width_padding: self.width_padding };
        CarouselSettings::new(self.transition_delay_ms, self.transition_speed_sec, options)
    }
}

/// Colours used across the page.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StyleConfig {
    pub(crate) font_colour: Color,
    pub(crate) background_colour: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self { font_colour: Color::new(0xe0, 0xe0, 0xe0), background_colour: Color::new(0x1d, 0x1d, 0x1d) }
    }
}

/// Static content shown below the hero line.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PageConfig {
    pub(crate) name: Option<String>,
    pub(crate) about: Vec<String>,
    pub(crate) projects: Vec<ProjectConfig>,
    pub(crate) contacts: Vec<ContactConfig>,

    /// Whether to show the "see more" pointer under the hero line.
    pub(crate) fold_pointer: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self { name: None, about: Vec::new(), projects: Vec::new(), contacts: Vec::new(), fold_pointer: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProjectConfig {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ContactConfig {
    pub(crate) label: String,
    pub(crate) link: String,
}

/// Where a configuration was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl FolioConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_yaml(&contents)
    }

    pub(crate) fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicitly requested file, else the user's config file if there is one, else defaults.
    pub(crate) fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, ConfigSource::File(path.to_path_buf())));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Ok((Self::load(&path)?, ConfigSource::File(path))),
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "termfolio").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.hero.word_list()?;
        self.hero.carousel_settings()?;
        Ok(())
    }

    pub(crate) fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Errors that can occur when loading a configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid hero settings: {0}")]
    Carousel(#[from] CarouselError),
}
