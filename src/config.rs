use std::{
    env,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::render::formatter::{DEFAULT_DATE_FORMAT, FormatOptions};
use crate::tui::{KeyBindings, Theme};

const CONFIG: &str = include_str!("../.config/config.json5");

const HOME_CONFIG_NAME: &str = ".recordview-config.json5";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// How field values are drawn
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub date_format: String,
    pub image_width: u16,
    pub image_height: u16,
    pub thumbnail_size: u16,
    pub show_instructions: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let format = FormatOptions::default();
        Self {
            date_format: format.date_format,
            image_width: format.image_width,
            image_height: format.image_height,
            thumbnail_size: format.thumbnail_size,
            show_instructions: true,
        }
    }
}

impl DisplayConfig {
    pub fn format_options(&self) -> FormatOptions {
        let date_format = if self.date_format.trim().is_empty() {
            DEFAULT_DATE_FORMAT.to_string()
        } else {
            self.date_format.clone()
        };
        FormatOptions {
            date_format,
            image_width: self.image_width,
            image_height: self.image_height,
            thumbnail_size: self.thumbnail_size,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn theme(&self) -> Theme {
        match self {
            ThemeName::Dark => Theme::default(),
            ThemeName::Light => Theme::light(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default)]
    pub keybindings_path: Option<PathBuf>,
}

impl Config {
    /// Settings baked into the binary
    pub fn embedded() -> Result<Self, json5::Error> {
        json5::from_str(CONFIG)
    }

    /// Layer the embedded defaults, the config folder, and then either an
    /// explicit file (required) or `~/.recordview-config.json5` (optional).
    pub fn from_path(config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        builder = builder.add_source(
            config::File::from(config_dir.join("config.json5"))
                .format(config::FileFormat::Json5)
                .required(false),
        );

        builder = match config_path {
            Some(path) => {
                let path = expand_tilde(path);
                debug!("Loading config from {}", path.display());
                builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Json5)
                        .required(true),
                )
            }
            None => builder.add_source(
                config::File::from(default_home_config_path())
                    .format(config::FileFormat::Json5)
                    .required(false),
            ),
        };

        builder.build()?.try_deserialize()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Keybindings from `keybindings_path`, or the built-in defaults
    pub fn keybindings(&self) -> Result<KeyBindings> {
        match &self.keybindings_path {
            Some(path) => {
                let bindings = KeyBindings::load_from_file(&expand_tilde(path))?;
                for warning in bindings.validate() {
                    tracing::warn!("{warning}");
                }
                Ok(bindings)
            }
            None => Ok(KeyBindings::default()),
        }
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    if let (Ok(rest), Some(base)) = (path.strip_prefix("~"), BaseDirs::new()) {
        return base.home_dir().join(rest);
    }
    path.to_path_buf()
}

fn default_home_config_path() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(HOME_CONFIG_NAME);
    }
    PathBuf::from(HOME_CONFIG_NAME)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".config")
    }
}
