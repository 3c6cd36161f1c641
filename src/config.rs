use crate::consts;
use crate::game::{
    Difficulty, DifficultyError, FoodSpawnPolicy, GameSettings, Grid, GridError, SpeedTier,
};
use crate::util::data_file_path;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Most verbose level of messages written to the log file
    pub(crate) log_level: LevelFilter,

    /// Shape and pace of the game
    pub(crate) game: GameConfig,

    /// Settings about data files
    pub(crate) files: FileConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            log_level: LevelFilter::Info,
            game: GameConfig::default(),
            files: FileConfig::default(),
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Length of a side of the play area in grid units
    extent: i32,

    /// Grid units per cell
    cell_size: i32,

    /// Segments behind the head at the start of a run
    initial_length: usize,

    /// Sides on each die of the bonus-food roll
    bonus_roll_sides: u32,

    /// Speed tiers; the built-in table is used when absent
    tiers: Option<Vec<TierConfig>>,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            extent: consts::DEFAULT_EXTENT,
            cell_size: consts::DEFAULT_CELL_SIZE,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            bonus_roll_sides: consts::BONUS_ROLL_SIDES,
            tiers: None,
        }
    }
}

impl GameConfig {
    /// Validate the configuration and convert it to [`GameSettings`]
    pub(crate) fn settings(&self) -> Result<GameSettings, ConfigError> {
        let grid = Grid::new(self.extent, self.cell_size)?;
        let cells = usize::try_from(grid.cells_per_side()).unwrap_or_default();
        if self.initial_length >= cells {
            return Err(ConfigError::InitialLength {
                length: self.initial_length,
                cells,
            });
        }
        let spawn_policy =
            FoodSpawnPolicy::new(self.bonus_roll_sides).ok_or(ConfigError::RollSides)?;
        let difficulty = match self.tiers {
            None => Difficulty::standard(self.cell_size),
            Some(ref tiers) => Difficulty::new(
                tiers
                    .iter()
                    .map(|t| SpeedTier {
                        min_score: t.min_score,
                        tick_interval: Duration::from_millis(t.tick_interval_ms),
                        step: t.step.unwrap_or(self.cell_size),
                    })
                    .collect(),
                self.cell_size,
            )?,
        };
        Ok(GameSettings {
            grid,
            initial_length: self.initial_length,
            spawn_policy,
            difficulty,
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
struct TierConfig {
    min_score: u32,
    tick_interval_ms: u64,
    /// Grid units added to the step accumulator per tick; defaults to a
    /// full cell
    #[serde(default)]
    step: Option<i32>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the highscore is stored
    highscore_file: Option<PathBuf>,

    /// Path of the log file
    log_file: Option<PathBuf>,
}

impl FileConfig {
    pub(crate) fn highscore_path(&self) -> Result<PathBuf, ConfigError> {
        self.highscore_file
            .clone()
            .or_else(|| data_file_path("highscore.json"))
            .ok_or(ConfigError::NoDataPath)
    }

    pub(crate) fn log_path(&self) -> Result<PathBuf, ConfigError> {
        self.log_file
            .clone()
            .or_else(|| data_file_path("gridsnake.log"))
            .ok_or(ConfigError::NoDataPath)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid play area")]
    Grid(#[from] GridError),
    #[error("invalid speed tiers")]
    Difficulty(#[from] DifficultyError),
    #[error("initial snake length {length} does not fit in a row of {cells} cells")]
    InitialLength { length: usize, cells: usize },
    #[error("bonus-roll-sides must be at least 1")]
    RollSides,
}
