use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistent storage for the best score ever reached.
///
/// Implementations must only ever raise the stored value.
pub(crate) trait HighscoreStore {
    /// Return the stored highscore, if any
    fn get_highscore(&self) -> Option<u32>;

    /// Store `candidate` if there is no stored highscore yet or if
    /// `candidate` beats it.  Returns whether the stored value changed.
    fn set_highscore(&mut self, candidate: u32) -> Result<bool, SaveError>;
}

fn beats(candidate: u32, current: Option<u32>) -> bool {
    current.is_none_or(|best| candidate > best)
}

/// A highscore kept in a JSON file of the form `{"highscore": 42}`
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileHighscores {
    path: PathBuf,
    highscore: Option<u32>,
}

impl FileHighscores {
    /// Read the highscore stored at `path`.  A missing file means that no
    /// highscore has been stored yet.
    pub(crate) fn load(path: PathBuf) -> Result<FileHighscores, LoadError> {
        let src = match fs_err::read(&path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FileHighscores::empty(path))
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        let file = serde_json::from_slice::<HighscoreFile>(&src).map_err(LoadError::deserialize)?;
        Ok(FileHighscores {
            path,
            highscore: Some(file.highscore),
        })
    }

    /// A store at `path` that has not recorded anything yet.  The file is
    /// not touched until a highscore is set.
    pub(crate) fn empty(path: PathBuf) -> FileHighscores {
        FileHighscores {
            path,
            highscore: None,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, highscore: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src =
            serde_json::to_string(&HighscoreFile { highscore }).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl HighscoreStore for FileHighscores {
    fn get_highscore(&self) -> Option<u32> {
        self.highscore
    }

    fn set_highscore(&mut self, candidate: u32) -> Result<bool, SaveError> {
        if !beats(candidate, self.highscore) {
            return Ok(false);
        }
        self.save(candidate)?;
        self.highscore = Some(candidate);
        Ok(true)
    }
}

/// A highscore that lives only as long as the process
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryHighscores(Option<u32>);

impl HighscoreStore for MemoryHighscores {
    fn get_highscore(&self) -> Option<u32> {
        self.0
    }

    fn set_highscore(&mut self, candidate: u32) -> Result<bool, SaveError> {
        if beats(candidate, self.0) {
            self.0 = Some(candidate);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighscoreFile {
    highscore: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save highscore to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize highscore")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write highscore file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read highscore from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read highscore file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize highscore")]
    Deserialize(#[source] serde_json::Error),
}
