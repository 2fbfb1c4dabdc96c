use std::io;
use std::path::PathBuf;

use dojo_content::validate::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DojoErr>;

#[derive(Error, Debug)]
pub enum DojoErr {
    #[error("failed to read config at {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The shipped curriculum failed its consistency checks. Only reachable
    /// when content authoring and the test gate both regressed.
    #[error("curriculum failed validation with {} defect(s)", defects.len())]
    CurriculumInvalid { defects: Vec<ValidationError> },

    #[error(transparent)]
    Io(#[from] io::Error),
}
