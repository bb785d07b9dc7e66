use quizbox_db::DbConfigError;
use quizbox_db::maintenance::migrate::MigrationFileError;
use quizbox_db::maintenance::wipe::WipeRefused;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Refused(#[from] WipeRefused),

    #[error("{0:#}")]
    Failed(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Failed(_) => 1,
            CliError::Config(_) => 2,
            CliError::Refused(_) => 3,
        }
    }

    /// Connection helpers wrap config problems in anyhow; surface them as config errors again.
    pub fn from_connect(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DbConfigError>() {
            Some(config) => CliError::Config(config.to_string()),
            None => CliError::Failed(err),
        }
    }
}

impl From<DbConfigError> for CliError {
    fn from(e: DbConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<MigrationFileError> for CliError {
    fn from(e: MigrationFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
