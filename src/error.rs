use std::{io, path::PathBuf};

use thiserror::Error;

/// Результат операций чтения CSV.
pub type Result<T> = std::result::Result<T, Error>;

/// Ошибки создания [`crate::Reader`] и чтения записей.
///
/// Конец данных ошибкой не считается: о нём сообщает [`crate::ReadStatus::EndOfData`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create reader for file: {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("cannot read first line: {0}")]
    Header(#[source] csv::Error),

    #[error("cannot read first line: no records")]
    MissingHeader,

    #[error("failed to apply option {option}: {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("failed to read a record: {0}")]
    Read(#[source] csv::Error),
}
