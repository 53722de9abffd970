//! Опции, настраивающие [`crate::Reader`] при создании.
//!
//! Опции применяются к [`ReaderConfig`] строго в переданном порядке,
//! поэтому при пересечении настроек побеждает последняя опция.

use std::fmt;

use crate::error::{Error, Result};
use crate::index::ColumnIndex;

/// Опция чтения CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOption {
    /// Явный список колонок. Используется, когда в первой строке CSV нет заголовка.
    Index(Vec<String>),
    /// Разделитель, по которому значение ячейки режется на элементы поля-списка.
    /// Пустая строка отключает заполнение списков.
    SliceSplit(String),
    /// Разделитель полей для токенизатора CSV (по умолчанию `,`).
    Delimiter(u8),
}

/// Явный список колонок, см. [`ReadOption::Index`].
pub fn index<I, S>(names: I) -> ReadOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ReadOption::Index(names.into_iter().map(Into::into).collect())
}

/// Разделитель элементов списка, см. [`ReadOption::SliceSplit`].
pub fn slice_split(delimiter: impl Into<String>) -> ReadOption {
    ReadOption::SliceSplit(delimiter.into())
}

/// Разделитель полей, см. [`ReadOption::Delimiter`].
pub fn delimiter(delimiter: u8) -> ReadOption {
    ReadOption::Delimiter(delimiter)
}

/// Итоговая конфигурация, получаемая применением опций.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// `None` означает, что индекс будет взят из первой записи.
    pub index: Option<ColumnIndex>,
    pub slice_delimiter: String,
    /// `None` означает разделитель токенизатора по умолчанию.
    pub field_delimiter: Option<u8>,
}

impl ReaderConfig {
    pub fn from_options<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ReadOption>,
    {
        let mut config = ReaderConfig::default();
        for option in options {
            option.apply(&mut config)?;
        }
        Ok(config)
    }
}

impl ReadOption {
    /// Применяет опцию к конфигурации.
    pub fn apply(&self, config: &mut ReaderConfig) -> Result<()> {
        match self {
            ReadOption::Index(names) => {
                config.index = Some(ColumnIndex::from_names(names.iter().cloned()));
            }
            ReadOption::SliceSplit(delimiter) => {
                config.slice_delimiter = delimiter.clone();
            }
            ReadOption::Delimiter(byte) => {
                if matches!(*byte, b'"' | b'\r' | b'\n') {
                    return Err(self.invalid(format!(
                        "{:?} cannot be used as a field delimiter",
                        char::from(*byte)
                    )));
                }
                config.field_delimiter = Some(*byte);
            }
        }
        Ok(())
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidOption {
            option: self.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReadOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(_) => write!(f, "Index"),
            Self::SliceSplit(_) => write!(f, "SliceSplit"),
            Self::Delimiter(_) => write!(f, "Delimiter"),
        }
    }
}
