//! Индекс колонок: имя колонки -> её позиция в записи.

use std::collections::HashMap;

/// Отображение имени колонки в её порядковый номер (с нуля).
///
/// Строится один раз при создании [`crate::Reader`] и после этого не меняется.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    offsets: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Строит индекс по упорядоченному списку имён.
    ///
    /// Уникальность имён не проверяется: при повторе побеждает последнее вхождение.
    ///
    /// ```rust
    /// use csv_tag_reader::ColumnIndex;
    ///
    /// let index = ColumnIndex::from_names(["id", "name", "id"]);
    /// assert_eq!(index.get("id"), Some(2));
    /// assert_eq!(index.get("name"), Some(1));
    /// ```
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let offsets = names
            .into_iter()
            .enumerate()
            .map(|(offset, name)| (name.into(), offset))
            .collect();
        ColumnIndex { offsets }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.offsets.contains_key(name)
    }

    /// Количество различных имён колонок.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
