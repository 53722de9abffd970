//! Преобразование строкового значения ячейки в значение поля структуры.
//!
//! Правило выбирается по типу поля:
//! * `String` получает значение ячейки как есть;
//! * `Option<T>` всегда становится `Some`: создаётся `T::default()` и заполняется той же ячейкой;
//! * `Vec<T>` заполняется, только если задан разделитель списка
//!   (см. [`crate::options::ReadOption::SliceSplit`]); каждая подстрока заполняет новый `T::default()`;
//! * числа, `bool` и `char` разбираются через [`std::str::FromStr`]. Если разбор не удался,
//!   поле остаётся без изменений.
//!
//! Ошибок несовпадения типов нет: то, что не удалось присвоить, молча пропускается.

use std::str::FromStr;

use tracing::trace;

/// Параметры преобразования, общие для всех полей сессии чтения.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coercion {
    list_delimiter: String,
}

impl Coercion {
    pub fn new(list_delimiter: impl Into<String>) -> Self {
        Coercion {
            list_delimiter: list_delimiter.into(),
        }
    }

    /// Разделитель элементов списка. Пустая строка: списки не заполняются.
    pub fn list_delimiter(&self) -> &str {
        &self.list_delimiter
    }
}

/// Тип поля, которое можно заполнить из ячейки CSV.
pub trait FromCell {
    /// Записывает значение ячейки `cell` в `self`.
    fn assign_cell(&mut self, cell: &str, coercion: &Coercion);
}

impl FromCell for String {
    fn assign_cell(&mut self, cell: &str, _: &Coercion) {
        self.clear();
        self.push_str(cell);
    }
}

impl<T: FromCell + Default> FromCell for Option<T> {
    fn assign_cell(&mut self, cell: &str, coercion: &Coercion) {
        let mut value = T::default();
        value.assign_cell(cell, coercion);
        *self = Some(value);
    }
}

impl<T: FromCell + ?Sized> FromCell for Box<T> {
    fn assign_cell(&mut self, cell: &str, coercion: &Coercion) {
        (**self).assign_cell(cell, coercion);
    }
}

impl<T: FromCell + Default> FromCell for Vec<T> {
    fn assign_cell(&mut self, cell: &str, coercion: &Coercion) {
        if coercion.list_delimiter.is_empty() {
            trace!("list delimiter is not set, list field is left unchanged");
            return;
        }
        *self = cell
            .split(coercion.list_delimiter.as_str())
            .map(|part| {
                let mut item = T::default();
                item.assign_cell(part, coercion);
                item
            })
            .collect();
    }
}

fn assign_parsed<T: FromStr>(field: &mut T, cell: &str) {
    match cell.parse::<T>() {
        Ok(value) => *field = value,
        Err(_) => trace!(
            cell,
            target_type = std::any::type_name::<T>(),
            "cell is not parsable, field is left unchanged"
        ),
    }
}

macro_rules! impl_from_cell_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromCell for $t {
                fn assign_cell(&mut self, cell: &str, _: &Coercion) {
                    assign_parsed(self, cell);
                }
            }
        )*
    };
}

impl_from_cell_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);
