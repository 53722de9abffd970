//! Описание структуры, в которую читаются записи CSV.
//!
//! Каждая структура объявляет статическую таблицу привязок: имя колонки
//! и функцию, записывающую значение ячейки в конкретное поле. Поля без
//! привязки читатель никогда не трогает.

use crate::cell::{Coercion, FromCell};

/// Привязка одного поля структуры `T` к колонке CSV.
pub struct Binding<T> {
    column: &'static str,
    assign: fn(&mut T, &str, &Coercion),
}

impl<T> Binding<T> {
    pub const fn new(column: &'static str, assign: fn(&mut T, &str, &Coercion)) -> Self {
        Binding { column, assign }
    }

    /// Имя колонки, к которой привязано поле.
    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn assign(&self, target: &mut T, cell: &str, coercion: &Coercion) {
        (self.assign)(target, cell, coercion)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Binding<T> {}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// Структура, которую можно заполнить из записи CSV.
///
/// Обычно реализуется макросом [`crate::bind_columns!`].
pub trait Record: Sized + 'static {
    const BINDINGS: &'static [Binding<Self>];
}

/// Записывает ячейку в поле любого типа, реализующего [`FromCell`].
///
/// Используется макросом [`crate::bind_columns!`].
#[doc(hidden)]
pub fn assign_field<F: FromCell>(field: &mut F, cell: &str, coercion: &Coercion) {
    field.assign_cell(cell, coercion);
}

/// Реализует [`Record`] для структуры по списку `поле => "колонка"`.
///
/// ```rust
/// use csv_tag_reader::{bind_columns, Record};
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: String,
///     tags: Vec<String>,
///     comment: String,
/// }
///
/// bind_columns!(User {
///     id => "ID",
///     tags => "TAGS",
/// });
///
/// let columns: Vec<_> = User::BINDINGS.iter().map(|b| b.column()).collect();
/// assert_eq!(columns, ["ID", "TAGS"]);
/// ```
#[macro_export]
macro_rules! bind_columns {
    ($ty:ty { $($field:ident => $column:literal),* $(,)? }) => {
        impl $crate::Record for $ty {
            const BINDINGS: &'static [$crate::Binding<Self>] = &[
                $(
                    $crate::Binding::new(
                        $column,
                        |record: &mut $ty, cell: &str, coercion: &$crate::Coercion| {
                            $crate::record::assign_field(&mut record.$field, cell, coercion)
                        },
                    ),
                )*
            ];
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        name: String,
        aliases: Vec<String>,
        note: Option<String>,
        untouched: String,
    }

    crate::bind_columns!(Item {
        name => "NAME",
        aliases => "ALIASES",
        note => "NOTE",
    });

    #[test]
    fn test_bindings_keep_declaration_order() {
        let columns: Vec<&str> = Item::BINDINGS.iter().map(Binding::column).collect();

        assert_eq!(columns, ["NAME", "ALIASES", "NOTE"]);
    }

    #[test]
    fn test_binding_assigns_its_field_only() {
        let mut item = Item {
            untouched: "keep".to_string(),
            ..Default::default()
        };
        let coercion = Coercion::new("/");

        for binding in Item::BINDINGS {
            binding.assign(&mut item, "a/b", &coercion);
        }

        assert_eq!(
            item,
            Item {
                name: "a/b".to_string(),
                aliases: vec!["a".to_string(), "b".to_string()],
                note: Some("a/b".to_string()),
                untouched: "keep".to_string(),
            }
        );
    }

    #[test]
    fn test_manual_binding_table() {
        struct Pair {
            left: String,
            right: u16,
        }

        impl Record for Pair {
            const BINDINGS: &'static [Binding<Self>] = &[
                Binding::new("L", |p: &mut Pair, cell: &str, c: &Coercion| {
                    assign_field(&mut p.left, cell, c)
                }),
                Binding::new("R", |p: &mut Pair, cell: &str, c: &Coercion| {
                    assign_field(&mut p.right, cell, c)
                }),
            ];
        }

        let mut pair = Pair {
            left: String::new(),
            right: 0,
        };
        Pair::BINDINGS[0].assign(&mut pair, "left", &Coercion::default());
        Pair::BINDINGS[1].assign(&mut pair, "443", &Coercion::default());

        assert_eq!(pair.left, "left");
        assert_eq!(pair.right, 443);
    }
}
