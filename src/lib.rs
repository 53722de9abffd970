//! # csv_tag_reader
//!
//! Библиотека для построчного чтения CSV в пользовательские структуры.
//!
//! Каждая структура объявляет, какое поле из какой колонки заполняется
//! (макрос [`bind_columns!`]). Поддерживаемые типы полей:
//! * `String` — значение ячейки как есть;
//! * `Option<T>` — всегда `Some`, если колонка найдена;
//! * `Vec<T>` — ячейка режется по разделителю из опции [`options::slice_split`];
//! * числа, `bool`, `char`.
//!
//! Индекс колонок берётся из первой строки либо задаётся опцией [`options::index`].
//!
//! ## Быстрый старт
//!
//! ```rust
//! use csv_tag_reader::{bind_columns, options, Reader};
//!
//! #[derive(Debug, Default)]
//! struct Transaction {
//!     id: String,
//!     amount: u64,
//!     labels: Vec<String>,
//!     description: Option<String>,
//! }
//!
//! bind_columns!(Transaction {
//!     id => "TX_ID",
//!     amount => "AMOUNT",
//!     labels => "LABELS",
//!     description => "DESCRIPTION",
//! });
//!
//! let data = r##"TX_ID,AMOUNT,LABELS,DESCRIPTION
//! 1001,50000,salary;bonus,"Initial account funding"
//! 1002,100"##;
//!
//! let mut reader = Reader::from_reader(data.as_bytes(), [options::slice_split(";")])
//!     .expect("Ошибка создания");
//! let txs: Vec<Transaction> = reader.read_all().expect("Ошибка чтения");
//!
//! assert_eq!(txs.len(), 2);
//! assert_eq!(txs[0].labels, ["salary", "bonus"]);
//! assert_eq!(txs[0].description.as_deref(), Some("Initial account funding"));
//! assert_eq!(txs[1].amount, 100);
//! assert_eq!(txs[1].description, None);
//! ```
//!
//! ## Обработка ошибок
//! Создание читателя и чтение записей возвращают [`error::Result`], ошибка описана в [`error::Error`].
//! Конец данных ошибкой не является: [`Reader::read_line`] возвращает [`ReadStatus::EndOfData`].
//! Неизвестные колонки, короткие записи и неразобранные значения молча пропускаются.

pub mod cell;
pub mod error;
pub mod index;
pub mod options;
pub mod reader;
pub mod record;

pub use cell::{Coercion, FromCell};
pub use error::{Error, Result};
pub use index::ColumnIndex;
pub use options::{ReadOption, ReaderConfig};
pub use reader::{ReadStatus, Reader, Records};
pub use record::{Binding, Record};
