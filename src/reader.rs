//! Сессия чтения CSV в структуры.

use std::{fs::File, io, marker::PhantomData, path::Path};

use tracing::{debug, trace};

use crate::cell::Coercion;
use crate::error::{Error, Result};
use crate::index::ColumnIndex;
use crate::options::{ReadOption, ReaderConfig};
use crate::record::Record;

/// Результат чтения одной строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Запись прочитана, структура заполнена.
    Record,
    /// Данные закончились. Повторные вызовы возвращают то же самое.
    EndOfData,
}

impl ReadStatus {
    pub fn is_end_of_data(self) -> bool {
        self == ReadStatus::EndOfData
    }
}

/// Читает CSV построчно и заполняет структуры, реализующие [`Record`].
///
/// Индекс колонок и разделитель списков задаются один раз при создании.
/// Если опция [`ReadOption::Index`] не передана, первая запись считается
/// заголовком и вызывающему не возвращается.
///
/// # Пример
///
/// ```rust
/// use csv_tag_reader::{bind_columns, options, ReadStatus, Reader};
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: String,
///     name: String,
///     roles: Vec<String>,
/// }
///
/// bind_columns!(User { id => "id", name => "name", roles => "roles" });
///
/// let data = "id,name,roles\n7,alice,admin;dev\n";
/// let mut reader = Reader::from_reader(data.as_bytes(), [options::slice_split(";")])?;
///
/// let mut user = User::default();
/// assert_eq!(reader.read_line(&mut user)?, ReadStatus::Record);
/// assert_eq!(user.id, "7");
/// assert_eq!(user.name, "alice");
/// assert_eq!(user.roles, ["admin", "dev"]);
///
/// assert_eq!(reader.read_line(&mut User::default())?, ReadStatus::EndOfData);
/// # Ok::<(), csv_tag_reader::error::Error>(())
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    records: csv::Reader<R>,
    index: ColumnIndex,
    coercion: Coercion,
    record: csv::StringRecord,
}

impl<R: io::Read> Reader<R> {
    /// Создаёт читатель поверх потока байт.
    ///
    /// Записи короче заголовка допускаются: недостающие поля просто не заполняются.
    pub fn from_reader<I>(reader: R, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ReadOption>,
    {
        let config = ReaderConfig::from_options(options)?;
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(false).flexible(true);
        if let Some(delimiter) = config.field_delimiter {
            builder.delimiter(delimiter);
        }
        Self::with_config(builder.from_reader(reader), config)
    }

    /// Создаёт читатель поверх уже настроенного токенизатора.
    ///
    /// Если токенизатор создан с `has_headers(true)`, его заголовок и становится
    /// индексом колонок. Опция [`ReadOption::Index`] требует `has_headers(false)`,
    /// иначе токенизатор молча съел бы первую запись данных.
    /// Опция [`ReadOption::Delimiter`] здесь недопустима.
    pub fn from_csv<I>(records: csv::Reader<R>, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ReadOption>,
    {
        let options: Vec<ReadOption> = options.into_iter().collect();
        if let Some(option) = options
            .iter()
            .find(|option| matches!(option, ReadOption::Delimiter(_)))
        {
            return Err(option.invalid("csv reader is already configured"));
        }
        if records.has_headers() {
            if let Some(option) = options
                .iter()
                .find(|option| matches!(option, ReadOption::Index(_)))
            {
                return Err(option.invalid("csv reader is configured with has_headers(true)"));
            }
        }
        let config = ReaderConfig::from_options(options)?;
        Self::with_config(records, config)
    }

    fn with_config(mut records: csv::Reader<R>, config: ReaderConfig) -> Result<Self> {
        let index = match config.index {
            Some(index) => index,
            None => read_header(&mut records)?,
        };
        debug!(
            columns = index.len(),
            slice_delimiter = config.slice_delimiter.as_str(),
            "csv reader created"
        );
        Ok(Reader {
            records,
            index,
            coercion: Coercion::new(config.slice_delimiter),
            record: csv::StringRecord::new(),
        })
    }

    /// Читает одну запись и заполняет привязанные поля `target`.
    ///
    /// Поля, чья колонка отсутствует в индексе или выходит за длину записи,
    /// остаются без изменений.
    pub fn read_line<T: Record>(&mut self, target: &mut T) -> Result<ReadStatus> {
        if !self
            .records
            .read_record(&mut self.record)
            .map_err(Error::Read)?
        {
            return Ok(ReadStatus::EndOfData);
        }

        for binding in T::BINDINGS {
            let Some(offset) = self.index.get(binding.column()) else {
                trace!(column = binding.column(), "unknown column, field skipped");
                continue;
            };
            let Some(cell) = self.record.get(offset) else {
                trace!(
                    column = binding.column(),
                    offset,
                    record_len = self.record.len(),
                    "short record, field skipped"
                );
                continue;
            };
            binding.assign(target, cell, &self.coercion);
        }
        Ok(ReadStatus::Record)
    }

    /// Итератор по оставшимся записям; каждая читается в новый `T::default()`.
    pub fn records<T: Record + Default>(&mut self) -> Records<'_, R, T> {
        Records {
            reader: self,
            _record: PhantomData,
        }
    }

    /// Читает все оставшиеся записи.
    pub fn read_all<T: Record + Default>(&mut self) -> Result<Vec<T>> {
        self.records().collect()
    }

    pub fn index(&self) -> &ColumnIndex {
        &self.index
    }

    pub fn list_delimiter(&self) -> &str {
        self.coercion.list_delimiter()
    }

    /// Закрывает читатель, освобождая источник данных (например, открытый файл).
    ///
    /// Для источника, которым читатель не владеет, ничего не делает.
    /// Ошибки закрытия файла не сообщаются: `File` закрывается при освобождении.
    pub fn close(self) {
        drop(self.records.into_inner());
        debug!("csv reader closed");
    }
}

impl Reader<File> {
    /// Открывает файл и создаёт читатель поверх него. Файл закрывается в [`Reader::close`].
    ///
    /// ```no_run
    /// use csv_tag_reader::{options, Reader};
    ///
    /// let reader = Reader::from_path("users.csv", [options::index(["id", "name"])])?;
    /// reader.close();
    /// # Ok::<(), csv_tag_reader::error::Error>(())
    /// ```
    pub fn from_path<P, I>(path: P, options: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = ReadOption>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "csv file opened");

        Self::from_reader(file, options).map_err(|source| Error::File {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}

fn read_header<R: io::Read>(records: &mut csv::Reader<R>) -> Result<ColumnIndex> {
    let header = if records.has_headers() {
        records.headers().map_err(Error::Header)?.clone()
    } else {
        let mut header = csv::StringRecord::new();
        if !records.read_record(&mut header).map_err(Error::Header)? {
            return Err(Error::MissingHeader);
        }
        header
    };
    if header.is_empty() {
        return Err(Error::MissingHeader);
    }
    debug!(header = ?header, "column index taken from first record");
    Ok(ColumnIndex::from_names(header.iter()))
}

/// Итератор по записям, см. [`Reader::records`].
pub struct Records<'r, R, T> {
    reader: &'r mut Reader<R>,
    _record: PhantomData<fn() -> T>,
}

impl<R: io::Read, T: Record + Default> Iterator for Records<'_, R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = T::default();
        match self.reader.read_line(&mut record) {
            Ok(ReadStatus::Record) => Some(Ok(record)),
            Ok(ReadStatus::EndOfData) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::options::{delimiter, index, slice_split};

    #[derive(Debug, Default, PartialEq)]
    struct Person {
        id: String,
        name: String,
        tags: Vec<String>,
        nick: Option<String>,
        age: u32,
        untagged: String,
    }

    crate::bind_columns!(Person {
        id => "id",
        name => "name",
        tags => "tags",
        nick => "nick",
        age => "age",
    });

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_index_example() {
        let mut reader =
            Reader::from_reader("7,alice\n".as_bytes(), [index(["id", "name"])]).unwrap();
        let mut got = Person::default();

        let status = reader.read_line(&mut got).unwrap();

        assert_eq!(status, ReadStatus::Record);
        assert_eq!(got, person("7", "alice"));
    }

    #[test]
    fn test_header_is_consumed() {
        let data = "name,id\nbob,1\ncarol,2\n";
        let mut reader = Reader::from_reader(data.as_bytes(), Vec::new()).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert_eq!(got, vec![person("1", "bob"), person("2", "carol")]);
        assert_eq!(reader.index().get("name"), Some(0));
    }

    #[test]
    fn test_short_record_leaves_defaults() {
        let data = "id,name,age\n1\n2,dave\n";
        let mut reader = Reader::from_reader(data.as_bytes(), Vec::new()).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert_eq!(got, vec![person("1", ""), person("2", "dave")]);
    }

    #[test]
    fn test_untagged_and_unknown_fields_untouched() {
        let data = "untagged,nick_name,id\nX,Y,3\n";
        let mut reader = Reader::from_reader(data.as_bytes(), Vec::new()).unwrap();
        let mut got = Person {
            untagged: "keep".to_string(),
            ..Default::default()
        };

        reader.read_line(&mut got).unwrap();

        assert_eq!(got.untagged, "keep");
        assert_eq!(got.nick, None);
        assert_eq!(got.id, "3");
    }

    #[test]
    fn test_list_split_with_delimiter() {
        let data = "id\ttags\n1\ta,b,c\n2\ta\n";
        let mut reader =
            Reader::from_reader(data.as_bytes(), [delimiter(b'\t'), slice_split(",")]).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert_eq!(got[0].tags, vec!["a", "b", "c"]);
        assert_eq!(got[1].tags, vec!["a"]);
    }

    #[test]
    fn test_list_without_delimiter_stays_empty() {
        let data = "id,tags\n1,\"a,b,c\"\n";
        let mut reader = Reader::from_reader(data.as_bytes(), Vec::new()).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert!(got[0].tags.is_empty());
        assert_eq!(reader.list_delimiter(), "");
    }

    #[test]
    fn test_optional_is_present() {
        let data = "nick,age\nx,41\n";
        let mut reader = Reader::from_reader(data.as_bytes(), Vec::new()).unwrap();
        let mut got = Person::default();

        reader.read_line(&mut got).unwrap();

        assert_eq!(got.nick.as_deref(), Some("x"));
        assert_eq!(got.age, 41);
    }

    #[test]
    fn test_end_of_data_repeats() {
        let mut reader = Reader::from_reader("id\n1\n".as_bytes(), Vec::new()).unwrap();
        let mut got = Person::default();

        assert_eq!(reader.read_line(&mut got).unwrap(), ReadStatus::Record);
        for _ in 0..3 {
            assert!(reader.read_line(&mut got).unwrap().is_end_of_data());
        }
        assert_eq!(got.id, "1");
    }

    #[test]
    fn test_header_only_has_no_records() {
        let mut reader = Reader::from_reader("id,name\n".as_bytes(), Vec::new()).unwrap();

        assert!(reader.records::<Person>().next().is_none());
    }

    #[test]
    fn test_empty_input_fails_construction() {
        let err = Reader::from_reader("".as_bytes(), Vec::new()).unwrap_err();

        assert!(matches!(err, Error::MissingHeader));
    }

    #[test]
    fn test_empty_input_with_index_reaches_end() {
        let mut reader = Reader::from_reader("".as_bytes(), [index(["id"])]).unwrap();

        assert_eq!(
            reader.read_line(&mut Person::default()).unwrap(),
            ReadStatus::EndOfData
        );
    }

    #[test]
    fn test_read_error_does_not_break_session() {
        let data: &[u8] = b"id\n\xff\n2\n";
        let mut reader = Reader::from_reader(data, Vec::new()).unwrap();

        let err = reader.read_line(&mut Person::default()).unwrap_err();
        assert!(matches!(err, Error::Read(_)));

        let mut got = Person::default();
        assert_eq!(reader.read_line(&mut got).unwrap(), ReadStatus::Record);
        assert_eq!(got.id, "2");
    }

    #[test]
    fn test_from_csv_uses_tokenizer_header() {
        let records = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader("id;name\n5;erin\n".as_bytes());
        let mut reader = Reader::from_csv(records, Vec::new()).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert_eq!(got, vec![person("5", "erin")]);
    }

    #[test]
    fn test_from_csv_rejects_delimiter_option() {
        let records = csv::ReaderBuilder::new().from_reader("id\n".as_bytes());

        let err = Reader::from_csv(records, [delimiter(b';')]).unwrap_err();

        assert!(matches!(err, Error::InvalidOption { ref option, .. } if option == "Delimiter"));
    }

    #[test]
    fn test_from_csv_with_index_requires_no_headers() {
        let records = csv::Reader::from_reader("7,alice\n8,bob\n".as_bytes());

        let err = Reader::from_csv(records, [index(["id", "name"])]).unwrap_err();

        assert!(matches!(err, Error::InvalidOption { ref option, .. } if option == "Index"));
    }

    #[test]
    fn test_from_csv_with_index_reads_every_row() {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("7,alice\n8,bob\n".as_bytes());
        let mut reader = Reader::from_csv(records, [index(["id", "name"])]).unwrap();

        let got: Vec<Person> = reader.read_all().unwrap();

        assert_eq!(got, vec![person("7", "alice"), person("8", "bob")]);
    }

    #[test]
    fn test_from_path_and_close() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,name,tags").unwrap();
        writeln!(file, "9,frank,x|y").unwrap();

        let mut reader = Reader::from_path(file.path(), [slice_split("|")]).unwrap();
        let got: Vec<Person> = reader.read_all().unwrap();
        reader.close();

        assert_eq!(got[0].name, "frank");
        assert_eq!(got[0].tags, vec!["x", "y"]);
    }

    #[test]
    fn test_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = Reader::from_path(&path, Vec::new()).unwrap_err();

        assert!(matches!(err, Error::Open { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_from_empty_file_names_path() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = Reader::from_path(file.path(), Vec::new()).unwrap_err();

        match err {
            Error::File { source, .. } => assert!(matches!(*source, Error::MissingHeader)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_close_without_owned_source() {
        let reader = Reader::from_reader("id\n".as_bytes(), Vec::new()).unwrap();

        reader.close();
    }
}
