use std::fmt;

use clap::Parser;
use csv_tag_reader::{Reader, bind_columns, error, options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Путь до CSV файла с контактами
    #[arg(long, required = true)]
    input_file: String,

    /// Список колонок через запятую, если в файле нет строки заголовка
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Разделитель адресов в колонке EMAILS
    #[arg(long, default_value = ";")]
    list_delimiter: String,

    /// Разделитель полей CSV
    #[arg(long)]
    field_delimiter: Option<char>,
}

#[derive(Debug, Default)]
struct Contact {
    id: String,
    name: String,
    emails: Vec<String>,
    phone: Option<String>,
    age: u32,
}

bind_columns!(Contact {
    id => "ID",
    name => "NAME",
    emails => "EMAILS",
    phone => "PHONE",
    age => "AGE",
});

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}\nNAME: {}\nEMAILS: {}\nPHONE: {}\nAGE: {}\n",
            self.id,
            self.name,
            self.emails.join(", "),
            self.phone.as_deref().unwrap_or("-"),
            self.age
        )
    }
}

#[derive(Debug)]
enum Error {
    Read(error::Error),
    Usage(String),
}

impl Error {
    fn code(&self) -> i32 {
        match self {
            Self::Read(_) => 1,
            Self::Usage(_) => 3,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "{}", err),
            Self::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<error::Error> for Error {
    fn from(value: error::Error) -> Self {
        Error::Read(value)
    }
}

fn read_options(args: &Args) -> Result<Vec<options::ReadOption>, Error> {
    let mut result = vec![options::slice_split(args.list_delimiter.as_str())];
    if let Some(columns) = &args.columns {
        result.push(options::index(columns.iter().map(|c| c.trim())));
    }
    if let Some(delimiter) = args.field_delimiter {
        let Ok(byte) = u8::try_from(delimiter) else {
            return Err(Error::Usage(format!(
                "разделитель полей должен быть однобайтовым символом: {}",
                delimiter
            )));
        };
        result.push(options::delimiter(byte));
    }
    Ok(result)
}

fn run() -> Result<(), Error> {
    let args = Args::parse();

    let mut reader = Reader::from_path(&args.input_file, read_options(&args)?)?;

    let mut count = 0;
    for contact in reader.records::<Contact>() {
        let contact = contact?;
        count += 1;
        println!("{}", contact);
    }
    reader.close();

    println!("Прочитано контактов: {}", count);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.code());
        }
    }
}
