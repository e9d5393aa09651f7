use std::{ffi::OsString, io, path::PathBuf};

use clap::{Parser, error::ErrorKind};
use keepasspack::{
    clock::LocalClock,
    error::{DumpError, ParseError},
    parse_from_lines, save_as_xml,
    source::{FileSource, InteractiveSource, LineSource},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BANNER: &str = concat!("KeePassPack ", env!("CARGO_PKG_VERSION"));
const DEFAULT_OUTPUT_FILE: &str = "output.xml";
const INTERACTIVE_FLAG: &str = "-i";

const AFTER_HELP: &str = "\
The -i option reads CSV data from user input. Since the default output from
PassPack is copied to the clipboard, it can be easily pasted here.

If the output file is not specified, output is saved to \"output.xml\" in the
current directory.";

/// Converts PassPack CSV output to KeePassX XML.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = AFTER_HELP, arg_required_else_help = true)]
struct Args {
    /// CSV-экспорт PassPack или `-i` для чтения из стандартного ввода
    #[arg(value_name = "CSV", allow_hyphen_values = true, value_parser = parse_input)]
    input: Input,

    /// Файл, в который будет сохранён XML
    #[arg(value_name = "XML", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Подробный лог (уровень debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Debug)]
enum Input {
    Interactive,
    File(PathBuf),
}

fn parse_input(value: &str) -> Result<Input, String> {
    match value {
        "" => Err("путь до CSV-файла не может быть пустым".to_string()),
        INTERACTIVE_FLAG => Ok(Input::Interactive),
        path => Ok(Input::File(PathBuf::from(path))),
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("{0}")]
    Parse(ParseError),
    #[error("{0}")]
    Dump(#[from] DumpError),
    #[error("{0}")]
    Input(ParseError),
    #[error("{0}")]
    Usage(clap::Error),
}

impl Error {
    fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => 1,
            Self::Dump(_) => 2,
            Self::Input(_) => 3,
            Self::Usage(_) => 4,
        }
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        match value {
            err @ ParseError::InputUnavailable { .. } => Error::Input(err),
            err => Error::Parse(err),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_banner() {
    let rule = "=".repeat(BANNER.len());
    println!("{rule}");
    println!("{BANNER}");
    println!("{rule}");
}

/// Разбирает аргументы. `None` означает, что справка или версия уже выведены.
fn parse_args<I, T>(args: I) -> Result<Option<Args>, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Ok(Some(args)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = err.print();
                Ok(None)
            }
            _ => Err(Error::Usage(err)),
        },
    }
}

fn run() -> Result<(), Error> {
    print_banner();
    let Some(args) = parse_args(std::env::args_os())? else {
        return Ok(());
    };
    init_tracing(args.verbose);

    let lines = match &args.input {
        Input::Interactive => {
            println!("Reading entries from user input.");
            println!("Press CTRL+D on a blank line when done.");
            InteractiveSource::new(io::stdin().lock()).read_lines()?
        }
        Input::File(path) => {
            let source = FileSource::new(path);
            println!(
                "Reading entries from PassPack CSV export: {}...",
                source.path().display()
            );
            source.read_lines()?
        }
    };

    let entries = parse_from_lines(&lines)?;
    println!("{} entries found.", entries.len());

    save_as_xml(&args.output, &entries, &LocalClock)?;
    info!(output = %args.output.display(), "conversion finished");
    println!("Output saved to: {}", args.output.display());

    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e @ Error::Usage(_)) => {
            eprint!("{}", e);
            std::process::exit(e.code());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.code());
        }
    }
}
