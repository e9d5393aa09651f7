//! Способы получить строки CSV: из файла или из интерактивного ввода.
//!
//! Оба адаптера отдают одинаковую последовательность строк, которую затем
//! разбирает [`crate::parse_from_lines`].

use std::{
    fs,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::ParseError;

/// Источник строк CSV.
pub trait LineSource {
    /// Читает все строки до конца ввода. Символы перевода строки отбрасываются.
    fn read_lines(self) -> Result<Vec<String>, ParseError>;
}

/// Строки из файла экспорта PassPack.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn read_lines(self) -> Result<Vec<String>, ParseError> {
        let file = fs::File::open(&self.path).map_err(|source| ParseError::InputUnavailable {
            path: self.path.clone(),
            source,
        })?;
        let lines = collect_lines(io::BufReader::new(file))?;
        debug!(path = %self.path.display(), lines = lines.len(), "read CSV file");
        Ok(lines)
    }
}

/// Строки, введённые пользователем (обычно вставленные из буфера обмена).
///
/// Ввод заканчивается по концу потока, например по Ctrl+D в терминале.
///
/// # Пример
///
/// ```rust
/// use keepasspack::source::{InteractiveSource, LineSource};
///
/// let pasted = "Mail,bob,secret\nBank,alice,p@ss\n";
/// let lines = InteractiveSource::new(pasted.as_bytes()).read_lines().unwrap();
/// assert_eq!(lines, vec!["Mail,bob,secret", "Bank,alice,p@ss"]);
/// ```
#[derive(Debug)]
pub struct InteractiveSource<R> {
    reader: R,
}

impl<R: BufRead> InteractiveSource<R> {
    pub fn new(reader: R) -> Self {
        InteractiveSource { reader }
    }
}

impl<R: BufRead> LineSource for InteractiveSource<R> {
    fn read_lines(self) -> Result<Vec<String>, ParseError> {
        let lines = collect_lines(self.reader)?;
        debug!(lines = lines.len(), "read CSV from interactive input");
        Ok(lines)
    }
}

fn collect_lines(reader: impl BufRead) -> Result<Vec<String>, ParseError> {
    let mut result = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        match line {
            Ok(line) => result.push(line),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(ParseError::InvalidFormat {
                    line: idx as u64 + 1,
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(result)
}
