use chrono::NaiveDateTime;
use std::fmt;

/// Порядок колонок в CSV-экспорте PassPack.
pub const PASSPACK_FIELDS: [&str; 7] = [
    "name", "user_id", "password", "link", "tags", "notes", "email",
];

/// Одна запись PassPack.
///
/// Значения хранятся в исходном виде, без экранирования.
/// Отсутствующие в строке колонки представлены пустыми строками.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub user_id: String,
    pub password: String,
    pub link: String,
    pub tags: String,
    pub notes: String,
    pub email: String,
}

/// Момент времени для полей `creation`, `lastaccess` и `lastmod`.
///
/// Выводится в формате `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub NaiveDateTime);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}
