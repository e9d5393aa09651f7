//! # keepasspack
//!
//! Конвертер CSV-экспорта PassPack в XML-базу KeePassX.
//!
//! Экспорт PassPack содержит семь колонок без заголовка:
//! `name, user_id, password, link, tags, notes, email`.
//! Каждая строка превращается в элемент `<entry>` группы
//! «PassPack Imported Entries».
//!
//! ## Быстрый старт
//!
//! ```rust
//! use keepasspack::{clock::LocalClock, dump_as_xml, parse_from_lines};
//!
//! let lines = ["Bank,jdoe,p@ss,https://bank.example,finance,Primary account,jdoe@example.com"];
//!
//! let entries = parse_from_lines(lines).expect("Ошибка парсинга");
//!
//! let mut writer = Vec::new();
//! dump_as_xml(&mut writer, &entries, &LocalClock).expect("Ошибка записи");
//!
//! let xml = String::from_utf8(writer).unwrap();
//! assert!(xml.contains("<comment>Email: jdoe@example.com<br/>Primary account<br/>Tags: finance</comment>"));
//! ```
//!
//! ## Обработка ошибок
//! Функции чтения возвращают [`error::ParseError`], функции записи возвращают
//! [`error::DumpError`]. Любая ошибка прерывает конвертацию целиком.

pub mod clock;
pub mod error;
pub mod source;
pub mod types;

mod csv_format;
mod utils;
mod xml_format;

pub use csv_format::{parse_from_csv, parse_from_lines};

pub use xml_format::{
    DOCUMENT_FOOTER, DOCUMENT_HEADER, compose_comment, dump_as_xml, render_document,
    render_entry, save_as_xml,
};

pub use utils::xml_safe;
