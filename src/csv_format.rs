use std::io;

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::types::{Entry, PASSPACK_FIELDS};

/// Разбирает CSV-экспорт PassPack, полученный в виде последовательности строк.
///
/// Строки склеиваются через `\n`, поэтому поля в кавычках могут занимать
/// несколько строк. Заголовка нет: первая строка уже является записью.
///
/// # Пример
///
/// ```rust
/// use keepasspack::parse_from_lines;
///
/// let lines = ["Bank,jdoe,p@ss,https://bank.example", r#"Mail,bob,"a,b""#];
///
/// let entries = parse_from_lines(lines).expect("Ошибка парсинга");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].link, "https://bank.example");
/// assert_eq!(entries[1].password, "a,b");
/// assert_eq!(entries[1].email, "");
/// ```
pub fn parse_from_lines<I, S>(lines: I) -> Result<Vec<Entry>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut data = String::new();
    for line in lines {
        data.push_str(line.as_ref());
        data.push('\n');
    }
    // Строки уже разделены по `\n`, одиночный `\r` остаётся частью поля.
    read_entries(&mut data.as_bytes(), csv::Terminator::Any(b'\n'))
}

/// Читает и парсит записи PassPack из потока CSV.
///
/// Колонки сопоставляются полям [`Entry`] по позиции:
/// `name, user_id, password, link, tags, notes, email`.
/// Недостающие колонки становятся пустыми строками, лишние игнорируются,
/// пустые строки пропускаются.
///
/// # Ошибки
///
/// Возвращает [`ParseError`], если:
/// * Запись не разбирается как CSV.
/// * Возникла ошибка ввода-вывода при чтении из `reader`.
pub fn parse_from_csv(reader: &mut impl io::Read) -> Result<Vec<Entry>, ParseError> {
    read_entries(reader, csv::Terminator::CRLF)
}

fn read_entries(
    reader: &mut impl io::Read,
    terminator: csv::Terminator,
) -> Result<Vec<Entry>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(terminator)
        .from_reader(reader);

    let mut result = Vec::<Entry>::new();
    for record in csv_reader.records() {
        result.push(parse_entry(&record?));
    }
    debug!(entries = result.len(), "parsed PassPack CSV");
    Ok(result)
}

fn parse_entry(record: &csv::StringRecord) -> Entry {
    if record.len() > PASSPACK_FIELDS.len() {
        trace!(
            columns = record.len(),
            line = record.position().map(|pos| pos.line()),
            "ignoring extra columns"
        );
    }
    let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    Entry {
        name: field(0),
        user_id: field(1),
        password: field(2),
        link: field(3),
        tags: field(4),
        notes: field(5),
        email: field(6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_record() {
        let entries = parse_from_lines([
            "Bank,jdoe,p@ss,https://bank.example,finance,Primary account,jdoe@example.com",
        ])
        .unwrap();

        assert_eq!(
            entries,
            vec![Entry {
                name: "Bank".to_string(),
                user_id: "jdoe".to_string(),
                password: "p@ss".to_string(),
                link: "https://bank.example".to_string(),
                tags: "finance".to_string(),
                notes: "Primary account".to_string(),
                email: "jdoe@example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_columns_follow_schema_order() {
        let entries = parse_from_lines([PASSPACK_FIELDS.join(",")]).unwrap();
        let entry = &entries[0];

        let got = [
            &entry.name,
            &entry.user_id,
            &entry.password,
            &entry.link,
            &entry.tags,
            &entry.notes,
            &entry.email,
        ];
        assert_eq!(got, PASSPACK_FIELDS);
    }

    #[test]
    fn test_first_line_is_data() {
        let entries =
            parse_from_lines(["name,user_id,password,link,tags,notes,email"]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "name");
        assert_eq!(entries[0].email, "email");
    }

    #[test]
    fn test_short_record_fills_empty_fields() {
        let entries = parse_from_lines(["Mail,bob,secret"]).unwrap();
        let entry = &entries[0];

        assert_eq!(entry.name, "Mail");
        assert_eq!(entry.user_id, "bob");
        assert_eq!(entry.password, "secret");
        assert_eq!(entry.link, "");
        assert_eq!(entry.tags, "");
        assert_eq!(entry.notes, "");
        assert_eq!(entry.email, "");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let entries = parse_from_lines(["a,b,c,d,e,f,g,h,i", "j,k"]).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].email, "g");
        assert_eq!(entries[1].user_id, "k");
    }

    #[test]
    fn test_quoted_fields() {
        let data = "\"Shop, Inc\",\"say \"\"hi\"\"\",pw,,,\"line one\nline two\",\n";

        let entries = parse_from_csv(&mut data.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Shop, Inc");
        assert_eq!(entries[0].user_id, "say \"hi\"");
        assert_eq!(entries[0].notes, "line one\nline two");
    }

    #[test]
    fn test_quoted_newline_across_lines() {
        let entries = parse_from_lines(["Site,u,p,,,\"first", "second\",e@x"]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notes, "first\nsecond");
        assert_eq!(entries[0].email, "e@x");
    }

    #[test]
    fn test_bare_carriage_return_stays_in_field() {
        let entries = parse_from_lines(["Site,u,p,,,note\rmore,e@x"]).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notes, "note\rmore");
        assert_eq!(entries[0].email, "e@x");
    }

    #[test]
    fn test_crlf_reader_input() {
        let data = "a,b,c,,,,x@y\r\nd,e\r\n";

        let entries = parse_from_csv(&mut data.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].email, "x@y");
        assert_eq!(entries[1].user_id, "e");
    }

    #[test]
    fn test_values_are_not_trimmed_or_escaped() {
        let entries = parse_from_lines([" A & B , <u> ,p"]).unwrap();

        assert_eq!(entries[0].name, " A & B ");
        assert_eq!(entries[0].user_id, " <u> ");
    }

    #[test]
    fn test_order_is_preserved() {
        let lines: Vec<String> = (0..50).map(|i| format!("entry{i},user{i}")).collect();

        let entries = parse_from_lines(&lines).unwrap();

        assert_eq!(entries.len(), 50);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.name, format!("entry{i}"));
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let entries = parse_from_lines(["a,b", "", "c,d", ""]).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "c");
    }

    #[test]
    fn test_empty_input() {
        let entries = parse_from_lines(Vec::<String>::new()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_a_format_error() {
        let mut data: &[u8] = b"ok,row\n\xff\xfe,broken\n";

        let err = parse_from_csv(&mut data).unwrap_err();

        assert!(matches!(err, ParseError::InvalidFormat { .. }));
    }
}
