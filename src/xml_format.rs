use std::{
    io::{self, Write},
    path::Path,
};

use tracing::debug;

use crate::clock::Clock;
use crate::error::DumpError;
use crate::types::{Entry, Timestamp};
use crate::utils::{is_blank, xml_safe};

pub const DOCUMENT_HEADER: &str = "<!DOCTYPE KEEPASSX_DATABASE>
<database>
 <group>
  <title>PassPack Imported Entries</title>
  <icon>0</icon>
";

pub const DOCUMENT_FOOTER: &str = " </group>
</database>";

const DEFAULT_ICON: u32 = 0;
const EXPIRE_NEVER: &str = "Never";

/// Собирает текст поля `<comment>`: строка с email, заметки, строка с тегами.
///
/// Пустые (или состоящие из пробелов) email и теги пропускаются.
pub fn compose_comment(entry: &Entry) -> String {
    let mut comment = String::new();
    if !is_blank(&entry.email) {
        comment.push_str(&format!("Email: {}<br/>", xml_safe(&entry.email)));
    }
    comment.push_str(&xml_safe(&entry.notes));
    if !is_blank(&entry.tags) {
        comment.push_str(&format!("<br/>Tags: {}", xml_safe(&entry.tags)));
    }
    comment
}

/// Превращает запись в элемент `<entry>` KeePassX.
///
/// Часы опрашиваются один раз, и это время попадает во все три поля
/// `creation`, `lastaccess` и `lastmod`.
///
/// # Пример
///
/// ```rust
/// use chrono::NaiveDate;
/// use keepasspack::{clock::FixedClock, render_entry, types::Entry};
///
/// let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let entry = Entry { name: "R&D".to_string(), ..Default::default() };
///
/// let xml = render_entry(&entry, &FixedClock(at));
/// assert!(xml.contains("<title>R&amp;D</title>"));
/// assert!(xml.contains("<creation>2024-05-01T09:30:00</creation>"));
/// ```
pub fn render_entry(entry: &Entry, clock: &impl Clock) -> String {
    let stamp = Timestamp(clock.now());
    format!(
        "   <entry>
    <title>{title}</title>
    <username>{username}</username>
    <password>{password}</password>
    <url>{url}</url>
    <comment>{comment}</comment>
    <icon>{icon}</icon>
    <creation>{stamp}</creation>
    <lastaccess>{stamp}</lastaccess>
    <lastmod>{stamp}</lastmod>
    <expire>{expire}</expire>
   </entry>
",
        title = xml_safe(&entry.name),
        username = xml_safe(&entry.user_id),
        password = xml_safe(&entry.password),
        url = xml_safe(&entry.link),
        comment = compose_comment(entry),
        icon = DEFAULT_ICON,
        expire = EXPIRE_NEVER,
    )
}

/// Собирает полный документ: заголовок, записи в исходном порядке, окончание.
pub fn render_document(entries: &[Entry], clock: &impl Clock) -> String {
    let mut document = String::from(DOCUMENT_HEADER);
    for entry in entries {
        document.push_str(&render_entry(entry, clock));
    }
    document.push_str(DOCUMENT_FOOTER);
    document
}

/// Сериализует записи в документ KeePassX XML, записывая результат в `writer`.
///
/// # Ошибки
///
/// Возвращает [`DumpError`], если при записи во `writer` произошла ошибка ввода-вывода.
///
/// # Пример
///
/// ```rust
/// use keepasspack::{clock::LocalClock, dump_as_xml, parse_from_lines};
///
/// let entries = parse_from_lines(["Mail,bob,secret"]).unwrap();
/// let mut buffer = Vec::new();
///
/// dump_as_xml(&mut buffer, &entries, &LocalClock).expect("Ошибка записи");
///
/// let result_string = String::from_utf8(buffer).expect("Невалидный UTF-8");
/// assert!(result_string.starts_with("<!DOCTYPE KEEPASSX_DATABASE>"));
/// assert!(result_string.contains("<username>bob</username>"));
/// ```
pub fn dump_as_xml(
    writer: &mut impl io::Write,
    entries: &[Entry],
    clock: &impl Clock,
) -> Result<(), DumpError> {
    writer.write_all(render_document(entries, clock).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Сохраняет документ в файл `path`.
///
/// Документ целиком собирается в памяти и пишется во временный файл рядом с
/// `path`, который затем переименовывается поверх `path`. При ошибке временный
/// файл удаляется, а существующий `path` остаётся нетронутым.
pub fn save_as_xml(path: &Path, entries: &[Entry], clock: &impl Clock) -> Result<(), DumpError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let document = render_document(entries, clock);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(document.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    debug!(
        path = %path.display(),
        bytes = document.len(),
        entries = entries.len(),
        "saved KeePassX XML"
    );
    Ok(())
}
