/// Экранирует текст для вставки в документ KeePassX.
///
/// `&` заменяется первым, иначе сгенерированные сущности экранировались бы повторно.
pub fn xml_safe(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('\r', "")
        .replace('\n', "<br/>")
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
