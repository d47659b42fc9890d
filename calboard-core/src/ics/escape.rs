/// Decode iCalendar text escapes and trim surrounding whitespace.
///
/// Handles `\n`/`\N` (newline), `\,`, `\;` and `\\`. Escapes are decoded in a
/// single left-to-right pass, so `\\n` stays a backslash followed by `n`.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out.trim().to_string()
}
