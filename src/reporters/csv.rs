//! CSV reporter

use crate::stats::AuthorStats;

/// Quote a field if it contains a separator, quote or line break, or
/// starts with whitespace.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) || field.starts_with(char::is_whitespace) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render stats as CSV with a `Name,Lines,Commits,Files` header
pub fn render(stats: &[AuthorStats]) -> String {
    let mut out = String::from("Name,Lines,Commits,Files\n");
    for s in stats {
        out.push_str(&format!(
            "{},{},{},{}\n",
            escape(&s.name),
            s.lines,
            s.commits,
            s.files
        ));
    }
    out
}
