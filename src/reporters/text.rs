//! Tabular (terminal) reporter

use crate::stats::AuthorStats;

const HEADER: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Render stats as left-aligned columns separated by at least one space.
pub fn render(stats: &[AuthorStats]) -> String {
    let rows: Vec<[String; 4]> = stats
        .iter()
        .map(|s| {
            [
                s.name.clone(),
                s.lines.to_string(),
                s.commits.to_string(),
                s.files.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADER.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{:<w$} ", cell, w = width));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_stats;

    #[test]
    fn test_columns_are_aligned() {
        let out = render(&test_stats());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name  Lines Commits Files");
        assert_eq!(lines[1], "Alice 10    1       1");
        assert_eq!(lines[2], "Bob   5     1       1");
    }

    #[test]
    fn test_long_names_widen_column() {
        let out = render(&[AuthorStats::new("Bartholomew", 1, 2, 3)]);
        assert!(out.starts_with("Name        Lines"));
        assert!(out.ends_with("Bartholomew 1     2       3\n"));
    }
}
