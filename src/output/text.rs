//! Plain-text dumps of flat and tree statistics.
//!
//! Thin formatters over the stats iterators; the layout is a fixed-width
//! table suitable for terminals and log files.

use crate::stats::{FlatStat, TreeStat};
use crate::utils::config::{METHOD_COLUMN_WIDTH, TREE_INDENT_LEVELS, TREE_NAME_WIDTH};
use std::io::{self, Write};

/// Write the flat table: method, calls, average and total seconds
pub fn write_flat<W: Write>(
    out: &mut W,
    stats: impl IntoIterator<Item = FlatStat>,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<width$} {:<3} {:<5} {:<6}",
        "Method",
        "Calls",
        "Avg.",
        "Total",
        width = METHOD_COLUMN_WIDTH
    )?;
    for stat in stats {
        writeln!(
            out,
            "{:<width$} {:>4} {:>3.2} {:>5.1}",
            stat.method,
            stat.calls,
            stat.avg_time,
            stat.total_time,
            width = METHOD_COLUMN_WIDTH
        )?;
    }
    Ok(())
}

/// Write the tree table, indenting two spaces per level
pub fn write_tree<W: Write>(
    out: &mut W,
    stats: impl IntoIterator<Item = TreeStat>,
) -> io::Result<()> {
    writeln!(out, "Method                                   Time   #   %")?;
    for stat in stats {
        let lspace = "  ".repeat(stat.level);
        let rspace = "  ".repeat(TREE_INDENT_LEVELS.saturating_sub(stat.level));
        writeln!(
            out,
            "{}{:<width$}{} {:>3.2} {:>3}  {:>2.1}%",
            lspace,
            stat.method,
            rspace,
            stat.time,
            stat.calls,
            stat.percent,
            width = TREE_NAME_WIDTH
        )?;
    }
    Ok(())
}

/// Render the flat table to a string
pub fn render_flat(stats: impl IntoIterator<Item = FlatStat>) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_flat(&mut buf, stats);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Render the tree table to a string
pub fn render_tree(stats: impl IntoIterator<Item = TreeStat>) -> String {
    let mut buf = Vec::new();
    let _ = write_tree(&mut buf, stats);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_flat() {
        let stats = vec![FlatStat {
            method: "eggs".to_string(),
            calls: 2,
            total_time: 0.5,
            avg_time: 0.25,
        }];

        let rendered = render_flat(stats);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Method "));
        assert_eq!(lines[1], format!("{:<40}    2 0.25   0.5", "eggs"));
    }

    #[test]
    fn test_render_tree_indents_by_level() {
        let stats = vec![
            TreeStat {
                level: 0,
                method: "A".to_string(),
                time: 0.2,
                calls: 1,
                percent: 100.0,
            },
            TreeStat {
                level: 1,
                method: "(body)".to_string(),
                time: 0.05,
                calls: 1,
                percent: 25.0,
            },
        ];

        let rendered = render_tree(stats);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A "));
        assert!(lines[1].ends_with("0.20   1  100.0%"));
        assert!(lines[2].starts_with("  (body)"));
        assert!(lines[2].ends_with("0.05   1  25.0%"));
    }

    #[test]
    fn test_render_empty_has_header_only() {
        assert_eq!(render_flat(Vec::new()).lines().count(), 1);
        assert_eq!(render_tree(Vec::new()).lines().count(), 1);
    }
}
