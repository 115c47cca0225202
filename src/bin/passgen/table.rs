use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use passgen::CharacterClass;

const HEADERS: [&str; 3] = ["Class", "Count", "Members"];

pub(crate) fn list_classes() -> io::Result<()> {
    write_class_table(io::stdout().lock())
}

/// One row per class: its name, how many characters it has, and the characters themselves.
fn write_class_table(mut output: impl Write) -> io::Result<()> {
    let rows = CharacterClass::ALL
        .into_iter()
        .map(|class| {
            [
                class.name().to_owned(),
                class.members().chars().count().to_string(),
                class.members().to_owned(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    write_row(&mut output, &widths, HEADERS)?;
    let dividers = widths.map(|w| "─".repeat(w));
    write_row(&mut output, &widths, dividers.each_ref().map(String::as_str))?;
    for row in &rows {
        write_row(&mut output, &widths, row.each_ref().map(String::as_str))?;
    }
    Ok(())
}

fn write_row(output: &mut impl Write, widths: &[usize; 3], cells: [&str; 3]) -> io::Result<()> {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            write!(output, "  ")?;
        }
        let padding = width.saturating_sub(cell.width());
        write!(output, "{cell}{:padding$}", "")?;
    }
    writeln!(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let mut out = Vec::new();
        write_class_table(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().map(str::trim_end).collect::<Vec<_>>();

        assert_eq!(lines.len(), 2 + CharacterClass::ALL.len());
        assert_eq!(lines[0], "Class      Count  Members");
        assert_eq!(
            lines[1],
            format!("{}  {}  {}", "─".repeat(9), "─".repeat(5), "─".repeat(32))
        );
        assert_eq!(lines[4], "digits     10     0123456789");
        assert!(lines[5].starts_with("symbols    32     !\"#$%"));
    }
}
