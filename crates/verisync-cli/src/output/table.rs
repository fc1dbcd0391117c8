/// Render a left-aligned table; numeric-looking cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format_cell(header, *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.trim_end().chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                format_cell(cell, *width, looks_numeric(cell))
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}

fn format_cell(value: &str, width: usize, right: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(value.chars().count()));
    if right {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

#[cfg(test)]
mod tests {
    use super::render_table;

    #[test]
    fn columns_align_across_rows() {
        let rows = vec![
            vec!["eq-1".to_string(), "true".to_string()],
            vec!["equipment-200".to_string(), "false".to_string()],
        ];
        let table = render_table(&["id", "mismatch"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let column = lines[0].find("mismatch").unwrap();
        assert_eq!(lines[2].find("true"), Some(column));
        assert_eq!(lines[3].find("false"), Some(column));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(&["id", "url"], &[vec!["eq-1".to_string()]]);
        assert!(table.lines().nth(2).unwrap().ends_with('-'));
    }
}
