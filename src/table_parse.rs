use std::collections::BTreeMap;

/// Split on tabs and runs of two or more whitespace characters; single
/// spaces stay inside a cell.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed.split('\t').flat_map(split_on_wide_gaps).collect()
}

fn split_on_wide_gaps(segment: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut gap = 0_usize;

    for ch in segment.chars() {
        if ch.is_whitespace() {
            gap += 1;
            if gap == 1 {
                current.push(' ');
            }
            continue;
        }

        if gap >= 2 && !current.trim().is_empty() {
            cells.push(current.trim().to_string());
            current.clear();
        }
        gap = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

pub(crate) fn modal_width(rows: &[Vec<String>]) -> usize {
    let mut freq: BTreeMap<usize, usize> = BTreeMap::new();
    for row in rows {
        *freq.entry(row.len()).or_default() += 1;
    }

    freq.into_iter()
        .max_by_key(|&(width, count)| (count, width))
        .map_or(0, |(width, _)| width)
}

#[cfg(test)]
mod tests {
    use super::{modal_width, soft_split_line_into_cells, split_line_into_cells};

    #[test]
    fn splits_double_space_separated_cells() {
        let cells = split_line_into_cells("Alice  30  98");
        assert_eq!(cells, vec!["Alice", "30", "98"]);
    }

    #[test]
    fn splits_tab_separated_cells() {
        let cells = split_line_into_cells("A\tB\tC");
        assert_eq!(cells, vec!["A", "B", "C"]);
    }

    #[test]
    fn keeps_single_spaces_inside_a_cell() {
        let cells = split_line_into_cells("New York  8804190");
        assert_eq!(cells, vec!["New York", "8804190"]);
    }

    #[test]
    fn soft_splits_single_space_cells() {
        let cells = soft_split_line_into_cells("Name Age Score");
        assert_eq!(cells, vec!["Name", "Age", "Score"]);
    }

    #[test]
    fn detects_modal_width() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
            vec!["x".to_string()],
        ];
        assert_eq!(modal_width(&rows), 2);
    }
}
