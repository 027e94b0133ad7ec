use tabled::builder::Builder;
use tabled::settings::Style;

/// Render rows of text as a double-line box table; the first row is the header.
pub fn render(rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    for row in rows {
        builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(Style::extended());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_every_cell() {
        let rows = vec![
            vec!["K".to_string(), "a[k]".to_string()],
            vec!["1".to_string(), "0.5".to_string()],
            vec!["2".to_string(), "0.75".to_string()],
        ];
        let text = render(&rows);
        for cell in ["K", "a[k]", "0.5", "0.75"] {
            assert!(text.contains(cell));
        }
        assert!(text.contains('═'));
        // header before data
        assert!(text.find("a[k]").unwrap() < text.find("0.75").unwrap());
    }
}
