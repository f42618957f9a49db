use crate::dataset::Dataset;
use csv_lens_common::{DisplayConfig, OutputFormat, Result};
use std::io::Write;

// --- output dispatch ---

pub fn render<W: Write>(dataset: &Dataset, config: &DisplayConfig, out: &mut W) -> Result<()> {
    match config.format {
        OutputFormat::Table => {
            if dataset.is_empty() {
                writeln!(out, "{}", config.no_data_message)?;
            } else {
                out.write_all(format_table(dataset).as_bytes())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, dataset)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(dataset, out)?,
    }
    Ok(())
}

pub fn render_to_string(dataset: &Dataset, config: &DisplayConfig) -> Result<String> {
    let mut buf = Vec::new();
    render(dataset, config, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// --- org-mode table ---

#[derive(Clone, Copy, PartialEq)]
enum Align { Left, Right }

fn is_numeric_column(cells: &[&str]) -> bool {
    let mut any = false;
    for c in cells {
        let c = c.trim();
        if c.is_empty() { continue; }
        if c.parse::<f64>().is_err() { return false; }
        any = true;
    }
    any
}

fn pad(s: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(s.chars().count());
    match align {
        Align::Left => format!("{s}{}", " ".repeat(fill)),
        Align::Right => format!("{}{s}", " ".repeat(fill)),
    }
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], aligns: &[Align]) -> String {
    let parts: Vec<String> = cells
        .zip(widths.iter().zip(aligns))
        .map(|(c, (&w, &a))| format!(" {} ", pad(c, w, a)))
        .collect();
    format!("|{}|\n", parts.join("|"))
}

/// Header row, `|---+---|` rule, then one line per record. Numeric columns
/// are right aligned, text columns left aligned.
pub fn format_table(dataset: &Dataset) -> String {
    let columns = dataset.columns();
    let grid: Vec<Vec<&str>> = dataset
        .records()
        .iter()
        .map(|r| columns.iter().map(|c| r.get(c).unwrap_or("")).collect())
        .collect();
    // headers get two extra columns of breathing room
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count() + 2).collect();
    let mut aligns = Vec::with_capacity(columns.len());
    for (i, w) in widths.iter_mut().enumerate() {
        let cells: Vec<&str> = grid.iter().map(|row| row[i]).collect();
        *w = cells.iter().map(|c| c.chars().count()).fold(*w, usize::max);
        aligns.push(if is_numeric_column(&cells) { Align::Right } else { Align::Left });
    }
    let mut out = table_line(columns.iter().map(|c| c.as_str()), &widths, &aligns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    out.push_str(&format!("|{}|\n", rule.join("+")));
    for row in &grid {
        out.push_str(&table_line(row.iter().copied(), &widths, &aligns));
    }
    out
}

// --- CSV ---

fn write_csv<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(dataset.columns())?;
    for record in dataset.records() {
        writer.write_record(dataset.columns().iter().map(|c| record.get(c).unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn phones() -> Dataset {
        Dataset::from_records(vec![
            Record::from_pairs([("name", "iphone 15"), ("price", "999")]),
            Record::from_pairs([("name", "galaxy s23"), ("price", "1199")]),
        ])
    }

    fn cfg(format: OutputFormat) -> DisplayConfig {
        DisplayConfig { format, ..DisplayConfig::default() }
    }

    #[test]
    fn table_layout() {
        let expected = "\
| name       |   price |
|------------+---------|
| iphone 15  |     999 |
| galaxy s23 |    1199 |
";
        assert_eq!(render_to_string(&phones(), &cfg(OutputFormat::Table)).unwrap(), expected);
    }

    #[test]
    fn table_missing_cell_is_blank() {
        let ds = Dataset::from_records(vec![
            Record::from_pairs([("name", "a"), ("brand", "x")]),
            Record::from_pairs([("name", "b")]),
        ]);
        let out = format_table(&ds);
        assert_eq!(out.lines().nth(3), Some("| b      |         |"));
    }

    #[test]
    fn empty_table_prints_no_data() {
        let ds = Dataset::new(vec!["name".into()], Vec::new());
        assert_eq!(render_to_string(&ds, &cfg(OutputFormat::Table)).unwrap(), "No data to display.\n");
    }

    #[test]
    fn custom_no_data_message() {
        let config = DisplayConfig { no_data_message: "nothing".into(), ..DisplayConfig::default() };
        assert_eq!(render_to_string(&Dataset::default(), &config).unwrap(), "nothing\n");
    }

    #[test]
    fn json_keeps_column_order() {
        let out = render_to_string(&phones(), &cfg(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["name"], "galaxy s23");
        assert!(out.find("\"name\"").unwrap() < out.find("\"price\"").unwrap());
    }

    #[test]
    fn json_empty_is_empty_array() {
        assert_eq!(render_to_string(&Dataset::default(), &cfg(OutputFormat::Json)).unwrap(), "[]\n");
    }

    #[test]
    fn csv_output() {
        let out = render_to_string(&phones(), &cfg(OutputFormat::Csv)).unwrap();
        assert_eq!(out, "name,price\niphone 15,999\ngalaxy s23,1199\n");
    }

    #[test] fn numeric_detection_ignores_blanks() { assert!(is_numeric_column(&["1", "", "2.5"])); }
    #[test] fn numeric_detection_all_blank() { assert!(!is_numeric_column(&["", ""])); }
    #[test] fn numeric_detection_text() { assert!(!is_numeric_column(&["1", "x"])); }
}
