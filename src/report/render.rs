use super::{Report, ReportError};
use serde_json::{Map, Value};

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(super) fn table(report: &Report) -> String {
    let cells: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = report.headers.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(report.headers.clone()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub(super) fn json(report: &Report) -> Result<String, ReportError> {
    let objects: Vec<Value> = report
        .rows
        .iter()
        .map(|row| {
            let map: Map<String, Value> = report
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.to_string(), v.clone()))
                .collect();
            Value::Object(map)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}

pub(super) fn csv(report: &Report) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&report.headers)?;
    for row in &report.rows {
        writer.write_record(row.iter().map(cell_text))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Report {
        Report {
            headers: vec!["name", "group", "code"],
            rows: vec![
                vec![json!("Alpha"), json!("A"), json!("ALP")],
                vec![json!("Beta, the second"), json!("A"), Value::Null],
            ],
        }
    }

    #[test]
    fn test_table_alignment() {
        let out = table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "name              group  code");
        assert_eq!(lines[1], "----------------  -----  ----");
        assert_eq!(lines[2], "Alpha             A      ALP");
        assert_eq!(lines[3], "Beta, the second  A");
    }

    #[test]
    fn test_json_objects_keyed_by_header() {
        let out = json(&sample()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], json!("Alpha"));
        assert_eq!(parsed[1]["code"], Value::Null);
    }

    #[test]
    fn test_csv_quotes_commas() {
        let out = csv(&sample()).unwrap();
        assert_eq!(
            out,
            "name,group,code\nAlpha,A,ALP\n\"Beta, the second\",A,\n"
        );
    }
}
