use crate::domain::model::{OutputFormat, Record};
use crate::utils::error::Result;
use std::io::Write;

/// Renders records in the requested format.
pub fn render(records: &[Record], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => render_json(records),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Xml => render_xml(records),
    }
}

/// Pretty JSON array of objects. Non-ASCII text is written as-is.
pub fn render_json(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// CSV whose columns are the first record's keys.
///
/// Later records are written in that column order: keys the first record
/// lacks are dropped and missing keys become empty fields.
pub fn render_csv(records: &[Record]) -> Result<Vec<u8>> {
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = first.data.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|key| record.get(key).unwrap_or_default()))?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// XML document with a `<tables>` root, one `<row>` per record and one
/// `<field name="...">` per key.
pub fn render_xml(records: &[Record]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.write_all(b"<?xml version='1.0' encoding='utf-8'?>\n")?;

    if records.is_empty() {
        out.write_all(b"<tables />")?;
        return Ok(out);
    }

    out.write_all(b"<tables>")?;
    for record in records {
        if record.is_empty() {
            out.write_all(b"<row />")?;
            continue;
        }
        out.write_all(b"<row>")?;
        for (key, value) in &record.data {
            let name = escape_attribute(key);
            if value.is_empty() {
                write!(out, "<field name=\"{}\" />", name)?;
            } else {
                write!(
                    out,
                    "<field name=\"{}\">{}</field>",
                    name,
                    html_escape::encode_text(value)
                )?;
            }
        }
        out.write_all(b"</row>")?;
    }
    out.write_all(b"</tables>")?;

    Ok(out)
}

/// Attribute value escaping. Line breaks and tabs are written as character
/// references so parsers do not normalize them to spaces.
fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value)
        .replace('\r', "&#13;")
        .replace('\n', "&#10;")
        .replace('\t', "&#09;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record(&[("序号", "1"), ("单词", "猫"), ("释义", "cat")]),
            record(&[("序号", "2"), ("单词", "狗"), ("释义", "dog")]),
        ]
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_values() {
        let records = sample();

        let bytes = render(&records, OutputFormat::Json).unwrap();
        let parsed: Vec<Record> = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(parsed, records);
        let keys: Vec<&String> = parsed[0].data.keys().collect();
        assert_eq!(keys, vec!["序号", "单词", "释义"]);
    }

    #[test]
    fn test_json_keeps_non_ascii_and_indents() {
        let bytes = render_json(&[record(&[("单词", "猫")])]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, "[\n  {\n    \"单词\": \"猫\"\n  }\n]");
    }

    #[test]
    fn test_csv_uses_first_record_header() {
        let bytes = render_csv(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, "序号,单词,释义\r\n1,猫,cat\r\n2,狗,dog\r\n");
    }

    #[test]
    fn test_csv_drops_keys_outside_first_schema() {
        let records = vec![
            record(&[("A", "a1"), ("B", "b1")]),
            record(&[("B", "b2"), ("C", "c2")]),
        ];

        let bytes = render_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();

        assert_eq!(headers, vec!["A", "B"]);
        assert_eq!(rows[0], vec!["a1", "b1"]);
        // "A" is missing and "C" has no column: the value "c2" is lost
        assert_eq!(rows[1], vec!["", "b2"]);
        assert!(!rows.iter().flatten().any(|v| v == "c2"));
    }

    #[test]
    fn test_csv_quotes_fields_with_separators() {
        let bytes = render_csv(&[record(&[("meaning", "cat, small")])]).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "meaning\r\n\"cat, small\"\r\n"
        );
    }

    #[test]
    fn test_xml_layout() {
        let bytes = render_xml(&[record(&[("单词", "猫"), ("笔记", "")])]).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<?xml version='1.0' encoding='utf-8'?>\n\
             <tables><row><field name=\"单词\">猫</field><field name=\"笔记\" /></row></tables>"
        );
    }

    #[test]
    fn test_xml_escapes_markup() {
        let bytes = render_xml(&[record(&[("a\"<b>", "x & <y>")])]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("name=\"a&quot;&lt;b&gt;\""));
        assert!(text.contains(">x &amp; &lt;y&gt;</field>"));
    }

    #[test]
    fn test_xml_keeps_line_breaks_in_field_names() {
        let records = [record(&[("Part of\rspeech\nx", "a"), ("col\tb", "")])];

        let bytes = render_xml(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("<field name=\"Part of&#13;speech&#10;x\">a</field>"));
        assert!(text.contains("<field name=\"col&#09;b\" />"));
        assert!(!text.contains('\r'));
        assert!(!text.contains('\t'));
    }

    #[test]
    fn test_empty_input_renders_empty_documents() {
        assert_eq!(render_json(&[]).unwrap(), b"[]");
        assert!(render_csv(&[]).unwrap().is_empty());
        assert!(String::from_utf8(render_xml(&[]).unwrap())
            .unwrap()
            .ends_with("<tables />"));
    }
}
