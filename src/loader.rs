use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::record::Record;

/// Parses delimited text into a dataset. Without a header row the columns are
/// named by position (`0`, `1`, ...). Blank lines are skipped.
pub fn parse_delimited(
    contents: &str,
    delimiter: char,
    has_header: bool,
    target: Option<&str>,
) -> Result<Dataset> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());
    let split = |line: &str| -> Vec<String> {
        line.split(delimiter).map(|value| value.trim().to_owned()).collect()
    };

    let mut records = Vec::new();
    let attributes = if has_header {
        match lines.next() {
            Some((_, header)) => split(header),
            None => return Err(Error::invalid("file is empty")),
        }
    } else {
        Vec::new()
    };
    let mut width = if has_header { Some(attributes.len()) } else { None };
    for (line_number, line) in lines {
        let values = split(line);
        match width {
            Some(width) if width != values.len() => {
                return Err(Error::parse(
                    line_number,
                    format!("expected {} values, found {}", width, values.len()),
                ))
            }
            Some(_) => {}
            None => width = Some(values.len()),
        }
        records.push(Record { values });
    }

    let attributes = if has_header {
        attributes
    } else {
        (0..width.unwrap_or(0)).map(|index| index.to_string()).collect()
    };
    Dataset::new(attributes, records, target)
}
