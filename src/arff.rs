use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::record::Record;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Class {
    Nominal(Vec<String>),
    /// Numeric and string columns; their values are kept as categories.
    Open,
}

lazy_static! {
    static ref ATTRIBUTE: Regex = RegexBuilder::new(r"^@attribute\s+(\S+).*")
        .case_insensitive(true)
        .build()
        .expect("valid attribute pattern");
    static ref DATA: Regex = RegexBuilder::new("^@data")
        .case_insensitive(true)
        .build()
        .expect("valid data pattern");
    static ref NOMINAL: Regex = Regex::new(r"\{(.*)\}").expect("valid nominal pattern");
    static ref CLASS: Regex = Regex::new(r"([^,]+),?").expect("valid class pattern");
}

/// Reads an ARFF file. Nominal values are checked against their declaration;
/// `?` is accepted everywhere and treated as one more category.
pub fn parse(contents: &str, target: Option<&str>) -> Result<Dataset> {
    let mut records = Vec::new();
    let mut labels = Vec::new();
    let mut classes = Vec::new();
    let mut data_section = false;
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if data_section {
            let values: Vec<String> = line.split(',').map(|value| value.trim().to_owned()).collect();
            if values.len() != classes.len() {
                return Err(Error::parse(
                    line_number,
                    format!("expected {} values, found {}", classes.len(), values.len()),
                ));
            }
            for (value, class) in values.iter().zip(&classes) {
                if let Class::Nominal(allowed) = class {
                    if !allowed.iter().any(|c| c == value) {
                        return Err(Error::parse(
                            line_number,
                            format!("`{}` is not a declared value", value),
                        ));
                    }
                }
            }
            records.push(Record { values });
        } else if let Some(label) = ATTRIBUTE
            .captures(line)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_owned())
        {
            labels.push(label);
            if let Some(classes_raw) = NOMINAL.captures(line).and_then(|cap| cap.get(1)) {
                let mut class_list: Vec<String> = CLASS
                    .captures_iter(classes_raw.as_str())
                    .filter_map(|captures| captures.get(1))
                    .map(|m| m.as_str().trim().to_owned())
                    .collect();
                class_list.push("?".to_owned());
                classes.push(Class::Nominal(class_list));
            } else {
                classes.push(Class::Open);
            }
        } else if DATA.is_match(line) {
            data_section = true;
        }
    }
    if !data_section {
        return Err(Error::invalid("missing @data section"));
    }
    Dataset::new(labels, records, target)
}
