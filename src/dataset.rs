use crate::error::{Error, Result};
use crate::record::Record;
use std::collections::{BTreeMap, BTreeSet};

/// An ordered set of rows sharing one header, with a designated target column.
#[derive(Debug, Clone)]
pub struct Dataset {
    attributes: Vec<String>,
    target: usize,
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset, checking that it is non-empty and that every row has
    /// one value per attribute. `target` defaults to the last column.
    pub fn new(attributes: Vec<String>, records: Vec<Record>, target: Option<&str>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Error::invalid("dataset has no attributes"));
        }
        if records.is_empty() {
            return Err(Error::invalid("dataset has no rows"));
        }
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != attributes.len())
        {
            return Err(Error::invalid(format!(
                "row {} has {} values, expected {}",
                index,
                record.len(),
                attributes.len()
            )));
        }
        let target = match target {
            Some(name) => attributes
                .iter()
                .position(|attribute| attribute == name)
                .ok_or_else(|| Error::invalid(format!("target attribute `{}` not found", name)))?,
            None => attributes.len() - 1,
        };
        Ok(Self {
            attributes,
            target,
            records,
        })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attribute| attribute == name)
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn target_name(&self) -> &str {
        &self.attributes[self.target]
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            dataset: self,
            rows: self.records.iter().collect(),
        }
    }

    /// Non-target attributes not constrained by `path`, in column order.
    /// This order is the tie-break order of the builder.
    pub fn candidates(&self, path: &Path) -> Vec<usize> {
        (0..self.attributes.len())
            .filter(|&attribute| attribute != self.target && !path.contains(attribute))
            .collect()
    }
}

/// The chain of `attribute = value` constraints from the root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    constraints: Vec<(usize, String)>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, attribute: usize) -> bool {
        self.constraints.iter().any(|(a, _)| *a == attribute)
    }

    /// Returns a copy of this path extended by one constraint.
    pub fn with(&self, attribute: usize, value: &str) -> Result<Self> {
        if self.contains(attribute) {
            return Err(Error::invalid(format!(
                "attribute {} already constrained on this path",
                attribute
            )));
        }
        let mut constraints = self.constraints.clone();
        constraints.push((attribute, value.to_owned()));
        Ok(Self { constraints })
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(attribute, value)| record.get(*attribute) == Some(value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.constraints.iter().map(|(a, v)| (*a, v.as_str()))
    }
}

/// A borrowed selection of rows from a [`Dataset`]. Filtering yields a new
/// view; the underlying rows are never copied or modified.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<&'a Record>,
}

impl<'a> DatasetView<'a> {
    pub fn from_rows(dataset: &'a Dataset, rows: Vec<&'a Record>) -> Self {
        Self { dataset, rows }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn filter(&self, path: &Path) -> DatasetView<'a> {
        DatasetView {
            dataset: self.dataset,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|record| path.matches(record))
                .collect(),
        }
    }

    /// Distinct values of `attribute` in this view, sorted.
    pub fn values_of(&self, attribute: usize) -> BTreeSet<&'a str> {
        self.rows
            .iter()
            .filter_map(|record| record.get(attribute))
            .collect()
    }

    pub fn value_counts(&self, attribute: usize) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for value in self.rows.iter().filter_map(|record| record.get(attribute)) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Most frequent value of `attribute`; ties go to the smallest value.
    pub fn majority(&self, attribute: usize) -> Option<&'a str> {
        majority(&self.value_counts(attribute)).map(|(value, _)| value)
    }
}

pub(crate) fn majority<'a>(counts: &BTreeMap<&'a str, usize>) -> Option<(&'a str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for (&value, &count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best
}
