use serde::{Deserialize, Serialize};

/// One row of a dataset. Values are stored in column order; the header lives
/// on the owning [`Dataset`](crate::dataset::Dataset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<String>,
}

impl Record {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, attribute: usize) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
