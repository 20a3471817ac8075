//! Categorical string encoding.
//!
//! Raw data files carry categories as strings. The encoder assigns every
//! column its own dense code space: the distinct strings of the column are
//! sorted and numbered from zero, so the integer order of codes matches the
//! lexical order of the raw category strings.

use crate::core::error::Result;
use crate::core::types::CategoryValue;
use crate::dataset::dataset::Dataset;
use crate::input_error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-column mapping between category strings and integer codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl CategoryEncoder {
    /// Learn the category dictionaries from one or more record sets.
    ///
    /// Every record set that must share codes (e.g. train and test files)
    /// has to be passed here together; encoding them with separately fitted
    /// encoders would give the same string different codes.
    pub fn fit<'r, I>(columns: Vec<String>, record_sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'r [Vec<String>]>,
    {
        let mut distinct: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); columns.len()];

        for records in record_sets {
            for (line, record) in records.iter().enumerate() {
                if record.len() != columns.len() {
                    return Err(input_error!(
                        "record {} has {} fields, expected {}",
                        line,
                        record.len(),
                        columns.len()
                    ));
                }
                for (set, value) in distinct.iter_mut().zip(record) {
                    set.insert(value.as_str());
                }
            }
        }

        let categories = distinct
            .into_iter()
            .map(|set| set.into_iter().map(str::to_string).collect())
            .collect();

        Ok(CategoryEncoder {
            columns,
            categories,
        })
    }

    /// Column names in encoding order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Sorted categories of the named column; a category's position is its code.
    pub fn categories(&self, column: &str) -> Result<&[String]> {
        let index = self.column_position(column)?;
        Ok(&self.categories[index])
    }

    /// Code of `raw` in column position `column`.
    pub fn encode_value(&self, column: usize, raw: &str) -> Result<CategoryValue> {
        let categories = self
            .categories
            .get(column)
            .ok_or_else(|| input_error!("column position {} out of range", column))?;

        let position = categories
            .binary_search_by(|c| c.as_str().cmp(raw))
            .map_err(|_| {
                input_error!(
                    "category '{}' of column '{}' was not seen when the encoder was fitted",
                    raw,
                    self.columns[column]
                )
            })?;

        CategoryValue::try_from(position)
            .map_err(|_| input_error!("column '{}' has too many categories", self.columns[column]))
    }

    /// Encode string records into a dataset.
    pub fn encode(&self, records: &[Vec<String>]) -> Result<Dataset> {
        let mut rows = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            if record.len() != self.columns.len() {
                return Err(input_error!(
                    "record {} has {} fields, expected {}",
                    line,
                    record.len(),
                    self.columns.len()
                ));
            }
            let row = record
                .iter()
                .enumerate()
                .map(|(column, raw)| self.encode_value(column, raw))
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Dataset::from_rows(self.columns.clone(), &rows)
    }

    /// Category string behind `code` in the named column.
    pub fn decode(&self, column: &str, code: CategoryValue) -> Result<&str> {
        let categories = self.categories(column)?;
        categories
            .get(code as usize)
            .map(String::as_str)
            .ok_or_else(|| input_error!("code {} is not defined for column '{}'", code, column))
    }

    fn column_position(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| input_error!("column '{}' is not known to the encoder", column))
    }
}
