//! CSV file loader for Pure Rust ID3.
//!
//! This module reads raw categorical files and encoded CSV files with the
//! `csv` crate, and writes encoded datasets back to disk.

use super::{DataLoader, LoadedData, LoaderConfig};
use crate::core::error::{Id3Error, Result};
use crate::core::types::CategoryValue;
use crate::dataset::dataset::Dataset;
use crate::dataset::encoding::CategoryEncoder;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// CSV data loader
#[derive(Debug, Clone)]
pub struct CsvLoader {
    config: LoaderConfig,
}

impl CsvLoader {
    /// Create a new CSV loader
    pub fn new(config: LoaderConfig) -> Result<Self> {
        if config.target_column.is_empty() {
            return Err(Id3Error::invalid_parameter(
                "target_column",
                "",
                "must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for name in config.raw_columns() {
            if !seen.insert(name.clone()) {
                return Err(Id3Error::invalid_input(format!(
                    "column '{}' appears more than once in the loader layout",
                    name
                )));
            }
        }

        if !config.delimiter.is_ascii() {
            return Err(Id3Error::invalid_parameter(
                "delimiter",
                config.delimiter.to_string(),
                "must be a single ASCII character",
            ));
        }

        Ok(CsvLoader { config })
    }

    /// Load raw training (and optionally test) files and encode them with a
    /// single shared encoder.
    pub fn load_raw<P: AsRef<Path>>(
        &self,
        train_path: P,
        test_path: Option<P>,
    ) -> Result<LoadedData> {
        let columns = self.config.raw_columns();
        let train_records = self.read_raw_records(train_path.as_ref())?;
        let test_records = match test_path {
            Some(path) => Some(self.read_raw_records(path.as_ref())?),
            None => None,
        };

        let mut record_sets: Vec<&[Vec<String>]> = vec![train_records.as_slice()];
        if let Some(ref records) = test_records {
            record_sets.push(records.as_slice());
        }
        let encoder = CategoryEncoder::fit(columns, record_sets)?;

        let train = encoder.encode(&train_records)?;
        let test = match test_records {
            Some(records) => Some(encoder.encode(&records)?),
            None => None,
        };

        log::info!(
            "Encoded raw data: {} training rows{}",
            train.num_rows(),
            test.as_ref()
                .map(|t| format!(", {} test rows", t.num_rows()))
                .unwrap_or_default()
        );

        Ok(LoadedData {
            train,
            test,
            encoder: Some(encoder),
        })
    }

    /// Encode raw files and persist them as encoded CSVs, then return the
    /// encoded data.
    pub fn convert_raw_to_csv<P: AsRef<Path>>(
        &self,
        train_raw: P,
        test_raw: Option<P>,
        train_csv: P,
        test_csv: Option<P>,
    ) -> Result<LoadedData> {
        let loaded = self.load_raw(train_raw, test_raw)?;
        self.write_encoded_csv(&loaded.train, train_csv)?;
        if let (Some(test), Some(path)) = (&loaded.test, test_csv) {
            self.write_encoded_csv(test, path)?;
        }
        Ok(loaded)
    }

    /// Load an encoded CSV: header row of column names, integer codes below.
    pub fn load_encoded_csv<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        log::info!("Loading encoded CSV file: {}", path.display());

        let file = Self::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Id3Error::data_loading(format!("Failed to read headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                Id3Error::data_loading(format!("CSV parsing error at line {}: {}", line + 2, e))
            })?;
            rows.push(Self::parse_codes(&record, line + 2)?);
        }

        let dataset = Dataset::from_rows(headers, &rows)?;
        log::info!(
            "Loaded {} rows with {} columns",
            dataset.num_rows(),
            dataset.num_columns()
        );
        Ok(dataset)
    }

    /// Write a dataset as an encoded CSV with a header row.
    pub fn write_encoded_csv<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = WriterBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .from_path(path)?;

        writer.write_record(dataset.column_names())?;
        for row in dataset.values().rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        writer.flush()?;

        log::info!("Wrote {} rows to {}", dataset.num_rows(), path.display());
        Ok(())
    }

    fn read_raw_records(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        log::info!("Loading raw data file: {}", path.display());
        let width = self.config.raw_columns().len();

        let file = Self::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .has_headers(self.config.raw_has_header)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                Id3Error::data_loading(format!("CSV parsing error at line {}: {}", line + 1, e))
            })?;
            if record.len() != width {
                return Err(Id3Error::data_loading(format!(
                    "{}: line {} has {} fields, expected {} (target + {} features)",
                    path.display(),
                    line + 1,
                    record.len(),
                    width,
                    width - 1
                )));
            }
            records.push(record.iter().map(str::to_string).collect());
        }

        if records.is_empty() {
            log::warn!("{} contains no data rows", path.display());
        }
        Ok(records)
    }

    fn parse_codes(record: &StringRecord, line: usize) -> Result<Vec<CategoryValue>> {
        record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.parse::<CategoryValue>().map_err(|_| {
                    Id3Error::data_loading(format!(
                        "line {}, column {}: '{}' is not a category code",
                        line,
                        column + 1,
                        field
                    ))
                })
            })
            .collect()
    }

    fn open(path: &Path) -> Result<File> {
        if !path.is_file() {
            return Err(Id3Error::data_loading(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        File::open(path).map_err(|e| {
            Id3Error::data_loading(format!("Failed to open file {}: {}", path.display(), e))
        })
    }
}

impl DataLoader for CsvLoader {
    fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        self.load_encoded_csv(path)
    }

    fn config(&self) -> &LoaderConfig {
        &self.config
    }
}
