//! CSV output for records.
//!
//! This module turns records into CSV lines and writes them to a file in the
//! order they were requested.
//!
//! # Module Architecture
//!
//! The CSV module consists of three components:
//!
//! 1. **CsvSerializer**: builds one line of CSV text from the header titles
//!    or from a record, joining the fields with the field delimiter and
//!    terminating the line with the record delimiter.
//!
//! 2. **FieldStringifier**: the default value stringifier. It renders values
//!    as text and quotes the ones containing delimiters, quotes or line
//!    breaks.
//!
//! 3. **CsvFileWriter**: owns the destination path and queues physical
//!    writes so that only one is in flight at a time. The first write
//!    creates or truncates the file, every write after a successful one
//!    appends.
//!
//! The writer is configured through [`csv_writer::CsvFileWriterBuilder`], or
//! from a deserialized [`csv_writer::CsvWriterConfig`].
//!
//! # Header handling
//!
//! A header made of [`FieldSpec`](crate::core::field::FieldSpec)s has titles
//! and is written before the first record, unless a header was already
//! written or the writer was opened in append mode. A header made of bare ids
//! only selects and orders the columns.
//!
//! # Examples
//!
//! ## Writing records without a header
//!
//! ```
//! use csv_writer_rs::core::field::Header;
//! use csv_writer_rs::item::csv::csv_writer::CsvFileWriterBuilder;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::env::temp_dir().join("csv_writer_rs_doc_cities.csv");
//!
//! let writer = CsvFileWriterBuilder::new()
//!     .header(Header::ids(["city", "pop"]))
//!     .from_path(&path)?;
//!
//! writer.write_record(&json!({"city": "Boston", "pop": 4628910})).await?;
//! writer.write_record(&json!({"city": "Concord", "pop": 42695})).await?;
//! writer.close().await?;
//!
//! assert_eq!(std::fs::read_to_string(&path)?, "Boston,4628910\nConcord,42695\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Appending to an existing file
//!
//! ```
//! use csv_writer_rs::core::field::{FieldSpec, Header};
//! use csv_writer_rs::item::csv::csv_writer::CsvFileWriterBuilder;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::env::temp_dir().join("csv_writer_rs_doc_append.csv");
//! std::fs::write(&path, "CITY\nBoston\n")?;
//!
//! let writer = CsvFileWriterBuilder::new()
//!     .header(Header::fields([FieldSpec::new("city", "CITY")]))
//!     .append(true)
//!     .from_path(&path)?;
//!
//! writer.write_record(&json!({"city": "Concord"})).await?;
//! writer.close().await?;
//!
//! assert_eq!(std::fs::read_to_string(&path)?, "CITY\nBoston\nConcord\n");
//! # Ok(())
//! # }
//! ```

/// Line building from headers and records.
pub mod csv_serializer;

/// Default value stringifier with RFC 4180 quoting.
pub mod csv_stringifier;

/// Sequential CSV file writer.
pub mod csv_writer;
