use serde::{Deserialize, Serialize};

use crate::{
    core::{
        field::Header,
        item::{Record, Stringifier},
    },
    error::CsvWriterError,
};

/// Line terminator written after every CSV line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordDelimiter {
    #[default]
    Lf,
    CrLf,
}

impl RecordDelimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordDelimiter::Lf => "\n",
            RecordDelimiter::CrLf => "\r\n",
        }
    }
}

/// Turns the header or records into CSV lines.
///
/// Each line is the fields joined by the field delimiter, followed by the
/// record delimiter. Header titles are written verbatim; record values go
/// through the stringifier, which is the only place quoting can happen.
///
/// ```
/// use std::collections::HashMap;
///
/// use csv_writer_rs::core::field::{FieldSpec, Header};
/// use csv_writer_rs::item::csv::csv_serializer::CsvSerializer;
/// use csv_writer_rs::item::csv::csv_stringifier::FieldStringifier;
///
/// let header = Header::fields([FieldSpec::new("name", "NAME"), FieldSpec::new("lang", "LANGUAGE")]);
/// let serializer = CsvSerializer::new(header, FieldStringifier::default());
///
/// let record = HashMap::from([
///     ("name".to_string(), "Bob"),
///     ("lang".to_string(), "French, English"),
/// ]);
///
/// assert_eq!(serializer.header_line().unwrap(), "NAME,LANGUAGE\n");
/// assert_eq!(serializer.serialize_record(&record).unwrap(), "Bob,\"French, English\"\n");
/// ```
#[derive(Debug, Clone)]
pub struct CsvSerializer<S> {
    header: Header,
    stringifier: S,
    field_delimiter: char,
    record_delimiter: RecordDelimiter,
}

impl<S> CsvSerializer<S> {
    pub fn new(header: Header, stringifier: S) -> CsvSerializer<S> {
        CsvSerializer {
            header,
            stringifier,
            field_delimiter: ',',
            record_delimiter: RecordDelimiter::Lf,
        }
    }

    pub fn field_delimiter(mut self, delimiter: char) -> CsvSerializer<S> {
        self.field_delimiter = delimiter;
        self
    }

    pub fn record_delimiter(mut self, delimiter: RecordDelimiter) -> CsvSerializer<S> {
        self.record_delimiter = delimiter;
        self
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn stringifier(&self) -> &S {
        &self.stringifier
    }

    /// The header line, or `None` when the header has no titles.
    pub fn header_line(&self) -> Option<String> {
        self.header.titles().map(|titles| self.line(titles))
    }

    /// Serializes one record into one line.
    ///
    /// Fields are looked up in header order. A field missing from the record
    /// is handed to the stringifier as `None`.
    pub fn serialize_record<R>(&self, record: &R) -> Result<String, CsvWriterError>
    where
        R: Record + ?Sized,
        S: Stringifier<R::Value>,
    {
        let fields = self
            .header
            .field_ids()
            .into_iter()
            .map(|id| {
                self.stringifier
                    .stringify(record.field(id))
                    .map_err(|source| CsvWriterError::Stringify {
                        field: id.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<String>, CsvWriterError>>()?;

        Ok(self.line(fields))
    }

    /// Serializes every record, in order, into one text block.
    ///
    /// Fails on the first record that cannot be stringified.
    pub fn serialize_records<R>(&self, records: &[R]) -> Result<String, CsvWriterError>
    where
        R: Record,
        S: Stringifier<R::Value>,
    {
        let mut block = String::new();
        for record in records {
            block.push_str(&self.serialize_record(record)?);
        }
        Ok(block)
    }

    fn line<T: AsRef<str>>(&self, fields: Vec<T>) -> String {
        let mut line = String::new();
        for (index, field) in fields.iter().enumerate() {
            if index > 0 {
                line.push(self.field_delimiter);
            }
            line.push_str(field.as_ref());
        }
        line.push_str(self.record_delimiter.as_str());
        line
    }
}
