use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    core::item::{FieldValue, Stringifier, StringifyResult},
    error::StringifyError,
};

/// Default [`Stringifier`]: renders values through [`FieldValue`] and quotes
/// them the way RFC 4180 expects.
///
/// A field is quoted when it contains the delimiter, a double quote, a
/// carriage return or a line feed. Embedded quotes are doubled. With
/// `always_quote` every present value is quoted. Missing values are always
/// written as an empty cell.
///
/// ```
/// use csv_writer_rs::core::item::Stringifier;
/// use csv_writer_rs::item::csv::csv_stringifier::FieldStringifier;
///
/// let stringifier = FieldStringifier::new(b',');
///
/// assert_eq!(stringifier.stringify(Some(&"plain")).unwrap(), "plain");
/// assert_eq!(stringifier.stringify(Some(&"a,b")).unwrap(), "\"a,b\"");
/// assert_eq!(Stringifier::<&str>::stringify(&stringifier, None).unwrap(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStringifier {
    delimiter: u8,
    always_quote: bool,
}

impl Default for FieldStringifier {
    fn default() -> Self {
        FieldStringifier::new(b',')
    }
}

impl FieldStringifier {
    pub fn new(delimiter: u8) -> FieldStringifier {
        FieldStringifier {
            delimiter,
            always_quote: false,
        }
    }

    pub fn always_quote(mut self, yes: bool) -> FieldStringifier {
        self.always_quote = yes;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn quote(&self, text: &str) -> StringifyResult {
        if text.is_empty() && !self.always_quote {
            return Ok(String::new());
        }

        let style = if self.always_quote {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        };

        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(style)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::with_capacity(text.len() + 3));

        wtr.write_record([text])
            .map_err(|error| StringifyError::new(error.to_string()))?;

        let mut bytes = wtr
            .into_inner()
            .map_err(|error| StringifyError::new(error.to_string()))?;
        // drop the record terminator
        bytes.pop();

        String::from_utf8(bytes).map_err(|error| StringifyError::new(error.to_string()))
    }
}

impl<V: FieldValue> Stringifier<V> for FieldStringifier {
    fn stringify(&self, value: Option<&V>) -> StringifyResult {
        match value {
            Some(value) => self.quote(&value.to_field()),
            None => Ok(String::new()),
        }
    }
}
