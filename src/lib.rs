#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # CSV writer for Rust

 A small toolkit for writing records to a CSV file sequentially: the header
 row first, then records in the order they were requested, each write landing
 in the file only after the previous one has completed.

 ## Core Concepts

- **Header:** The column layout. Either bare field ids, or `FieldSpec`s pairing
  a field id with the title written in the header row.
- **Record:** Anything fields can be looked up in by id: `HashMap`, `BTreeMap`,
  or a JSON object.
- **Stringifier:** Turns one field value into the text of its cell. The
  default `FieldStringifier` quotes values the way RFC 4180 expects.
- **FileWriter:** The physical write primitive, writing or appending a text
  block to a named file. The default `TokioFileWriter` uses `tokio::fs`.
- **CsvFileWriter:** Queues writes in call order, one physical write at a
  time. The first write creates or truncates the file, later writes append.

 ## Getting Started

```rust
# use std::collections::HashMap;
# use csv_writer_rs::{
#     core::field::{FieldSpec, Header},
#     item::csv::csv_writer::CsvFileWriterBuilder,
#     CsvWriterError,
# };
#[tokio::main]
async fn main() -> Result<(), CsvWriterError> {
    let path = std::env::temp_dir().join("csv_writer_rs_doc_cars.csv");

    let writer = CsvFileWriterBuilder::new()
        .header(Header::fields([
            FieldSpec::new("make", "MAKE"),
            FieldSpec::new("model", "MODEL"),
        ]))
        .from_path(&path)?;

    // Not awaited in between: both writes are still issued in call order.
    let first = writer.write_record(&HashMap::from([
        ("make".to_string(), "Porsche"),
        ("model".to_string(), "356"),
    ]));
    let second = writer.write_record(&HashMap::from([
        ("make".to_string(), "Peugeot"),
        ("model".to_string(), "205"),
    ]));
    first.await?;
    second.await?;

    writer.close().await?;

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "MAKE,MODEL\nPorsche,356\nPeugeot,205\n"
    );
    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core abstractions: headers, records, stringifiers and file writes
pub mod core;

/// Error types for CSV writing
pub mod error;

#[doc(inline)]
pub use error::*;

/// CSV serializer, stringifier and writer
pub mod item;
