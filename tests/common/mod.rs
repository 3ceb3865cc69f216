#![allow(dead_code)]

pub mod mocks;

use std::collections::HashMap;

use csv_writer_rs::core::{
    field::{FieldSpec, Header},
    item::{Stringifier, StringifyResult},
};

/// Writes values as they are; missing values are empty.
pub struct Identity;

impl Stringifier<String> for Identity {
    fn stringify(&self, value: Option<&String>) -> StringifyResult {
        Ok(value.cloned().unwrap_or_default())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn titled_header() -> Header {
    Header::fields([
        FieldSpec::new("FIELD_A", "TITLE_A"),
        FieldSpec::new("FIELD_B", "TITLE_B"),
    ])
}

pub fn bare_header() -> Header {
    Header::ids(["FIELD_A", "FIELD_B"])
}

pub fn record(a: &str, b: &str) -> HashMap<String, String> {
    HashMap::from([
        ("FIELD_A".to_string(), a.to_string()),
        ("FIELD_B".to_string(), b.to_string()),
    ])
}
