/// This module provides the CSV serializer, stringifier and file writer.
pub mod csv;
