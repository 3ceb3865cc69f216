/// Column definitions and header titles.
pub mod field;

/// Physical file writes.
pub mod file;

/// Records, field values and stringifiers.
pub mod item;
