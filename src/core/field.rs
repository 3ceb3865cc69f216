use serde::{Deserialize, Serialize};

/// A column whose value is looked up by `id` and whose header cell is `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub title: String,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        FieldSpec {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Column layout of a CSV file.
///
/// The order of the entries is the column order. Only the `Fields` form
/// carries titles, so only a writer configured with it can produce a header
/// row.
///
/// Both forms deserialize from the JSON shapes people usually write by hand:
///
/// ```
/// use csv_writer_rs::core::field::{FieldSpec, Header};
///
/// let ids: Header = serde_json::from_str(r#"["name", "age"]"#).unwrap();
/// assert_eq!(ids, Header::ids(["name", "age"]));
///
/// let fields: Header =
///     serde_json::from_str(r#"[{"id": "name", "title": "NAME"}]"#).unwrap();
/// assert_eq!(fields, Header::Fields(vec![FieldSpec::new("name", "NAME")]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Header {
    Ids(Vec<String>),
    Fields(Vec<FieldSpec>),
}

impl Header {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Header::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        Header::Fields(fields.into_iter().collect())
    }

    /// Lookup keys in column order.
    pub fn field_ids(&self) -> Vec<&str> {
        match self {
            Header::Ids(ids) => ids.iter().map(String::as_str).collect(),
            Header::Fields(fields) => fields.iter().map(|f| f.id.as_str()).collect(),
        }
    }

    /// Header titles in column order, or `None` when no titles are configured.
    pub fn titles(&self) -> Option<Vec<&str>> {
        match self {
            Header::Ids(_) => None,
            Header::Fields(fields) => Some(fields.iter().map(|f| f.title.as_str()).collect()),
        }
    }

    pub fn has_titles(&self) -> bool {
        matches!(self, Header::Fields(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Header::Ids(ids) => ids.len(),
            Header::Fields(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Header {
    fn default() -> Self {
        Header::Ids(Vec::new())
    }
}

impl From<Vec<FieldSpec>> for Header {
    fn from(fields: Vec<FieldSpec>) -> Self {
        Header::Fields(fields)
    }
}

impl From<Vec<String>> for Header {
    fn from(ids: Vec<String>) -> Self {
        Header::Ids(ids)
    }
}

impl From<Vec<&str>> for Header {
    fn from(ids: Vec<&str>) -> Self {
        Header::ids(ids)
    }
}
