//! Entries of an Audible library listing.
//!
//! Only the handful of fields the importer maps onto the catalog are
//! modelled; everything else in the payload is ignored.

use serde::Deserialize;

/// Author name used when an entry carries no authors
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// An author as listed on an entry: either a bare name or a contributor object
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EntryAuthor {
    Name(String),
    Contributor { name: String },
}

impl EntryAuthor {
    pub fn name(&self) -> &str {
        match self {
            EntryAuthor::Name(name) | EntryAuthor::Contributor { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryEntry {
    #[serde(default)]
    pub authors: Option<Vec<EntryAuthor>>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl LibraryEntry {
    /// First listed author, or `Unknown`
    pub fn author_name(&self) -> &str {
        self.authors
            .as_ref()
            .and_then(|authors| authors.first())
            .map(|a| a.name().trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// ISBN, falling back to the ASIN
    pub fn identifier(&self) -> Option<&str> {
        trimmed(&self.isbn).or_else(|| trimmed(&self.asin))
    }

    pub fn title(&self) -> Option<&str> {
        trimmed(&self.title)
    }

    /// Year taken from the part of `publish_date` before the first `-`
    pub fn publication_year(&self) -> Result<Option<i32>, String> {
        let Some(date) = trimmed(&self.publish_date) else {
            return Ok(None);
        };
        let year = date.split('-').next().unwrap_or(date).trim();
        year.parse::<i32>()
            .map(Some)
            .map_err(|_| format!("Unparseable publish_date '{}'", date))
    }
}

/// Library payload: `{"entries": [...]}`, `{"items": [...]}` or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LibraryResponse {
    Entries { entries: Vec<LibraryEntry> },
    Items { items: Vec<LibraryEntry> },
    Bare(Vec<LibraryEntry>),
}

impl LibraryResponse {
    pub fn into_entries(self) -> Vec<LibraryEntry> {
        match self {
            LibraryResponse::Entries { entries } => entries,
            LibraryResponse::Items { items } => items,
            LibraryResponse::Bare(entries) => entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> LibraryEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_author_name() {
        assert_eq!(entry(json!({"authors": ["Frank Herbert", "Brian Herbert"]})).author_name(), "Frank Herbert");
        assert_eq!(
            entry(json!({"authors": [{"asin": "B000APZOQA", "name": "Frank Herbert"}]})).author_name(),
            "Frank Herbert"
        );
        assert_eq!(entry(json!({"authors": []})).author_name(), UNKNOWN_AUTHOR);
        assert_eq!(entry(json!({"authors": null})).author_name(), UNKNOWN_AUTHOR);
        assert_eq!(entry(json!({})).author_name(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_identifier_falls_back_to_asin() {
        assert_eq!(entry(json!({"isbn": "9780441013593", "asin": "B002V1OF70"})).identifier(), Some("9780441013593"));
        assert_eq!(entry(json!({"isbn": "", "asin": "B002V1OF70"})).identifier(), Some("B002V1OF70"));
        assert_eq!(entry(json!({"isbn": null, "asin": null})).identifier(), None);
    }

    #[test]
    fn test_publication_year() {
        assert_eq!(entry(json!({"publish_date": "2005-03-01"})).publication_year(), Ok(Some(2005)));
        assert_eq!(entry(json!({"publish_date": "1965"})).publication_year(), Ok(Some(1965)));
        assert_eq!(entry(json!({})).publication_year(), Ok(None));
        assert!(entry(json!({"publish_date": "March 2005"})).publication_year().is_err());
    }

    #[test]
    fn test_response_shapes() {
        let wrapped: LibraryResponse = serde_json::from_value(json!({"entries": [{"title": "Dune"}]})).unwrap();
        assert_eq!(wrapped.into_entries().len(), 1);

        let items: LibraryResponse =
            serde_json::from_value(json!({"items": [{"title": "Dune"}, {"title": "Emma"}]})).unwrap();
        assert_eq!(items.into_entries().len(), 2);

        let bare: LibraryResponse = serde_json::from_value(json!([{"title": "Dune"}])).unwrap();
        assert_eq!(bare.into_entries()[0].title(), Some("Dune"));
    }
}
