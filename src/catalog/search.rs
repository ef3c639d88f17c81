#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Instructor,
    Description,
}

/// Fields the list and dashboard search boxes match against.
pub const LIST_SEARCH_FIELDS: &[SearchField] = &[SearchField::Title, SearchField::Instructor];

pub trait Searchable {
    fn search_field(&self, field: SearchField) -> Option<&str>;
}

/// Keeps the records where any of `fields` contains `term`, ignoring case.
///
/// An empty term keeps everything. Recomputed on every call.
pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str, fields: &[SearchField]) -> Vec<&'a T> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                record
                    .search_field(*field)
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .collect()
}
