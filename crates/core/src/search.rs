//! Search and filter query-string construction.
//!
//! The remote service accepts a free-text `search` parameter plus any number
//! of `<filter>=<value>` parameters. Multiple values for one filter become
//! repeated parameters; multiple filters are ANDed by the service.

use std::collections::BTreeMap;

/// Query parameter carrying the free-text search expression.
pub const SEARCH_PARAM: &str = "search";

/// Filter criteria: filter field name to the values it may take.
///
/// Keys are kept sorted so the encoded query string is deterministic. Values
/// keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    fields: BTreeMap<String, Vec<String>>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one allowed value for `field`.
    pub fn add(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields
            .entry(field.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(field, value);
        self
    }

    /// Values registered for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// True when no field carries at least one value.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Iterate `(field, value)` pairs in encoding order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .flat_map(|(field, values)| values.iter().map(move |v| (field.as_str(), v.as_str())))
    }
}

impl<K, V, I> FromIterator<(K, I)> for SearchFilter
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut filter = Self::new();
        for (field, values) in iter {
            let field = field.into();
            for value in values {
                filter.add(field.clone(), value);
            }
        }
        filter
    }
}

/// Build the URL-encoded query string for a search request.
///
/// Returns `None` when neither a non-empty query nor any filter value is
/// given; callers then fall back to fetching the whole collection.
///
/// Parameters are emitted sorted by name (`search` included), with repeated
/// values in insertion order. Encoding follows
/// `application/x-www-form-urlencoded`.
///
/// # Examples
///
/// ```
/// use circonus_core::search::{build_search_query, SearchFilter};
///
/// let filter = SearchFilter::new().with("f_tags_has", "dc:sfo1");
/// assert_eq!(
///     build_search_query(Some("web servers"), Some(&filter)).as_deref(),
///     Some("f_tags_has=dc%3Asfo1&search=web+servers")
/// );
/// assert_eq!(build_search_query(None, None), None);
/// ```
pub fn build_search_query(query: Option<&str>, filter: Option<&SearchFilter>) -> Option<String> {
    let mut params: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    if let Some(q) = query.filter(|q| !q.is_empty()) {
        params.entry(SEARCH_PARAM).or_default().push(q);
    }

    if let Some(filter) = filter {
        for (field, value) in filter.pairs() {
            params.entry(field).or_default().push(value);
        }
    }

    if params.is_empty() {
        return None;
    }

    let mut encoder = url::form_urlencoded::Serializer::new(String::new());
    for (name, values) in &params {
        for value in values {
            encoder.append_pair(name, value);
        }
    }
    Some(encoder.finish())
}

/// Append an encoded query string to a collection path.
pub fn search_path(base: &str, query: &str) -> String {
    format!("{base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_search() {
        assert_eq!(build_search_query(None, None), None);
        assert_eq!(build_search_query(Some(""), Some(&SearchFilter::new())), None);
    }

    #[test]
    fn query_only() {
        assert_eq!(
            build_search_query(Some("web servers"), None).as_deref(),
            Some("search=web+servers")
        );
    }

    #[test]
    fn filter_only_escapes_colon() {
        let filter = SearchFilter::new().with("f_tags_has", "dc:sfo1");
        assert_eq!(
            build_search_query(None, Some(&filter)).as_deref(),
            Some("f_tags_has=dc%3Asfo1")
        );
    }

    #[test]
    fn query_and_filter() {
        let filter = SearchFilter::new().with("f_tags_has", "dc:sfo1");
        let qs = build_search_query(Some("web servers"), Some(&filter)).unwrap();
        assert_eq!(qs, "f_tags_has=dc%3Asfo1&search=web+servers");
    }

    #[test]
    fn repeated_values_keep_insertion_order() {
        let filter = SearchFilter::new()
            .with("f_tags_has", "role:web")
            .with("f_tags_has", "dc:sfo1");
        assert_eq!(
            build_search_query(None, Some(&filter)).as_deref(),
            Some("f_tags_has=role%3Aweb&f_tags_has=dc%3Asfo1")
        );
    }

    #[test]
    fn fields_are_sorted() {
        let filter = SearchFilter::new()
            .with("f_title", "prod")
            .with("f_account_default", "true");
        assert_eq!(
            build_search_query(None, Some(&filter)).as_deref(),
            Some("f_account_default=true&f_title=prod")
        );
    }

    #[test]
    fn empty_value_lists_count_as_empty() {
        let filter: SearchFilter = [("f_tags_has", Vec::<String>::new())].into_iter().collect();
        assert!(filter.is_empty());
        assert_eq!(build_search_query(None, Some(&filter)), None);
    }

    #[test]
    fn from_iterator() {
        let filter: SearchFilter = [("f_tags_has", vec!["a", "b"])].into_iter().collect();
        assert_eq!(filter.get("f_tags_has").unwrap(), ["a", "b"]);
    }

    #[test]
    fn search_path_joins_with_question_mark() {
        assert_eq!(search_path("/dashboard", "search=x"), "/dashboard?search=x");
    }
}
