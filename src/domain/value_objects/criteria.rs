use crate::domain::value_objects::FieldValue;

/// Ordered search filters supplied by a caller for a single search.
///
/// Names are kept exactly as given; whether they are recognized is decided
/// when the filter clause is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria(Vec<(String, FieldValue)>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw query-string pairs.
    ///
    /// Values stay text; each filter reads them as the type it needs.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), FieldValue::text(v.as_ref())))
                .collect(),
        )
    }

    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.0.push((name.into(), value));
        self
    }

    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Criteria {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_pairs_keeps_order_and_raw_text() {
        let criteria =
            Criteria::from_query_pairs([("nameLike", "007"), ("minEmployees", "20")]);

        assert_eq!(
            criteria.entries(),
            &[
                ("nameLike".to_string(), FieldValue::text("007")),
                ("minEmployees".to_string(), FieldValue::text("20")),
            ]
        );
        assert_eq!(criteria.len(), 2);
    }

    #[test]
    fn test_builder_style_construction() {
        let criteria = Criteria::new().with("hasEquity", FieldValue::boolean(true));
        assert!(!criteria.is_empty());
        assert!(Criteria::new().is_empty());
    }
}
