use url::form_urlencoded;

pub const CATEGORY_KEY: &str = "category";
pub const TYPE_KEY: &str = "type";
pub const START_DATE_KEY: &str = "start_date";
pub const END_DATE_KEY: &str = "end_date";

/// Filter form values as read at submit time. `None` means the field is absent from the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterCriteria {
    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (CATEGORY_KEY, &self.category),
            (TYPE_KEY, &self.kind),
            (START_DATE_KEY, &self.start_date),
            (END_DATE_KEY, &self.end_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value.as_deref() {
            Some(value) if !value.is_empty() => Some((key, value)),
            _ => None,
        })
    }

    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

pub fn listing_url(path: &str, criteria: &FilterCriteria) -> String {
    let query = criteria.query_string();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(category: &str, kind: &str, start: &str, end: &str) -> FilterCriteria {
        FilterCriteria {
            category: Some(category.to_string()),
            kind: Some(kind.to_string()),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[test]
    fn empty_fields_are_omitted() {
        let url = listing_url("/transactions", &criteria("Food", "", "2024-01-01", ""));
        assert_eq!(url, "/transactions?category=Food&start_date=2024-01-01");
    }

    #[test]
    fn all_fields_keep_fixed_order() {
        let url = listing_url(
            "/transactions",
            &criteria("Rent", "expense", "2024-02-01", "2024-02-29"),
        );
        assert_eq!(
            url,
            "/transactions?category=Rent&type=expense&start_date=2024-02-01&end_date=2024-02-29"
        );
    }

    #[test]
    fn no_filters_means_no_question_mark() {
        assert_eq!(listing_url("/transactions", &criteria("", "", "", "")), "/transactions");
        assert_eq!(
            listing_url("/transactions", &FilterCriteria::default()),
            "/transactions"
        );
    }

    #[test]
    fn values_are_form_encoded() {
        let filters = FilterCriteria {
            category: Some("Eating out & bars".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(filters.query_string(), "category=Eating+out+%26+bars");
    }

    #[test]
    fn whitespace_is_not_treated_as_empty() {
        let filters = FilterCriteria {
            kind: Some(" ".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(filters.query_string(), "type=+");
    }
}
