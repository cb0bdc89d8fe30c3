//! Strapi query-string builder.
//!
//! Strapi encodes nested parameters with brackets:
//! `populate[0]=category`, `pagination[page]=2`,
//! `filters[category][documentId][$eq]=abc`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrapiQuery {
    params: Vec<(String, String)>,
}

impl StrapiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the given relations (one level deep).
    pub fn populate(mut self, relations: &[&str]) -> Self {
        for (index, relation) in relations.iter().enumerate() {
            self.params
                .push((format!("populate[{}]", index), (*relation).to_string()));
        }
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.params
            .push(("pagination[page]".to_string(), page.to_string()));
        self.params
            .push(("pagination[pageSize]".to_string(), page_size.to_string()));
        self
    }

    /// `filters[a][b][$op]=value`
    pub fn filter(mut self, path: &[&str], operator: &str, value: impl Into<String>) -> Self {
        let mut key = String::from("filters");
        for segment in path {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        key.push_str(&format!("[{}]", operator));
        self.params.push((key, value.into()));
        self
    }

    pub fn sort(mut self, field: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("sort".to_string(), format!("{}:{}", field, direction)));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_bracketed_keys() {
        let query = StrapiQuery::new()
            .populate(&["category", "cover"])
            .page(2, 10)
            .filter(&["category", "documentId"], "$eq", "cat-1");
        let keys: Vec<&str> = query.params().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "populate[0]",
                "populate[1]",
                "pagination[page]",
                "pagination[pageSize]",
                "filters[category][documentId][$eq]",
            ]
        );
        assert_eq!(query.params()[4].1, "cat-1");
    }

    #[test]
    fn sort_direction() {
        let query = StrapiQuery::new().sort("createdAt", true);
        assert_eq!(query.params()[0], ("sort".to_string(), "createdAt:desc".to_string()));
    }
}
