/// Builder for the `&Field=value` filter fragments list endpoints take.
/// A filter with an empty value is omitted entirely; this is the uniform
/// "optional filter" convention across every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    buf: String,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, name: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.buf.push_str(&format!("&{name}={value}"));
        }
        self
    }

    pub fn filter_id(self, name: &str, value: Option<i64>) -> Self {
        match value {
            Some(id) => self.filter(name, &id.to_string()),
            None => self,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_omitted() {
        let query = QueryString::new()
            .filter("Status", "")
            .filter("ProjectId", "")
            .into_string();

        assert_eq!(query, "", "empty filters must leave no trace in the query");
    }

    #[test]
    fn non_empty_values_appear_exactly_once() {
        let query = QueryString::new()
            .filter("Status", "Active")
            .filter("Keyword", "")
            .filter("ProjectId", "12")
            .into_string();

        assert_eq!(query, "&Status=Active&ProjectId=12");
        assert_eq!(query.matches("&Status=Active").count(), 1);
    }

    #[test]
    fn optional_ids_follow_the_same_rule() {
        let query = QueryString::new()
            .filter_id("VehicleId", None)
            .filter_id("DriverId", Some(4))
            .into_string();

        assert_eq!(query, "&DriverId=4");
    }
}
