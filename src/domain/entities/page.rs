use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One entry of a table sort model, as reported by a column header click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub field: String,
    pub sort: SortOrder,
}

/// The full set of inputs that determines one list request. Any change to
/// any field is a new key tuple and triggers a re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_column: String,
    pub sort_ascending: bool,
    pub search_text: String,
    pub extra_payload: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_column: String::new(),
            sort_ascending: false,
            search_text: String::new(),
            extra_payload: String::new(),
        }
    }
}

impl PageQuery {
    /// Builds the query string the list endpoints expect:
    /// `?pageNumber=N&pageSize=S&SortOrder=bool`, then `&Keyword=` when a
    /// search term is set, the raw extra payload verbatim, and `&SortBy=`
    /// when a sort column is set.
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "?pageNumber={}&pageSize={}&SortOrder={}",
            self.page_number, self.page_size, self.sort_ascending
        );
        if !self.search_text.is_empty() {
            query.push_str(&format!("&Keyword={}", self.search_text));
        }
        if !self.extra_payload.is_empty() {
            query.push_str(&self.extra_payload);
        }
        if !self.sort_column.is_empty() {
            query.push_str(&format!("&SortBy={}", self.sort_column));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
}

/// One page of a server-driven list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination_info: PaginationInfo,
}

/// Page-relative display row number. Page 1 counts 1..=page_size; later
/// pages concatenate the page number with the in-page index, except the
/// tenth row which becomes `"{page}0"`. Inherited behavior, kept as-is.
pub fn row_number(page_number: u32, idx: usize) -> String {
    if page_number == 1 {
        (idx + 1).to_string()
    } else if idx == 9 {
        format!("{page_number}0")
    } else {
        format!("{page_number}{}", idx + 1)
    }
}

/// Footer summary line, clamped so a short or empty last page never claims
/// rows past the total.
pub fn page_summary(page_number: u32, page_size: u32, total_count: u64) -> String {
    let first = (u64::from(page_number - 1) * u64::from(page_size) + 1).min(total_count);
    let last = (u64::from(page_number) * u64::from(page_size)).min(total_count);
    format!("Showing {first} to {last} of {total_count} entries")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_rows_count_from_one() {
        let numbers: Vec<String> = (0..10).map(|idx| row_number(1, idx)).collect();
        let expected: Vec<String> = (1..=10).map(|n| n.to_string()).collect();

        assert_eq!(numbers, expected, "page 1 should number rows 1..=10");
    }

    #[test]
    fn later_pages_concatenate_page_and_index() {
        assert_eq!(row_number(3, 0), "31");
        assert_eq!(row_number(3, 4), "35");
        assert_eq!(row_number(3, 9), "30", "tenth row folds back onto the page digit");
        assert_eq!(row_number(12, 2), "123");
    }

    #[test]
    fn query_string_contains_keyword_only_when_search_set() {
        let mut query = PageQuery::default();
        assert!(
            !query.to_query_string().contains("Keyword"),
            "empty search must not emit Keyword"
        );

        query.search_text = "abc".to_string();
        let rendered = query.to_query_string();
        assert_eq!(
            rendered.matches("&Keyword=abc").count(),
            1,
            "non-empty search should appear exactly once"
        );

        query.search_text.clear();
        assert!(!query.to_query_string().contains("Keyword"));
    }

    #[test]
    fn query_string_has_fixed_prefix_and_appends_extras() {
        let query = PageQuery {
            page_number: 2,
            page_size: 25,
            sort_column: "name".to_string(),
            sort_ascending: true,
            search_text: String::new(),
            extra_payload: "&Status=Active".to_string(),
        };

        assert_eq!(
            query.to_query_string(),
            "?pageNumber=2&pageSize=25&SortOrder=true&Status=Active&SortBy=name"
        );
    }

    #[test]
    fn summary_clamps_to_total_count() {
        assert_eq!(page_summary(2, 10, 47), "Showing 11 to 20 of 47 entries");
        assert_eq!(page_summary(5, 10, 47), "Showing 41 to 47 of 47 entries");
        assert_eq!(page_summary(1, 10, 0), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn list_page_deserializes_wire_names() {
        let page: ListPage<serde_json::Value> = serde_json::from_str(
            r#"{"items": [{"id": 1}], "paginationInfo": {"totalPages": 5, "totalCount": 47}}"#,
        )
        .expect("list page should deserialize");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination_info.total_pages, 5);
        assert_eq!(page.pagination_info.total_count, 47);
    }
}
