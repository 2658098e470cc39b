use std::sync::Arc;

use dioxus::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::page::{
    page_summary, row_number, ListPage, PageQuery, SortEntry, SortOrder,
};
use crate::usecase::ports::transport::ApiTransport;
use crate::usecase::services::decode_envelope;

/// Display projection for one table column. Opaque to the binding; only the
/// view reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub field: &'static str,
    pub title: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    pub const fn new(field: &'static str, title: &'static str) -> Self {
        Self {
            field,
            title,
            sortable: true,
        }
    }

    pub const fn unsorted(field: &'static str, title: &'static str) -> Self {
        Self {
            field,
            title,
            sortable: false,
        }
    }
}

/// One fetched record plus its page-relative display number.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub srno: String,
    pub record: Value,
}

impl TableRow {
    pub fn id(&self) -> Option<i64> {
        self.record.get("id").and_then(Value::as_i64)
    }

    /// Projects one field to display text. Missing and null fields render
    /// empty, everything else via its JSON representation.
    pub fn cell(&self, field: &str) -> String {
        project_field(&self.record, field)
    }
}

/// Field-to-text projection shared by cells and form seeding.
pub fn project_field(record: &Value, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// The page/sort/search state machine for one list view. Pure state: the
/// reactive wrapper below owns fetching. The generation counter is the
/// staleness guard: a response only lands if its generation is still the
/// latest one issued, so an out-of-order reply can never overwrite a newer
/// page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCore {
    pub query: PageQuery,
    pub enabled: bool,
    pub rows: Vec<TableRow>,
    pub total_pages: u32,
    pub total_count: u64,
    pub fetching: bool,
    pub error: Option<String>,
    generation: u64,
    refetch: u64,
}

impl Default for TableCore {
    fn default() -> Self {
        Self {
            query: PageQuery::default(),
            enabled: false,
            rows: Vec::new(),
            total_pages: 0,
            total_count: 0,
            fetching: false,
            error: None,
            generation: 0,
            refetch: 0,
        }
    }
}

impl TableCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything that determines one list request. When this changes, a
    /// re-fetch is due; when it does not, row/flag writes must not trigger
    /// one.
    pub fn fetch_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.enabled,
            self.refetch,
            self.query.to_query_string()
        )
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn set_page(&mut self, page_number: u32) {
        self.query.page_number = page_number.max(1);
    }

    /// Changing the page length invalidates the old page index.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.query.page_size = page_size.max(1);
        self.query.page_number = 1;
    }

    pub fn set_search_text(&mut self, search_text: String) {
        self.query.search_text = search_text;
    }

    pub fn set_extra_payload(&mut self, extra_payload: String) {
        self.query.extra_payload = extra_payload;
    }

    /// Sort-model handler: only the first entry counts; `asc` maps to an
    /// ascending (true) sort order.
    pub fn handle_sort(&mut self, entries: &[SortEntry]) {
        if let Some(first) = entries.first() {
            self.query.sort_ascending = first.sort == SortOrder::Asc;
            self.query.sort_column = first.field.clone();
        }
    }

    /// Header-click convenience: first click sorts ascending, a second click
    /// on the same column flips the direction.
    pub fn toggle_sort(&mut self, field: &str) {
        let sort = if self.query.sort_column == field && self.query.sort_ascending {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.handle_sort(&[SortEntry {
            field: field.to_string(),
            sort,
        }]);
    }

    /// External mutations (create/update/delete) call this after success so
    /// the current page is re-fetched.
    pub fn refresh(&mut self) {
        self.refetch += 1;
    }

    /// Marks a request as issued and returns its generation tag.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.fetching = true;
        self.generation
    }

    /// Lands a successful page if its generation is still current. Returns
    /// whether it landed.
    pub fn apply_page(&mut self, generation: u64, page: ListPage<Value>) -> bool {
        if generation != self.generation {
            return false;
        }
        let page_number = self.query.page_number;
        self.rows = page
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, record)| TableRow {
                srno: row_number(page_number, idx),
                record,
            })
            .collect();
        self.total_pages = page.pagination_info.total_pages;
        self.total_count = page.pagination_info.total_count;
        self.error = None;
        self.fetching = false;
        true
    }

    /// A failed fetch leaves no authoritative data: rows are cleared rather
    /// than letting stale rows silently persist.
    pub fn apply_failure(&mut self, generation: u64, message: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.rows.clear();
        self.total_pages = 0;
        self.total_count = 0;
        self.error = Some(message);
        self.fetching = false;
        true
    }

    pub fn summary_text(&self) -> String {
        page_summary(self.query.page_number, self.query.page_size, self.total_count)
    }
}

/// The reactive binding one page owns: `TableCore` behind a signal, plus the
/// endpoint it feeds from. The binding owns and exposes its state; parents
/// read rows and flags from here instead of injecting setters.
#[derive(Clone, Copy)]
pub struct RemoteTable {
    pub url: &'static str,
    pub query_key: &'static str,
    pub state: Signal<TableCore>,
}

impl PartialEq for RemoteTable {
    fn eq(&self, other: &Self) -> bool {
        self.query_key == other.query_key && self.state == other.state
    }
}

impl RemoteTable {
    /// Component-scope constructor, like the rest of the signal bundles.
    pub fn new(url: &'static str, query_key: &'static str) -> Self {
        Self {
            url,
            query_key,
            state: use_signal(TableCore::new),
        }
    }

    pub fn enable(mut self) {
        self.state.write().enable();
    }

    pub fn set_page(mut self, page_number: u32) {
        self.state.write().set_page(page_number);
    }

    pub fn set_page_size(mut self, page_size: u32) {
        self.state.write().set_page_size(page_size);
    }

    pub fn set_search_text(mut self, search_text: String) {
        self.state.write().set_search_text(search_text);
    }

    pub fn set_extra_payload(mut self, extra_payload: String) {
        self.state.write().set_extra_payload(extra_payload);
    }

    pub fn toggle_sort(mut self, field: &str) {
        self.state.write().toggle_sort(field);
    }

    pub fn refresh(mut self) {
        self.state.write().refresh();
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.state.read().rows.clone()
    }

    pub fn fetching(&self) -> bool {
        self.state.read().fetching
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn page_number(&self) -> u32 {
        self.state.read().query.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.state.read().query.page_size
    }

    pub fn sort_column(&self) -> String {
        self.state.read().query.sort_column.clone()
    }

    pub fn sort_ascending(&self) -> bool {
        self.state.read().query.sort_ascending
    }

    pub fn total_pages(&self) -> u32 {
        self.state.read().total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.state.read().total_count
    }

    pub fn summary_text(&self) -> String {
        self.state.read().summary_text()
    }
}

/// Wires a binding to the transport: one effect keyed on the fetch key, one
/// GET per key change, stale responses discarded by generation.
pub fn use_table_fetch(table: RemoteTable, transport: Arc<dyn ApiTransport>) {
    let mut state = table.state;
    let key = use_memo(move || state.read().fetch_key());
    let url = table.url;
    let query_key = table.query_key;

    use_effect(move || {
        let _key = key();
        let (enabled, query_string) = {
            let core = state.peek();
            (core.enabled, core.query.to_query_string())
        };
        if !enabled {
            return;
        }
        let generation = state.write().begin_fetch();
        debug!(query_key, generation, %query_string, "fetching page");
        let transport = transport.clone();
        spawn(async move {
            let outcome = match transport.get(url, &query_string).await {
                Ok(value) => decode_envelope::<ListPage<Value>>(value),
                Err(err) => Err(err),
            };
            let mut core = state.write();
            let landed = match outcome {
                Ok(page) => core.apply_page(generation, page),
                Err(err) => core.apply_failure(generation, err.display_message()),
            };
            if !landed {
                debug!(query_key, generation, "discarded stale response");
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::page::PaginationInfo;
    use serde_json::json;

    fn page_of(count: usize, total_pages: u32, total_count: u64) -> ListPage<Value> {
        ListPage {
            items: (0..count).map(|n| json!({ "id": n as i64 + 1 })).collect(),
            pagination_info: PaginationInfo {
                total_pages,
                total_count,
            },
        }
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut core = TableCore::new();
        core.set_page(4);
        assert_eq!(core.query.page_number, 4);

        core.set_page_size(25);

        assert_eq!(core.query.page_size, 25);
        assert_eq!(core.query.page_number, 1, "new page length invalidates the page index");
    }

    #[test]
    fn sort_handler_takes_first_entry_and_maps_asc() {
        let mut core = TableCore::new();
        core.handle_sort(&[
            SortEntry {
                field: "name".to_string(),
                sort: SortOrder::Asc,
            },
            SortEntry {
                field: "status".to_string(),
                sort: SortOrder::Desc,
            },
        ]);

        assert_eq!(core.query.sort_column, "name");
        assert!(core.query.sort_ascending, "asc should map to ascending");
    }

    #[test]
    fn toggle_sort_flips_direction_on_same_column() {
        let mut core = TableCore::new();
        core.toggle_sort("name");
        assert!(core.query.sort_ascending);

        core.toggle_sort("name");
        assert!(!core.query.sort_ascending);

        core.toggle_sort("status");
        assert!(core.query.sort_ascending, "new column starts ascending");
        assert_eq!(core.query.sort_column, "status");
    }

    #[test]
    fn fetch_key_changes_with_search_and_reverts() {
        let mut core = TableCore::new();
        core.enable();
        let initial = core.fetch_key();

        core.set_search_text("abc".to_string());
        let with_search = core.fetch_key();
        assert_ne!(initial, with_search, "search change must trigger a re-fetch");
        assert!(with_search.contains("&Keyword=abc"));

        core.set_search_text(String::new());
        assert_eq!(core.fetch_key(), initial, "reverting the search restores the key");
    }

    #[test]
    fn fetch_key_ignores_row_and_flag_changes() {
        let mut core = TableCore::new();
        core.enable();
        let before = core.fetch_key();

        let generation = core.begin_fetch();
        core.apply_page(generation, page_of(3, 1, 3));

        assert_eq!(core.fetch_key(), before, "landing a page must not re-trigger the fetch");
    }

    #[test]
    fn rows_are_numbered_per_page() {
        let mut core = TableCore::new();
        core.enable();
        let generation = core.begin_fetch();
        core.apply_page(generation, page_of(10, 5, 47));

        let numbers: Vec<&str> = core.rows.iter().map(|row| row.srno.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);

        core.set_page(3);
        let generation = core.begin_fetch();
        core.apply_page(generation, page_of(10, 5, 47));

        let numbers: Vec<&str> = core.rows.iter().map(|row| row.srno.as_str()).collect();
        assert_eq!(
            numbers,
            vec!["31", "32", "33", "34", "35", "36", "37", "38", "39", "30"],
            "later pages keep the inherited concatenated numbering"
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut core = TableCore::new();
        core.enable();

        let first = core.begin_fetch();
        let second = core.begin_fetch();

        assert!(
            !core.apply_page(first, page_of(10, 5, 47)),
            "older generation must not land"
        );
        assert!(core.rows.is_empty());

        assert!(core.apply_page(second, page_of(3, 1, 3)));
        assert_eq!(core.rows.len(), 3, "only the latest generation lands");
        assert!(!core.fetching);
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_data() {
        let mut core = TableCore::new();
        core.enable();

        let first = core.begin_fetch();
        let second = core.begin_fetch();
        assert!(core.apply_page(second, page_of(2, 1, 2)));

        assert!(!core.apply_failure(first, "late error".to_string()));
        assert_eq!(core.rows.len(), 2);
        assert_eq!(core.error, None);
    }

    #[test]
    fn failure_clears_rows_and_records_message() {
        let mut core = TableCore::new();
        core.enable();
        let generation = core.begin_fetch();
        core.apply_page(generation, page_of(5, 1, 5));

        let generation = core.begin_fetch();
        let landed = core.apply_failure(generation, "X".to_string());

        assert!(landed);
        assert!(core.rows.is_empty(), "failed fetch leaves no authoritative data");
        assert_eq!(core.error.as_deref(), Some("X"));
        assert_eq!(core.total_count, 0);
    }

    #[test]
    fn page_two_of_five_summary() {
        let mut core = TableCore::new();
        core.enable();
        core.set_page(2);
        let generation = core.begin_fetch();
        core.apply_page(generation, page_of(10, 5, 47));

        assert_eq!(core.summary_text(), "Showing 11 to 20 of 47 entries");
        assert_eq!(core.total_pages, 5);
        assert_eq!(core.query.page_number, 2);
    }

    #[test]
    fn refresh_changes_key_without_touching_query() {
        let mut core = TableCore::new();
        core.enable();
        let before = core.fetch_key();
        let query_before = core.query.clone();

        core.refresh();

        assert_ne!(core.fetch_key(), before);
        assert_eq!(core.query, query_before);
    }

    #[test]
    fn row_cells_project_fields_to_text() {
        let row = TableRow {
            srno: "1".to_string(),
            record: json!({ "id": 7, "name": "Dana", "year": 2021, "vin": null }),
        };

        assert_eq!(row.id(), Some(7));
        assert_eq!(row.cell("name"), "Dana");
        assert_eq!(row.cell("year"), "2021");
        assert_eq!(row.cell("vin"), "");
        assert_eq!(row.cell("missing"), "");
    }
}
