use std::sync::Arc;

use dioxus::prelude::*;

use crate::ui::state::table::{use_table_fetch, ColumnDef, RemoteTable, TableRow};
use crate::usecase::ports::transport::ApiTransport;

pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 25, 50];

/// A per-row action button offered by the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActionDef {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub action: &'static str,
    pub row: TableRow,
}

/// Page numbers worth rendering: first, last, and a window around the
/// current page. Gaps are rendered as ellipses by the view.
pub fn page_buttons(current: u32, total: u32) -> Vec<u32> {
    if total <= 7 {
        return (1..=total).collect();
    }
    let mut pages = vec![1];
    let low = current.saturating_sub(1).max(2);
    let high = (current + 1).min(total - 1);
    for page in low..=high {
        pages.push(page);
    }
    pages.push(total);
    pages.dedup();
    pages
}

/// Renders one `RemoteTable`: sortable headers, the current page of rows,
/// loading and empty states, the summary line, and the pager. Fetching is
/// wired here so mounting the view is what starts the binding.
#[component]
pub fn DataTableView(
    table: RemoteTable,
    columns: Vec<ColumnDef>,
    #[props(default = Vec::new())] actions: Vec<RowActionDef>,
    #[props(default)] on_action: EventHandler<RowAction>,
) -> Element {
    let transport = use_context::<Arc<dyn ApiTransport>>();
    use_table_fetch(table, transport);

    let rows = table.rows();
    let fetching = table.fetching();
    let error_text = table.error().unwrap_or_default();
    let sort_column = table.sort_column();
    let sort_ascending = table.sort_ascending();
    let page_number = table.page_number();
    let total_pages = table.total_pages();
    let summary = table.summary_text();
    let has_actions = !actions.is_empty();

    rsx! {
        div {
            table { style: "width: 100%; border-collapse: collapse; background: #fff;",
                thead {
                    tr {
                        th { style: "text-align: left; padding: 8px; border-bottom: 2px solid #ddd; width: 56px;", "#" }
                        for column in columns.clone() {
                            th {
                                style: "text-align: left; padding: 8px; border-bottom: 2px solid #ddd; cursor: pointer;",
                                onclick: {
                                    let field = column.field;
                                    let sortable = column.sortable;
                                    move |_| {
                                        if sortable {
                                            table.toggle_sort(field);
                                        }
                                    }
                                },
                                "{column.title}"
                                if sort_column == column.field {
                                    if sort_ascending { " ▲" } else { " ▼" }
                                }
                            }
                        }
                        if has_actions {
                            th { style: "text-align: right; padding: 8px; border-bottom: 2px solid #ddd;", "Actions" }
                        }
                    }
                }
                tbody {
                    if fetching {
                        tr {
                            td { colspan: "{columns.len() + 2}", style: "padding: 16px; text-align: center; color: #888;",
                                "Loading…"
                            }
                        }
                    } else if rows.is_empty() {
                        tr {
                            td { colspan: "{columns.len() + 2}", style: "padding: 16px; text-align: center; color: #888;",
                                if error_text.is_empty() { "No data found" } else { "{error_text}" }
                            }
                        }
                    } else {
                        for row in rows {
                            tr { style: "border-bottom: 1px solid #eee;",
                                td { style: "padding: 8px; color: #888;", "{row.srno}" }
                                for column in columns.clone() {
                                    td { style: "padding: 8px;", "{row.cell(column.field)}" }
                                }
                                if has_actions {
                                    td { style: "padding: 8px; text-align: right; white-space: nowrap;",
                                        for action in actions.clone() {
                                            button {
                                                style: "margin-left: 6px; padding: 4px 10px; border: 1px solid #ccc; border-radius: 4px; background: #f7f7f7; cursor: pointer;",
                                                onclick: {
                                                    let row = row.clone();
                                                    move |_| on_action.call(RowAction {
                                                        action: action.key,
                                                        row: row.clone(),
                                                    })
                                                },
                                                "{action.label}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 4px;",
                span { style: "font-size: 13px; color: #555;", "{summary}" }
                div { style: "display: flex; gap: 4px; align-items: center;",
                    button {
                        disabled: page_number <= 1,
                        onclick: move |_| table.set_page(page_number.saturating_sub(1)),
                        "Prev"
                    }
                    for page in page_buttons(page_number, total_pages) {
                        button {
                            style: if page == page_number {
                                "font-weight: bold; background: #2d6cdf; color: #fff; border-radius: 4px; padding: 4px 8px;"
                            } else {
                                "padding: 4px 8px;"
                            },
                            onclick: move |_| table.set_page(page),
                            "{page}"
                        }
                    }
                    button {
                        disabled: total_pages == 0 || page_number >= total_pages,
                        onclick: move |_| table.set_page(page_number + 1),
                        "Next"
                    }
                }
            }
        }
    }
}

/// Page-size selector, kept in the parent's filter bar so the page decides
/// where it lives; it drives the binding through `set_page_size`.
#[component]
pub fn PageSizeSelect(table: RemoteTable) -> Element {
    let current = table.page_size();

    rsx! {
        select {
            style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
            onchange: move |event| {
                if let Ok(size) = event.value().parse::<u32>() {
                    table.set_page_size(size);
                }
            },
            for size in PAGE_SIZE_OPTIONS {
                option { value: "{size}", selected: current == size, "{size} / page" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_totals_render_every_page() {
        assert_eq!(page_buttons(1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_buttons(3, 7), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(page_buttons(1, 0).is_empty());
    }

    #[test]
    fn large_totals_window_around_current() {
        assert_eq!(page_buttons(5, 20), vec![1, 4, 5, 6, 20]);
        assert_eq!(page_buttons(1, 20), vec![1, 2, 20]);
        assert_eq!(page_buttons(20, 20), vec![1, 19, 20]);
    }
}
