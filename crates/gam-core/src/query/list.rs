// ── List view state ──

use gam_api::types::ListQuery;

use super::key::{QueryKey, Resource};

/// Page sizes the console offers.
pub const PAGE_SIZES: [u32; 5] = [10, 20, 50, 100, 500];

/// One renderable column of a list view.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Stable identifier used to toggle visibility from the CLI.
    pub id: &'static str,
    /// Header label.
    pub label: &'static str,
    pub default_visible: bool,
}

impl ColumnSpec {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            default_visible: true,
        }
    }

    pub const fn hidden(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            default_visible: false,
        }
    }
}

/// Summary line for a rendered page, e.g. `"21-40 of 123"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: u64,
    pub last: u64,
    pub total: u64,
}

impl PageSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl std::fmt::Display for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "0 of 0")
        } else {
            write!(f, "{}-{} of {}", self.first, self.last, self.total)
        }
    }
}

/// Pagination, search and filter state for one resource listing.
///
/// Page index is zero-based internally; the wire query is one-based.
/// Any change to page size, search text or filters snaps back to the
/// first page so the view never points past the shrunken result set.
#[derive(Debug, Clone)]
pub struct ListController {
    resource: Resource,
    page: u32,
    page_size: u32,
    search: Option<String>,
    filters: Vec<(String, String)>,
    columns: Vec<ColumnSpec>,
    visible: Vec<bool>,
}

impl ListController {
    pub fn new(resource: Resource, columns: Vec<ColumnSpec>) -> Self {
        let visible = columns.iter().map(|c| c.default_visible).collect();
        Self {
            resource,
            page: 0,
            page_size: PAGE_SIZES[1],
            search: None,
            filters: Vec::new(),
            columns,
            visible,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Unknown sizes are clamped to the nearest offered size.
    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = PAGE_SIZES
            .into_iter()
            .min_by_key(|s| s.abs_diff(size))
            .unwrap_or(PAGE_SIZES[1]);
        self.page = 0;
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|s| !s.is_empty());
        self.page = 0;
    }

    /// Replace the value of one filter field; `None` removes it.
    pub fn set_filter(&mut self, field: &str, value: Option<String>) {
        self.filters.retain(|(k, _)| k != field);
        if let Some(value) = value {
            self.filters.push((field.to_owned(), value));
        }
        self.page = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
    }

    // ── Column visibility ──

    pub fn columns(&self) -> impl Iterator<Item = (&ColumnSpec, bool)> {
        self.columns.iter().zip(self.visible.iter().copied())
    }

    pub fn visible_columns(&self) -> Vec<&ColumnSpec> {
        self.columns()
            .filter_map(|(c, v)| v.then_some(c))
            .collect()
    }

    /// Returns false when the column id is unknown.
    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.columns.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.visible[idx] = visible;
                true
            }
            None => false,
        }
    }

    /// Restrict visible columns to exactly the given ids, keeping the
    /// declared column order. Unknown ids are returned for the caller
    /// to report.
    pub fn select_columns<'a>(&mut self, ids: &[&'a str]) -> Vec<&'a str> {
        for v in &mut self.visible {
            *v = false;
        }
        let mut unknown = Vec::new();
        for id in ids {
            if !self.set_column_visible(id, true) {
                unknown.push(*id);
            }
        }
        unknown
    }

    // ── Wire mapping ──

    /// The one-based wire query for the current view state.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page + 1,
            page_size: self.page_size,
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Cache key for the current view state. Identical states produce
    /// identical keys, so a re-render inside the staleness window is
    /// served from cache.
    pub fn query_key(&self) -> QueryKey {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("page_size".to_owned(), self.page_size.to_string()),
        ];
        if let Some(ref search) = self.search {
            params.push(("search".to_owned(), search.clone()));
        }
        params.extend(self.filters.iter().cloned());
        QueryKey::with_params(self.resource, params)
    }

    /// Summary for a page holding `count` rows out of `total` matches.
    pub fn summary(&self, count: usize, total: u64) -> PageSummary {
        if total == 0 || count == 0 {
            return PageSummary {
                first: 0,
                last: 0,
                total,
            };
        }
        let first = u64::from(self.page) * u64::from(self.page_size) + 1;
        PageSummary {
            first,
            last: first + count as u64 - 1,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ListController {
        ListController::new(
            Resource::Devices,
            vec![
                ColumnSpec::new("serial", "Serial"),
                ColumnSpec::new("name", "Name"),
                ColumnSpec::hidden("mac", "MAC"),
            ],
        )
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut c = controller();
        c.set_page(4);
        c.set_page_size(50);
        assert_eq!(c.page(), 0);
        assert_eq!(c.page_size(), 50);
    }

    #[test]
    fn unknown_page_size_clamps_to_offered() {
        let mut c = controller();
        c.set_page_size(37);
        assert_eq!(c.page_size(), 50);
        c.set_page_size(7);
        assert_eq!(c.page_size(), 10);
    }

    #[test]
    fn search_and_filter_reset_page() {
        let mut c = controller();
        c.set_page(2);
        c.set_search(Some("gm".into()));
        assert_eq!(c.page(), 0);
        c.set_page(2);
        c.set_filter("online", Some("true".into()));
        assert_eq!(c.page(), 0);
    }

    #[test]
    fn wire_query_is_one_based() {
        let mut c = controller();
        c.set_page(2);
        assert_eq!(c.query().page, 3);
    }

    #[test]
    fn identical_state_produces_identical_keys() {
        let mut a = controller();
        let mut b = controller();
        a.set_search(Some("gm".into()));
        a.set_filter("online", Some("true".into()));
        b.set_filter("online", Some("true".into()));
        b.set_search(Some("gm".into()));
        assert_eq!(a.query_key(), b.query_key());
    }

    #[test]
    fn default_hidden_columns_stay_hidden() {
        let c = controller();
        let visible: Vec<_> = c.visible_columns().iter().map(|c| c.id).collect();
        assert_eq!(visible, ["serial", "name"]);
    }

    #[test]
    fn select_columns_reports_unknown_ids() {
        let mut c = controller();
        let unknown = c.select_columns(&["mac", "bogus"]);
        assert_eq!(unknown, ["bogus"]);
        let visible: Vec<_> = c.visible_columns().iter().map(|c| c.id).collect();
        assert_eq!(visible, ["mac"]);
    }

    #[test]
    fn summary_renders_ranges() {
        let mut c = controller();
        c.set_page_size(20);
        c.set_page(1);
        assert_eq!(c.summary(20, 123).to_string(), "21-40 of 123");
        assert_eq!(c.summary(0, 0).to_string(), "0 of 0");
    }
}
