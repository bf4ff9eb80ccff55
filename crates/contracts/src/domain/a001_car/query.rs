use serde::Serialize;

/// Page sizes offered by the list
pub const PAGE_SIZES: [usize; 4] = [25, 50, 100, 250];
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Mark,
    Model,
    YearMin,
    YearMax,
    Fuel,
    Province,
    PriceMin,
    PriceMax,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Mark,
        FilterField::Model,
        FilterField::YearMin,
        FilterField::YearMax,
        FilterField::Fuel,
        FilterField::Province,
        FilterField::PriceMin,
        FilterField::PriceMax,
    ];

    /// Query parameter name
    pub fn param(&self) -> &'static str {
        match self {
            FilterField::Mark => "mark",
            FilterField::Model => "model",
            FilterField::YearMin => "year_min",
            FilterField::YearMax => "year_max",
            FilterField::Fuel => "fuel",
            FilterField::Province => "province",
            FilterField::PriceMin => "price_min",
            FilterField::PriceMax => "price_max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Mark => "Marka",
            FilterField::Model => "Model",
            FilterField::YearMin => "Rok od",
            FilterField::YearMax => "Rok do",
            FilterField::Fuel => "Paliwo",
            FilterField::Province => "Województwo",
            FilterField::PriceMin => "Cena od",
            FilterField::PriceMax => "Cena do",
        }
    }
}

/// Structured filters. An empty (or blank) value means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub mark: String,
    pub model: String,
    pub year_min: String,
    pub year_max: String,
    pub fuel: String,
    pub province: String,
    pub price_min: String,
    pub price_max: String,
}

impl CarFilter {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Mark => &self.mark,
            FilterField::Model => &self.model,
            FilterField::YearMin => &self.year_min,
            FilterField::YearMax => &self.year_max,
            FilterField::Fuel => &self.fuel,
            FilterField::Province => &self.province,
            FilterField::PriceMin => &self.price_min,
            FilterField::PriceMax => &self.price_max,
        }
    }

    pub fn set(&mut self, field: FilterField, value: String) {
        let slot = match field {
            FilterField::Mark => &mut self.mark,
            FilterField::Model => &mut self.model,
            FilterField::YearMin => &mut self.year_min,
            FilterField::YearMax => &mut self.year_max,
            FilterField::Fuel => &mut self.fuel,
            FilterField::Province => &mut self.province,
            FilterField::PriceMin => &mut self.price_min,
            FilterField::PriceMax => &mut self.price_max,
        };
        *slot = value;
    }

    /// Fields holding a constraint, with their trimmed values.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> {
        FilterField::ALL
            .into_iter()
            .map(move |f| (f, self.get(f).trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    MileageAsc,
    MileageDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::None,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::MileageAsc,
        SortOption::MileageDesc,
    ];

    /// `ordering` parameter. `None` keeps the server's default order.
    pub fn ordering(&self) -> Option<&'static str> {
        match self {
            SortOption::None => None,
            SortOption::PriceAsc => Some("price"),
            SortOption::PriceDesc => Some("-price"),
            SortOption::MileageAsc => Some("mileage"),
            SortOption::MileageDesc => Some("-mileage"),
        }
    }

    /// Value used by the sort `<select>`
    pub fn key(&self) -> &'static str {
        match self {
            SortOption::None => "",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::MileageAsc => "mileage_asc",
            SortOption::MileageDesc => "mileage_desc",
        }
    }

    pub fn from_key(key: &str) -> SortOption {
        SortOption::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::None => "Domyślnie",
            SortOption::PriceAsc => "Cena: rosnąco",
            SortOption::PriceDesc => "Cena: malejąco",
            SortOption::MileageAsc => "Przebieg: rosnąco",
            SortOption::MileageDesc => "Przebieg: malejąco",
        }
    }
}

#[derive(Serialize)]
struct CarQueryParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    mark: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year_min: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year_max: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    province: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_min: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_max: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordering: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<usize>,
}

impl<'a> CarQueryParams<'a> {
    fn filtered(filter: &'a CarFilter, search_term: &'a str) -> Self {
        let value = |field: FilterField| Some(filter.get(field).trim()).filter(|v| !v.is_empty());
        let search = search_term.trim();
        Self {
            mark: value(FilterField::Mark),
            model: value(FilterField::Model),
            year_min: value(FilterField::YearMin),
            year_max: value(FilterField::YearMax),
            fuel: value(FilterField::Fuel),
            province: value(FilterField::Province),
            price_min: value(FilterField::PriceMin),
            price_max: value(FilterField::PriceMax),
            search: (!search.is_empty()).then_some(search),
            ordering: None,
            page: None,
            page_size: None,
        }
    }

    fn encode(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }
}

/// Everything that drives one list fetch. Two equal requests fetch the same page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarListRequest {
    pub filter: CarFilter,
    pub search_term: String,
    pub sort: SortOption,
    pub page: usize,
    pub page_size: usize,
}

impl CarListRequest {
    /// Query string for `/cars/`. The server counts pages from 1.
    pub fn query_string(&self) -> String {
        let mut params = CarQueryParams::filtered(&self.filter, &self.search_term);
        params.ordering = self.sort.ordering();
        params.page = Some(self.page + 1);
        params.page_size = Some(self.page_size);
        params.encode()
    }

    /// Query string for the export endpoints: filters and search only.
    pub fn export_query_string(&self) -> String {
        CarQueryParams::filtered(&self.filter, &self.search_term).encode()
    }
}

/// Query state of the car list.
///
/// Filters exist twice: `draft` is bound to the filter panel inputs and
/// `applied` drives the request. Only [`CarListQuery::commit`] copies one into
/// the other, so typing never triggers a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarListQuery {
    pub draft: CarFilter,
    applied: CarFilter,
    pub search_input: String,
    search_term: String,
    sort: SortOption,
    page: usize,
    page_size: usize,
    seq: u64,
}

impl Default for CarListQuery {
    fn default() -> Self {
        Self {
            draft: CarFilter::default(),
            applied: CarFilter::default(),
            search_input: String::new(),
            search_term: String::new(),
            sort: SortOption::None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            seq: 0,
        }
    }
}

impl CarListQuery {
    pub fn applied(&self) -> &CarFilter {
        &self.applied
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_draft(&mut self, field: FilterField, value: String) {
        self.draft.set(field, value);
    }

    /// Applies the draft filters and pending search text; back to the first page.
    pub fn commit(&mut self) {
        self.applied = self.draft.clone();
        self.search_term = self.search_input.trim().to_string();
        self.page = 0;
    }

    /// Clears filters (draft and applied) and search in one step.
    pub fn reset(&mut self) {
        self.draft = CarFilter::default();
        self.applied = CarFilter::default();
        self.search_input.clear();
        self.search_term.clear();
        self.page = 0;
    }

    /// Drops one applied filter (and its draft value). Other pending edits stay pending.
    pub fn remove_applied(&mut self, field: FilterField) {
        self.applied.set(field, String::new());
        self.draft.set(field, String::new());
        self.page = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_term.clear();
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        if self.sort != sort {
            self.sort = sort;
            self.page = 0;
        }
    }

    /// Navigates to `page`. Inert while there is nothing to page through.
    pub fn set_page(&mut self, page: usize, total: usize) -> bool {
        if total == 0 || page == self.page {
            return false;
        }
        let last_page = (total - 1) / self.page_size;
        if page > last_page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changes the page size. Inert while the list is empty; unknown sizes are refused.
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> bool {
        if total == 0 || !PAGE_SIZES.contains(&page_size) || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 0;
        true
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn request(&self) -> CarListRequest {
        CarListRequest {
            filter: self.applied.clone(),
            search_term: self.search_term.clone(),
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Hands out a ticket for a new fetch. Only the newest ticket is current.
    pub fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Whether the response for `ticket` should still be shown.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> Vec<(String, String)> {
        query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap_or((p, ""));
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    fn keys(query: &str) -> Vec<String> {
        params(query).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn empty_filters_produce_no_filter_params() {
        let mut query = CarListQuery::default();
        query.draft.mark = "   ".into();
        query.commit();

        let qs = query.request().query_string();
        assert_eq!(keys(&qs), vec!["page", "page_size"]);
        assert_eq!(query.request().export_query_string(), "");
    }

    #[test]
    fn mark_filter_without_search() {
        let mut query = CarListQuery::default();
        query.set_draft(FilterField::Mark, "toyota".into());
        query.commit();

        let qs = query.request().query_string();
        let pairs = params(&qs);
        assert!(pairs.contains(&("mark".to_string(), "toyota".to_string())));
        assert!(!keys(&qs).contains(&"search".to_string()));
    }

    #[test]
    fn page_is_sent_one_based() {
        let mut query = CarListQuery::default();
        query.set_page(2, 100);
        let pairs = params(&query.request().query_string());
        assert!(pairs.contains(&("page".to_string(), "3".to_string())));
        assert!(pairs.contains(&("page_size".to_string(), "25".to_string())));
    }

    #[test]
    fn sort_maps_to_ordering() {
        let mut query = CarListQuery::default();
        assert!(!keys(&query.request().query_string()).contains(&"ordering".to_string()));

        query.set_sort(SortOption::PriceAsc);
        assert!(params(&query.request().query_string())
            .contains(&("ordering".to_string(), "price".to_string())));

        query.set_sort(SortOption::PriceDesc);
        assert!(params(&query.request().query_string())
            .contains(&("ordering".to_string(), "-price".to_string())));

        query.set_sort(SortOption::MileageDesc);
        assert!(params(&query.request().query_string())
            .contains(&("ordering".to_string(), "-mileage".to_string())));
    }

    #[test]
    fn draft_edits_do_not_change_request() {
        let mut query = CarListQuery::default();
        let before = query.request();
        query.set_draft(FilterField::PriceMax, "50000".into());
        query.search_input = "golf".into();
        assert_eq!(query.request(), before);
    }

    #[test]
    fn commit_resets_page_and_applies_search() {
        let mut query = CarListQuery::default();
        query.set_page(3, 500);
        query.search_input = "  golf ".into();
        query.set_draft(FilterField::Fuel, "diesel".into());
        query.commit();

        assert_eq!(query.page(), 0);
        assert_eq!(query.search_term(), "golf");
        assert_eq!(query.applied().fuel, "diesel");
        assert!(params(&query.request().query_string())
            .contains(&("search".to_string(), "golf".to_string())));
    }

    #[test]
    fn page_navigation_keeps_filters() {
        let mut query = CarListQuery::default();
        query.set_draft(FilterField::Mark, "bmw".into());
        query.commit();
        assert!(query.set_page(1, 60));
        assert_eq!(query.applied().mark, "bmw");
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn sort_and_page_size_reset_page() {
        let mut query = CarListQuery::default();
        query.set_page(2, 300);
        query.set_sort(SortOption::MileageAsc);
        assert_eq!(query.page(), 0);

        query.set_page(2, 300);
        assert!(query.set_page_size(50, 300));
        assert_eq!(query.page(), 0);
        assert_eq!(query.page_size(), 50);
    }

    #[test]
    fn paging_is_inert_without_results() {
        let mut query = CarListQuery::default();
        assert!(!query.set_page(1, 0));
        assert!(!query.set_page_size(100, 0));
        assert_eq!(query.page(), 0);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_beyond_last_is_refused() {
        let mut query = CarListQuery::default();
        assert!(!query.set_page(2, 50));
        assert!(query.set_page(1, 50));
        assert!(!query.set_page_size(30, 50));
    }

    #[test]
    fn removing_a_tag_keeps_other_pending_edits() {
        let mut query = CarListQuery::default();
        query.set_draft(FilterField::Mark, "toyota".into());
        query.set_draft(FilterField::Fuel, "diesel".into());
        query.commit();
        query.set_page(2, 300);

        query.set_draft(FilterField::PriceMax, "40000".into());
        query.search_input = "corolla".into();
        query.remove_applied(FilterField::Mark);

        assert_eq!(query.applied().mark, "");
        assert_eq!(query.draft.mark, "");
        assert_eq!(query.applied().fuel, "diesel");
        assert_eq!(query.applied().price_max, "");
        assert_eq!(query.draft.price_max, "40000");
        assert_eq!(query.search_term(), "");
        assert_eq!(query.search_input, "corolla");
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn reset_clears_draft_applied_and_search() {
        let mut query = CarListQuery::default();
        query.set_draft(FilterField::Province, "Opolskie".into());
        query.search_input = "audi".into();
        query.commit();
        query.set_draft(FilterField::Model, "a3".into());
        query.set_page(1, 100);

        query.reset();

        assert!(query.draft.is_empty());
        assert!(query.applied().is_empty());
        assert_eq!(query.search_input, "");
        assert_eq!(query.search_term(), "");
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn export_query_omits_sort_and_paging() {
        let mut query = CarListQuery::default();
        query.set_draft(FilterField::YearMin, "2010".into());
        query.search_input = "kombi".into();
        query.commit();
        query.set_sort(SortOption::PriceDesc);
        query.set_page(1, 100);

        let export = query.request().export_query_string();
        assert_eq!(keys(&export), vec!["year_min", "search"]);
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let mut query = CarListQuery::default();
        let first = query.begin_fetch();
        let second = query.begin_fetch();
        assert!(!query.is_current(first));
        assert!(query.is_current(second));
    }

    #[test]
    fn active_count_ignores_blank_values() {
        let mut filter = CarFilter::default();
        filter.mark = "kia".into();
        filter.model = " ".into();
        filter.price_min = "1000".into();
        assert_eq!(filter.active_count(), 2);
    }
}
