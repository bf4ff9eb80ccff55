use serde::{Deserialize, Serialize};

/// Raw body of a list endpoint.
///
/// Paginated endpoints answer with `{ "results": [...], "count": N }`,
/// unpaginated ones with a bare JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<usize>,
    },
}

/// Canonical list result used by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> From<ListResponse<T>> for ListPage<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Paginated { results, count } => {
                let total = count.unwrap_or(results.len());
                Self {
                    items: results,
                    total,
                }
            }
            ListResponse::Plain(items) => Self {
                total: items.len(),
                items,
            },
        }
    }
}

impl<T> ListPage<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes the first item matching `predicate` and decrements the total.
    /// At most one item is removed. Returns whether an item was removed.
    pub fn remove_first(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(predicate) {
            Some(index) => {
                self.items.remove(index);
                self.total = self.total.saturating_sub(1);
                true
            }
            None => false,
        }
    }
}

/// Parses a list body in either shape and normalizes it.
pub fn parse_list_page<T>(body: &str) -> Result<ListPage<T>, serde_json::Error>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str::<ListResponse<T>>(body).map(ListPage::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn paginated_body_uses_count() {
        let page: ListPage<Item> =
            parse_list_page(r#"{"count": 120, "next": null, "results": [{"id": 1}, {"id": 2}]}"#)
                .unwrap();
        assert_eq!(page.total, 120);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn bare_array_total_is_length() {
        let page: ListPage<Item> = parse_list_page(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn results_without_count_fall_back_to_length() {
        let page: ListPage<Item> = parse_list_page(r#"{"results": [{"id": 7}]}"#).unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn empty_results_are_not_an_error() {
        let page: ListPage<Item> = parse_list_page(r#"{"results": [], "count": 0}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn remove_first_removes_exactly_one() {
        let mut page = ListPage {
            items: vec![Item { id: 1 }, Item { id: 2 }, Item { id: 2 }],
            total: 30,
        };
        assert!(page.remove_first(|item| item.id == 2));
        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.total, 29);

        assert!(!page.remove_first(|item| item.id == 99));
        assert_eq!(page.items.len(), 2);
    }
}
