//! Catalog state manager.
//!
//! Owns the loaded course list together with the filter, sort and page
//! selections, and keeps the derived views in step with them. Every mutator
//! re-runs the relevant stage of the pure pipeline in [`crate::domain`]
//! before returning, so a read never observes a stale view.

use crate::domain::{
    ALL_CATEGORIES, Course, LoadError, SortKey, SortOrder, derive_categories, filter_and_sort,
    page_slice, total_pages,
};
use tracing::{debug, info, warn};

/// Number of courses shown per page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;

/// Progress of the one-shot course fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// The fetch is still outstanding
    Loading,
    /// Courses were stored successfully
    Loaded,
    /// The fetch failed; the message is shown in place of the list
    Failed(String),
}

/// Course catalog with its filter, sort and pagination state.
///
/// # Examples
///
/// ```
/// use coursedeck::application::Catalog;
///
/// let catalog = Catalog::new(6);
/// assert!(catalog.is_loading());
/// assert_eq!(catalog.categories(), ["all"]);
/// assert_eq!(catalog.current_page(), 1);
/// ```
#[derive(Debug)]
pub struct Catalog {
    all_courses: Vec<Course>,
    categories: Vec<String>,
    filter_category: String,
    sort_key: SortKey,
    sort_order: SortOrder,
    current_page: usize,
    items_per_page: usize,
    filtered_and_sorted: Vec<Course>,
    load_state: LoadState,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Catalog {
    /// Creates an empty catalog waiting for its course list.
    ///
    /// # Arguments
    ///
    /// * `items_per_page` - Page size for the session; values below 1 are raised to 1
    pub fn new(items_per_page: usize) -> Self {
        Self {
            all_courses: Vec::new(),
            categories: derive_categories(&[]),
            filter_category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
            filtered_and_sorted: Vec::new(),
            load_state: LoadState::Loading,
        }
    }

    /// Applies the settled result of the course fetch.
    ///
    /// On success the list is stored and categories and views are derived;
    /// on failure the error message is kept and the list stays empty. Only
    /// the first result is applied, later ones are ignored.
    ///
    /// # Arguments
    ///
    /// * `result` - Courses from the data source, or the reason the load failed
    pub fn apply_load_result(&mut self, result: Result<Vec<Course>, LoadError>) {
        if self.load_state != LoadState::Loading {
            warn!("ignoring course load result after the catalog already settled");
            return;
        }

        match result {
            Ok(courses) => {
                info!(count = courses.len(), "course catalog loaded");
                self.all_courses = courses;
                self.categories = derive_categories(&self.all_courses);
                if !self.categories.contains(&self.filter_category) {
                    self.filter_category = ALL_CATEGORIES.to_string();
                }
                self.load_state = LoadState::Loaded;
            }
            Err(error) => {
                warn!(%error, "course catalog failed to load");
                self.all_courses.clear();
                self.categories = derive_categories(&[]);
                self.load_state = LoadState::Failed(error.to_string());
            }
        }

        self.current_page = 1;
        self.recompute();
    }

    /// Every loaded course in source order.
    pub fn all_courses(&self) -> &[Course] {
        &self.all_courses
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Selected category filter.
    pub fn filter_category(&self) -> &str {
        &self.filter_category
    }

    /// Field the list is sorted by.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Direction of the sort.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// One-based page number, possibly out of range.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of courses shown per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Courses matching the filter, in sort order.
    pub fn filtered_and_sorted(&self) -> &[Course] {
        &self.filtered_and_sorted
    }

    /// Slice of the filtered and sorted courses for the current page.
    /// An out-of-range page yields an empty slice.
    pub fn displayed_courses(&self) -> &[Course] {
        page_slice(&self.filtered_and_sorted, self.current_page, self.items_per_page)
    }

    /// Page count for the filtered list; zero when it is empty.
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_and_sorted.len(), self.items_per_page)
    }

    /// Progress of the one-shot load.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Whether the load result has not arrived yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// The load failure message, if the fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Restricts the view to `category` and returns to page 1.
    ///
    /// Values outside [`Catalog::categories`] are ignored so the selection
    /// always names a known category or `"all"`.
    pub fn set_filter_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.categories.contains(&category) {
            warn!(%category, "ignoring unknown filter category");
            return;
        }
        debug!(%category, "filter category changed");
        self.filter_category = category;
        self.current_page = 1;
        self.recompute();
    }

    /// Sorts by `key` and returns to page 1.
    pub fn set_sort_key(&mut self, key: SortKey) {
        debug!(%key, "sort key changed");
        self.sort_key = key;
        self.current_page = 1;
        self.recompute();
    }

    /// Sorts in `order` and returns to page 1.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        debug!(%order, "sort order changed");
        self.sort_order = order;
        self.current_page = 1;
        self.recompute();
    }

    /// Stores `page` as given. No clamping happens here; an out-of-range
    /// page simply displays nothing.
    pub fn set_current_page(&mut self, page: usize) {
        debug!(page, "page changed");
        self.current_page = page;
    }

    /// Moves to the category after the current one, wrapping around.
    pub fn next_category(&mut self) {
        let next = self.category_at_offset(1);
        self.set_filter_category(next);
    }

    /// Moves to the category before the current one, wrapping around.
    pub fn previous_category(&mut self) {
        let previous = self.category_at_offset(self.categories.len() - 1);
        self.set_filter_category(previous);
    }

    /// Switches to the next sort key: rating, price, then title.
    pub fn cycle_sort_key(&mut self) {
        self.set_sort_key(self.sort_key.next());
    }

    /// Flips between ascending and descending.
    pub fn toggle_sort_order(&mut self) {
        self.set_sort_order(self.sort_order.toggled());
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Advances one page unless already on the last.
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.set_current_page(self.current_page + 1);
        }
    }

    /// Goes back one page, landing on the last page when past the end.
    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            let last = self.total_pages().max(1);
            self.set_current_page((self.current_page - 1).min(last));
        }
    }

    /// Jumps to `page` when it exists; returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.set_current_page(page);
        true
    }

    fn category_at_offset(&self, offset: usize) -> String {
        let len = self.categories.len();
        let index = self
            .categories
            .iter()
            .position(|c| *c == self.filter_category)
            .unwrap_or(0);
        self.categories[(index + offset) % len].clone()
    }

    fn recompute(&mut self) {
        self.filtered_and_sorted = filter_and_sort(
            &self.all_courses,
            &self.filter_category,
            self.sort_key,
            self.sort_order,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::fixtures::{course, numbered_courses};

    fn loaded(courses: Vec<Course>, per_page: usize) -> Catalog {
        let mut catalog = Catalog::new(per_page);
        catalog.apply_load_result(Ok(courses));
        catalog
    }

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.course_id.as_str()).collect()
    }

    #[test]
    fn test_initial_state_is_loading() {
        let catalog = Catalog::default();
        assert!(catalog.is_loading());
        assert!(catalog.error().is_none());
        assert!(catalog.all_courses().is_empty());
        assert!(catalog.displayed_courses().is_empty());
        assert_eq!(catalog.total_pages(), 0);
        assert_eq!(catalog.filter_category(), "all");
        assert_eq!(catalog.sort_key(), SortKey::Rating);
        assert_eq!(catalog.sort_order(), SortOrder::Desc);
        assert_eq!(catalog.items_per_page(), 6);
    }

    #[test]
    fn test_successful_load_derives_views() {
        let catalog = loaded(
            vec![
                course("1", "A", "design", 3.0, "10"),
                course("2", "B", "programming", 5.0, "20"),
                course("3", "C", "design", 4.0, "30"),
            ],
            6,
        );
        assert!(!catalog.is_loading());
        assert_eq!(catalog.load_state(), &LoadState::Loaded);
        assert_eq!(catalog.categories(), ["all", "design", "programming"]);
        // Default sort is rating, descending.
        assert_eq!(ids(catalog.displayed_courses()), vec!["2", "3", "1"]);
        assert_eq!(catalog.total_pages(), 1);
    }

    #[test]
    fn test_failed_load_exposes_message_and_empty_list() {
        let mut catalog = Catalog::new(6);
        catalog.apply_load_result(Err(LoadError::Status { status: 404 }));
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), Some("Failed to fetch course data."));
        assert!(catalog.all_courses().is_empty());
        assert!(catalog.displayed_courses().is_empty());
        assert_eq!(catalog.categories(), ["all"]);
    }

    #[test]
    fn test_second_load_result_is_ignored() {
        let mut catalog = loaded(numbered_courses(3), 6);
        catalog.apply_load_result(Err(LoadError::Transport("late".to_string())));
        assert!(catalog.error().is_none());
        assert_eq!(catalog.all_courses().len(), 3);
    }

    #[test]
    fn test_thirteen_courses_paginate_into_three_pages() {
        let mut catalog = loaded(numbered_courses(13), 6);
        assert_eq!(catalog.total_pages(), 3);
        assert_eq!(catalog.displayed_courses().len(), 6);
        catalog.set_current_page(3);
        assert_eq!(catalog.displayed_courses().len(), 1);
    }

    #[test]
    fn test_displayed_never_exceeds_page_size() {
        let mut catalog = loaded(numbered_courses(20), 6);
        for page in 0..=catalog.total_pages() + 1 {
            catalog.set_current_page(page);
            assert!(catalog.displayed_courses().len() <= catalog.items_per_page());
        }
    }

    #[test]
    fn test_filter_sort_and_order_changes_reset_page() {
        let mut catalog = loaded(numbered_courses(13), 6);

        catalog.set_current_page(3);
        catalog.set_filter_category("design");
        assert_eq!(catalog.current_page(), 1);

        catalog.set_filter_category("all");
        catalog.set_current_page(2);
        catalog.set_sort_key(SortKey::Title);
        assert_eq!(catalog.current_page(), 1);

        catalog.set_current_page(2);
        catalog.set_sort_order(SortOrder::Asc);
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_filter_change_never_shows_stale_page() {
        let mut catalog = loaded(numbered_courses(13), 6);
        catalog.set_current_page(3);
        catalog.set_filter_category("design");
        // Six design courses fit on a single page; page 1 is shown immediately.
        assert_eq!(catalog.total_pages(), 1);
        assert_eq!(catalog.displayed_courses().len(), 6);
        assert!(catalog.displayed_courses().iter().all(|c| c.category == "design"));
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let mut catalog = loaded(numbered_courses(4), 6);
        catalog.set_current_page(1);
        catalog.set_filter_category("cooking");
        assert_eq!(catalog.filter_category(), "all");
        assert_eq!(catalog.filtered_and_sorted().len(), 4);
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut catalog = loaded(numbered_courses(4), 6);
        assert_eq!(catalog.categories(), ["all", "programming", "design"]);

        catalog.next_category();
        assert_eq!(catalog.filter_category(), "programming");
        catalog.next_category();
        assert_eq!(catalog.filter_category(), "design");
        catalog.next_category();
        assert_eq!(catalog.filter_category(), "all");
        catalog.previous_category();
        assert_eq!(catalog.filter_category(), "design");
    }

    #[test]
    fn test_cycling_before_load_stays_on_all() {
        let mut catalog = Catalog::default();
        catalog.next_category();
        catalog.previous_category();
        assert_eq!(catalog.filter_category(), "all");
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let mut catalog = loaded(numbered_courses(13), 6);
        assert!(!catalog.has_previous_page());
        catalog.previous_page();
        assert_eq!(catalog.current_page(), 1);

        catalog.next_page();
        catalog.next_page();
        catalog.next_page();
        assert_eq!(catalog.current_page(), 3);
        assert!(!catalog.has_next_page());

        assert!(!catalog.go_to_page(4));
        assert!(!catalog.go_to_page(0));
        assert!(catalog.go_to_page(2));
        assert_eq!(catalog.current_page(), 2);
    }

    #[test]
    fn test_previous_page_recovers_from_out_of_range() {
        let mut catalog = loaded(numbered_courses(7), 6);
        catalog.set_current_page(9);
        assert!(catalog.displayed_courses().is_empty());
        catalog.previous_page();
        assert_eq!(catalog.current_page(), 2);
    }

    #[test]
    fn test_empty_course_list_has_zero_pages() {
        let catalog = loaded(Vec::new(), 6);
        assert_eq!(catalog.total_pages(), 0);
        assert!(catalog.displayed_courses().is_empty());
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_toggle_and_cycle_helpers() {
        let mut catalog = loaded(
            vec![
                course("1", "banana", "x", 4.0, "19.99"),
                course("2", "Apple", "x", 4.0, "5.00"),
                course("3", "cherry", "x", 4.0, "100"),
            ],
            6,
        );
        catalog.cycle_sort_key();
        assert_eq!(catalog.sort_key(), SortKey::Price);
        catalog.toggle_sort_order();
        assert_eq!(catalog.sort_order(), SortOrder::Asc);
        assert_eq!(ids(catalog.displayed_courses()), vec!["2", "1", "3"]);

        catalog.cycle_sort_key();
        assert_eq!(catalog.sort_key(), SortKey::Title);
        assert_eq!(ids(catalog.displayed_courses()), vec!["2", "1", "3"]);
    }
}
