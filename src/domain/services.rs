//! Derived-view pipeline for the course catalog.
//!
//! Each function here is pure: given the loaded course list and the current
//! filter, sort and page selections it produces the next stage of the view.
//! The catalog manager calls them after every mutation instead of relying on
//! any implicit change tracking.

use super::models::{ALL_CATEGORIES, Course, SortKey, SortOrder};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Returns the distinct categories of `courses` in first-seen order,
/// prefixed with the `"all"` sentinel.
///
/// # Examples
///
/// ```
/// use coursedeck::domain::derive_categories;
///
/// assert_eq!(derive_categories(&[]), vec!["all".to_string()]);
/// ```
pub fn derive_categories(courses: &[Course]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for course in courses {
        if seen.insert(course.category.as_str()) {
            categories.push(course.category.clone());
        }
    }
    categories
}

/// Keeps the courses whose category equals `category` exactly. The `"all"`
/// sentinel passes every course through. Input order is preserved.
pub fn filter_courses(courses: &[Course], category: &str) -> Vec<Course> {
    if category == ALL_CATEGORIES {
        return courses.to_vec();
    }
    courses
        .iter()
        .filter(|course| course.category == category)
        .cloned()
        .collect()
}

/// Stable in-place sort by `key` in `order`.
///
/// Prices without a numeric prefix always land after every parseable price,
/// whichever the order, and keep their relative input order.
pub fn sort_courses(courses: &mut [Course], key: SortKey, order: SortOrder) {
    courses.sort_by(|a, b| compare_courses(a, b, key, order));
}

/// Ordering used by [`sort_courses`]. Equal keys compare as `Equal` so the
/// stable sort keeps their input order.
pub fn compare_courses(a: &Course, b: &Course, key: SortKey, order: SortOrder) -> Ordering {
    let ordering = match key {
        SortKey::Price => match (a.price_value(), b.price_value()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        },
        SortKey::Rating => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    };

    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Filters then sorts, producing the sequence pagination slices from.
pub fn filter_and_sort(
    courses: &[Course],
    category: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<Course> {
    let mut processed = filter_courses(courses, category);
    sort_courses(&mut processed, key, order);
    processed
}

/// Number of pages needed for `count` items. Zero items means zero pages.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1))
}

/// The 1-indexed `page` of `courses`. Page 0 and pages past the end yield an
/// empty slice rather than panicking.
pub fn page_slice(courses: &[Course], page: usize, items_per_page: usize) -> &[Course] {
    let per_page = items_per_page.max(1);
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(per_page)) else {
        return &[];
    };
    if start >= courses.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(courses.len());
    &courses[start..end]
}
