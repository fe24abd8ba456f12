//! Collection view engine.
//!
//! A pure derivation chain over a borrowed slice of records, applied in a
//! fixed order: search, discrete filters, sort, paginate. Recomputation is an
//! explicit call to [`select`]; nothing is cached and the source is never
//! mutated. Aggregate statistics intentionally live elsewhere (see
//! [`crate::stats`]): they describe the whole collection, not the current view.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A single field value exposed to the view engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewField {
    Text(String),
    Number(f64),
    Flag(bool),
    Time(DateTime<Utc>),
}

impl ViewField {
    /// Exact-equality match against a filter value.
    fn matches(&self, wanted: &str) -> bool {
        match self {
            ViewField::Text(s) => s == wanted,
            ViewField::Number(n) => wanted.parse::<f64>().is_ok_and(|w| w == *n),
            ViewField::Flag(b) => wanted.parse::<bool>().is_ok_and(|w| w == *b),
            ViewField::Time(_) => false,
        }
    }

    /// Ordering between two values of the same shape.
    ///
    /// Text compares case-insensitively; mismatched shapes compare equal so a
    /// stable sort leaves their prior relative order untouched.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ViewField::Text(a), ViewField::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (ViewField::Number(a), ViewField::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (ViewField::Flag(a), ViewField::Flag(b)) => a.cmp(b),
            (ViewField::Time(a), ViewField::Time(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A record that can be projected through the view engine.
pub trait ViewRecord {
    /// Field names probed by free-text search, in match order.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Returns the named field, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<ViewField>;
}

/// Sort direction for a single active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active sort key and direction.
///
/// Direction toggling on repeated sorts is the caller's concern; the engine
/// only applies what it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// The caller-owned criteria a view is derived from.
///
/// The engine never resets `page`; callers reset to page 1 after changing
/// search or filter criteria.
#[derive(Debug, Clone)]
pub struct ViewCriteria {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub sort: Option<Sort>,
    /// Current page, 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl ViewCriteria {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Adds an exact-equality filter. An empty value means "no constraint".
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }
}

/// One derived page of a collection view.
#[derive(Debug)]
pub struct ViewPage<'a, T> {
    /// Records on the current page, in derived order.
    pub items: Vec<&'a T>,
    /// Records surviving search and filters, before pagination.
    pub filtered_count: usize,
    /// `ceil(filtered_count / page_size)`; 0 when the filtered set is empty.
    pub total_pages: usize,
    /// The page that was requested, 1-based.
    pub page: usize,
}

/// Derives the current view: search, filters, sort, then one page slice.
///
/// A page past the end yields an empty slice rather than an error.
pub fn select<'a, T: ViewRecord>(source: &'a [T], criteria: &ViewCriteria) -> ViewPage<'a, T> {
    let needle = criteria.search.trim().to_lowercase();

    let mut rows: Vec<&T> = source
        .iter()
        .filter(|record| needle.is_empty() || matches_search(*record, &needle))
        .filter(|record| matches_filters(*record, &criteria.filters))
        .collect();

    if let Some(sort) = &criteria.sort {
        rows.sort_by(|a, b| {
            let ordering = match (a.field(&sort.field), b.field(&sort.field)) {
                (Some(left), Some(right)) => left.compare(&right),
                _ => Ordering::Equal,
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let filtered_count = rows.len();
    let total_pages = if criteria.page_size == 0 {
        0
    } else {
        filtered_count.div_ceil(criteria.page_size)
    };

    let page = criteria.page.max(1);
    let start = (page - 1).saturating_mul(criteria.page_size);
    let items = rows
        .into_iter()
        .skip(start)
        .take(criteria.page_size)
        .collect();

    ViewPage {
        items,
        filtered_count,
        total_pages,
        page,
    }
}

fn matches_search<T: ViewRecord>(record: &T, needle: &str) -> bool {
    T::SEARCH_FIELDS.iter().any(|name| {
        matches!(
            record.field(name),
            Some(ViewField::Text(text)) if text.to_lowercase().contains(needle)
        )
    })
}

fn matches_filters<T: ViewRecord>(record: &T, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(field, wanted)| {
        wanted.is_empty()
            || record
                .field(field)
                .is_some_and(|value| value.matches(wanted))
    })
}
