//! Client-side filtering, sorting and pagination of listings.

use serde::Serialize;

use crate::config::{THREE_COLUMN_PAGE_SIZE, TWO_COLUMN_PAGE_SIZE};
use crate::error::{LynappError, Result};
use crate::models::Listing;

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

/// Bedroom pill selection: an exact count, or "N+".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomFilter {
    Exactly(i32),
    AtLeast(i32),
}

impl BedroomFilter {
    pub fn matches(&self, bedrooms: i32) -> bool {
        match *self {
            BedroomFilter::Exactly(n) => bedrooms == n,
            BedroomFilter::AtLeast(n) => bedrooms >= n,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the order the service returned.
    #[default]
    Recommended,
    PriceLowToHigh,
    PriceHighToLow,
    /// Most recently created first (highest id).
    Newest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridLayout {
    #[default]
    TwoColumn,
    ThreeColumn,
}

impl GridLayout {
    pub fn page_size(&self) -> usize {
        match self {
            GridLayout::TwoColumn => TWO_COLUMN_PAGE_SIZE,
            GridLayout::ThreeColumn => THREE_COLUMN_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchListingsParams
// ---------------------------------------------------------------------------

/// Parameters for a listing search.
///
/// All filters are optional. `city` is matched by the service; the rest are
/// applied locally. `page` is 1-based and defaults to the first page.
#[derive(Debug, Clone, Default)]
pub struct SearchListingsParams {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<BedroomFilter>,
    pub min_bathrooms: Option<i32>,
    pub sort: SortOrder,
    pub layout: GridLayout,
    pub page: Option<usize>,
}

impl SearchListingsParams {
    pub fn validate(&self) -> Result<()> {
        if let (Some(lo), Some(hi)) = (self.min_price, self.max_price) {
            if lo > hi {
                return Err(LynappError::InvalidArgument(format!(
                    "min_price ({}) is greater than max_price ({})",
                    lo, hi
                )));
            }
        }
        Ok(())
    }

    /// Whether a listing passes every local filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(lo) = self.min_price {
            if listing.current_price < lo {
                return false;
            }
        }
        if let Some(hi) = self.max_price {
            if listing.current_price > hi {
                return false;
            }
        }
        if let Some(bedrooms) = self.bedrooms {
            if !bedrooms.matches(listing.bedrooms) {
                return false;
            }
        }
        if let Some(baths) = self.min_bathrooms {
            if listing.bathrooms < baths {
                return false;
            }
        }
        true
    }

    /// Filter, sort and page a set of listings.
    pub fn apply(&self, listings: Vec<Listing>) -> Result<Page<Listing>> {
        self.validate()?;
        let mut matched: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();
        sort_listings(&mut matched, self.sort);
        Ok(paginate(matched, self.page.unwrap_or(1), self.layout.page_size()))
    }
}

/// Stable sort of listings in place.
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    match order {
        SortOrder::Recommended => {}
        SortOrder::PriceLowToHigh => {
            listings.sort_by(|a, b| a.current_price.total_cmp(&b.current_price))
        }
        SortOrder::PriceHighToLow => {
            listings.sort_by(|a, b| b.current_price.total_cmp(&a.current_price))
        }
        SortOrder::Newest => listings.sort_by(|a, b| b.id.cmp(&a.id)),
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of results plus the counters for "Showing a-b of n".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually returned.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first item on this page (0 when empty).
    pub fn start(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page (0 when empty).
    pub fn end(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out one 1-based page. Out-of-range pages clamp to the nearest
/// valid page; a zero `per_page` is treated as one.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
