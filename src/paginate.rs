//! Slicing of ordered collections into fixed-size, 1-indexed pages.
//!
//! Every feed goes through [`Paginator::page`], which only needs the total size
//! of the collection, so the store fetches just the slice a page covers.
//! `paginate` applies the same arithmetic to an in-memory sequence and is what
//! the partition properties are checked against.
//!
//! A requested page past the last one is not an error: it yields an empty page
//! that still reports the real page count, so clients can navigate back.

use std::num::NonZeroU64;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A normalized, 1-indexed page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU64);

impl PageNumber {
	pub const FIRST: Self = Self(NonZeroU64::MIN);

	/// Normalizes an untrusted page number.
	///
	/// Missing, empty, non-numeric, zero and negative values all become the first
	/// page. A number too large to represent saturates, which always lands past
	/// the last page.
	pub fn parse(raw: Option<&str>) -> Self {
		let Some(raw) = raw.map(str::trim) else {
			return Self::FIRST;
		};

		if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
			return Self::FIRST;
		}

		match raw.parse::<u64>() {
			Ok(number) => NonZeroU64::new(number).map_or(Self::FIRST, Self),
			Err(_) => Self(NonZeroU64::MAX),
		}
	}

	pub fn get(self) -> u64 {
		self.0.get()
	}
}

impl Default for PageNumber {
	fn default() -> Self {
		Self::FIRST
	}
}

impl From<NonZeroU64> for PageNumber {
	fn from(number: NonZeroU64) -> Self {
		Self(number)
	}
}

/// Page arithmetic over a collection of `count` items.
#[derive(Clone, Copy, Debug)]
pub struct Paginator {
	count: u64,
	per_page: NonZeroU64,
}

/// Everything about a page except its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMeta {
	pub number: u64,
	pub num_pages: u64,
	pub count: u64,
	pub has_next: bool,
	pub has_previous: bool,
	/// Index of the first item of the page within the collection.
	pub offset: u64,
	/// Number of items on the page, zero past the last page.
	pub limit: u64,
}

impl Paginator {
	pub fn new(count: u64, per_page: NonZeroU64) -> Self {
		Self { count, per_page }
	}

	/// The number of pages, which is never less than one.
	pub fn num_pages(&self) -> u64 {
		self.count.div_ceil(self.per_page.get()).max(1)
	}

	pub fn page(&self, number: PageNumber) -> PageMeta {
		let number = number.get();
		let num_pages = self.num_pages();

		let (offset, limit) = if number > num_pages {
			(self.count, 0)
		} else {
			let offset = (number - 1) * self.per_page.get();

			(offset, self.per_page.get().min(self.count - offset))
		};

		PageMeta {
			number,
			num_pages,
			count: self.count,
			has_next: number < num_pages,
			has_previous: number > 1,
			offset,
			limit,
		}
	}
}

/// A bounded slice of an ordered collection plus navigation metadata.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct Page<T> {
	/// The items on this page, in collection order.
	pub items: Vec<T>,
	/// The 1-indexed number of this page.
	pub number: u64,
	/// The total number of pages.
	pub num_pages: u64,
	/// The total number of items across all pages.
	pub count: u64,
	pub has_next: bool,
	pub has_previous: bool,
}

impl<T> Page<T> {
	pub fn new(meta: PageMeta, items: Vec<T>) -> Self {
		debug_assert!(items.len() as u64 <= meta.limit);

		Self {
			items,
			number: meta.number,
			num_pages: meta.num_pages,
			count: meta.count,
			has_next: meta.has_next,
			has_previous: meta.has_previous,
		}
	}
}

/// Returns the requested page of `items`, preserving their order.
#[cfg(test)]
pub fn paginate<T>(items: Vec<T>, per_page: NonZeroU64, number: PageNumber) -> Page<T> {
	let meta = Paginator::new(items.len() as u64, per_page).page(number);
	let items = items
		.into_iter()
		.skip(usize::try_from(meta.offset).unwrap_or(usize::MAX))
		.take(usize::try_from(meta.limit).unwrap_or(usize::MAX))
		.collect();

	Page::new(meta, items)
}
