//! Feed-facing wrapper around the `virtualizer` engine.
//!
//! The engine owns the size table (estimates, measurements, prefix sums).
//! This wrapper fixes the options the feed uses: a uniform estimate per slot,
//! index keys, and an overscan of [`OVERSCAN`]. The unit is whatever the
//! caller scrolls in (terminal rows for the feed).

use virtualizer::{Virtualizer, VirtualizerOptions};

pub use virtualizer::{Align, VirtualItem};

/// Estimated row size used by [`compute_visible`].
#[cfg(test)]
pub const DEFAULT_ESTIMATE: u32 = 150;

/// Rows laid out beyond each edge of the viewport.
pub const OVERSCAN: usize = 5;

#[derive(Debug, Clone)]
pub struct ListVirtualizer {
    inner: Virtualizer,
}

impl ListVirtualizer {
    /// A list of `count` rows, each estimated at `estimate` until measured.
    pub fn new(count: usize, estimate: u32) -> Self {
        let mut options = VirtualizerOptions::new(count, move |_| estimate);
        options.overscan = OVERSCAN;
        Self {
            inner: Virtualizer::new(options),
        }
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Grows or shrinks the list. Measurements of surviving rows are kept.
    pub fn set_count(&mut self, count: usize) {
        self.inner.set_count(count);
    }

    pub fn viewport(&self) -> u32 {
        self.inner.viewport_size()
    }

    pub fn set_viewport(&mut self, rows: u32) {
        self.inner.set_viewport_size(rows);
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.inner.is_measured(index)
    }

    /// Records several measurements at once.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) {
        self.inner.measure_many(measurements);
    }

    /// Forgets all measurements, e.g. after the layout width changed.
    pub fn reset_measurements(&mut self) {
        self.inner.reset_measurements();
    }

    /// Forgets measurements from `index` onward, e.g. when those slots now
    /// hold different content.
    pub fn invalidate_from(&mut self, index: usize) {
        // keys are row indices
        let kept: Vec<(u64, u32)> = self
            .inner
            .export_measurement_cache()
            .into_iter()
            .filter(|&(key, _)| key < index as u64)
            .collect();
        self.inner.import_measurement_cache(kept);
    }

    pub fn total_size(&self) -> u64 {
        self.inner.total_size()
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        Some(VirtualItem {
            index,
            start: self.inner.item_start(index)?,
            size: self.inner.item_size(index)?,
        })
    }

    /// Index of the row covering `offset`. Offsets past the end map to the
    /// last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.inner.index_at_offset(offset)
    }

    /// Rows laid out for `scroll_offset`, overscan included.
    pub fn virtual_items(&self, scroll_offset: u64) -> Vec<VirtualItem> {
        let mut items = Vec::new();
        self.inner
            .collect_virtual_items_for(scroll_offset, self.viewport(), &mut items);
        items
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.inner.max_scroll_offset()
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        self.inner.clamp_scroll_offset(offset)
    }

    /// Scroll offset that brings `index` to the given edge of the viewport.
    pub fn offset_for_index(&self, index: usize, align: Align) -> u64 {
        self.inner.scroll_to_index_offset(index, align)
    }
}

/// Rows to lay out for `total_count` uniformly estimated rows. Only used to
/// check the windowing against pixel-sized defaults; the feed measures rows.
#[cfg(test)]
pub fn compute_visible(total_count: usize, scroll_offset: u64, viewport: u32) -> Vec<VirtualItem> {
    let mut list = ListVirtualizer::new(total_count, DEFAULT_ESTIMATE);
    list.set_viewport(viewport);
    list.virtual_items(scroll_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(items: &[VirtualItem]) -> String {
        items
            .iter()
            .map(|item| item.index.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn list(count: usize, estimate: u32, viewport: u32) -> ListVirtualizer {
        let mut list = ListVirtualizer::new(count, estimate);
        list.set_viewport(viewport);
        list
    }

    #[test]
    fn top_of_list_includes_trailing_overscan() {
        let items = compute_visible(100, 0, 900);
        insta::assert_snapshot!(indices(&items), @"0 1 2 3 4 5 6 7 8 9 10");
        assert_eq!(items[6].start, 900);
        assert!(items.iter().all(|item| item.size == DEFAULT_ESTIMATE));
    }

    #[test]
    fn scrolled_list_overscans_both_directions() {
        // rows 10..=15 intersect [1500, 2400)
        let items = compute_visible(100, 1500, 900);
        insta::assert_snapshot!(indices(&items), @"5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20");
    }

    #[test]
    fn partially_visible_rows_are_included() {
        // rows 0 and 1 intersect [100, 300), overscan adds 2..=6
        let items = list(100, 150, 200).virtual_items(100);
        assert_eq!(indices(&items), "0 1 2 3 4 5 6");
    }

    #[test]
    fn overscan_is_clamped_to_count() {
        let items = compute_visible(3, 0, 900);
        assert_eq!(indices(&items), "0 1 2");
    }

    #[test]
    fn loader_slot_is_last_item() {
        // 10 posts plus the sentinel slot
        let items = compute_visible(11, 0, 900);
        assert_eq!(items.last().map(|item| item.index), Some(10));
    }

    #[test]
    fn empty_list_or_viewport_has_no_items() {
        assert!(compute_visible(0, 0, 900).is_empty());
        assert!(compute_visible(10, 0, 0).is_empty());
    }

    #[test]
    fn scrolled_past_end_shows_the_tail() {
        let items = list(20, 10, 30).virtual_items(10_000);
        assert_eq!(items.first().map(|item| item.index), Some(12));
        assert_eq!(items.last().map(|item| item.index), Some(19));
    }

    #[test]
    fn total_size_is_count_times_estimate() {
        let list = ListVirtualizer::new(21, 150);
        assert_eq!(list.total_size(), 21 * 150);
    }

    #[test]
    fn measurements_shift_following_offsets() {
        let mut list = ListVirtualizer::new(5, 10);
        list.measure_many([(1, 4)]);
        assert_eq!(list.item(2).map(|item| item.start), Some(14));
        assert_eq!(list.total_size(), 44);
        assert!(list.is_measured(1));
        assert!(!list.is_measured(2));
    }

    #[test]
    fn set_count_keeps_existing_measurements() {
        let mut list = ListVirtualizer::new(2, 10);
        list.measure_many([(0, 3)]);
        list.set_count(4);

        assert_eq!(list.count(), 4);
        assert_eq!(list.item(0).map(|item| item.size), Some(3));
        assert_eq!(list.total_size(), 33);

        list.set_count(1);
        assert_eq!(list.total_size(), 3);
    }

    #[test]
    fn reset_measurements_restores_estimates() {
        let mut list = ListVirtualizer::new(3, 10);
        list.measure_many([(0, 1), (1, 2), (2, 3)]);
        list.reset_measurements();
        assert_eq!(list.total_size(), 30);
        assert!(!list.is_measured(0));
    }

    #[test]
    fn invalidate_from_keeps_earlier_rows() {
        let mut list = ListVirtualizer::new(4, 10);
        list.measure_many([(0, 2), (2, 3), (3, 4)]);
        list.invalidate_from(2);
        assert!(list.is_measured(0));
        assert!(!list.is_measured(2));
        assert_eq!(list.total_size(), 2 + 10 + 10 + 10);

        // past the end there is nothing to forget
        list.invalidate_from(9);
        assert_eq!(list.count(), 4);
        assert!(list.is_measured(0));
    }

    #[test]
    fn invalidated_rows_stay_estimated_after_growing() {
        // a short sentinel measurement must not carry over to the post
        // that takes its slot
        let mut list = ListVirtualizer::new(3, 10);
        list.measure_many([(2, 1)]);
        list.set_count(5);
        list.invalidate_from(2);
        assert_eq!(list.item(2).map(|item| item.size), Some(10));
    }

    #[test]
    fn index_at_offset_finds_covering_row() {
        let mut list = ListVirtualizer::new(3, 10);
        list.measure_many([(1, 5)]);
        assert_eq!(list.index_at_offset(0), Some(0));
        assert_eq!(list.index_at_offset(10), Some(1));
        assert_eq!(list.index_at_offset(14), Some(1));
        assert_eq!(list.index_at_offset(15), Some(2));
        assert_eq!(list.index_at_offset(25), Some(2));
        assert_eq!(ListVirtualizer::new(0, 10).index_at_offset(0), None);
    }

    #[test]
    fn offsets_for_index_align_and_clamp() {
        let list = list(10, 10, 25);
        assert_eq!(list.offset_for_index(3, Align::Start), 30);
        assert_eq!(list.offset_for_index(3, Align::End), 15);
        assert_eq!(list.offset_for_index(9, Align::Start), 75);
        assert_eq!(list.max_scroll_offset(), 75);
        assert_eq!(list.clamp_scroll_offset(500), 75);
    }
}
