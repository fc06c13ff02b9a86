/// Number of page buttons shown at once.
pub const WINDOW: u32 = 5;

/// Sliding window of page indices centred on `current`, clamped to
/// `[0, total_pages - 1]`. Near either edge the window shifts so it stays
/// `WINDOW` wide when enough pages exist.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    let last = total_pages - 1;
    let current = current.min(last);

    let mut start = current.saturating_sub(WINDOW / 2);
    let end = last.min(start + WINDOW - 1);
    if end - start + 1 < WINDOW {
        start = end.saturating_sub(WINDOW - 1);
    }
    (start..=end).collect()
}

/// Everything needed to draw the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub first_disabled: bool,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub last_disabled: bool,
    pub showing_from: u64,
    pub showing_to: u64,
    pub total_elements: u64,
}

impl PaginationView {
    pub fn new(current: u32, size: u32, total_pages: u32, total_elements: u64) -> Self {
        let at_start = current == 0;
        let at_end = current + 1 >= total_pages;
        let showing_from = u64::from(current) * u64::from(size) + 1;
        let showing_to = (u64::from(current) + 1)
            .saturating_mul(u64::from(size))
            .min(total_elements);
        Self {
            current,
            total_pages,
            pages: page_window(current, total_pages),
            first_disabled: at_start,
            previous_disabled: at_start,
            next_disabled: at_end,
            last_disabled: at_end,
            showing_from,
            showing_to,
            total_elements,
        }
    }

    /// The bar is only drawn when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} candidates",
            self.showing_from, self.showing_to, self.total_elements
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centred_in_middle() {
        assert_eq!(page_window(5, 20), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_clamped_at_start() {
        assert_eq!(page_window(0, 20), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(1, 20), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_window_shifts_back_at_end() {
        assert_eq!(page_window(19, 20), vec![15, 16, 17, 18, 19]);
        assert_eq!(page_window(18, 20), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_window_fewer_pages_than_width() {
        assert_eq!(page_window(1, 3), vec![0, 1, 2]);
        assert_eq!(page_window(0, 1), vec![0]);
        assert!(page_window(0, 0).is_empty());
    }

    #[test]
    fn test_window_tolerates_stale_current_page() {
        assert_eq!(page_window(10, 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_boundary_buttons() {
        let first = PaginationView::new(0, 10, 4, 35);
        assert!(first.first_disabled && first.previous_disabled);
        assert!(!first.next_disabled && !first.last_disabled);

        let last = PaginationView::new(3, 10, 4, 35);
        assert!(!last.first_disabled && !last.previous_disabled);
        assert!(last.next_disabled && last.last_disabled);
    }

    #[test]
    fn test_summary_caps_at_total() {
        let view = PaginationView::new(3, 10, 4, 35);
        assert_eq!(view.summary(), "Showing 31 to 35 of 35 candidates");
        assert!(view.is_visible());
        assert!(!PaginationView::new(0, 10, 1, 4).is_visible());
    }
}
