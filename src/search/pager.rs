//! The paging state machine.
//!
//! Page 1 is rendered server-side, so fetching starts at page 2. The pager
//! owns the single-fetch discipline: one boolean in-flight flag, no queue,
//! so triggers arriving mid-fetch are dropped.

/// First page requested by the scroller; page 1 ships with the panel.
pub const FIRST_FETCHED_PAGE: u32 = 2;

/// Scroll geometry of the results container at the time of the event
#[derive(Debug, Clone, Copy)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollPosition {
    /// Whether the view is within `threshold` of the bottom of the content.
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top > self.content_height - self.viewport_height - threshold
    }

    /// A position pinned to the bottom, for driving the pager without real
    /// scroll geometry.
    pub fn bottom() -> Self {
        Self {
            scroll_top: 1.0,
            content_height: 0.0,
            viewport_height: 0.0,
        }
    }
}

/// Paging state for one search panel
#[derive(Debug)]
pub struct SearchPager {
    next_page: u32,
    in_flight: bool,
    exhausted: bool,
    threshold: f64,
}

impl SearchPager {
    pub fn new(threshold: f64) -> Self {
        Self {
            next_page: FIRST_FETCHED_PAGE,
            in_flight: false,
            exhausted: false,
            threshold,
        }
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether this scroll event should trigger a fetch.
    pub fn should_fetch(&self, position: &ScrollPosition) -> bool {
        !self.in_flight && !self.exhausted && position.near_bottom(self.threshold)
    }

    /// Mark a fetch as started and return the page to request.
    pub fn begin(&mut self) -> u32 {
        self.in_flight = true;
        self.next_page
    }

    /// The fetched page carried results: advance to the next page.
    pub fn complete_appended(&mut self) {
        self.in_flight = false;
        self.next_page += 1;
    }

    /// Failed, empty or no-results page: paging ends, no retry.
    pub fn complete_exhausted(&mut self) {
        self.in_flight = false;
        self.exhausted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> SearchPager {
        SearchPager::new(0.0)
    }

    #[test]
    fn test_near_bottom_threshold() {
        let position = ScrollPosition {
            scroll_top: 700.0,
            content_height: 2000.0,
            viewport_height: 1000.0,
        };
        assert!(!position.near_bottom(0.0));
        assert!(position.near_bottom(400.0));
    }

    #[test]
    fn test_first_fetched_page_is_two() {
        assert_eq!(pager().next_page(), 2);
    }

    #[test]
    fn test_no_fetch_while_in_flight() {
        let mut pager = pager();
        assert!(pager.should_fetch(&ScrollPosition::bottom()));
        assert_eq!(pager.begin(), 2);
        // second threshold crossing before the fetch resolves: dropped
        assert!(!pager.should_fetch(&ScrollPosition::bottom()));
    }

    #[test]
    fn test_appended_page_advances_counter() {
        let mut pager = pager();
        pager.begin();
        pager.complete_appended();
        assert!(!pager.is_in_flight());
        assert_eq!(pager.next_page(), 3);
        assert!(pager.should_fetch(&ScrollPosition::bottom()));
    }

    #[test]
    fn test_exhausted_pager_never_fetches_again() {
        let mut pager = pager();
        pager.begin();
        pager.complete_exhausted();
        assert!(!pager.is_in_flight());
        assert!(pager.is_exhausted());
        assert!(!pager.should_fetch(&ScrollPosition::bottom()));
    }

    #[test]
    fn test_not_near_bottom_is_ignored() {
        let pager = pager();
        let position = ScrollPosition {
            scroll_top: 0.0,
            content_height: 2000.0,
            viewport_height: 500.0,
        };
        assert!(!pager.should_fetch(&position));
    }
}
