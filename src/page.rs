//! Decision logic for the simple page widgets: project filter and
//! single-page navigation. The DOM wiring lives in `crate::dom::page`.

/// Category that shows every filter item.
pub const ALL_CATEGORIES: &str = "all";

/// Turn a button or dropdown label into a filter value.
pub fn filter_value(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Whether a `[data-filter-item]` with `category` stays visible.
pub fn category_visible(selected: &str, category: Option<&str>) -> bool {
    selected == ALL_CATEGORIES || category == Some(selected)
}

/// Tracks which filter button is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBar {
    last_clicked: Option<usize>,
}

impl FilterBar {
    /// The first button starts highlighted when there is one.
    pub fn new(button_count: usize) -> Self {
        Self {
            last_clicked: (button_count > 0).then_some(0),
        }
    }

    pub fn last_clicked(&self) -> Option<usize> {
        self.last_clicked
    }

    /// Record a click on `index` and return the button to un-highlight.
    pub fn click(&mut self, index: usize) -> Option<usize> {
        self.last_clicked.replace(index)
    }
}

/// For a click on a nav link labelled `label`, which pages become active.
///
/// `pages` holds each `[data-page]` value in document order.
pub fn navigation_targets<S: AsRef<str>>(label: &str, pages: &[S]) -> Vec<bool> {
    let wanted = label.trim().to_lowercase();
    pages.iter().map(|page| page.as_ref() == wanted).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_lowercases() {
        assert_eq!(filter_value("Web Design"), "web design");
        assert_eq!(filter_value("  All \n"), "all");
    }

    #[test]
    fn test_category_visible() {
        assert!(category_visible("all", Some("web design")));
        assert!(category_visible("all", None));
        assert!(category_visible("web design", Some("web design")));
        assert!(!category_visible("web design", Some("applications")));
        assert!(!category_visible("web design", None));
    }

    #[test]
    fn test_filter_bar_starts_on_first_button() {
        assert_eq!(FilterBar::new(3).last_clicked(), Some(0));
        assert_eq!(FilterBar::new(0).last_clicked(), None);
    }

    #[test]
    fn test_filter_bar_click_returns_previous() {
        let mut bar = FilterBar::new(3);
        assert_eq!(bar.click(2), Some(0));
        assert_eq!(bar.click(1), Some(2));
        assert_eq!(bar.click(1), Some(1));
        assert_eq!(bar.last_clicked(), Some(1));

        let mut empty = FilterBar::new(0);
        assert_eq!(empty.click(0), None);
    }

    #[test]
    fn test_navigation_targets() {
        let pages = ["about", "resume", "portfolio", "contact"];
        assert_eq!(
            navigation_targets("Portfolio", &pages),
            vec![false, false, true, false]
        );
        assert_eq!(navigation_targets("Blog", &pages), vec![false; 4]);

        let owned = vec!["about".to_string()];
        assert_eq!(navigation_targets(" About ", &owned), vec![true]);
    }
}
