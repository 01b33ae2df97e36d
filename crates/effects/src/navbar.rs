//! Navigation bar state: scrolled styling and the mobile menu.

use serde::Serialize;

/// Scroll offset (px) past which the bar switches to its scrolled style.
pub const SCROLL_THRESHOLD: f64 = 10.0;

/// Stagger between mobile menu entries as they slide in.
pub const MENU_STAGGER_MS: f64 = 100.0;

/// An in-page anchor link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

/// Links shown left of the logo on desktop.
pub const LEFT_LINKS: &[NavLink] = &[
    NavLink { name: "About", href: "#about" },
    NavLink { name: "Services", href: "#services" },
    NavLink { name: "Products", href: "#products" },
];

/// Links shown right of the logo on desktop.
pub const RIGHT_LINKS: &[NavLink] = &[
    NavLink { name: "Learning", href: "#learning" },
    NavLink { name: "Careers", href: "#careers" },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavbarState {
    scrolled: bool,
    menu_open: bool,
}

impl NavbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the page scroll offset. Returns whether the style flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        if changed {
            tracing::trace!(scrolled, "navbar style changed");
        }
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// A link in the mobile menu was chosen; the menu closes.
    pub fn select_link(&mut self) {
        self.menu_open = false;
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Every link, left group first, as listed in the mobile menu.
    pub fn links() -> impl Iterator<Item = &'static NavLink> {
        LEFT_LINKS.iter().chain(RIGHT_LINKS)
    }

    /// Slide-in delay for the `index`-th mobile menu entry; zero when closed.
    pub fn menu_entry_delay_ms(&self, index: usize) -> f64 {
        if self.menu_open {
            index as f64 * MENU_STAGGER_MS
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let mut nav = NavbarState::new();
        assert!(!nav.on_scroll(10.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(10.5));
        assert!(nav.is_scrolled());
        assert!(!nav.on_scroll(400.0));
        assert!(nav.on_scroll(0.0));
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn menu_toggles_and_closes_on_selection() {
        let mut nav = NavbarState::new();
        nav.toggle_menu();
        assert!(nav.is_menu_open());
        nav.select_link();
        assert!(!nav.is_menu_open());
        nav.select_link();
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn links_list_left_group_first() {
        let names: Vec<&str> = NavbarState::links().map(|l| l.name).collect();
        assert_eq!(names, ["About", "Services", "Products", "Learning", "Careers"]);
        assert!(NavbarState::links().all(|l| l.href.starts_with('#')));
    }

    #[test]
    fn menu_entries_stagger_only_while_open() {
        let mut nav = NavbarState::new();
        assert_eq!(nav.menu_entry_delay_ms(3), 0.0);
        nav.toggle_menu();
        assert_eq!(nav.menu_entry_delay_ms(3), 300.0);
    }
}
