//! Selection state for list views.

/// Rows moved by PgUp/PgDn.
pub const PAGE_SIZE: usize = 10;

/// Selection and movement over a list of `total` rows.
pub trait ListNavigation {
    fn selected(&self) -> usize;

    fn set_selected(&mut self, idx: usize);

    fn total(&self) -> usize;

    fn set_total(&mut self, total: usize);

    fn select_next(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total > 0 && selected < total - 1 {
            self.set_selected(selected + 1);
        }
    }

    fn select_prev(&mut self) {
        self.set_selected(self.selected().saturating_sub(1));
    }

    fn page_up(&mut self) {
        self.set_selected(self.selected().saturating_sub(PAGE_SIZE));
    }

    fn page_down(&mut self) {
        let total = self.total();
        if total > 0 {
            self.set_selected((self.selected() + PAGE_SIZE).min(total - 1));
        }
    }

    fn go_first(&mut self) {
        self.set_selected(0);
    }

    fn go_last(&mut self) {
        self.set_selected(self.total().saturating_sub(1));
    }

    /// Update the row count, pulling the selection back into range.
    fn sync_total(&mut self, total: usize) {
        self.set_total(total);
        if self.selected() >= total {
            self.set_selected(total.saturating_sub(1));
        }
    }
}

/// Plain list selection.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub total: usize,
}

impl ListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_total(total: usize) -> Self {
        Self { selected: 0, total }
    }
}

impl ListNavigation for ListState {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    fn total(&self) -> usize {
        self.total
    }

    fn set_total(&mut self, total: usize) {
        self.total = total;
    }
}
