/// Reveals threads one page at a time
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Paginator {
    /// None, or Some(0), shows everything at once
    page_size: Option<usize>,
    pages_loaded: usize,
    infinite_scroll: bool,
}

impl Paginator {
    pub fn new(page_size: Option<usize>, infinite_scroll: bool) -> Paginator {
        Paginator {
            page_size: page_size.filter(|&s| s > 0),
            pages_loaded: 1,
            infinite_scroll,
        }
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Number of items shown out of `total`
    pub fn visible(&self, total: usize) -> usize {
        match self.page_size {
            None => total,
            Some(size) => size.saturating_mul(self.pages_loaded).min(total),
        }
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible(total) < total
    }

    /// Reveals one more page. Returns false, without changing anything, once
    /// everything is shown.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.pages_loaded += 1;
        true
    }

    /// Called when the end of the list scrolls into view
    pub fn on_viewport_intersect(&mut self, total: usize) -> bool {
        self.infinite_scroll && self.load_more(total)
    }

    pub fn reset(&mut self) {
        self.pages_loaded = 1;
    }
}
