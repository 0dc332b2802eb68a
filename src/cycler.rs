/// Endless round-robin over a fixed list of values
#[derive(Debug, Clone)]
pub struct Cycler<T> {
    items: Box<[T]>,
    index: usize,
}

impl<T> Cycler<T> {
    /// Builds a cycler whose first `next` returns `items[0]`.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty. An empty cycle has nothing to yield, so
    /// callers holding untrusted data must check before constructing one.
    pub fn new(items: impl Into<Vec<T>>) -> Self {
        let items = items.into().into_boxed_slice();
        assert!(!items.is_empty(), "cycler needs at least one item");
        let index = items.len() - 1;
        Self { items, index }
    }

    /// Number of calls before the sequence repeats.
    pub fn period(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> Cycler<T> {
    /// Advances one position and returns the new current item.
    pub fn step(&mut self) -> T {
        self.index = (self.index + 1) % self.items.len();
        self.items[self.index].clone()
    }
}

impl<T: Clone> Iterator for Cycler<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
