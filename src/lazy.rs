use std::iter::{Filter, FusedIterator, Fuse, Map};

// =============================================================================
// One-pass lazy sequence
// =============================================================================

/// Forward-only sequence that produces elements on demand.
///
/// Nothing runs until an element is requested. Once the source is exhausted
/// every later request answers `None`, so draining a spent sequence simply
/// gives an empty result.
pub struct Lazy<I: Iterator> {
    inner: Fuse<I>,
}

pub fn lazy<S: IntoIterator>(source: S) -> Lazy<S::IntoIter> {
    Lazy::new(source)
}

impl<I: Iterator> Lazy<I> {
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: source.into_iter().fuse(),
        }
    }

    /// Keeps elements matching `predicate`; still lazy, still one-pass.
    pub fn filter<P>(self, predicate: P) -> Lazy<Filter<Fuse<I>, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Lazy::new(self.inner.filter(predicate))
    }

    pub fn map<B, F>(self, f: F) -> Lazy<Map<Fuse<I>, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Lazy::new(self.inner.map(f))
    }

    /// Consumes whatever is left.
    pub fn drain(&mut self) -> Vec<I::Item> {
        self.by_ref().collect()
    }
}

impl<I: Iterator> Iterator for Lazy<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Iterator> FusedIterator for Lazy<I> {}
