use std::sync::Arc;

use dashmap::DashMap;

use super::table::ViewId;

type Factory<V> = Box<dyn Fn(ViewId) -> V + Send + Sync>;

/// Builds each view on first use and hands out the same instance afterwards.
pub struct LazyViews<V> {
    factory: Factory<V>,
    loaded: DashMap<ViewId, Arc<V>>,
}

impl<V> LazyViews<V> {
    pub fn new(factory: impl Fn(ViewId) -> V + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            loaded: DashMap::new(),
        }
    }

    pub fn get(&self, view: ViewId) -> Arc<V> {
        self.loaded
            .entry(view)
            .or_insert_with(|| {
                tracing::debug!(view = %view, "loading view");
                Arc::new((self.factory)(view))
            })
            .value()
            .clone()
    }

    pub fn is_loaded(&self, view: ViewId) -> bool {
        self.loaded.contains_key(&view)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl<V> std::fmt::Debug for LazyViews<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyViews")
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn factory_runs_once_per_view() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let views = LazyViews::new(move |view| {
            counter.fetch_add(1, Ordering::SeqCst);
            view.as_str().to_string()
        });

        assert!(!views.is_loaded(ViewId::PatientForm));
        let first = views.get(ViewId::PatientForm);
        let second = views.get(ViewId::PatientForm);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, "PatientForm");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        views.get(ViewId::Login);
        assert_eq!(views.loaded_count(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
