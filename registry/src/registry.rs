//! The Registry - memoized shape lookup per reflected type.

use crate::builder::ShapeBuilder;
use crate::error::{RegistryError, RegistryResult};
use crate::types::Shape;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A type whose members can be visited by name.
///
/// Implementations register every member once; the registry calls
/// [`Reflect::describe`] the first time the type is resolved.
pub trait Reflect: Sized + 'static {
    /// Name used in diagnostics and errors.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Register the members of this type.
    fn describe(shape: ShapeBuilder<Self>) -> ShapeBuilder<Self>;
}

type ShapeCell = Arc<OnceCell<Arc<dyn Any + Send + Sync>>>;

/// The Registry provides runtime lookup of type shapes.
///
/// Shapes are computed at most once per type. Concurrent first resolutions of
/// the same type block on one cell, so every caller observes the same `Arc`.
#[derive(Default)]
pub struct Registry {
    shapes: RwLock<HashMap<TypeId, ShapeCell>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the shape of `T`, building it on first use.
    pub fn resolve<T: Reflect>(&self) -> RegistryResult<Arc<Shape<T>>> {
        let cell = self.cell_for(TypeId::of::<T>());

        let shape = cell.get_or_try_init(|| {
            let shape = T::describe(ShapeBuilder::new(T::type_name())).build()?;
            tracing::debug!(
                type_name = T::type_name(),
                members = shape.len(),
                "resolved type shape"
            );
            Ok::<_, RegistryError>(Arc::new(shape) as Arc<dyn Any + Send + Sync>)
        })?;

        Arc::clone(shape)
            .downcast::<Shape<T>>()
            .map_err(|_| RegistryError::shape_mismatch(T::type_name()))
    }

    /// Check if the shape of `T` has already been built.
    pub fn is_resolved<T: Reflect>(&self) -> bool {
        self.shapes
            .read()
            .get(&TypeId::of::<T>())
            .map_or(false, |cell| cell.get().is_some())
    }

    /// Get the number of resolved types.
    pub fn type_count(&self) -> usize {
        self.shapes
            .read()
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    fn cell_for(&self, type_id: TypeId) -> ShapeCell {
        if let Some(cell) = self.shapes.read().get(&type_id) {
            return Arc::clone(cell);
        }
        Arc::clone(self.shapes.write().entry(type_id).or_default())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("type_count", &self.type_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DESCRIBE_CALLS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counter {
        hits: i64,
    }

    impl Reflect for Counter {
        fn type_name() -> &'static str {
            "Counter"
        }

        fn describe(shape: ShapeBuilder<Self>) -> ShapeBuilder<Self> {
            DESCRIBE_CALLS.fetch_add(1, Ordering::SeqCst);
            shape.field("hits", |c: &Counter| c.hits, |c, v| c.hits = v)
        }
    }

    struct Broken;

    impl Reflect for Broken {
        fn describe(shape: ShapeBuilder<Self>) -> ShapeBuilder<Self> {
            shape
                .static_read_only("x", || 1i64)
                .static_read_only("x", || 2i64)
        }
    }

    #[test]
    fn test_concurrent_resolution_builds_once() {
        // GIVEN
        let registry = Registry::new();

        // WHEN
        let shapes: Vec<Arc<Shape<Counter>>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.resolve::<Counter>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // THEN
        assert_eq!(DESCRIBE_CALLS.load(Ordering::SeqCst), 1);
        assert!(shapes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert!(registry.is_resolved::<Counter>());
        assert_eq!(registry.type_count(), 1);
    }

    #[test]
    fn test_failed_resolution_is_reported() {
        let registry = Registry::new();
        let result = registry.resolve::<Broken>();
        assert!(matches!(result, Err(RegistryError::DuplicateMember { .. })));
        assert!(!registry.is_resolved::<Broken>());
    }
}
