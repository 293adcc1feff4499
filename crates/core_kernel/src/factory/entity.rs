//! Opaque handles to resolved entities

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::error::FactoryError;

/// A shared handle to an entity produced by the factory
///
/// The factory does not know the concrete types it builds; callers recover
/// them with [`EntityRef::downcast`]. Clones share the same instance, and
/// [`EntityRef::ptr_eq`] is the identity test used by the registry.
#[derive(Clone)]
pub struct EntityRef {
    kind: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl EntityRef {
    /// Wraps a freshly built entity of the given kind
    pub fn new<T: Any + Send + Sync>(kind: &str, entity: T) -> Self {
        Self::from_arc(kind, Arc::new(entity))
    }

    /// Wraps an entity that is already shared
    pub fn from_arc<T: Any + Send + Sync>(kind: &str, entity: Arc<T>) -> Self {
        Self {
            kind: Arc::from(kind),
            inner: entity,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the entity as `T`, sharing the underlying allocation
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, FactoryError> {
        Arc::clone(&self.inner)
            .downcast::<T>()
            .map_err(|_| FactoryError::UnexpectedEntity {
                kind: self.kind.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Borrows the entity as `T` without touching the reference count
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// True when both handles point at the very same instance
    pub fn ptr_eq(&self, other: &EntityRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("kind", &self.kind)
            .field("ptr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_shares_instance() {
        let entity = EntityRef::new("unit", String::from("hour"));
        let a = entity.downcast::<String>().unwrap();
        let b = entity.clone().downcast::<String>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(entity.get::<String>().map(String::as_str), Some("hour"));
    }

    #[test]
    fn test_downcast_to_wrong_type() {
        let entity = EntityRef::new("unit", 5_u32);
        let err = entity.downcast::<String>().unwrap_err();
        assert!(matches!(err, FactoryError::UnexpectedEntity { ref kind, .. } if kind == "unit"));
    }

    #[test]
    fn test_ptr_eq_distinguishes_equal_values() {
        let a = EntityRef::new("unit", 1_u8);
        let b = EntityRef::new("unit", 1_u8);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
