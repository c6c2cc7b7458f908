//! Accessor - binds a type shape to one target.

use std::sync::Arc;

use prism_core::{Attributes, Value};
use prism_registry::{AccessError, AccessResult, MemberDescriptor, Shape};

use crate::options::TargetKind;

/// Storage a visitor reads from and writes to.
enum Target<T> {
    Instance(T),
    Future(Attributes),
    Static,
}

/// Raw member access over one target.
pub struct Accessor<T> {
    shape: Arc<Shape<T>>,
    target: Target<T>,
}

impl<T> Accessor<T> {
    pub fn bind_instance(shape: Arc<Shape<T>>, instance: T) -> Self {
        Self {
            shape,
            target: Target::Instance(instance),
        }
    }

    pub fn future(shape: Arc<Shape<T>>) -> Self {
        Self {
            shape,
            target: Target::Future(Attributes::new()),
        }
    }

    pub fn static_type(shape: Arc<Shape<T>>) -> Self {
        Self {
            shape,
            target: Target::Static,
        }
    }

    pub fn shape(&self) -> &Arc<Shape<T>> {
        &self.shape
    }

    pub fn kind(&self) -> TargetKind {
        match self.target {
            Target::Instance(_) => TargetKind::Instance,
            Target::Future(_) => TargetKind::FutureInstance,
            Target::Static => TargetKind::StaticType,
        }
    }

    fn descriptor(&self, name: &str) -> AccessResult<&MemberDescriptor> {
        self.shape
            .descriptor(name)
            .ok_or_else(|| AccessError::unknown_member(self.shape.type_name(), name))
    }

    /// Read a member. A future instance reads `Null` for unassigned members.
    pub fn get(&self, name: &str) -> AccessResult<Value> {
        match &self.target {
            Target::Instance(instance) => self.shape.read(Some(instance), name),
            Target::Static => self.shape.read(None, name),
            Target::Future(pending) => {
                let descriptor = self.descriptor(name)?;
                if !descriptor.readable {
                    return Err(AccessError::not_readable(self.shape.type_name(), name));
                }
                if descriptor.is_static {
                    return self.shape.read(None, name);
                }
                Ok(pending.get(name).cloned().unwrap_or(Value::Null))
            }
        }
    }

    /// Check that `value` could be written to the member, without writing it.
    pub fn check_set(&self, name: &str, value: &Value) -> AccessResult<()> {
        let descriptor = self.shape.check_write(name, value)?;
        if matches!(self.target, Target::Static) && !descriptor.is_static {
            return Err(AccessError::instance_required(self.shape.type_name(), name));
        }
        Ok(())
    }

    /// Write a member. A future instance stores instance members as pending values.
    pub fn set(&mut self, name: &str, value: Value) -> AccessResult<()> {
        match &mut self.target {
            Target::Instance(instance) => self.shape.write(Some(instance), name, value),
            Target::Static => self.shape.write(None, name, value),
            Target::Future(pending) => {
                let descriptor = self.shape.check_write(name, &value)?;
                if descriptor.is_static {
                    return self.shape.write(None, name, value);
                }
                pending.insert(name.to_string(), value);
                Ok(())
            }
        }
    }

    /// Turn a future instance into a live one.
    ///
    /// Returns `Ok(false)` when the target is not a future instance. On failure
    /// the pending values are kept.
    pub fn materialize(&mut self) -> AccessResult<bool> {
        let Target::Future(pending) = &self.target else {
            return Ok(false);
        };
        let instance = self.shape.materialize(pending.clone())?;
        self.target = Target::Instance(instance);
        Ok(true)
    }

    pub fn instance(&self) -> Option<&T> {
        match &self.target {
            Target::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn instance_mut(&mut self) -> Option<&mut T> {
        match &mut self.target {
            Target::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn into_instance(self) -> Option<T> {
        match self.target {
            Target::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Values assigned to a future instance so far.
    pub fn pending(&self) -> Option<&Attributes> {
        match &self.target {
            Target::Future(pending) => Some(pending),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_registry::ShapeBuilder;
    use std::sync::atomic::{AtomicI64, Ordering};

    static LIMIT: AtomicI64 = AtomicI64::new(10);

    #[derive(Debug, Default)]
    struct Item {
        label: String,
        count: i64,
    }

    fn shape() -> Arc<Shape<Item>> {
        let shape = ShapeBuilder::<Item>::new("Item")
            .field("label", |i: &Item| i.label.clone(), |i: &mut Item, v: String| i.label = v)
            .field("count", |i: &Item| i.count, |i: &mut Item, v: i64| i.count = v)
            .static_field(
                "limit",
                || LIMIT.load(Ordering::SeqCst),
                |v: i64| LIMIT.store(v, Ordering::SeqCst),
            )
            .required("label")
            .default_constructor()
            .build()
            .unwrap();
        Arc::new(shape)
    }

    #[test]
    fn test_instance_get_and_set() {
        // GIVEN
        let mut accessor = Accessor::bind_instance(shape(), Item::default());

        // WHEN
        accessor.set("count", Value::Int(4)).unwrap();

        // THEN
        assert_eq!(accessor.get("count").unwrap(), Value::Int(4));
        assert_eq!(accessor.kind(), TargetKind::Instance);
        assert_eq!(accessor.instance().map(|i| i.count), Some(4));
    }

    #[test]
    fn test_future_reads_null_until_assigned() {
        let mut accessor = Accessor::future(shape());

        assert_eq!(accessor.get("label").unwrap(), Value::Null);
        accessor.set("label", Value::from("box")).unwrap();
        assert_eq!(accessor.get("label").unwrap(), Value::from("box"));
        assert!(accessor.instance().is_none());
    }

    #[test]
    fn test_future_rejects_wrong_kind_before_storing() {
        let mut accessor = Accessor::future(shape());

        let err = accessor.set("count", Value::from("many")).unwrap_err();

        assert!(matches!(err, AccessError::TypeMismatch { .. }));
        assert!(accessor.pending().map_or(false, |p| p.is_empty()));
    }

    #[test]
    fn test_materialize_keeps_pending_on_failure() {
        // GIVEN a future instance without its required label
        let mut accessor = Accessor::future(shape());
        accessor.set("count", Value::Int(2)).unwrap();

        // WHEN
        let err = accessor.materialize().unwrap_err();

        // THEN
        assert!(matches!(err, AccessError::MissingRequired { .. }));
        assert_eq!(accessor.get("count").unwrap(), Value::Int(2));

        // WHEN the label arrives
        accessor.set("label", Value::from("box")).unwrap();
        assert!(accessor.materialize().unwrap());

        // THEN
        assert_eq!(accessor.kind(), TargetKind::Instance);
        let item = accessor.into_instance().unwrap();
        assert_eq!(item.label, "box");
        assert_eq!(item.count, 2);
    }

    #[test]
    fn test_static_target_needs_static_members() {
        let accessor = Accessor::static_type(shape());

        let err = accessor.check_set("count", &Value::Int(1)).unwrap_err();
        assert!(matches!(err, AccessError::InstanceRequired { .. }));
        assert!(matches!(
            accessor.get("label").unwrap_err(),
            AccessError::InstanceRequired { .. }
        ));
        assert!(accessor.check_set("limit", &Value::Int(1)).is_ok());
    }

    #[test]
    fn test_unknown_member() {
        let accessor = Accessor::bind_instance(shape(), Item::default());
        assert!(matches!(
            accessor.get("ghost").unwrap_err(),
            AccessError::UnknownMember { .. }
        ));
    }
}
