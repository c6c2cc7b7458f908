//! Member definition types.

use crate::error::{AccessError, AccessResult};
use prism_core::{Attributes, ConversionResult, Value, ValueKind, ValueType};
use std::collections::HashMap;
use std::fmt;

/// Immutable metadata for one member of a reflected type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// Member name, unique within its type.
    pub name: String,
    /// Declared type of the member.
    pub declared_type: ValueKind,
    /// Whether the member can be read.
    pub readable: bool,
    /// Whether the member can be written.
    pub writable: bool,
    /// Whether the member lives at type level instead of on an instance.
    pub is_static: bool,
    /// Whether the member must be assigned before a future instance materializes.
    pub required: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, declared_type: ValueKind) -> Self {
        Self {
            name: name.into(),
            declared_type,
            readable: true,
            writable: true,
            is_static: false,
            required: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

pub(crate) type InstanceGetter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
pub(crate) type InstanceSetter<T> = Box<dyn Fn(&mut T, Value) -> ConversionResult<()> + Send + Sync>;
pub(crate) type StaticGetter = Box<dyn Fn() -> Value + Send + Sync>;
pub(crate) type StaticSetter = Box<dyn Fn(Value) -> ConversionResult<()> + Send + Sync>;
pub(crate) type Constructor<T> = Box<dyn Fn(&mut Pending) -> AccessResult<T> + Send + Sync>;
pub(crate) type ValueCheck = fn(&Value) -> ConversionResult<()>;

/// Run the conversion into `V` without keeping the result.
pub(crate) fn converts_to<V: ValueType>(value: &Value) -> ConversionResult<()> {
    V::from_value(value.clone()).map(drop)
}

/// How a member reaches its storage.
pub(crate) enum MemberAccess<T> {
    Instance {
        get: Option<InstanceGetter<T>>,
        set: Option<InstanceSetter<T>>,
    },
    Static {
        get: Option<StaticGetter>,
        set: Option<StaticSetter>,
    },
}

/// A registered member: its descriptor plus the accessors bound to it.
pub(crate) struct Member<T> {
    pub(crate) descriptor: MemberDescriptor,
    pub(crate) access: MemberAccess<T>,
    /// Same conversion the setter performs, minus the write.
    pub(crate) check: ValueCheck,
}

/// Values collected for a not-yet-constructed instance.
///
/// Handed to a type's constructor, which takes the values it needs; anything
/// left over is applied through the regular setters afterwards.
#[derive(Debug)]
pub struct Pending {
    type_name: &'static str,
    values: Attributes,
}

impl Pending {
    pub(crate) fn new(type_name: &'static str, values: Attributes) -> Self {
        Self { type_name, values }
    }

    /// Remove a value and convert it. A missing entry converts from `Null`.
    pub fn take<V: ValueType>(&mut self, name: &str) -> AccessResult<V> {
        let value = self.values.remove(name).unwrap_or(Value::Null);
        V::from_value(value).map_err(|e| AccessError::conversion(name, e))
    }

    /// Check if a value is still pending for the member.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Name of the type being constructed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn into_remaining(self) -> Attributes {
        self.values
    }
}

/// The ordered member table of one reflected type.
/// It is immutable after construction.
pub struct Shape<T> {
    type_name: &'static str,
    members: Vec<Member<T>>,
    index: HashMap<String, usize>,
    constructor: Option<Constructor<T>>,
}

impl<T> Shape<T> {
    pub(crate) fn new(
        type_name: &'static str,
        members: Vec<Member<T>>,
        constructor: Option<Constructor<T>>,
    ) -> Self {
        let index = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.descriptor.name.clone(), i))
            .collect();
        Self {
            type_name,
            members,
            index,
            constructor,
        }
    }

    // ==================== Metadata ====================

    /// Name of the reflected type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if the type has a member with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get a member descriptor by name.
    pub fn descriptor(&self, name: &str) -> Option<&MemberDescriptor> {
        self.index.get(name).map(|&i| &self.members[i].descriptor)
    }

    /// All member descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().map(|m| &m.descriptor)
    }

    /// Whether future instances of this type can be materialized.
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    fn member(&self, name: &str) -> AccessResult<&Member<T>> {
        self.index
            .get(name)
            .map(|&i| &self.members[i])
            .ok_or_else(|| AccessError::unknown_member(self.type_name, name))
    }

    // ==================== Access ====================

    /// Read a member. Instance members need `instance`; static members ignore it.
    pub fn read(&self, instance: Option<&T>, name: &str) -> AccessResult<Value> {
        let member = self.member(name)?;
        if !member.descriptor.readable {
            return Err(AccessError::not_readable(self.type_name, name));
        }
        match &member.access {
            MemberAccess::Instance { get: Some(get), .. } => instance
                .map(|target| get(target))
                .ok_or_else(|| AccessError::instance_required(self.type_name, name)),
            MemberAccess::Static { get: Some(get), .. } => Ok(get()),
            _ => Err(AccessError::not_readable(self.type_name, name)),
        }
    }

    /// Check that `value` may be written to the member without writing it.
    ///
    /// Runs the member's full conversion, so a value that passes here cannot
    /// fail inside the setter.
    pub fn check_write(&self, name: &str, value: &Value) -> AccessResult<&MemberDescriptor> {
        let member = self.member(name)?;
        let descriptor = &member.descriptor;
        if !descriptor.writable {
            return Err(AccessError::not_writable(self.type_name, name));
        }
        if !descriptor.declared_type.accepts(value) {
            return Err(AccessError::type_mismatch(
                name,
                descriptor.declared_type.name(),
                value.type_name(),
            ));
        }
        (member.check)(value).map_err(|e| AccessError::conversion(name, e))?;
        Ok(descriptor)
    }

    /// Write a member. Instance members need `instance`; static members ignore it.
    pub fn write(&self, instance: Option<&mut T>, name: &str, value: Value) -> AccessResult<()> {
        self.check_write(name, &value)?;
        let member = self.member(name)?;
        match &member.access {
            MemberAccess::Instance { set: Some(set), .. } => {
                let target =
                    instance.ok_or_else(|| AccessError::instance_required(self.type_name, name))?;
                set(target, value).map_err(|e| AccessError::conversion(name, e))
            }
            MemberAccess::Static { set: Some(set), .. } => {
                set(value).map_err(|e| AccessError::conversion(name, e))
            }
            _ => Err(AccessError::not_writable(self.type_name, name)),
        }
    }

    // ==================== Construction ====================

    /// Build a live instance from pending values.
    ///
    /// Every required instance member must have a non-null pending value.
    /// Values the constructor does not take are applied in member-name order.
    pub fn materialize(&self, values: Attributes) -> AccessResult<T> {
        for descriptor in self.descriptors() {
            if descriptor.required
                && !descriptor.is_static
                && values.get(&descriptor.name).map_or(true, Value::is_null)
            {
                return Err(AccessError::missing_required(self.type_name, &descriptor.name));
            }
        }

        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| AccessError::no_constructor(self.type_name))?;

        let mut pending = Pending::new(self.type_name, values);
        let mut instance = constructor(&mut pending)?;

        let mut remaining: Vec<(String, Value)> = pending.into_remaining().into_iter().collect();
        remaining.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in remaining {
            self.write(Some(&mut instance), &name, value)?;
        }

        Ok(instance)
    }
}

impl<T> fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_name", &self.type_name)
            .field("members", &self.descriptors().collect::<Vec<_>>())
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}
