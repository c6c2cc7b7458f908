//! ShapeBuilder for registering the members of a reflected type.

use crate::error::{AccessResult, RegistryError, RegistryResult};
use crate::types::{converts_to, Constructor, Member, MemberAccess, MemberDescriptor, Pending, Shape};
use prism_core::ValueType;
use std::collections::HashSet;

/// Builder for an immutable [`Shape`].
///
/// Registration methods never fail; duplicate names and other mistakes are
/// reported once by [`ShapeBuilder::build`].
pub struct ShapeBuilder<T> {
    type_name: &'static str,
    members: Vec<Member<T>>,
    required: Vec<String>,
    constructor: Option<Constructor<T>>,
}

impl<T: 'static> ShapeBuilder<T> {
    /// Create a builder for the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            members: Vec::new(),
            required: Vec::new(),
            constructor: None,
        }
    }

    /// Add a readable and writable instance member.
    pub fn field<V, G, S>(self, name: impl Into<String>, get: G, set: S) -> Self
    where
        V: ValueType + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push::<V>(
            MemberDescriptor::new(name, V::kind()),
            MemberAccess::Instance {
                get: Some(Box::new(move |target| get(target).into_value())),
                set: Some(Box::new(move |target, value| {
                    set(target, V::from_value(value)?);
                    Ok(())
                })),
            },
        )
    }

    /// Add an instance member without a setter.
    pub fn read_only<V, G>(self, name: impl Into<String>, get: G) -> Self
    where
        V: ValueType + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.push::<V>(
            MemberDescriptor::new(name, V::kind()).read_only(),
            MemberAccess::Instance {
                get: Some(Box::new(move |target| get(target).into_value())),
                set: None,
            },
        )
    }

    /// Add an instance member without a getter.
    pub fn write_only<V, S>(self, name: impl Into<String>, set: S) -> Self
    where
        V: ValueType + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push::<V>(
            MemberDescriptor::new(name, V::kind()).write_only(),
            MemberAccess::Instance {
                get: None,
                set: Some(Box::new(move |target, value| {
                    set(target, V::from_value(value)?);
                    Ok(())
                })),
            },
        )
    }

    /// Add a type-level member backed by storage the caller owns.
    pub fn static_field<V, G, S>(self, name: impl Into<String>, get: G, set: S) -> Self
    where
        V: ValueType + 'static,
        G: Fn() -> V + Send + Sync + 'static,
        S: Fn(V) + Send + Sync + 'static,
    {
        self.push::<V>(
            MemberDescriptor::new(name, V::kind()).static_member(),
            MemberAccess::Static {
                get: Some(Box::new(move || get().into_value())),
                set: Some(Box::new(move |value| {
                    set(V::from_value(value)?);
                    Ok(())
                })),
            },
        )
    }

    /// Add a type-level member without a setter.
    pub fn static_read_only<V, G>(self, name: impl Into<String>, get: G) -> Self
    where
        V: ValueType + 'static,
        G: Fn() -> V + Send + Sync + 'static,
    {
        self.push::<V>(
            MemberDescriptor::new(name, V::kind()).static_member().read_only(),
            MemberAccess::Static {
                get: Some(Box::new(move || get().into_value())),
                set: None,
            },
        )
    }

    /// Mark a member as required for materialization.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Construct future instances from `Default`, then apply pending values.
    pub fn default_constructor(mut self) -> Self
    where
        T: Default,
    {
        self.constructor = Some(Box::new(|_| Ok(T::default())));
        self
    }

    /// Construct future instances with a custom function.
    pub fn constructor<F>(mut self, construct: F) -> Self
    where
        F: Fn(&mut Pending) -> AccessResult<T> + Send + Sync + 'static,
    {
        self.constructor = Some(Box::new(construct));
        self
    }

    fn push<V: ValueType>(mut self, descriptor: MemberDescriptor, access: MemberAccess<T>) -> Self {
        self.members.push(Member {
            descriptor,
            access,
            check: converts_to::<V>,
        });
        self
    }

    /// Build the immutable Shape.
    pub fn build(mut self) -> RegistryResult<Shape<T>> {
        let mut seen = HashSet::new();
        for member in &self.members {
            let name = &member.descriptor.name;
            if name.trim().is_empty() {
                return Err(RegistryError::invalid_argument(format!(
                    "empty member name on type {}",
                    self.type_name
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(RegistryError::duplicate_member(self.type_name, name));
            }
        }

        for name in &self.required {
            match self.members.iter_mut().find(|m| &m.descriptor.name == name) {
                Some(member) => member.descriptor.required = true,
                None => return Err(RegistryError::unknown_required(self.type_name, name)),
            }
        }

        Ok(Shape::new(self.type_name, self.members, self.constructor))
    }
}
