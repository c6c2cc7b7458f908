//! The Visitor - a member-access session over one target.

use std::collections::BTreeMap;

use once_cell::unsync::OnceCell;
use prism_core::{Attributes, Value, ValueType};
use prism_journal::HistoryLog;
use prism_registry::{
    AccessError, MemberDescriptor, MemberSelector, Reflect, Registry, Shape,
};
use prism_validation::{MemberRules, ValidationContext, VerificationResult};
use tracing::{debug, trace};

use crate::accessor::Accessor;
use crate::error::{VisitorError, VisitorResult};
use crate::options::{LoadingMode, TargetKind, VisitorOptions};
use crate::repeater::Repeater;
use crate::table::MemberTable;

/// A member-access session.
///
/// Reads and writes members of one target by name. Optionally validates
/// writes before applying them (strict mode) and records accepted writes for
/// replay (repeatable mode).
pub struct Visitor<'r, T: Reflect> {
    /// The registry the shape was resolved from.
    registry: &'r Registry,
    /// Mode flags.
    options: VisitorOptions,
    /// Raw access to the target.
    pub(crate) accessor: Accessor<T>,
    /// Enumerable members, built eagerly or on first need.
    table: OnceCell<MemberTable>,
    /// Accepted writes, when repeatable.
    pub(crate) history: Option<HistoryLog>,
    /// Registered rules, created on first registration.
    validation: Option<ValidationContext>,
}

impl<'r, T: Reflect> Visitor<'r, T> {
    /// Visit a live instance.
    pub fn for_instance(
        registry: &'r Registry,
        instance: T,
        options: VisitorOptions,
    ) -> VisitorResult<Self> {
        let shape = registry.resolve::<T>()?;
        Ok(Self::with_accessor(
            registry,
            Accessor::bind_instance(shape, instance),
            options,
        ))
    }

    /// Visit an instance that does not exist yet.
    ///
    /// `initial` values are assigned in member-name order as if by [`Visitor::set`].
    pub fn for_future_instance(
        registry: &'r Registry,
        initial: Attributes,
        options: VisitorOptions,
    ) -> VisitorResult<Self> {
        let shape = registry.resolve::<T>()?;
        let mut visitor = Self::with_accessor(registry, Accessor::future(shape), options);
        visitor.set_many(initial)?;
        Ok(visitor)
    }

    /// Visit the type-level members of `T`.
    pub fn for_static_type(registry: &'r Registry, options: VisitorOptions) -> VisitorResult<Self> {
        let shape = registry.resolve::<T>()?;
        Ok(Self::with_accessor(
            registry,
            Accessor::static_type(shape),
            options,
        ))
    }

    fn with_accessor(registry: &'r Registry, accessor: Accessor<T>, options: VisitorOptions) -> Self {
        let table = OnceCell::new();
        if options.loading == LoadingMode::Normal {
            let _ = table.set(MemberTable::build(accessor.shape(), accessor.kind()));
        }
        Self {
            registry,
            options,
            accessor,
            table,
            history: options.repeatable.then(HistoryLog::new),
            validation: None,
        }
    }

    // ==================== Session state ====================

    /// Get the registry.
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn options(&self) -> VisitorOptions {
        self.options
    }

    pub fn target_kind(&self) -> TargetKind {
        self.accessor.kind()
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    pub fn is_repeatable(&self) -> bool {
        self.options.repeatable
    }

    /// Check if the member table has been built.
    pub fn is_table_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The shape of the visited type.
    pub fn shape(&self) -> &Shape<T> {
        self.accessor.shape()
    }

    /// Accepted writes so far. `None` unless repeatable.
    pub fn history(&self) -> Option<&HistoryLog> {
        self.history.as_ref()
    }

    fn table(&self) -> &MemberTable {
        self.table
            .get_or_init(|| MemberTable::build(self.accessor.shape(), self.accessor.kind()))
    }

    // ==================== Members ====================

    /// Names of the reachable members, in registration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.table().descriptors().iter().map(|d| d.name.as_str())
    }

    /// Check if a member is reachable through this visitor.
    pub fn contains(&self, name: &str) -> bool {
        self.table().get(name).is_some()
    }

    /// Descriptor of a reachable member.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.table().get(name)
    }

    // ==================== Reads ====================

    pub fn get(&self, name: &str) -> VisitorResult<Value> {
        ensure_name(name)?;
        Ok(self.accessor.get(name)?)
    }

    /// Read a member and convert it to `V`.
    pub fn get_as<V: ValueType>(&self, name: &str) -> VisitorResult<V> {
        let value = self.get(name)?;
        V::from_value(value).map_err(|e| AccessError::conversion(name, e).into())
    }

    pub fn get_selected<V: ValueType>(&self, selector: MemberSelector<T, V>) -> VisitorResult<V> {
        self.get_as(selector.name())
    }

    /// Snapshot of every readable reachable member.
    pub fn to_attributes(&self) -> VisitorResult<Attributes> {
        let mut values = Attributes::new();
        for descriptor in self.table().descriptors().iter().filter(|d| d.readable) {
            values.insert(descriptor.name.clone(), self.accessor.get(&descriptor.name)?);
        }
        Ok(values)
    }

    // ==================== Writes ====================

    /// Assign a member.
    ///
    /// In strict mode the value is validated first; a rejected value leaves
    /// the target untouched and returns the failed outcomes.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> VisitorResult<()> {
        let value = value.into();
        ensure_name(name)?;
        self.accessor.check_set(name, &value)?;

        if self.options.strict {
            if let Some(validation) = &self.validation {
                let result = validation.verify_one(name, &value);
                if !result.is_success() {
                    debug!(member = name, %value, "strict mode rejected assignment");
                    result.raise()?;
                }
            }
        }

        self.apply(name, value)
    }

    pub fn set_selected<V: ValueType>(
        &mut self,
        selector: MemberSelector<T, V>,
        value: V,
    ) -> VisitorResult<()> {
        self.set(selector.name(), value.into_value())
    }

    /// Assign several members in ascending name order.
    ///
    /// Every entry is checked against the accessor, conversion included,
    /// before any is applied, so a rejected batch leaves the target and the
    /// history untouched. In strict mode the whole batch is also validated
    /// and nothing is applied unless every entry passes.
    pub fn set_many<K, I>(&mut self, entries: I) -> VisitorResult<()>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let batch: BTreeMap<String, Value> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();

        for (name, value) in &batch {
            ensure_name(name)?;
            self.accessor.check_set(name, value)?;
        }

        if self.options.strict {
            if let Some(validation) = &self.validation {
                let result = validation.verify_many(batch.iter().map(|(k, v)| (k.as_str(), v)));
                if !result.is_success() {
                    debug!(
                        failures = result.failures().count(),
                        "strict mode rejected batch"
                    );
                    result.raise()?;
                }
            }
        }

        for (name, value) in batch {
            self.apply(&name, value)?;
        }
        Ok(())
    }

    fn apply(&mut self, name: &str, value: Value) -> VisitorResult<()> {
        let recorded = self.history.is_some().then(|| value.clone());
        self.accessor.set(name, value)?;
        if let (Some(history), Some(value)) = (self.history.as_mut(), recorded) {
            history.register_operation(name, value);
        }
        trace!(member = name, "assigned member");
        Ok(())
    }

    // ==================== Validation ====================

    /// The rule context, created on first use.
    pub fn validation(&mut self) -> &mut ValidationContext {
        self.validation.get_or_insert_with(ValidationContext::new)
    }

    /// Start registering rules on a member.
    ///
    /// Only members in this visitor's member table take rules; an instance
    /// member on a static-type visitor reports `InstanceRequired`.
    pub fn rules(&mut self, name: &str) -> VisitorResult<MemberRules<'_>> {
        ensure_name(name)?;
        let descriptor = match self.member(name) {
            Some(descriptor) => descriptor.clone(),
            None if self.shape().contains(name) => {
                return Err(AccessError::instance_required(self.shape().type_name(), name).into())
            }
            None => return Err(AccessError::unknown_member(self.shape().type_name(), name).into()),
        };
        Ok(self.validation().for_member(&descriptor))
    }

    /// Evaluate every member with rules against its current value.
    pub fn verify(&self) -> VisitorResult<VerificationResult> {
        match &self.validation {
            Some(validation) => Ok(validation.verify_with(|name| self.accessor.get(name))?),
            None => Ok(VerificationResult::new()),
        }
    }

    /// Like [`Visitor::verify`], but a failed result becomes an error.
    pub fn verify_and_raise(&self) -> VisitorResult<()> {
        self.verify()?.raise()?;
        Ok(())
    }

    // ==================== Instances ====================

    /// Construct the future instance from the values assigned so far.
    ///
    /// A visitor that is already bound to an instance returns it unchanged.
    pub fn materialize(&mut self) -> VisitorResult<&T> {
        let kind = self.accessor.kind();
        if kind == TargetKind::StaticType {
            return Err(VisitorError::unsupported_target("materialize", kind));
        }
        if self.accessor.materialize()? {
            debug!(type_name = self.shape().type_name(), "materialized future instance");
        }
        self.accessor
            .instance()
            .ok_or_else(|| VisitorError::unsupported_target("materialize", kind))
    }

    /// The bound instance, if any.
    pub fn instance(&self) -> Option<&T> {
        self.accessor.instance()
    }

    pub fn into_instance(self) -> Option<T> {
        self.accessor.into_instance()
    }

    /// Replay access to this session's history.
    pub fn for_repeat(&mut self) -> Repeater<'_, 'r, T> {
        Repeater::new(self)
    }
}

fn ensure_name(name: &str) -> VisitorResult<()> {
    if name.trim().is_empty() {
        return Err(VisitorError::invalid_argument("member name must not be empty"));
    }
    Ok(())
}
