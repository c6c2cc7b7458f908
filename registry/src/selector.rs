//! Typed member selectors.

use std::fmt;
use std::marker::PhantomData;

/// A member name bound at compile time to its owner type and value type.
///
/// Declare selectors as constants next to the `Reflect` impl so the name is
/// spelled once:
///
/// ```
/// use prism_registry::MemberSelector;
///
/// struct Person;
/// const AGE: MemberSelector<Person, i64> = MemberSelector::new("age");
/// assert_eq!(AGE.name(), "age");
/// ```
pub struct MemberSelector<T, V> {
    name: &'static str,
    _marker: PhantomData<fn(&T) -> V>,
}

impl<T, V> MemberSelector<T, V> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The selected member name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, V> Clone for MemberSelector<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for MemberSelector<T, V> {}

impl<T, V> fmt::Debug for MemberSelector<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemberSelector").field(&self.name).finish()
    }
}
