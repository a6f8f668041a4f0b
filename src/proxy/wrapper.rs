use crate::profile::{ClassProfileStore, ProfileRegistry};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// A subject whose method calls are profiled per class
///
/// Method bodies receive the wrapper itself, so calls they make through
/// it are recorded as subordinate calls:
///
/// ```
/// use proxy_profiler::{Profiled, ProfileRegistry};
///
/// struct Counter { hits: u32 }
///
/// let registry = ProfileRegistry::new();
/// let mut counter = Profiled::new(Counter { hits: 0 }, &registry);
///
/// counter.call_mut("outer", |c| {
///     c.call_mut("inner", |c| c.hits += 1);
/// });
///
/// assert_eq!(counter.hits, 1);
/// assert_eq!(counter.profile_data().flat_stats().count(), 2);
/// ```
pub struct Profiled<T> {
    subject: T,
    store: Arc<ClassProfileStore>,
}

impl<T> Profiled<T> {
    /// Wrap `subject`, sharing data with every wrapper of the same type
    pub fn new(subject: T, registry: &ProfileRegistry) -> Self {
        Self::with_class_id(subject, registry, class_name::<T>())
    }

    /// Wrap `subject` under an explicit class identity
    pub fn with_class_id(subject: T, registry: &ProfileRegistry, class_id: &str) -> Self {
        Self {
            subject,
            store: registry.get_or_create(class_id),
        }
    }

    /// Time `f` as a call to `name`
    pub fn call<R>(&self, name: &str, f: impl FnOnce(&Self) -> R) -> R {
        let _guard = self.store.enter(name);
        f(self)
    }

    /// Time `f` as a call to `name`, with mutable access to the subject
    pub fn call_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let _guard = self.store.enter(name);
        f(self)
    }

    /// Profile data shared by all instances of this class
    pub fn profile_data(&self) -> &Arc<ClassProfileStore> {
        &self.store
    }

    pub fn class_id(&self) -> &str {
        self.store.class_id()
    }

    pub fn subject(&self) -> &T {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut T {
        &mut self.subject
    }

    pub fn into_inner(self) -> T {
        self.subject
    }
}

impl<T> Deref for Profiled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.subject
    }
}

impl<T> DerefMut for Profiled<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.subject
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Profiled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiled")
            .field("class_id", &self.store.class_id())
            .field("subject", &self.subject)
            .finish()
    }
}

/// Wrap a callable so every invocation is timed as a call to `name`
pub fn instrument<A, R, F>(
    store: Arc<ClassProfileStore>,
    name: impl Into<String>,
    mut f: F,
) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
{
    let name = name.into();
    move |arg| {
        let _guard = store.enter(name.as_str());
        f(arg)
    }
}

/// Class identity for `T`: its type name without the module path
///
/// Generic arguments are kept as-is, so `Vec<u8>` and `Vec<i32>` are
/// distinct classes.
pub fn class_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    let start = full[..head_end].rfind("::").map(|i| i + 2).unwrap_or(0);
    &full[start..]
}
