//! View handles and the reuse identifier registry.
//!
//! The engine is headless: it never creates or draws views. The host
//! assigns each concrete view a stable [`ViewId`] (a pointer value, an
//! arena index, whatever is convenient) and hands the engine
//! lightweight [`ViewHandle`]s carrying that id plus the view's
//! measured size.

use rustc_hash::FxHashMap;

use crate::error::ListError;

/// Identity of a host-owned view object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// A reference to a host view: identity plus measured size.
///
/// Handles are plain values; ownership of the underlying view stays
/// with the host. While a handle sits in a reuse pool the host must
/// not repurpose the view it names.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewHandle {
    pub id: ViewId,
    pub width: f32,
    pub height: f32,
}

impl ViewHandle {
    pub fn new(id: ViewId, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// Associates views with reuse identifier tags.
///
/// A tag groups interchangeable view shapes for recycling: when an
/// item's view goes off screen it is pooled under its tag, and any
/// later item asking for that tag may receive it. Tags are write-once
/// per view; registering the same tag again is a no-op, registering a
/// different one is an error.
#[derive(Debug, Default)]
pub struct ReuseIdentifierRegistry {
    tags: FxHashMap<ViewId, String>,
}

impl ReuseIdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags a view for recycling.
    pub fn register(&mut self, view: ViewId, tag: &str) -> Result<(), ListError> {
        match self.tags.get(&view) {
            Some(existing) if existing == tag => Ok(()),
            Some(existing) => Err(ListError::ReuseIdentifierReassigned {
                view,
                existing: existing.clone(),
            }),
            None => {
                self.tags.insert(view, tag.to_owned());
                Ok(())
            }
        }
    }

    /// The tag a view was registered under, if any. Untagged views are
    /// never pooled.
    pub fn tag(&self, view: ViewId) -> Option<&str> {
        self.tags.get(&view).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_look_up() {
        let mut registry = ReuseIdentifierRegistry::new();
        registry.register(ViewId(1), "cell").unwrap();

        assert_eq!(registry.tag(ViewId(1)), Some("cell"));
        assert_eq!(registry.tag(ViewId(2)), None);
    }

    #[test]
    fn test_same_tag_is_idempotent() {
        let mut registry = ReuseIdentifierRegistry::new();
        registry.register(ViewId(1), "cell").unwrap();
        registry.register(ViewId(1), "cell").unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tags_are_write_once() {
        let mut registry = ReuseIdentifierRegistry::new();
        registry.register(ViewId(1), "cell").unwrap();

        let err = registry.register(ViewId(1), "banner").unwrap_err();
        assert_eq!(
            err,
            ListError::ReuseIdentifierReassigned {
                view: ViewId(1),
                existing: "cell".to_owned(),
            }
        );
        // The original tag survives the failed attempt.
        assert_eq!(registry.tag(ViewId(1)), Some("cell"));
    }
}
