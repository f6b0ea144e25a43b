use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{Glyph, GlyphKey};

/// Glyphs keyed by character and style.
///
/// There is no eviction: entries live until they are overwritten by a larger
/// rendering of the same key or the cache is drained.
#[derive(Debug)]
pub struct GlyphCache<T> {
    entries: HashMap<GlyphKey, Glyph<T>>,
}

impl<T> GlyphCache<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Returns the entry for `key` if it was rendered at `font_size` or larger.
    pub fn lookup(&self, key: &GlyphKey, font_size: f32) -> Option<&Glyph<T>> {
        self.entries.get(key).filter(|g| g.font_size >= font_size)
    }

    /// Returns the entry for `key` regardless of its size.
    pub fn get(&self, key: &GlyphKey) -> Option<&Glyph<T>> {
        self.entries.get(key)
    }

    /// Stores `glyph`, returning the entry it replaced.
    pub fn insert(&mut self, key: GlyphKey, glyph: Glyph<T>) -> Option<Glyph<T>> {
        self.entries.insert(key, glyph)
    }

    /// Returns the entry for `key` if it is large enough, otherwise stores the
    /// glyph built by `make` and hands back the entry it superseded.
    pub fn get_or_insert_with(
        &mut self,
        key: GlyphKey,
        font_size: f32,
        make: impl FnOnce() -> Glyph<T>,
    ) -> (&Glyph<T>, Option<Glyph<T>>) {
        match self.entries.entry(key) {
            Entry::Occupied(e) if e.get().font_size >= font_size => (e.into_mut(), None),
            Entry::Occupied(mut e) => {
                let old = e.insert(make());
                (e.into_mut(), Some(old))
            }
            Entry::Vacant(e) => (e.insert(make()), None),
        }
    }

    pub fn contains(&self, key: &GlyphKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, yielding them for resource cleanup.
    pub fn drain(&mut self) -> impl Iterator<Item = Glyph<T>> + '_ {
        self.entries.drain().map(|(_, glyph)| glyph)
    }
}

impl<T> Default for GlyphCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::GlyphStyle;

    fn entry(texture: u32, font_size: f32) -> Glyph<u32> {
        let mut g = Glyph::advance_only(10.0, Some(1), font_size);
        g.texture = Some(texture);
        g
    }

    const A_FILL: GlyphKey = GlyphKey::new('A', GlyphStyle::Fill);
    const A_STROKE: GlyphKey = GlyphKey::new('A', GlyphStyle::Stroke);

    #[test]
    fn lookup_honours_stored_size() {
        let mut cache = GlyphCache::new();
        cache.insert(A_FILL, entry(1, 100.0));

        assert!(cache.lookup(&A_FILL, 100.0).is_some());
        assert!(cache.lookup(&A_FILL, 80.0).is_some());
        assert!(cache.lookup(&A_FILL, 120.0).is_none());
        assert!(cache.get(&A_FILL).is_some());
    }

    #[test]
    fn insert_returns_superseded_entry() {
        let mut cache = GlyphCache::new();
        assert!(cache.insert(A_FILL, entry(1, 50.0)).is_none());

        let old = cache.insert(A_FILL, entry(2, 100.0)).unwrap();
        assert_eq!(old.texture, Some(1));
        assert_eq!(cache.get(&A_FILL).unwrap().texture, Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn styles_are_separate_keys() {
        let mut cache = GlyphCache::new();
        cache.insert(A_FILL, entry(1, 100.0));
        assert!(!cache.contains(&A_STROKE));

        cache.insert(A_STROKE, entry(2, 100.0));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&A_FILL).unwrap().texture, Some(1));
    }

    #[test]
    fn drain_empties_cache() {
        let mut cache = GlyphCache::new();
        cache.insert(A_FILL, entry(1, 100.0));
        cache.insert(A_STROKE, entry(2, 100.0));

        let mut textures: Vec<_> = cache.drain().filter_map(|g| g.texture).collect();
        textures.sort_unstable();
        assert_eq!(textures, vec![1, 2]);
        assert!(cache.is_empty());
    }
}
