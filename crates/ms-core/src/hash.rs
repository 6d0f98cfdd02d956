//! Fast hash map and hash set type aliases.
//!
//! Type aliases for [`FxHashMap`] and [`FxHashSet`] from the `rustc-hash`
//! crate. The Fx hash algorithm is roughly 2x faster than the standard
//! library's default hasher for the short string keys this workspace deals
//! in (tags, extensions, paths), at the cost of denial-of-service
//! resistance — acceptable for a local daemon that never hashes untrusted
//! network input.

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// The hasher used by [`FxHashMap`] and [`FxHashSet`].
pub type FxBuildHasher = rustc_hash::FxBuildHasher;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_set_membership() {
        let mut set: FxHashSet<String> = FxHashSet::default();
        set.insert("mkv".to_owned());
        assert!(set.contains("mkv"));
        assert!(!set.contains("mp4"));
    }

    #[test]
    fn test_fx_hash_map_insert_lookup() {
        let mut map: FxHashMap<String, u32> = FxHashMap::default();
        map.insert("a".to_owned(), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
