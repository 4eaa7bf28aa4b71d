//! Memoization of compiled style sheets.
//!
//! Entries are keyed by theme name, content fingerprint, context and
//! compiler version, so two distinct loads of the same underlying theme
//! hit the cache while a changed theme or a newer compiler never serves
//! stale text. The cache is an optimization only: it is cleared
//! wholesale on theme-identity changes and any conceivable failure
//! degrades to direct compilation.

use crate::compile::{COMPILER_VERSION, CompiledStyle, compile};
use crate::theme::types::{Context, ThemeDefinition};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Fingerprint over the normalized colors mapping and token rules.
///
/// Colors live in a `BTreeMap`, so iteration order (and therefore the
/// digest) is stable regardless of how the source document ordered its
/// keys. Token rules are hashed in definition order because their order
/// is semantic.
pub fn fingerprint(definition: &ThemeDefinition) -> [u8; 32] {
    let mut hasher = Sha256::new();

    for (key, color) in &definition.colors {
        hasher.update(key.as_bytes());
        hasher.update([0u8]);
        hasher.update([color.r, color.g, color.b, color.a]);
    }

    for rule in &definition.token_rules {
        for scope in &rule.scopes {
            hasher.update(scope.as_bytes());
            hasher.update([1u8]);
        }
        match rule.style.foreground {
            Some(color) => hasher.update([2u8, color.r, color.g, color.b, color.a]),
            None => hasher.update([3u8]),
        }
        hasher.update([rule.style.italic as u8, rule.style.bold as u8]);
    }

    hasher.finalize().into()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    theme_name: String,
    fingerprint: [u8; 32],
    context: Context,
    version: u32,
}

/// In-memory style cache owned by the theme manager.
pub struct StyleCache {
    entries: HashMap<CacheKey, CompiledStyle>,
    compiles: u64,
}

impl StyleCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            compiles: 0,
        }
    }

    /// Return the cached sheet for this exact key, compiling and storing
    /// it on a miss.
    pub fn get_or_compile(
        &mut self,
        definition: &ThemeDefinition,
        context: Context,
    ) -> CompiledStyle {
        let key = CacheKey {
            theme_name: definition.name.clone(),
            fingerprint: fingerprint(definition),
            context,
            version: COMPILER_VERSION,
        };

        if let Some(cached) = self.entries.get(&key) {
            log::debug!("Style cache hit: {} / {context}", definition.name);
            return cached.clone();
        }

        log::debug!("Style cache miss: {} / {context}", definition.name);
        self.compiles += 1;
        let compiled = compile(definition, context);
        self.entries.insert(key, compiled.clone());
        compiled
    }

    /// Drop every entry. Called when the active theme changes identity;
    /// entries are immutable once stored, so partial invalidation is
    /// never needed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of actual compilations performed; test probe for the
    /// cache-hit property.
    pub fn compile_count(&self) -> u64 {
        self.compiles
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::loader::load;
    use serde_json::json;

    fn sample(name: &str) -> ThemeDefinition {
        load(&json!({
            "name": name,
            "colors": {
                "editor.background": "#1e1e1e",
                "button.background": "#0e639c"
            },
            "tokenColors": [
                { "scope": "comment", "settings": { "foreground": "#5c6370" } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_equal_content_distinct_instances_hit() {
        let mut cache = StyleCache::new();

        let first_load = sample("Theme");
        let second_load = sample("Theme");
        assert!(!std::ptr::eq(&first_load, &second_load));

        let a = cache.get_or_compile(&first_load, Context::Shell);
        assert_eq!(cache.compile_count(), 1);

        let b = cache.get_or_compile(&second_load, Context::Shell);
        assert_eq!(cache.compile_count(), 1, "second lookup must not compile");
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn test_contexts_cache_independently() {
        let mut cache = StyleCache::new();
        let definition = sample("Theme");

        cache.get_or_compile(&definition, Context::Shell);
        cache.get_or_compile(&definition, Context::DocumentSurface);
        cache.get_or_compile(&definition, Context::TitleBar);
        assert_eq!(cache.compile_count(), 3);
        assert_eq!(cache.len(), 3);

        cache.get_or_compile(&definition, Context::DocumentSurface);
        assert_eq!(cache.compile_count(), 3);
    }

    #[test]
    fn test_content_change_misses() {
        let mut cache = StyleCache::new();
        let original = sample("Theme");
        let mut edited = original.clone();
        edited.colors.insert(
            "editor.background".to_string(),
            crate::theme::types::Color::rgb(0, 0, 0),
        );

        cache.get_or_compile(&original, Context::Shell);
        cache.get_or_compile(&edited, Context::Shell);
        assert_eq!(cache.compile_count(), 2);
        assert_ne!(fingerprint(&original), fingerprint(&edited));
    }

    #[test]
    fn test_token_rule_order_affects_fingerprint() {
        let mut reordered = sample("Theme");
        reordered.token_rules.push(crate::theme::types::TokenRule {
            scopes: vec!["keyword".to_string()],
            style: crate::theme::types::TokenStyle {
                foreground: None,
                italic: false,
                bold: true,
            },
        });
        let mut swapped = reordered.clone();
        swapped.token_rules.reverse();

        assert_ne!(fingerprint(&reordered), fingerprint(&swapped));
    }

    #[test]
    fn test_clear_forces_recompile() {
        let mut cache = StyleCache::new();
        let definition = sample("Theme");

        cache.get_or_compile(&definition, Context::Shell);
        cache.clear();
        assert!(cache.is_empty());

        cache.get_or_compile(&definition, Context::Shell);
        assert_eq!(cache.compile_count(), 2);
    }
}
