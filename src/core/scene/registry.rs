//=========================================================================
// Scene Registry
//=========================================================================
//
// Maps scene names to the functions that build them.
//
// Scenes are not stored. Every load builds a fresh instance, so a scene
// played twice starts from its first action both times.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{ActionSequence, Scene};
use crate::core::error::{Result, SceneError};

//=== SceneFactory ========================================================

/// Builds the action sequence of one scene.
///
/// Factories fail when their content is invalid (for example an empty
/// image path), which surfaces authoring errors at load time.
pub type SceneFactory = fn() -> Result<ActionSequence>;

//=== SceneRegistry =======================================================

/// Immutable name → scene table.
///
/// # Example
///
/// ```
/// use storyline_engine::prelude::*;
///
/// let registry = SceneRegistry::builtin();
/// assert!(registry.load("01_prologue").is_ok());
/// assert!(registry.load("prologue").is_ok());
/// assert!(registry.load("02_nope").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    factories: HashMap<String, SceneFactory>,
    aliases: HashMap<String, String>,
}

impl SceneRegistry {
    /// Starts an empty registry.
    pub fn builder() -> SceneRegistryBuilder {
        SceneRegistryBuilder::default()
    }

    /// Registry holding every scene shipped with the crate.
    pub fn builtin() -> Self {
        crate::content::register_builtin(Self::builder()).build()
    }

    /// Builds a fresh instance of the named scene.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if neither a scene nor an alias has
    /// that name, or the factory's own error if its content is invalid.
    pub fn load(&self, name: &str) -> Result<Scene> {
        let canonical = self
            .canonical_name(name)
            .ok_or_else(|| SceneError::UnknownScene { name: name.to_string() })?;
        let factory = self
            .factories
            .get(canonical)
            .ok_or_else(|| SceneError::UnknownScene { name: name.to_string() })?;

        debug!("Building scene '{}' (requested as '{}')", canonical, name);
        Ok(Scene::new(canonical, factory()?))
    }

    /// Resolves an alias to the registered scene name.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.factories.get_key_value(name) {
            return Some(key.as_str());
        }
        self.aliases.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// Registered scene names, sorted. Aliases are not included.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

//=== SceneRegistryBuilder ================================================

/// Collects scenes before the registry is frozen.
#[derive(Debug, Default)]
pub struct SceneRegistryBuilder {
    registry: SceneRegistry,
}

impl SceneRegistryBuilder {
    /// Registers a scene under `name`. Registering a name twice replaces
    /// the earlier factory.
    pub fn register(mut self, name: &str, factory: SceneFactory) -> Self {
        if self.registry.factories.insert(name.to_string(), factory).is_some() {
            warn!("Scene '{}' was already registered and has been replaced", name);
        }
        self
    }

    /// Makes `alias` load the scene registered as `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not registered yet.
    pub fn alias(mut self, alias: &str, name: &str) -> Self {
        assert!(
            self.registry.factories.contains_key(name),
            "Cannot alias '{}' to unregistered scene '{}'",
            alias,
            name
        );
        self.registry.aliases.insert(alias.to_string(), name.to_string());
        self
    }

    pub fn build(self) -> SceneRegistry {
        debug!("Scene registry built with {} scene(s)", self.registry.len());
        self.registry
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
