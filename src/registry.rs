use crate::{
    error::RegistryError,
    theories,
    theory::{Theory, TheoryDefinition},
};
use log::info;
use std::collections::BTreeMap;

/// Theories by key (`set_theory`, `bool_alg`, `prop_logic`, ...)
#[derive(Debug, Clone, Default)]
pub struct TheoryRegistry {
    theories: BTreeMap<String, Theory>,
}

impl TheoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the shipped theories
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_definitions(theories::builtin())
    }

    /// Builds a theory from each definition and registers it
    ///
    /// # Errors
    /// * Theory - if a definition's symbols are inconsistent
    /// * NameCollision - if two definitions share a key
    pub fn from_definitions<D>(definitions: D) -> Result<Self, RegistryError>
    where
        D: IntoIterator<Item = TheoryDefinition>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(Theory::new(definition)?)?;
        }
        Ok(registry)
    }

    /// Adds `theory` under its name
    ///
    /// # Errors
    /// * NameCollision - if a theory of the same name is already registered
    pub fn register(&mut self, theory: Theory) -> Result<(), RegistryError> {
        if self.theories.contains_key(theory.name()) {
            return Err(RegistryError::NameCollision(theory.name().to_owned()));
        }
        info!("registered theory {}", theory.name());
        self.theories.insert(theory.name().to_owned(), theory);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Theory, RegistryError> {
        self.theories
            .get(name)
            .ok_or_else(|| RegistryError::TheoryNotFound(name.to_owned()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Theory, RegistryError> {
        self.theories
            .get_mut(name)
            .ok_or_else(|| RegistryError::TheoryNotFound(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.theories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.theories.keys().map(|k| k.as_str())
    }
}
