//! Rule name → factory registry for regulatory elements.
//!
//! A map loader only sees generic [`RegulatoryElementData`] records. The
//! [`Registry`] maps the record's kind label (its `subtype` attribute) to a
//! factory that builds the matching typed element, so new kinds plug in
//! without the loader knowing them.
//!
//! A registry is an ordinary value; build one with [`Registry::new`] or
//! [`Registry::with_builtin_kinds`] and pass it around. For code that wants
//! a process-wide table, [`install`] publishes one registry exactly once,
//! after which [`global`] hands out shared references without locking.
//!
//! ```rust
//! use lanelet_roundabout::prelude::*;
//!
//! let registry = Registry::with_builtin_kinds();
//! let data = Roundabout::make(
//!     RegElemId::new(7),
//!     AttributeMap::new(),
//!     LaneletId::new(1),
//!     PolygonId::new(2),
//!     [],
//! )
//! .data()
//! .clone();
//!
//! let elem = registry.create(data).unwrap();
//! let rb = elem.downcast_ref::<Roundabout>().unwrap();
//! assert_eq!(rb.roundabout_area(), vec![PolygonId::new(2)]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::OnceCell;

use crate::map_error::MapError;
use crate::regulatory::data::RegulatoryElementData;
use crate::regulatory::element::{GenericRegulatoryElement, RegulatoryElement, RegulatoryElementKind};
use crate::regulatory::roundabout::Roundabout;

/// Builds a typed element from a generic record.
pub type Factory =
    Box<dyn Fn(RegulatoryElementData) -> Result<Box<dyn RegulatoryElement>, MapError> + Send + Sync>;

/// What to do when a rule name is registered a second time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first factory and log a warning.
    Ignore,
    /// Fail with [`MapError::DuplicateRuleName`].
    #[default]
    Error,
}

/// What to do with a record whose rule name has no registered factory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownRulePolicy {
    /// Keep the record as a [`GenericRegulatoryElement`] and log a warning.
    #[default]
    KeepGeneric,
    /// Fail with [`MapError::UnknownRuleName`] (or [`MapError::MissingRuleName`]).
    Error,
}

/// Registry configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub on_duplicate: DuplicatePolicy,
}

/// Loader configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    pub on_unknown_rule: UnknownRulePolicy,
}

/// Rule name → factory table.
pub struct Registry {
    config: RegistryConfig,
    factories: BTreeMap<String, Factory>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("rule_names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            factories: BTreeMap::new(),
        }
    }

    /// Creates a registry with every kind this crate defines registered.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::default();
        registry.register_builtin_kinds();
        registry
    }

    /// Registers every kind this crate defines.
    ///
    /// Kinds already present are skipped, whatever the duplicate policy.
    pub fn register_builtin_kinds(&mut self) {
        if !self.contains(Roundabout::RULE_NAME) {
            self.insert_factory(Roundabout::RULE_NAME, Box::new(build::<Roundabout>));
        }
    }

    /// Registers the kind `T` under [`RegulatoryElementKind::RULE_NAME`].
    pub fn register<T: RegulatoryElementKind>(&mut self) -> Result<(), MapError> {
        self.register_factory(T::RULE_NAME, build::<T>)
    }

    /// Registers `factory` under `rule_name`.
    ///
    /// # Errors
    /// Returns [`MapError::DuplicateRuleName`] if `rule_name` is taken and the
    /// duplicate policy is [`DuplicatePolicy::Error`].
    pub fn register_factory<F>(&mut self, rule_name: &str, factory: F) -> Result<(), MapError>
    where
        F: Fn(RegulatoryElementData) -> Result<Box<dyn RegulatoryElement>, MapError>
            + Send
            + Sync
            + 'static,
    {
        if self.contains(rule_name) {
            return match self.config.on_duplicate {
                DuplicatePolicy::Ignore => {
                    log::warn!("rule name `{rule_name}` already registered; keeping first factory");
                    Ok(())
                }
                DuplicatePolicy::Error => Err(MapError::DuplicateRuleName(rule_name.to_string())),
            };
        }
        self.insert_factory(rule_name, Box::new(factory));
        Ok(())
    }

    fn insert_factory(&mut self, rule_name: &str, factory: Factory) {
        log::debug!("registering regulatory element kind `{rule_name}`");
        self.factories.insert(rule_name.to_string(), factory);
    }

    pub fn contains(&self, rule_name: &str) -> bool {
        self.factories.contains_key(rule_name)
    }

    /// Registered rule names, sorted.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Builds the typed element for `data` through its registered factory.
    ///
    /// # Errors
    /// - [`MapError::MissingRuleName`] if `data` has no `subtype` attribute.
    /// - [`MapError::UnknownRuleName`] if no factory is registered for it.
    /// - Any error of the kind's constructor.
    pub fn create(&self, data: RegulatoryElementData) -> Result<Box<dyn RegulatoryElement>, MapError> {
        let rule_name = data
            .rule_name()
            .ok_or(MapError::MissingRuleName(data.id.id()))?;
        let factory = self
            .factories
            .get(rule_name)
            .ok_or_else(|| MapError::UnknownRuleName(rule_name.to_string()))?;
        log::debug!("building `{rule_name}` regulatory element {}", data.id);
        factory(data)
    }

    /// Like [`create`](Self::create), applying `config` to unregistered kinds.
    pub fn load(
        &self,
        data: RegulatoryElementData,
        config: &LoaderConfig,
    ) -> Result<Box<dyn RegulatoryElement>, MapError> {
        let registered = data.rule_name().is_some_and(|name| self.contains(name));
        if registered || config.on_unknown_rule == UnknownRulePolicy::Error {
            return self.create(data);
        }
        log::warn!(
            "regulatory element {} has unregistered rule name {:?}; keeping it generic",
            data.id,
            data.rule_name()
        );
        Ok(Box::new(GenericRegulatoryElement::new(data)))
    }
}

fn build<T: RegulatoryElementKind>(
    data: RegulatoryElementData,
) -> Result<Box<dyn RegulatoryElement>, MapError> {
    Ok(Box::new(T::from_data(data)?))
}

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Publishes `registry` as the process-wide registry.
///
/// # Errors
/// Returns [`MapError::RegistryAlreadyInstalled`] if a registry was already
/// installed; the existing one stays in place.
pub fn install(registry: Registry) -> Result<&'static Registry, MapError> {
    GLOBAL
        .set(registry)
        .map_err(|_| MapError::RegistryAlreadyInstalled)?;
    log::debug!("installed process-wide regulatory element registry");
    global()
}

/// Installs [`Registry::with_builtin_kinds`] unless a registry is already
/// installed, and returns the installed one.
pub fn init_default() -> &'static Registry {
    GLOBAL.get_or_init(Registry::with_builtin_kinds)
}

/// The process-wide registry.
///
/// # Errors
/// Returns [`MapError::RegistryNotInstalled`] before [`install`] or
/// [`init_default`] ran.
pub fn global() -> Result<&'static Registry, MapError> {
    GLOBAL.get().ok_or(MapError::RegistryNotInstalled)
}

/// Builds `data` through the process-wide registry.
pub fn create(data: RegulatoryElementData) -> Result<Box<dyn RegulatoryElement>, MapError> {
    global()?.create(data)
}
