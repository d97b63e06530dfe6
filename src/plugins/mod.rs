//! Plugin registry.
//!
//! Plugins are plain descriptors handed to [`PluginManager::load_plugins`] at
//! startup. Each descriptor may carry a registration hook that receives the
//! manager and registers command names and operations on it.

pub mod builtin;

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::constants;

/// Failure produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0}")]
    Domain(String),
}

/// A binary numeric operation contributed by a plugin.
pub type Operation = fn(f64, f64) -> Result<f64, OperationError>;

/// Registration hook invoked with the manager during loading.
pub type RegisterFn = fn(&mut PluginManager) -> Result<(), PluginError>;

/// Failures raised by a plugin's registration hook.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The plugin cannot be loaded in this environment. Loading continues.
    #[error("plugin unavailable: {0}")]
    Unavailable(String),
    /// The hook itself failed. Loading stops.
    #[error("plugin {plugin} failed to register: {reason}")]
    Registration { plugin: String, reason: String },
}

/// A plugin known at startup.
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    /// Plugin name used in logs and listings.
    pub name: &'static str,
    /// Optional registration hook; a plugin without one registers nothing.
    pub register: Option<RegisterFn>,
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("has_register", &self.register.is_some())
            .finish()
    }
}

/// Holds the commands and operations registered by loaded plugins.
#[derive(Default)]
pub struct PluginManager {
    commands: Vec<String>,
    operations: HashMap<String, Operation>,
}

impl PluginManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the registration hook of every descriptor, in order.
    ///
    /// A hook returning [`PluginError::Unavailable`] is logged and skipped.
    /// Registrations already made by earlier plugins are kept in every case.
    ///
    /// # Returns
    ///
    /// Names of the plugins that loaded.
    ///
    /// # Errors
    ///
    /// Any other hook error stops loading and is returned.
    pub fn load_plugins(
        &mut self,
        descriptors: &[PluginDescriptor],
    ) -> Result<Vec<&'static str>, PluginError> {
        let mut loaded = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let Some(register) = descriptor.register else {
                debug!(plugin = descriptor.name, "Plugin has no register hook");
                loaded.push(descriptor.name);
                continue;
            };

            match register(self) {
                Ok(()) => {
                    debug!(plugin = descriptor.name, "Loaded plugin");
                    loaded.push(descriptor.name);
                }
                Err(err @ PluginError::Unavailable(_)) => {
                    warn!("{}{}: {err}", constants::MSG_PLUGIN_LOAD_ERROR, descriptor.name);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(loaded)
    }

    /// Record a command name. Duplicates are kept.
    pub fn register_command(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Bind an operation to a name. A later registration replaces an earlier one.
    pub fn register_operation(&mut self, command: impl Into<String>, operation: Operation) {
        self.operations.insert(command.into(), operation);
    }

    /// Registered command names in registration order.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Look up an operation by name.
    #[must_use]
    pub fn get_operation(&self, command: &str) -> Option<Operation> {
        self.operations.get(command).copied()
    }
}

impl fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations: Vec<&String> = self.operations.keys().collect();
        operations.sort();
        f.debug_struct("PluginManager")
            .field("commands", &self.commands)
            .field("operations", &operations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unnecessary_wraps)]
    fn register_foo(manager: &mut PluginManager) -> Result<(), PluginError> {
        manager.register_command("foo");
        Ok(())
    }

    fn register_unavailable(_: &mut PluginManager) -> Result<(), PluginError> {
        Err(PluginError::Unavailable("No module named 'missing'".to_string()))
    }

    fn register_broken(_: &mut PluginManager) -> Result<(), PluginError> {
        Err(PluginError::Registration {
            plugin: "broken".to_string(),
            reason: "hook panicked".to_string(),
        })
    }

    #[allow(clippy::unnecessary_wraps)]
    fn register_bar(manager: &mut PluginManager) -> Result<(), PluginError> {
        manager.register_command("bar");
        manager.register_operation("bar", |a, b| Ok(a - b));
        Ok(())
    }

    #[test]
    fn test_register_command_from_plugin() {
        let mut manager = PluginManager::new();
        let loaded = manager
            .load_plugins(&[PluginDescriptor {
                name: "foo",
                register: Some(register_foo),
            }])
            .unwrap();

        assert_eq!(loaded, vec!["foo"]);
        assert!(manager.commands().contains(&"foo".to_string()));
    }

    #[test]
    fn test_unavailable_plugin_does_not_abort() {
        let mut manager = PluginManager::new();
        let loaded = manager
            .load_plugins(&[
                PluginDescriptor {
                    name: "missing",
                    register: Some(register_unavailable),
                },
                PluginDescriptor {
                    name: "foo",
                    register: Some(register_foo),
                },
            ])
            .unwrap();

        assert_eq!(loaded, vec!["foo"]);
        assert_eq!(manager.commands(), ["foo".to_string()]);
    }

    #[test]
    fn test_registration_failure_propagates() {
        let mut manager = PluginManager::new();
        let result = manager.load_plugins(&[
            PluginDescriptor {
                name: "foo",
                register: Some(register_foo),
            },
            PluginDescriptor {
                name: "broken",
                register: Some(register_broken),
            },
            PluginDescriptor {
                name: "bar",
                register: Some(register_bar),
            },
        ]);

        assert!(matches!(result, Err(PluginError::Registration { .. })));
        // Earlier registrations survive, later plugins never ran.
        assert_eq!(manager.commands(), ["foo".to_string()]);
        assert!(manager.get_operation("bar").is_none());
    }

    #[test]
    fn test_plugin_without_hook() {
        let mut manager = PluginManager::new();
        let loaded = manager
            .load_plugins(&[PluginDescriptor {
                name: "inert",
                register: None,
            }])
            .unwrap();

        assert_eq!(loaded, vec!["inert"]);
        assert!(manager.commands().is_empty());
    }

    #[test]
    fn test_get_operation() {
        let mut manager = PluginManager::new();
        manager
            .load_plugins(&[PluginDescriptor {
                name: "bar",
                register: Some(register_bar),
            }])
            .unwrap();

        let op = manager.get_operation("bar").unwrap();
        assert_eq!(op(5.0, 2.0), Ok(3.0));
        assert!(manager.get_operation("baz").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut manager = PluginManager::new();
        manager.register_operation("op", |a, _| Ok(a));
        manager.register_operation("op", |_, b| Ok(b));
        manager.register_command("op");
        manager.register_command("op");

        assert_eq!(manager.get_operation("op").unwrap()(1.0, 2.0), Ok(2.0));
        assert_eq!(manager.commands().len(), 2);
    }
}
