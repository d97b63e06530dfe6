//! Plugins shipped with the binary.

use super::{OperationError, PluginDescriptor, PluginError, PluginManager};

/// Every built-in plugin, in load order.
pub const BUILTIN_PLUGINS: [PluginDescriptor; 3] = [
    PluginDescriptor {
        name: "arithmetic",
        register: Some(register_arithmetic),
    },
    PluginDescriptor {
        name: "power",
        register: Some(register_power),
    },
    PluginDescriptor {
        name: "modulo",
        register: Some(register_modulo),
    },
];

/// Built-in plugins minus the ones named in `disabled`.
#[must_use]
pub fn enabled(disabled: &[String]) -> Vec<PluginDescriptor> {
    BUILTIN_PLUGINS
        .iter()
        .filter(|d| !disabled.iter().any(|name| name == d.name))
        .copied()
        .collect()
}

#[allow(clippy::unnecessary_wraps)]
fn register_arithmetic(manager: &mut PluginManager) -> Result<(), PluginError> {
    manager.register_command("add");
    manager.register_operation("add", |a, b| Ok(a + b));
    manager.register_command("subtract");
    manager.register_operation("subtract", |a, b| Ok(a - b));
    manager.register_command("multiply");
    manager.register_operation("multiply", |a, b| Ok(a * b));
    manager.register_command("divide");
    manager.register_operation("divide", divide);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn register_power(manager: &mut PluginManager) -> Result<(), PluginError> {
    manager.register_command("power");
    manager.register_operation("power", |a, b| Ok(a.powf(b)));
    manager.register_command("root");
    manager.register_operation("root", root);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn register_modulo(manager: &mut PluginManager) -> Result<(), PluginError> {
    manager.register_command("modulo");
    manager.register_operation("modulo", modulo);
    Ok(())
}

fn divide(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b)
}

fn modulo(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a % b)
}

/// `b`-th root of `a`.
fn root(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::Domain("zeroth root is undefined".to_string()));
    }
    if a < 0.0 {
        return Err(OperationError::Domain(
            "root of a negative number is undefined".to_string(),
        ));
    }
    Ok(a.powf(1.0 / b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> PluginManager {
        let mut manager = PluginManager::new();
        manager.load_plugins(&BUILTIN_PLUGINS).unwrap();
        manager
    }

    fn eval(manager: &PluginManager, command: &str, a: f64, b: f64) -> Result<f64, OperationError> {
        manager.get_operation(command).unwrap()(a, b)
    }

    #[test]
    fn test_builtin_commands_registered() {
        let manager = loaded();
        assert_eq!(
            manager.commands(),
            ["add", "subtract", "multiply", "divide", "power", "root", "modulo"]
                .map(String::from)
        );
    }

    #[test]
    fn test_arithmetic() {
        let manager = loaded();
        assert_eq!(eval(&manager, "add", 5.0, 2.0), Ok(7.0));
        assert_eq!(eval(&manager, "subtract", 5.0, 2.0), Ok(3.0));
        assert_eq!(eval(&manager, "multiply", 5.0, 2.0), Ok(10.0));
        assert_eq!(eval(&manager, "divide", 5.0, 2.0), Ok(2.5));
        assert_eq!(
            eval(&manager, "divide", 5.0, 0.0),
            Err(OperationError::DivisionByZero)
        );
    }

    #[test]
    fn test_power_and_root() {
        let manager = loaded();
        assert!((eval(&manager, "power", 2.0, 3.0).unwrap() - 8.0).abs() < 1e-9);
        assert!((eval(&manager, "root", 9.0, 2.0).unwrap() - 3.0).abs() < 1e-9);
        assert!(eval(&manager, "root", -8.0, 3.0).is_err());
        assert!(eval(&manager, "root", 8.0, 0.0).is_err());
    }

    #[test]
    fn test_modulo() {
        let manager = loaded();
        assert_eq!(eval(&manager, "modulo", 7.0, 3.0), Ok(1.0));
        assert!(eval(&manager, "modulo", 7.0, 0.0).is_err());
    }

    #[test]
    fn test_enabled_filters_disabled() {
        let plugins = enabled(&["power".to_string()]);
        let names: Vec<&str> = plugins.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["arithmetic", "modulo"]);
    }
}
