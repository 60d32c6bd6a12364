//! Apply every loaded plugin to a pair of operands

use anyhow::Result;
use clap::Args;
use plugcalc_core::CalculatorHost;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Left operand (defaults to operands.x from config)
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Right operand (defaults to operands.y from config)
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: Option<i32>,
}

pub fn run(args: RunArgs, plugin_dir: Option<PathBuf>) -> Result<()> {
    let (config, registry) = super::init_registry(plugin_dir)?;
    let x = args.x.unwrap_or(config.operands.x);
    let y = args.y.unwrap_or(config.operands.y);

    let plugins = registry.current();
    if plugins.is_empty() {
        println!(
            "No plugins found in {}",
            registry.config().resolved_plugin_dir()?.display()
        );
        return Ok(());
    }

    for mut host in plugins.hosts() {
        host.set_x(x);
        host.set_y(y);
        println!("{}", render(&host));
    }

    Ok(())
}

/// One output line; a calculator fault is shown in place of the result.
fn render(host: &CalculatorHost<'_>) -> String {
    match host.display() {
        Ok(line) => line,
        Err(e) => format!("{} {} {} = error: {}", host.x(), host.symbol(), host.y(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugcalc_core::{LoadPolicy, PluginHostConfig, PluginRegistry};
    use plugcalc_plugin_api::{
        CalculationError, Calculator, ExportedType, ModuleExports,
    };
    use tempfile::TempDir;

    #[derive(Default)]
    struct Quotient;

    impl Calculator for Quotient {
        fn calculate(&self, a: i32, b: i32) -> Result<i32, CalculationError> {
            a.checked_div(b).ok_or(CalculationError::DivideByZero)
        }

        fn symbol(&self) -> char {
            '/'
        }
    }

    fn exports() -> ModuleExports {
        ModuleExports::new().with(ExportedType::calculator::<Quotient>().described("Divides"))
    }

    fn registry(dir: &TempDir) -> PluginRegistry {
        let registry = PluginRegistry::new(PluginHostConfig {
            plugin_dir: dir.path().to_path_buf(),
            policy: LoadPolicy::Abort,
        })
        .with_builtin("quotient", exports);
        registry.initialize().unwrap();
        registry
    }

    #[test]
    fn test_render_result() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let plugins = registry.current();
        let mut host = plugins.hosts().remove(0);
        host.set_x(8);
        host.set_y(2);

        assert_eq!(render(&host), "8 / 2 = 4");
    }

    #[test]
    fn test_render_fault_in_place_of_result() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let plugins = registry.current();
        let mut host = plugins.hosts().remove(0);
        host.set_x(8);
        host.set_y(0);

        assert_eq!(render(&host), "8 / 0 = error: Attempted to divide by zero");
    }
}
