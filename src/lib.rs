pub mod actions;
mod config;
pub mod entities;
pub mod scripting;
pub mod telemetry;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::action::{Action, ActionHandler, ActionUse};
pub use actions::dispatch::{ActionContext, Actions};
pub use actions::registry::{ActionRegistry, LoadReport};
pub use actions::rules::{load_rules, parse_rules, IdTable, RawActionRule, RuleError};
pub use config::{ActionsConfig, AppConfig, ConfigError};
pub use scripting::interface::{ScriptCatalog, ScriptError, ScriptInterface};
pub use world::game::{GameWorld, Thing};
pub use world::return_value::ReturnValue;

pub fn run(args: &[String]) -> Result<(), String> {
    let config = AppConfig::from_args(args).map_err(|err| err.to_string())?;
    telemetry::logging::init(&config.root, &config.log_level)?;
    let actions_config =
        ActionsConfig::load(&config.config_path()).map_err(|err| err.to_string())?;
    let rules = load_rules(&config.rules_path).map_err(|err| err.to_string())?;

    let mut scripts = ScriptCatalog::new(&config.scripts_dir);
    let mut actions = Actions::new(&actions_config);
    let report = actions.load(&rules, &mut scripts);
    let registry = actions.registry();

    println!("tibia-actions: rules loaded");
    println!("- root: {}", config.root.display());
    println!("- rules file: {}", config.rules_path.display());
    println!(
        "- rules: total={}, registered={}, skipped={}",
        report.rules, report.registered, report.skipped
    );
    println!(
        "- item ids: {}, unique ids: {}, action ids: {}",
        registry.len(IdTable::ItemId),
        registry.len(IdTable::UniqueId),
        registry.len(IdTable::ActionId)
    );
    println!("- distinct actions: {}", registry.distinct_actions());
    println!(
        "- scripts: {} in {}",
        scripts.len(),
        config.scripts_dir.display()
    );
    println!(
        "- delays: actions={}ms, ex actions={}ms",
        actions_config.actions_delay_ms, actions_config.ex_actions_delay_ms
    );
    if report.skipped > 0 {
        eprintln!(
            "tibia-actions: {} rules skipped, see log/game.log",
            report.skipped
        );
    }
    tracing::info!(
        "action engine ready: {} ids across {} actions",
        registry.len(IdTable::ItemId)
            + registry.len(IdTable::UniqueId)
            + registry.len(IdTable::ActionId),
        registry.distinct_actions()
    );
    Ok(())
}
