//! `cur status`: print the persisted counters and last-iteration summary.

use anyhow::Context as _;
use cur_config::CuratorConfig;
use cur_state::StateStore;

pub fn handle(config: &CuratorConfig) -> anyhow::Result<()> {
    let store = StateStore::new(config.general.state_file());
    let state = store
        .load()
        .with_context(|| format!("failed to load state from {}", store.path().display()))?;

    println!("state file:      {}", store.path().display());
    println!("initialized:     {}", state.initialized_at.to_rfc3339());
    println!("apps generated:  {}", state.stats.total_apps_generated);
    println!("bugs fixed:      {}", state.stats.total_bugs_fixed);
    println!("registered apps: {}", state.total_apps());

    if !state.category_counts.is_empty() {
        println!("\nper category:");
        for (category, count) in &state.category_counts {
            println!("  {category}: {count}");
        }
    }

    match &state.last_iteration {
        Some(last) => {
            println!("\nlast iteration:  {}", last.timestamp.to_rfc3339());
            println!("  new apps:      {}", last.new_apps.len());
            for app in &last.new_apps {
                println!("    - {app}");
            }
            println!("  bugs fixed:    {}", last.bugs_fixed.len());
            for fix in &last.bugs_fixed {
                println!("    - {fix}");
            }
        }
        None => println!("\nno iterations recorded yet"),
    }

    Ok(())
}
