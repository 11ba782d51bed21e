//! Interactive form command handler.

use anyhow::Result;
use onduty_core::Config;
use onduty_tui::Services;

pub async fn run(config: &Config) -> Result<()> {
    let route = onduty_tui::run_interactive_login(config, Services::from_config(config)).await?;
    if let Some(route) = route {
        println!("{route}");
    }
    Ok(())
}
