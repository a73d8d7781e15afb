use anyhow::Result;
use specbuild::Config;

pub fn cmd_config(config: &Config, json: bool) -> Result<()> {
    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "config",
            "config": serde_json::to_value(config)?,
        }))?;
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
