use anyhow::Result;
use owo_colors::OwoColorize;
use ratiba_core::config::RatibaConfig;

pub fn run() -> Result<()> {
    let config_path = RatibaConfig::config_path()?;
    let config = RatibaConfig::load()?;

    println!("{}", "Config".bold());
    println!("  File:   {}", config_path.display());
    println!(
        "  URL:    {}",
        config.supabase_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  Key:    {}",
        if config.supabase_anon_key.is_some() { "set" } else { "(not set)" }
    );
    println!("  Table:  {}", config.table);

    Ok(())
}
