use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::input::InputSettings;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_from_or_default(&path)?;
    let input = config.input_settings();

    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    print_entry("defaults.theme", config.theme().unwrap_or("light (from deck if set)"));
    print_entry("defaults.windowed", &config.windowed().to_string());
    print_entry(
        "timer.minutes",
        &(config.timer_duration().as_secs() / 60).to_string(),
    );
    print_entry("input.keyboard", &input.keyboard.to_string());
    print_entry("input.touch", &input.touch.to_string());
    print_entry("input.pointer", &input.pointer.to_string());
    print_entry("input.swipe_threshold", &input.swipe_threshold.to_string());

    if input == InputSettings::default() && config.timer.is_none() && config.defaults.is_none() {
        println!();
        println!("{}", "All values are defaults.".dimmed());
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    set_at(&path, key, value)?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key.cyan(),
        value,
        path.display()
    );
    Ok(())
}

/// Update one key in the config at `path`, keeping every other setting.
fn set_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from_or_default(path)?;
    config.set(key, value)?;
    config.save_to(path)
}

fn print_entry(key: &str, value: &str) {
    println!("  {:<24} {}", key.cyan(), value);
}
