//! The `init` and `config` commands

use crate::config::{PluginPaths, Settings};
use crate::error::PhantomResult;

/// Handle the `init` command
///
/// An existing settings file is left untouched.
pub fn handle_init(paths: &PluginPaths, settings: &Settings) -> PhantomResult<()> {
    if paths.is_initialized() {
        println!(
            "Settings already exist at {}",
            paths.settings_file().display()
        );
        return Ok(());
    }

    settings.save(paths)?;
    println!("Wrote settings to {}", paths.settings_file().display());
    Ok(())
}

/// Handle the `config` command
pub fn handle_config(paths: &PluginPaths, settings: &Settings) -> PhantomResult<()> {
    print!("{}", format_config(paths, settings)?);
    Ok(())
}

/// Render the configuration report
pub fn format_config(paths: &PluginPaths, settings: &Settings) -> PhantomResult<String> {
    let logger = settings.logger(paths);

    let settings_state = if paths.is_initialized() {
        ""
    } else {
        " (not written, using defaults)"
    };
    let log_state = if logger.exists() {
        format!("{} entries", logger.entry_count()?)
    } else {
        "not created yet".to_string()
    };

    let mut output = String::new();
    output.push_str("phantom-budget Configuration\n");
    output.push_str("============================\n");
    output.push_str(&format!("Base directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!(
        "Settings file:  {}{}\n",
        paths.settings_file().display(),
        settings_state
    ));
    output.push_str(&format!("Log file:       {}\n", logger.path().display()));
    output.push_str(&format!("Log contents:   {}\n", log_state));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Log level: {}\n", settings.log_level));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LogLevel;
    use tempfile::TempDir;

    fn create_test_paths() -> (PluginPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PluginPaths::with_base_dir(temp_dir.path().join("plugin"));
        (paths, temp_dir)
    }

    #[test]
    fn test_config_before_init() {
        let (paths, _temp) = create_test_paths();
        let settings = Settings::default();

        let output = format_config(&paths, &settings).unwrap();

        assert!(output.contains("(not written, using defaults)"));
        assert!(output.contains("Log contents:   not created yet"));
    }

    #[test]
    fn test_config_counts_log_entries() {
        let (paths, _temp) = create_test_paths();
        let settings = Settings::default();
        paths.ensure_directories().unwrap();

        let logger = settings.logger(&paths);
        logger.write_header("SC4RemovePhantomBudgetItems v1.0.0").unwrap();
        logger.log(LogLevel::Error, "subscribe failed").unwrap();

        let output = format_config(&paths, &settings).unwrap();

        assert!(output.contains("Log contents:   2 entries"));
    }

    #[test]
    fn test_init_keeps_existing_settings() {
        let (paths, _temp) = create_test_paths();
        let mut settings = Settings::default();
        settings.log_level = LogLevel::Debug;
        settings.save(&paths).unwrap();

        handle_init(&paths, &Settings::default()).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.log_level, LogLevel::Debug);
        assert!(!format_config(&paths, &loaded)
            .unwrap()
            .contains("using defaults"));
    }
}
