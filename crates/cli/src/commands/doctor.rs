//! `pathfinder doctor` — Diagnose config, credential, and reference data.

use pathfinder_catalog::ReferenceCatalogs;
use pathfinder_config::AppConfig;
use pathfinder_core::provider::Provider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Path Finder Doctor — System Diagnostics");
    println!("==========================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — using defaults (run `pathfinder onboard`)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue found. Fix the config before continuing.");
            return Ok(());
        }
    };

    // Check API key. Absence is not fatal here either — the chat command
    // reports it on the first completion attempt.
    if config.has_api_key() {
        println!("  ✅ API key configured");

        let provider = pathfinder_providers::build_from_config(&config);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider reachable: {}", config.api_url),
            Ok(false) => {
                println!("  ⚠️  Provider rejected the probe: {}", config.api_url);
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider unreachable: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ⚠️  No API key — export OPENAI_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Check reference datasets
    if config.data_dir.is_dir() {
        println!("  ✅ Data directory exists: {}", config.data_dir.display());
        match ReferenceCatalogs::load(&config.data_dir) {
            Ok(catalogs) => {
                let (modules, careers, regulations) = catalogs.entry_counts();
                println!(
                    "  ✅ Catalogs loaded ({modules} module, {careers} career, {regulations} regulation entries)"
                );
            }
            Err(e) => {
                println!("  ❌ {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ Data directory missing: {}", config.data_dir.display());
        issues += 1;
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
