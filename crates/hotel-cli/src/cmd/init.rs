use anyhow::Context;
use hotel_core::{config::Config, io, paths, repository::Repository, store::FileStore};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let hotel_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "hotel".to_string())
    });

    println!("Initializing hotel data in: {}", root.display());

    let hotel_dir = paths::hotel_dir(root);
    io::ensure_dir(&hotel_dir)
        .with_context(|| format!("failed to create {}", hotel_dir.display()))?;

    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to load config.yaml")?
    } else {
        let cfg = Config::new(&hotel_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    let storage_dir = config.storage_dir(root);
    io::ensure_dir(&storage_dir)
        .with_context(|| format!("failed to create {}", storage_dir.display()))?;

    let repo = Repository::new(FileStore::new(storage_dir.clone()));
    let created = repo
        .ensure_initialized()
        .context("failed to initialize collections")?;
    for key in paths::ALL_KEYS {
        let state = if created.contains(&key) { "created" } else { "exists" };
        println!("  {:<8} {key}.{}", format!("{state}:"), paths::STORAGE_EXT);
    }

    println!("\nReady. Try: hotel lookup <cedula>");
    Ok(())
}
