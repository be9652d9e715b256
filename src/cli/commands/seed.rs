//! Seed command handler

use std::path::Path;

use crate::config::Config;
use crate::db::{SeedData, Store};

pub async fn cmd_seed(config: &Config, file: &Path) -> anyhow::Result<()> {
    let data = SeedData::load_from_path(file)?;
    data.validate()?;

    let store = Store::new(&config.general.database_path).await?;
    let report = store.seed(&data).await?;

    println!("✓ Seeded {}", file.display());
    println!("  Users:   {}", report.users);
    println!("  People:  {}", report.people);
    println!("  Planets: {}", report.planets);

    Ok(())
}
