use std::path::PathBuf;

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::get_data_dir;

fn default_path() -> Result<PathBuf> {
    let dir = get_data_dir().join("backups");
    std::fs::create_dir_all(&dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    Ok(dir.join(format!("contas-{stamp}.db")))
}

pub fn run(output: Option<String>) -> Result<()> {
    let store = open_store()?;
    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => default_path()?,
    };
    store.storage().backup_to(&dest)?;
    let size = std::fs::metadata(&dest)?.len();
    println!("Backup saved to {} ({})", dest.display(), format_bytes(size));
    Ok(())
}
