use common::AppConfig;
use migration::runner;
use std::{fs, path::Path};

#[tokio::main]
async fn main() {
    let config = match AppConfig::init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let db_path = &config.database_path;
    let url = config.database_url();

    match std::env::args().nth(1).as_deref() {
        Some("clean") => {
            remove_db_file(db_path);
        }
        Some("fresh") => {
            remove_db_file(db_path);
            create_db_dir(db_path);
            runner::run_all_migrations(&url).await;
        }
        _ => {
            create_db_dir(db_path);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}
