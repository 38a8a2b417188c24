//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pairwork_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use pairwork_core::db::{migrations::latest_version, open_db_in_memory};

fn main() {
    println!("pairwork_core ping={}", pairwork_core::ping());
    println!("pairwork_core version={}", pairwork_core::core_version());

    match open_db_in_memory() {
        Ok(_conn) => println!("pairwork_core schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("pairwork_core schema bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
