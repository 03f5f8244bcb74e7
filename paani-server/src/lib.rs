//! Paani Server - water-can delivery service backend
//!
//! # Architecture
//!
//! The main entry point of the delivery backend, providing:
//!
//! - **Request lifecycle** (`lifecycle`): delivery status state machine
//! - **Queue ranking** (`queue`): admin/staff ordering contracts
//! - **Metrics** (`metrics`): dashboard and per-customer aggregates
//! - **Database** (`db`): embedded SQLite storage via sqlx
//! - **HTTP API** (`api`): RESTful JSON interface
//!
//! # Module structure
//!
//! ```text
//! paani-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Database layer (models + repositories)
//! ├── lifecycle.rs   # Status transition rules
//! ├── queue.rs       # Queue ranking and search
//! ├── metrics.rs     # Aggregation
//! └── utils/         # Errors, logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod metrics;
pub mod queue;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: dotenv and logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____                   _
   / __ \____ _____ _____ (_)
  / /_/ / __ `/ __ `/ __ \/ /
 / ____/ /_/ / /_/ / / / / /
/_/    \__,_/\__,_/_/ /_/_/
    "#
    );
}
