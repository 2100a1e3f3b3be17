//! cml_rs
//!
//! A small blocking client for the **CrystalMathLabs** experience tracker API
//! (Old School RuneScape), plus the arithmetic helpers that go with it.
//! Pairs with the `cml` CLI.
//!
//! ### Features
//! - One method per tracker operation (`update`, `stats`, `track`, `datapoints`, …)
//!   returning the raw response text
//! - Optional typed parsing of the common responses
//! - Level/virtual level from experience, and the inverse
//! - Short duration strings like `2d8h3m5s`
//! - Save parsed stats as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use cml_rs::{Client, Period, skills};
//!
//! let client = Client::default();
//! let gains = client.track("Lynx Titan", Period::Week.seconds())?;
//! println!("{gains}");
//!
//! let stats = client.stats_parsed("Lynx Titan")?;
//! let attack = &stats.skills[skills::Skill::Attack.index()];
//! println!("attack level {}", attack.level());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod skills;
pub mod storage;
pub mod summary;

pub use api::Client;
pub use error::ApiError;
pub use models::{Operation, Period, Stats, Track, UpdateStatus};
pub use skills::Skill;
