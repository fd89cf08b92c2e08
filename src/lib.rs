//! # clipsafe
//!
//! Archive CopyQ clipboard history into a searchable SQLite store.
//!
//! Clipboard managers cap how many items a tab retains; clipsafe drains
//! every tab through the `copyq` scripting interface and upserts the items
//! into SQLite, so history survives the manager's own retention limit.
//! Previously seen items only refresh their last-seen timestamp.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │ copyq eval - │──▶│  Sentinel     │──▶│   SQLite     │
//! │ (per tab)    │   │  reassembly  │   │ dedup store │
//! └──────────────┘   └──────────────┘   └──────┬──────┘
//!                                              │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │  CLI search  │
//!                                       │ (substring) │
//!                                       └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! clipsafe save                  # archive every tab
//! clipsafe save work             # archive one tab
//! clipsafe tabs                  # list tabs
//! clipsafe search example.com    # find an old clip
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`script`] | CopyQ extraction script generation |
//! | [`copyq`] | Subprocess boundary to the copyq binary |
//! | [`record`] | Sentinel-framed record reassembly |
//! | [`store`] | Dedup upsert, lookup, and substring search |
//! | [`backup`] | Concurrent per-tab archive orchestration |
//! | [`search`] | Search command and result formatting |
//! | [`db`] | Database connection |
//! | [`schema`] | Schema creation |

pub mod backup;
pub mod config;
pub mod copyq;
pub mod db;
pub mod models;
pub mod record;
pub mod schema;
pub mod script;
pub mod search;
pub mod store;
