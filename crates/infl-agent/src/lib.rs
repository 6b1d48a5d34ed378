//! `infl-agent` — Structure-of-Arrays agent storage for the influence field
//! engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `Position`, `AgentStore` (SoA arrays + revision counter)  |
//! | [`spawn`]       | Random and circle spawners                                |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod spawn;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use spawn::{circle_offsets, spawn_circle, spawn_random};
pub use store::{AgentStore, Position};
