//! `infl-field` — influence field computation and publication.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`layout`]      | `UnitSource` trait, `[Unit]` (AoS) and `UnitSoa` (SoA)      |
//! | [`caps`]        | `Capabilities` — one-time CPU feature probe                 |
//! | [`kernel`]      | `FieldKernel` trait, scalar / 4-wide / 8-wide kernels, `Kernel` |
//! | [`compute`]     | `compute_into`, `FieldComputer`, background `FieldJob`      |
//! | [`buffer`]      | `ScratchField` → `ComputedField` → `FieldSnapshot`          |
//! | [`publisher`]   | `FieldPublisher` (double buffer), `FieldReader`             |
//! | [`error`]       | `FieldError`, `FieldResult<T>`                              |
//!
//! # One pass
//!
//! ```rust,ignore
//! let scratch  = publisher.begin_compute(grid);
//! let computed = computer.compute(&scheduler, &units, scratch)?;
//! let snapshot = publisher.publish(computed)?;
//! assert_eq!(snapshot.len(), grid.cell_count());
//! ```

pub mod buffer;
pub mod caps;
pub mod compute;
pub mod error;
pub mod kernel;
pub mod layout;
pub mod publisher;


pub use buffer::{ComputedField, FieldBuffer, FieldSnapshot, ScratchField};
pub use caps::Capabilities;
pub use compute::{FieldComputer, FieldJob, compute_into};
pub use error::{FieldError, FieldResult};
pub use kernel::{FieldKernel, Kernel, Lanes4Kernel, Lanes8Kernel, ScalarKernel};
pub use layout::{Batch, UnitSoa, UnitSource};
pub use publisher::{FieldPublisher, FieldReader};
