//! bandlabel-comm - Worker group and collectives for bandlabel
//!
//! This crate runs a fixed number of cooperating workers (ranks) inside one
//! process and connects them with blocking message passing:
//!
//! - **Point-to-point** - [`Communicator::send`] / [`Communicator::recv`]
//! - **Broadcast** - replicate a buffer from a root to every rank
//! - **Gather** - concatenate per-rank buffers on a root in rank order
//! - **Reduce** - fold per-rank values on a root in rank order
//!
//! Every rank must enter the same collectives in the same order. A rank that
//! returns early drops its channel endpoints, so peers blocked on it fail
//! with [`CommError::Disconnected`] rather than waiting forever.
//!
//! # Example
//!
//! ```
//! use bandlabel_comm::{COORDINATOR, World, WorldConfig};
//!
//! let world = World::new(WorldConfig::new(3)).unwrap();
//! let gathered = world
//!     .run(|comm| {
//!         let local = vec![comm.rank() as i32; 2];
//!         comm.gather(&local, COORDINATOR)
//!     })
//!     .unwrap();
//!
//! assert_eq!(gathered[0].as_ref().unwrap(), &Some(vec![0, 0, 1, 1, 2, 2]));
//! ```

pub mod communicator;
pub mod config;
pub mod error;
pub mod world;

pub use communicator::{COORDINATOR, Communicator, Tag};
pub use config::{WORKERS_ENV, WorldConfig};
pub use error::{CommError, CommResult};
pub use world::World;
