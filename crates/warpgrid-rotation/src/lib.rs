//! warpgrid-rotation — thread-safe weighted round-robin selection.
//!
//! A [`Rotation`] hands out its elements in cyclic order; an element of
//! weight `W` is returned `W + 1` times in a row before the rotation moves
//! on. Elements and weights can be changed at any time from any thread.
//!
//! # Architecture
//!
//! ```text
//! Rotation<T>
//!   └── Mutex<RotationState>
//!       ├── CircularList<WeightedEntry<T>> (index arena, wrap-around links)
//!       └── Cursor (unset / pending / at an entry)
//! ```
//!
//! Every public call holds the mutex for its whole body, so calls are
//! atomic and `next_batch` returns an uninterrupted run of the rotation.

pub mod circular;
pub mod config;
pub mod entry;
pub mod error;
pub mod rotation;

pub use config::{EntryConfig, RotationConfig};
pub use entry::{DEFAULT_AMOUNT, DEFAULT_COUNTER, DEFAULT_WEIGHT, WeightedEntry};
pub use error::{ErrorKind, RotationError, RotationResult};
pub use rotation::{EntrySnapshot, Rotation};
