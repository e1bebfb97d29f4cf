#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # collbench-suite
//!
//! Fixtures and timed operations measuring the cost of building one standard
//! collection from another.
//!
//! Three fixtures (a `HashSet`, a `LinkedList` and a `Vec`) are filled with
//! [`COUNT`] pseudo-random integers from a single [`Lcg48`] seeded with
//! [`SEED`]. Each [`Operation`] reads one fixture and builds a new container
//! from it, in bulk or one element at a time.
//!
//! ```
//! use collbench_suite::{Fixtures, Operation};
//!
//! let fixtures = Fixtures::setup();
//! let built = Operation::CreateArrayListFromArrayList.execute(&fixtures);
//! assert_eq!(built.to_vec(), fixtures.array_list());
//! ```

pub mod error;
pub mod fixtures;
pub mod operations;
pub mod random;

pub use error::{Result, SuiteError};
pub use fixtures::{COUNT, FixtureKind, Fixtures, IntSet, SEED};
pub use operations::{Collection, Construction, Operation, SUITE_NAME, TargetKind};
pub use random::Lcg48;
