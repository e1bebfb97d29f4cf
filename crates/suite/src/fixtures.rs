#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Read-only source containers for the timed operations.

use crate::random::Lcg48;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, LinkedList};
use std::fmt;
use std::hash::{BuildHasherDefault, DefaultHasher};

/// Number of draws taken for each fixture.
pub const COUNT: usize = 1024;

/// Seed of the generator shared by all three fixtures.
pub const SEED: i64 = 22_211_122;

/// Hash set of draws with a fixed hasher key.
///
/// Iteration order depends only on the inserted values and their insertion
/// order, so it is the same in every process.
pub type IntSet = HashSet<i32, BuildHasherDefault<DefaultHasher>>;

/// Which fixture an operation reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    Set,
    LinkedList,
    ArrayList,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::LinkedList => "linked_list",
            Self::ArrayList => "array_list",
        };
        f.write_str(name)
    }
}

/// The three populated source containers.
///
/// Built once per fork and never mutated afterwards; every timed operation
/// borrows it immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    set: IntSet,
    linked_list: LinkedList<i32>,
    array_list: Vec<i32>,
}

impl Fixtures {
    /// Populate all fixtures from [`SEED`] with [`COUNT`] draws each.
    ///
    /// # Examples
    ///
    /// ```
    /// # use collbench_suite::{Fixtures, COUNT};
    /// let fixtures = Fixtures::setup();
    /// assert_eq!(fixtures.array_list().len(), COUNT);
    /// ```
    #[must_use]
    pub fn setup() -> Self {
        Self::from_rng(&mut Lcg48::new(SEED), COUNT)
    }

    /// Populate all fixtures from one generator.
    ///
    /// The generator is shared, not reseeded: the set takes the first `count`
    /// draws, the linked list the next `count`, the array list the last `count`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R, count: usize) -> Self {
        let set = (0..count).map(|_| rng.next_u32() as i32).collect();
        let linked_list = (0..count).map(|_| rng.next_u32() as i32).collect();
        let array_list = (0..count).map(|_| rng.next_u32() as i32).collect();

        Self {
            set,
            linked_list,
            array_list,
        }
    }

    /// Duplicate-free, unordered fixture.
    #[must_use]
    pub const fn set(&self) -> &IntSet {
        &self.set
    }

    /// Doubly-linked fixture in draw order.
    #[must_use]
    pub const fn linked_list(&self) -> &LinkedList<i32> {
        &self.linked_list
    }

    /// Contiguous fixture in draw order.
    #[must_use]
    pub fn array_list(&self) -> &[i32] {
        &self.array_list
    }

    /// Number of elements held by the given fixture.
    #[must_use]
    pub fn len_of(&self, kind: FixtureKind) -> usize {
        match kind {
            FixtureKind::Set => self.set.len(),
            FixtureKind::LinkedList => self.linked_list.len(),
            FixtureKind::ArrayList => self.array_list.len(),
        }
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::setup()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_setup_sizes() {
        let fixtures = Fixtures::setup();
        assert_eq!(fixtures.array_list().len(), COUNT);
        assert_eq!(fixtures.linked_list().len(), COUNT);
        assert!(fixtures.set().len() <= COUNT);
    }

    #[test]
    fn test_setup_is_deterministic() {
        let first = Fixtures::setup();
        let second = Fixtures::setup();

        assert_eq!(first.array_list(), second.array_list());
        assert!(first.linked_list().iter().eq(second.linked_list().iter()));
        assert_eq!(first.set(), second.set());
    }

    #[test]
    fn test_set_iteration_order_is_reproducible() {
        let first = Fixtures::setup();
        let second = Fixtures::setup();

        let first_order: Vec<i32> = first.set().iter().copied().collect();
        let second_order: Vec<i32> = second.set().iter().copied().collect();
        assert_eq!(first_order, second_order);
    }

    #[test]
    fn test_set_order_depends_only_on_draws() {
        let draws: Vec<i32> = Lcg48::new(SEED).ints(COUNT).collect();
        let rebuilt: IntSet = draws.iter().copied().collect();

        assert!(Fixtures::setup().set().iter().eq(rebuilt.iter()));
    }

    #[test]
    fn test_draw_order_is_set_then_linked_then_array() {
        let fixtures = Fixtures::setup();

        assert!(fixtures.set().contains(&-1_722_954_596));
        assert_eq!(fixtures.linked_list().front(), Some(&-1_202_035_606));
        assert_eq!(fixtures.array_list().first(), Some(&-191_450_504));
        assert_eq!(fixtures.array_list().get(1), Some(&18_657_253));
        assert_eq!(fixtures.array_list().last(), Some(&-853_633_363));
    }

    #[test]
    fn test_set_has_no_collisions_under_fixed_seed() {
        assert_eq!(Fixtures::setup().set().len(), COUNT);
    }

    #[test]
    fn test_fixtures_follow_one_stream() {
        let mut rng = Lcg48::new(SEED);
        let stream: Vec<i32> = rng.ints(3 * 8).collect();
        let fixtures = Fixtures::from_rng(&mut Lcg48::new(SEED), 8);

        let expected_set: IntSet = stream[..8].iter().copied().collect();
        assert_eq!(fixtures.set(), &expected_set);
        assert!(fixtures.linked_list().iter().eq(stream[8..16].iter()));
        assert_eq!(fixtures.array_list(), &stream[16..]);
    }

    #[test]
    fn test_len_of() {
        let fixtures = Fixtures::from_rng(&mut Lcg48::new(1), 16);
        assert_eq!(fixtures.len_of(FixtureKind::ArrayList), 16);
        assert_eq!(fixtures.len_of(FixtureKind::LinkedList), 16);
        assert_eq!(fixtures.len_of(FixtureKind::Set), fixtures.set().len());
    }

    #[test]
    fn test_empty_fixtures() {
        let fixtures = Fixtures::from_rng(&mut Lcg48::new(SEED), 0);
        assert!(fixtures.set().is_empty());
        assert!(fixtures.linked_list().is_empty());
        assert!(fixtures.array_list().is_empty());
    }

    #[test]
    fn test_fixture_kind_display() {
        assert_eq!(FixtureKind::Set.to_string(), "set");
        assert_eq!(FixtureKind::LinkedList.to_string(), "linked_list");
        assert_eq!(FixtureKind::ArrayList.to_string(), "array_list");
    }
}
