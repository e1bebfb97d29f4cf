#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! The timed operations.
//!
//! Each operation reads one fixture and builds a new container from it, either
//! in bulk (one `collect`/`clone` over the source) or iteratively (an empty
//! container grown one `push` at a time). The built container is handed back to
//! the caller so the harness can keep the optimizer from eliding the work.

use crate::error::{Result, SuiteError};
use crate::fixtures::{FixtureKind, Fixtures, IntSet};
use serde::{Deserialize, Serialize};
use std::collections::LinkedList;
use std::fmt;
use std::str::FromStr;

/// Identifier shared by every operation of this suite.
pub const SUITE_NAME: &str = "collection_initialization";

/// Kind of container an operation builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    LinkedList,
    ArrayList,
    HashSet,
}

/// How the target container is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// Single bulk copy of the source.
    Bulk,
    /// Empty container, one append per source element.
    Iterative,
    /// Bulk copy, then a second pass appending every source element again.
    BulkThenIterative,
}

/// A freshly built container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    LinkedList(LinkedList<i32>),
    ArrayList(Vec<i32>),
    HashSet(IntSet),
}

impl Collection {
    /// Number of elements held.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::LinkedList(list) => list.len(),
            Self::ArrayList(list) => list.len(),
            Self::HashSet(set) => set.len(),
        }
    }

    /// Whether the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of container built.
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::LinkedList(_) => TargetKind::LinkedList,
            Self::ArrayList(_) => TargetKind::ArrayList,
            Self::HashSet(_) => TargetKind::HashSet,
        }
    }

    /// Elements in iteration order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i32> {
        match self {
            Self::LinkedList(list) => list.iter().copied().collect(),
            Self::ArrayList(list) => list.clone(),
            Self::HashSet(set) => set.iter().copied().collect(),
        }
    }
}

/// Named, parameterless unit of work over the fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateLinkedListFromSet,
    CreateArrayListFromSet,
    CreateArrayListFromSetIteratively,
    CreateHashSetFromSet,
    CreateLinkedListFromLinkedList,
    CreateLinkedListFromLinkedListIteratively,
    CreateArrayListFromLinkedList,
    CreateArrayListFromLinkedListIteratively,
    CreateHashSetFromLinkedList,
    CreateLinkedListFromArrayList,
    CreateLinkedListFromArrayListIteratively,
    CreateArrayListFromArrayList,
    CreateArrayListFromArrayListIteratively,
    CreateHashSetFromArrayList,
}

impl Operation {
    /// Every operation, grouped by source fixture.
    pub const ALL: [Self; 14] = [
        Self::CreateLinkedListFromSet,
        Self::CreateArrayListFromSet,
        Self::CreateArrayListFromSetIteratively,
        Self::CreateHashSetFromSet,
        Self::CreateLinkedListFromLinkedList,
        Self::CreateLinkedListFromLinkedListIteratively,
        Self::CreateArrayListFromLinkedList,
        Self::CreateArrayListFromLinkedListIteratively,
        Self::CreateHashSetFromLinkedList,
        Self::CreateLinkedListFromArrayList,
        Self::CreateLinkedListFromArrayListIteratively,
        Self::CreateArrayListFromArrayList,
        Self::CreateArrayListFromArrayListIteratively,
        Self::CreateHashSetFromArrayList,
    ];

    /// Short operation name, e.g. `create_array_list_from_set`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateLinkedListFromSet => "create_linked_list_from_set",
            Self::CreateArrayListFromSet => "create_array_list_from_set",
            Self::CreateArrayListFromSetIteratively => "create_array_list_from_set_iteratively",
            Self::CreateHashSetFromSet => "create_hash_set_from_set",
            Self::CreateLinkedListFromLinkedList => "create_linked_list_from_linked_list",
            Self::CreateLinkedListFromLinkedListIteratively => {
                "create_linked_list_from_linked_list_iteratively"
            }
            Self::CreateArrayListFromLinkedList => "create_array_list_from_linked_list",
            Self::CreateArrayListFromLinkedListIteratively => {
                "create_array_list_from_linked_list_iteratively"
            }
            Self::CreateHashSetFromLinkedList => "create_hash_set_from_linked_list",
            Self::CreateLinkedListFromArrayList => "create_linked_list_from_array_list",
            Self::CreateLinkedListFromArrayListIteratively => {
                "create_linked_list_from_array_list_iteratively"
            }
            Self::CreateArrayListFromArrayList => "create_array_list_from_array_list",
            Self::CreateArrayListFromArrayListIteratively => {
                "create_array_list_from_array_list_iteratively"
            }
            Self::CreateHashSetFromArrayList => "create_hash_set_from_array_list",
        }
    }

    /// Name qualified with [`SUITE_NAME`], the form include patterns match against.
    #[must_use]
    pub fn full_name(self) -> String {
        format!("{SUITE_NAME}.{}", self.name())
    }

    /// Fixture the operation reads.
    #[must_use]
    pub const fn source(self) -> FixtureKind {
        match self {
            Self::CreateLinkedListFromSet
            | Self::CreateArrayListFromSet
            | Self::CreateArrayListFromSetIteratively
            | Self::CreateHashSetFromSet => FixtureKind::Set,
            Self::CreateLinkedListFromLinkedList
            | Self::CreateLinkedListFromLinkedListIteratively
            | Self::CreateArrayListFromLinkedList
            | Self::CreateArrayListFromLinkedListIteratively
            | Self::CreateHashSetFromLinkedList => FixtureKind::LinkedList,
            Self::CreateLinkedListFromArrayList
            | Self::CreateLinkedListFromArrayListIteratively
            | Self::CreateArrayListFromArrayList
            | Self::CreateArrayListFromArrayListIteratively
            | Self::CreateHashSetFromArrayList => FixtureKind::ArrayList,
        }
    }

    /// Container the operation builds.
    #[must_use]
    pub const fn target(self) -> TargetKind {
        match self {
            Self::CreateLinkedListFromSet
            | Self::CreateLinkedListFromLinkedList
            | Self::CreateLinkedListFromLinkedListIteratively
            | Self::CreateLinkedListFromArrayList
            | Self::CreateLinkedListFromArrayListIteratively => TargetKind::LinkedList,
            Self::CreateArrayListFromSet
            | Self::CreateArrayListFromSetIteratively
            | Self::CreateArrayListFromLinkedList
            | Self::CreateArrayListFromLinkedListIteratively
            | Self::CreateArrayListFromArrayList
            | Self::CreateArrayListFromArrayListIteratively => TargetKind::ArrayList,
            Self::CreateHashSetFromSet
            | Self::CreateHashSetFromLinkedList
            | Self::CreateHashSetFromArrayList => TargetKind::HashSet,
        }
    }

    /// How the target is filled.
    #[must_use]
    pub const fn construction(self) -> Construction {
        match self {
            Self::CreateArrayListFromSetIteratively => Construction::BulkThenIterative,
            Self::CreateLinkedListFromLinkedListIteratively
            | Self::CreateArrayListFromLinkedListIteratively
            | Self::CreateLinkedListFromArrayListIteratively
            | Self::CreateArrayListFromArrayListIteratively => Construction::Iterative,
            _ => Construction::Bulk,
        }
    }

    /// Build the target container from the source fixture.
    #[must_use]
    pub fn execute(self, fixtures: &Fixtures) -> Collection {
        match self {
            Self::CreateLinkedListFromSet => {
                Collection::LinkedList(create_linked_list_from_set(fixtures))
            }
            Self::CreateArrayListFromSet => {
                Collection::ArrayList(create_array_list_from_set(fixtures))
            }
            Self::CreateArrayListFromSetIteratively => {
                Collection::ArrayList(create_array_list_from_set_iteratively(fixtures))
            }
            Self::CreateHashSetFromSet => Collection::HashSet(create_hash_set_from_set(fixtures)),
            Self::CreateLinkedListFromLinkedList => {
                Collection::LinkedList(create_linked_list_from_linked_list(fixtures))
            }
            Self::CreateLinkedListFromLinkedListIteratively => Collection::LinkedList(
                create_linked_list_from_linked_list_iteratively(fixtures),
            ),
            Self::CreateArrayListFromLinkedList => {
                Collection::ArrayList(create_array_list_from_linked_list(fixtures))
            }
            Self::CreateArrayListFromLinkedListIteratively => {
                Collection::ArrayList(create_array_list_from_linked_list_iteratively(fixtures))
            }
            Self::CreateHashSetFromLinkedList => {
                Collection::HashSet(create_hash_set_from_linked_list(fixtures))
            }
            Self::CreateLinkedListFromArrayList => {
                Collection::LinkedList(create_linked_list_from_array_list(fixtures))
            }
            Self::CreateLinkedListFromArrayListIteratively => {
                Collection::LinkedList(create_linked_list_from_array_list_iteratively(fixtures))
            }
            Self::CreateArrayListFromArrayList => {
                Collection::ArrayList(create_array_list_from_array_list(fixtures))
            }
            Self::CreateArrayListFromArrayListIteratively => {
                Collection::ArrayList(create_array_list_from_array_list_iteratively(fixtures))
            }
            Self::CreateHashSetFromArrayList => {
                Collection::HashSet(create_hash_set_from_array_list(fixtures))
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = SuiteError;

    /// Accepts both the short and the suite-qualified name.
    fn from_str(s: &str) -> Result<Self> {
        let short = s
            .strip_prefix(SUITE_NAME)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(s);

        Self::ALL
            .into_iter()
            .find(|op| op.name() == short)
            .ok_or_else(|| SuiteError::unknown_operation(s))
    }
}

// ---------------------------------------------------------------------------
// Set fixture
// ---------------------------------------------------------------------------

#[must_use]
pub fn create_linked_list_from_set(fixtures: &Fixtures) -> LinkedList<i32> {
    fixtures.set().iter().copied().collect()
}

#[must_use]
pub fn create_array_list_from_set(fixtures: &Fixtures) -> Vec<i32> {
    fixtures.set().iter().copied().collect()
}

/// Bulk copy followed by a second, element-by-element pass over the set.
///
/// The result holds every element twice.
#[must_use]
pub fn create_array_list_from_set_iteratively(fixtures: &Fixtures) -> Vec<i32> {
    let mut list: Vec<i32> = fixtures.set().iter().copied().collect();
    for &value in fixtures.set() {
        list.push(value);
    }
    list
}

/// Rehashes every element into a new table.
#[must_use]
pub fn create_hash_set_from_set(fixtures: &Fixtures) -> IntSet {
    fixtures.set().iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Linked list fixture
// ---------------------------------------------------------------------------

#[must_use]
pub fn create_linked_list_from_linked_list(fixtures: &Fixtures) -> LinkedList<i32> {
    fixtures.linked_list().clone()
}

#[must_use]
pub fn create_linked_list_from_linked_list_iteratively(fixtures: &Fixtures) -> LinkedList<i32> {
    let mut list = LinkedList::new();
    for &value in fixtures.linked_list() {
        list.push_back(value);
    }
    list
}

#[must_use]
pub fn create_array_list_from_linked_list(fixtures: &Fixtures) -> Vec<i32> {
    fixtures.linked_list().iter().copied().collect()
}

#[must_use]
pub fn create_array_list_from_linked_list_iteratively(fixtures: &Fixtures) -> Vec<i32> {
    let mut list = Vec::new();
    for &value in fixtures.linked_list() {
        list.push(value);
    }
    list
}

#[must_use]
pub fn create_hash_set_from_linked_list(fixtures: &Fixtures) -> IntSet {
    fixtures.linked_list().iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Array list fixture
// ---------------------------------------------------------------------------

#[must_use]
pub fn create_linked_list_from_array_list(fixtures: &Fixtures) -> LinkedList<i32> {
    fixtures.array_list().iter().copied().collect()
}

#[must_use]
pub fn create_linked_list_from_array_list_iteratively(fixtures: &Fixtures) -> LinkedList<i32> {
    let mut list = LinkedList::new();
    for &value in fixtures.array_list() {
        list.push_back(value);
    }
    list
}

#[must_use]
pub fn create_array_list_from_array_list(fixtures: &Fixtures) -> Vec<i32> {
    fixtures.array_list().to_vec()
}

#[must_use]
pub fn create_array_list_from_array_list_iteratively(fixtures: &Fixtures) -> Vec<i32> {
    let mut list = Vec::new();
    for &value in fixtures.array_list() {
        list.push(value);
    }
    list
}

#[must_use]
pub fn create_hash_set_from_array_list(fixtures: &Fixtures) -> IntSet {
    fixtures.array_list().iter().copied().collect()
}
