use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

/// Identifier of a retained contact cluster.
///
/// Retained clusters are numbered from 1. The "cluster 0" sentinel found in
/// persisted contact tables means *unassigned* and is represented in memory
/// as `None` rather than as a numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(NonZeroU32);

impl ClusterId {
    /// Returns `None` for 0, the unassigned sentinel.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A native contact: a pair of residue indices expected to be spatially
/// close in the folded reference structure, with its reference distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub i: i32,
    pub j: i32,
    /// Reference (native) CA-CA distance in angstroms.
    pub r: f64,
    /// Cluster assignment; `None` until clustering runs, or when the
    /// contact was filtered out of every retained cluster.
    pub cluster: Option<ClusterId>,
}

impl Contact {
    pub fn pair(&self) -> (i32, i32) {
        (self.i, self.j)
    }

    /// Numeric cluster id as persisted in tables (0 = unassigned).
    pub fn cluster_index(&self) -> u32 {
        self.cluster.map_or(0, |c| c.get())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactSetError {
    #[error("duplicate contact pair ({0}, {1})")]
    DuplicatePair(i32, i32),
}

/// The immutable collection of native contacts for one analysis run.
///
/// Per-cluster member counts are computed once at construction; the keys of
/// [`ContactSet::cluster_sizes`] use the persisted numeric convention, so a
/// key of 0 counts the unassigned contacts.
#[derive(Debug, Clone)]
pub struct ContactSet {
    contacts: Vec<Contact>,
    cluster_sizes: BTreeMap<u32, usize>,
}

impl ContactSet {
    /// Builds a contact set, enforcing `(i, j)` pair uniqueness.
    pub fn new(contacts: Vec<Contact>) -> Result<Self, ContactSetError> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            if !seen.insert(contact.pair()) {
                return Err(ContactSetError::DuplicatePair(contact.i, contact.j));
            }
        }

        let mut cluster_sizes = BTreeMap::new();
        for contact in &contacts {
            *cluster_sizes.entry(contact.cluster_index()).or_insert(0) += 1;
        }

        Ok(Self {
            contacts,
            cluster_sizes,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn total(&self) -> usize {
        self.contacts.len()
    }

    /// Member count per numeric cluster id (0 = unassigned).
    pub fn cluster_sizes(&self) -> &BTreeMap<u32, usize> {
        &self.cluster_sizes
    }

    /// Count of contacts assigned to a retained cluster.
    pub fn assigned(&self) -> usize {
        self.total() - self.cluster_sizes.get(&0).copied().unwrap_or(0)
    }

    /// Number of distinct retained clusters (cluster 0 excluded).
    pub fn retained_clusters(&self) -> usize {
        self.cluster_sizes.keys().filter(|&&id| id != 0).count()
    }
}
