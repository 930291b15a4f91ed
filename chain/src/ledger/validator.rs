//! Whole-chain validation.
//!
//! The validator walks blocks in height order and reports every problem it
//! finds instead of stopping at the first one:
//!
//! - a block whose recomputed hash differs from its stored hash is
//!   reported as [`Discrepancy::TamperedData`],
//! - a block whose declared predecessor does not match the expectation is
//!   reported as [`Discrepancy::BrokenLinkage`].
//!
//! What "the expectation" is depends on [`LinkageCheck`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Block, BlockHash};

/// How predecessor linkage is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkageCheck {
    /// Carries each valid block's own `previous_block_hash` forward as the
    /// expectation for the next block, and does not advance it past a
    /// tampered block. On an untouched chain every block above height 1
    /// is compared against its grandparent's hash, and height 1 against
    /// the empty genesis predecessor.
    #[default]
    Lagged,
    /// Every block above genesis must declare its direct predecessor's
    /// stored hash; genesis must declare none.
    Direct,
}

/// A single inconsistency found by [`ChainValidator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discrepancy {
    /// Recomputed hash differs from the stored one.
    TamperedData {
        height: u64,
        hash: Option<BlockHash>,
    },
    /// Declared previous hash differs from the expected one.
    BrokenLinkage {
        height: u64,
        expected: Option<BlockHash>,
        actual: Option<BlockHash>,
    },
}

impl Discrepancy {
    /// Height of the block the discrepancy refers to.
    pub fn height(&self) -> u64 {
        match self {
            Discrepancy::TamperedData { height, .. } => *height,
            Discrepancy::BrokenLinkage { height, .. } => *height,
        }
    }

    pub fn is_tampered_data(&self) -> bool {
        matches!(self, Discrepancy::TamperedData { .. })
    }
}

struct OptHash<'a>(&'a Option<BlockHash>);

impl fmt::Display for OptHash<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(h) => h.fmt(f),
            None => f.write_str("<none>"),
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::TamperedData { height, hash } => write!(
                f,
                "block {height} ({}): data tampered, hash does not match contents",
                OptHash(hash)
            ),
            Discrepancy::BrokenLinkage {
                height,
                expected,
                actual,
            } => write!(
                f,
                "block {height}: previous hash mismatch, expected {} got {}",
                OptHash(expected),
                OptHash(actual)
            ),
        }
    }
}

/// Read-only chain validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainValidator {
    linkage: LinkageCheck,
}

impl ChainValidator {
    pub fn new(linkage: LinkageCheck) -> Self {
        Self { linkage }
    }

    pub fn linkage(&self) -> LinkageCheck {
        self.linkage
    }

    /// Returns all discrepancies in ascending height order; empty means
    /// the chain is valid.
    pub fn validate<'a, I>(&self, blocks: I) -> Vec<Discrepancy>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        match self.linkage {
            LinkageCheck::Lagged => validate_lagged(blocks),
            LinkageCheck::Direct => validate_direct(blocks),
        }
    }
}

fn validate_lagged<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Vec<Discrepancy> {
    let mut found = Vec::new();
    let mut expected: Option<BlockHash> = None;

    for block in blocks {
        if !block.validate() {
            found.push(Discrepancy::TamperedData {
                height: block.height,
                hash: block.hash,
            });
            continue;
        }

        if block.height > 0 && block.previous_block_hash != expected {
            found.push(Discrepancy::BrokenLinkage {
                height: block.height,
                expected,
                actual: block.previous_block_hash,
            });
        }

        expected = block.previous_block_hash;
    }

    found
}

fn validate_direct<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Vec<Discrepancy> {
    let mut found = Vec::new();
    let mut predecessor: Option<BlockHash> = None;

    for block in blocks {
        if !block.validate() {
            found.push(Discrepancy::TamperedData {
                height: block.height,
                hash: block.hash,
            });
        }

        let expected = if block.height == 0 { None } else { predecessor };
        if block.previous_block_hash != expected {
            found.push(Discrepancy::BrokenLinkage {
                height: block.height,
                expected,
                actual: block.previous_block_hash,
            });
        }

        predecessor = block.hash;
    }

    found
}
