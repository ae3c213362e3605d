//! Time-ordered unique id generation
//!
//! Ids use the snowflake layout: 41 bits of milliseconds since [`EPOCH_MILLIS`],
//! 10 bits of node id and a 12 bit per-millisecond sequence. Distinct nodes
//! never collide; within one node ids are strictly increasing.

use crate::error::{IdentityError, Result};
use crate::types::UserId;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 2010-11-04T01:42:54.657Z
pub const EPOCH_MILLIS: i64 = 1288834974657;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
pub(crate) const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;

/// Highest node id that fits in the node field
pub const MAX_NODE: u16 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake id generator
///
/// Constructed once per process and shared by handle. Safe for concurrent
/// use without external locking.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    node: u16,
    /// `(elapsed_millis << SEQUENCE_BITS) | sequence` of the last issued id
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given node
    ///
    /// # Errors
    /// Returns an error if `node` is greater than [`MAX_NODE`]
    pub fn new(node: u16) -> Result<Self> {
        if node > MAX_NODE {
            return Err(IdentityError::invalid_input(format!(
                "node id {} out of range 0..={}",
                node, MAX_NODE
            )));
        }

        Ok(Self {
            node,
            state: AtomicU64::new(0),
        })
    }

    /// Generate the next id
    pub fn next_id(&self) -> UserId {
        self.next_id_with(|| Utc::now().timestamp_millis())
    }

    fn next_id_with(&self, now: impl Fn() -> i64) -> UserId {
        loop {
            let elapsed = (now() - EPOCH_MILLIS).max(0) as u64;
            let last = self.state.load(Ordering::Acquire);
            let last_millis = last >> SEQUENCE_BITS;

            // A clock that stepped backwards keeps counting in the last millisecond
            let next = if elapsed > last_millis {
                elapsed << SEQUENCE_BITS
            } else {
                let sequence = (last & SEQUENCE_MASK) + 1;
                if sequence > SEQUENCE_MASK {
                    // sequence exhausted, wait for the next millisecond
                    std::hint::spin_loop();
                    continue;
                }
                (last_millis << SEQUENCE_BITS) | sequence
            };

            if self
                .state
                .compare_exchange(last, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let millis = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                let raw = (millis << TIMESTAMP_SHIFT)
                    | (u64::from(self.node) << SEQUENCE_BITS)
                    | sequence;
                return UserId::new(raw as i64);
            }
        }
    }
}
