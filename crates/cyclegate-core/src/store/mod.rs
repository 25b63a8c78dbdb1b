//! The reachability store: an incrementally maintained reflexive-transitive
//! closure over a fixed node universe.
//!
//! [`LinkStore`] answers one question in constant time — "would inserting the
//! link `origin -> destination` close a directed cycle?" — without ever
//! traversing a graph. It does so by keeping, for every node, the full set of
//! that node's ancestors as a packed bit row, and restoring closure after each
//! accepted link with a single sweep of bulk row ORs.
//!
//! # Representation
//!
//! One contiguous `Vec<u64>` holds an `n x n` bit matrix, `words_per_row =
//! ceil(n / 64)` words per node. Bit `y` of row `x` set means "`y` is an
//! ancestor of `x`", i.e. `x` is reachable from `y` via zero or more accepted
//! links. Every reflexive bit `(x, x)` is set at construction and never
//! cleared; in fact no bit is ever cleared — the relation grows
//! monotonically, and which literal links produced it is not recorded.
//! Bit twiddling is confined to the private row helpers at the bottom of this
//! module.
//!
//! # Closure update
//!
//! Accepting `origin -> destination` must teach every current descendant `k`
//! of the destination (every `k` with `is_ancestor(k, destination)`,
//! including the destination itself) about every ancestor of the origin
//! (including the origin itself). That is exactly
//! `row[k] |= row[origin]` for each such `k`, one bulk OR over the whole
//! row. The sweep restores full closure in one pass: no node can become a
//! descendant of the destination mid-sweep, because that would require
//! `origin`'s row to contain the destination bit, which the cycle check has
//! just ruled out.
//!
//! # Complexity
//!
//! Space is `n^2` bits. A rejected insertion costs one bit test; an accepted
//! one costs `O(n * words_per_row)` word ORs in the worst case.
//!
//! # Concurrency
//!
//! `LinkStore` is plain owned data with no interior mutability; it is `Send`
//! but deliberately unsynchronized. [`LinkStore::insert_link`] is a
//! read-then-conditionally-write spanning the whole matrix, so concurrent use
//! must serialize each call as one atomic unit (a single exclusive lock
//! around the store suffices). Two racing insertions could otherwise both
//! pass the cycle check and then admit a cycle.

use crate::outcome::InsertOutcome;

const WORD_BITS: usize = u64::BITS as usize;

/// The reference node universe size, `2^16`.
///
/// [`LinkStore::new`] takes the size explicitly so tests and embedders can
/// run against small universes; this constant is the production default.
/// Note that a store of this size owns `65536^2` bits, i.e. 512 MiB.
pub const DEFAULT_NODE_COUNT: usize = 65536;

// ---------------------------------------------------------------------------
// LinkStore
// ---------------------------------------------------------------------------

/// A cycle-rejecting link store over the node universe `{0 .. n-1}`.
///
/// Holds the reflexive-transitive closure of the accepted link set as a bit
/// matrix. See the [module documentation](self) for representation and
/// algorithm details.
///
/// Construction via [`LinkStore::new`] both allocates and initializes the
/// relation; there is no separately observable uninitialized state.
#[derive(Debug, Clone)]
pub struct LinkStore {
    node_count: usize,
    words_per_row: usize,
    rows: Vec<u64>,
}

impl LinkStore {
    /// Creates a store for the node universe `{0 .. node_count-1}` with every
    /// reflexive bit set and all other bits clear.
    ///
    /// A `node_count` of zero yields an empty relation in which every
    /// insertion is out of range.
    pub fn new(node_count: usize) -> Self {
        let words_per_row = node_count.div_ceil(WORD_BITS);
        let mut store = Self {
            node_count,
            words_per_row,
            rows: vec![0u64; node_count * words_per_row],
        };
        // Every node is its own ancestor, which is also what makes a
        // self-link always read as cycle-closing.
        for node in 0..node_count {
            store.set_bit(node, node);
        }
        store
    }

    /// Returns the size of the node universe.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns `true` if `candidate` is an ancestor of `node`, i.e. `node` is
    /// reachable from `candidate` via zero or more accepted links.
    ///
    /// Reflexive: `is_ancestor(x, x)` is `true` for every in-range `x`.
    /// Arguments outside the universe return `false` — the relation holds no
    /// pairs outside `{0 .. n-1}`. Constant time, no side effects.
    pub fn is_ancestor(&self, node: usize, candidate: usize) -> bool {
        if node >= self.node_count || candidate >= self.node_count {
            return false;
        }
        self.bit(node, candidate)
    }

    /// Proposes the directed link `origin -> destination`.
    ///
    /// Identifiers are taken as raw `i64` values; the store itself performs
    /// the range validation, so callers may pass anything numeric.
    ///
    /// The decision procedure, in order:
    ///
    /// 1. either endpoint outside `[0, node_count)` →
    ///    [`InsertOutcome::RejectedOutOfRange`] carrying the first offending
    ///    value;
    /// 2. `origin == destination` → [`InsertOutcome::RejectedSelfLoop`];
    /// 3. `destination` already an ancestor of `origin` →
    ///    [`InsertOutcome::RejectedCycle`];
    /// 4. otherwise the relation is re-closed over the new link and the
    ///    result is [`InsertOutcome::Accepted`].
    ///
    /// Only step 4 mutates the store. Re-inserting an already-accepted link
    /// is idempotent: the cycle check cannot start failing for it (the
    /// origin's row never gains the destination bit), and the repeated OR
    /// sweep changes nothing.
    pub fn insert_link(&mut self, origin: i64, destination: i64) -> InsertOutcome {
        let Some(origin_ix) = self.to_index(origin) else {
            return InsertOutcome::RejectedOutOfRange { value: origin };
        };
        let Some(destination_ix) = self.to_index(destination) else {
            return InsertOutcome::RejectedOutOfRange { value: destination };
        };
        if origin_ix == destination_ix {
            return InsertOutcome::RejectedSelfLoop;
        }
        if self.bit(origin_ix, destination_ix) {
            return InsertOutcome::RejectedCycle;
        }
        self.close_over_link(origin_ix, destination_ix);
        InsertOutcome::Accepted
    }

    /// Returns the rectangular sub-block of the relation starting at
    /// `(row_start, col_start)` with the given shape, as
    /// `window[i][j] == is_ancestor(row_start + i, col_start + j)`.
    ///
    /// Read-only; intended for diagnostic dumps. Zero-sized windows are
    /// permitted and yield empty vectors.
    ///
    /// # Errors
    ///
    /// [`WindowError`] if the window extends past the node universe on
    /// either axis.
    pub fn ancestor_window(
        &self,
        row_start: usize,
        col_start: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Vec<bool>>, WindowError> {
        // Start bound is checked first so the span check cannot underflow.
        if row_start > self.node_count || rows > self.node_count - row_start {
            return Err(WindowError::RowsOutOfRange {
                row_start,
                rows,
                node_count: self.node_count,
            });
        }
        if col_start > self.node_count || cols > self.node_count - col_start {
            return Err(WindowError::ColsOutOfRange {
                col_start,
                cols,
                node_count: self.node_count,
            });
        }

        let window = (row_start..row_start + rows)
            .map(|row| {
                (col_start..col_start + cols)
                    .map(|col| self.bit(row, col))
                    .collect()
            })
            .collect();
        Ok(window)
    }

    // -----------------------------------------------------------------------
    // Closure update
    // -----------------------------------------------------------------------

    /// Folds the accepted link `origin -> destination` into the relation.
    ///
    /// Merges the origin's full ancestor row into the row of every current
    /// descendant of the destination. Precondition (established by
    /// [`LinkStore::insert_link`]): the destination is not an ancestor of the
    /// origin, which guarantees the descendant set cannot grow mid-sweep and
    /// that the origin's own row is never a merge target.
    fn close_over_link(&mut self, origin: usize, destination: usize) {
        // Snapshot the origin row once; it is not among the targets, so the
        // snapshot stays equal to the live row for the whole sweep.
        let origin_row = self.row(origin).to_vec();
        for node in 0..self.node_count {
            if self.bit(node, destination) {
                self.or_into_row(node, &origin_row);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Row and bit primitives
    // -----------------------------------------------------------------------

    /// Maps a caller-supplied identifier into the universe, or `None` if it
    /// is negative or too large.
    fn to_index(&self, id: i64) -> Option<usize> {
        usize::try_from(id).ok().filter(|&ix| ix < self.node_count)
    }

    /// The packed ancestor row of `node`.
    fn row(&self, node: usize) -> &[u64] {
        let start = node * self.words_per_row;
        &self.rows[start..start + self.words_per_row]
    }

    /// ORs an entire ancestor-set row into the row of `node`, word by word.
    fn or_into_row(&mut self, node: usize, source_row: &[u64]) {
        let start = node * self.words_per_row;
        for (word, source) in self.rows[start..start + self.words_per_row]
            .iter_mut()
            .zip(source_row)
        {
            *word |= *source;
        }
    }

    /// Tests bit `(row, col)`. Both indices must be in range.
    fn bit(&self, row: usize, col: usize) -> bool {
        let word = self.rows[row * self.words_per_row + col / WORD_BITS];
        word & (1u64 << (col % WORD_BITS)) != 0
    }

    /// Sets bit `(row, col)`. Both indices must be in range.
    fn set_bit(&mut self, row: usize, col: usize) {
        self.rows[row * self.words_per_row + col / WORD_BITS] |= 1u64 << (col % WORD_BITS);
    }
}

// ---------------------------------------------------------------------------
// WindowError
// ---------------------------------------------------------------------------

/// Errors from [`LinkStore::ancestor_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The requested rows extend past the node universe.
    RowsOutOfRange {
        /// First requested row.
        row_start: usize,
        /// Number of requested rows.
        rows: usize,
        /// The universe size the request was checked against.
        node_count: usize,
    },
    /// The requested columns extend past the node universe.
    ColsOutOfRange {
        /// First requested column.
        col_start: usize,
        /// Number of requested columns.
        cols: usize,
        /// The universe size the request was checked against.
        node_count: usize,
    },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::RowsOutOfRange {
                row_start,
                rows,
                node_count,
            } => {
                write!(
                    f,
                    "window rows (start {row_start}, span {rows}) exceed the node universe 0..{node_count}"
                )
            }
            WindowError::ColsOutOfRange {
                col_start,
                cols,
                node_count,
            } => {
                write!(
                    f,
                    "window columns (start {col_start}, span {cols}) exceed the node universe 0..{node_count}"
                )
            }
        }
    }
}

impl std::error::Error for WindowError {}
