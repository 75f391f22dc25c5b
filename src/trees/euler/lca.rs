use crate::statistic::{impl_multiplicity, Statistic};
use crate::trees::euler::Occurrence;
use crate::trees::NodeId;

/// Depth profile of a range of an Euler tour, used to answer lowest-common-ancestor queries with
/// a single range query.
///
/// Entering a vertex (its representative occurrence) steps the depth up by one, every other
/// occurrence returns from a child and steps it down by one. The statistic of a range records the
/// total depth change, the lowest depth reached relative to the start of the range, and the
/// vertex at which it is reached (the earliest one on ties). Between the first occurrences of two
/// vertices, the lowest point of the tour is their lowest common ancestor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LcaStatistic {
    count: usize,
    total: i64,
    min: i64,
    holder: Option<NodeId>,
}

impl LcaStatistic {
    /// The depth change over the whole range.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// The lowest depth reached within the range, relative to the depth before the range.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The vertex reaching the lowest depth, or `None` for an empty range.
    #[must_use]
    pub fn holder(&self) -> Option<NodeId> {
        self.holder
    }
}

impl Statistic<Occurrence> for LcaStatistic {
    fn init(&mut self, key: &Occurrence) {
        self.total = if key.is_representative() { 1 } else { -1 };
        self.min = self.total;
        self.holder = Some(key.node());
    }

    fn update_left(&mut self, left: &Self) {
        // everything in self is shifted by the depth change of the left range
        let shifted = left.total + self.min;
        if left.min <= shifted {
            self.min = left.min;
            self.holder = left.holder;
        } else {
            self.min = shifted;
        }
        self.total += left.total;
    }

    fn update_right(&mut self, right: &Self) {
        let shifted = self.total + right.min;
        if shifted < self.min {
            self.min = shifted;
            self.holder = right.holder;
        }
        self.total += right.total;
    }

    impl_multiplicity!();
}
