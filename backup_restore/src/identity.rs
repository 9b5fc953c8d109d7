//! Position of the caller in a collective computation.

/// Anything that can report the local rank and participant count.
///
/// Implemented by collective-communication handles outside this crate.
pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
}

/// `(rank, size)` of one participant.
///
/// Only used to give every participant its own backup file. There is no
/// implicit default; non-distributed callers pass [`ParticipantIdentity::SERIAL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticipantIdentity {
    rank: usize,
    size: usize,
}

impl ParticipantIdentity {
    /// A single, non-distributed process.
    pub const SERIAL: Self = Self { rank: 0, size: 1 };

    pub const fn new(rank: usize, size: usize) -> Self {
        Self { rank, size }
    }

    /// Snapshot the identity reported by a communicator.
    pub fn of<C: Communicator + ?Sized>(comm: &C) -> Self {
        Self::new(comm.rank(), comm.size())
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// More than one participant, so files carry a rank suffix.
    #[inline]
    pub fn is_distributed(&self) -> bool {
        self.size > 1
    }
}

impl Communicator for ParticipantIdentity {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}
