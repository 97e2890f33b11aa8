//! Per-rank communicator
//!
//! A [`Communicator`] is one rank's view of the group: an outbox to every
//! rank and an inbox from every rank. Each ordered (source, destination)
//! pair has its own channel, so messages between two ranks arrive in the
//! order they were sent and receiving "from rank r" never sees another
//! rank's traffic.

use crate::error::{CommError, CommResult};
use crossbeam_channel::{Receiver, Sender};
use std::any::{Any, type_name};

/// Rank that owns input and output buffers
pub const COORDINATOR: usize = 0;

/// Operation a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Collective broadcast
    Broadcast,
    /// Collective gather
    Gather,
    /// Collective reduce
    Reduce,
    /// Caller-defined point-to-point exchange
    User(u32),
}

pub(crate) struct Envelope {
    tag: Tag,
    payload: Box<dyn Any + Send>,
}

/// One rank's endpoint into a worker group
pub struct Communicator {
    rank: usize,
    size: usize,
    outboxes: Vec<Sender<Envelope>>,
    inboxes: Vec<Receiver<Envelope>>,
}

impl std::fmt::Debug for Communicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Communicator")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}

impl Communicator {
    /// `outboxes` is indexed by destination, `inboxes` by source.
    pub(crate) fn new(
        rank: usize,
        outboxes: Vec<Sender<Envelope>>,
        inboxes: Vec<Receiver<Envelope>>,
    ) -> Self {
        let size = outboxes.len();
        debug_assert_eq!(size, inboxes.len());
        Self {
            rank,
            size,
            outboxes,
            inboxes,
        }
    }

    /// This rank's index
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of ranks in the group
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if this rank is the coordinator (rank 0)
    #[inline]
    pub fn is_coordinator(&self) -> bool {
        self.rank == COORDINATOR
    }

    fn check_rank(&self, rank: usize) -> CommResult<()> {
        if rank >= self.size {
            return Err(CommError::InvalidRank {
                rank,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Send a buffer to `dest`
    ///
    /// Never blocks: channels are unbounded. Fails if `dest` has already
    /// left the group.
    pub fn send<T: Send + 'static>(&self, dest: usize, tag: Tag, data: Vec<T>) -> CommResult<()> {
        self.check_rank(dest)?;
        let envelope = Envelope {
            tag,
            payload: Box::new(data),
        };
        self.outboxes[dest]
            .send(envelope)
            .map_err(|_| CommError::Disconnected { peer: dest })
    }

    /// Block until the next message from `source` arrives
    ///
    /// The message must carry `tag` and a `Vec<T>` payload.
    pub fn recv<T: 'static>(&self, source: usize, tag: Tag) -> CommResult<Vec<T>> {
        self.check_rank(source)?;
        let envelope = self.inboxes[source]
            .recv()
            .map_err(|_| CommError::Disconnected { peer: source })?;
        if envelope.tag != tag {
            return Err(CommError::UnexpectedTag {
                peer: source,
                expected: tag,
                actual: envelope.tag,
            });
        }
        envelope
            .payload
            .downcast::<Vec<T>>()
            .map(|data| *data)
            .map_err(|_| CommError::TypeMismatch {
                peer: source,
                expected: type_name::<T>(),
            })
    }

    fn recv_value<T: 'static>(&self, source: usize, tag: Tag) -> CommResult<T> {
        self.recv::<T>(source, tag)?
            .into_iter()
            .next()
            .ok_or(CommError::EmptyPayload { peer: source })
    }

    /// Replicate `root`'s buffer into `buf` on every rank
    ///
    /// Non-root ranks have `buf` replaced by the root's contents.
    pub fn broadcast<T: Clone + Send + 'static>(
        &self,
        buf: &mut Vec<T>,
        root: usize,
    ) -> CommResult<()> {
        self.check_rank(root)?;
        if self.rank == root {
            for dest in (0..self.size).filter(|&r| r != root) {
                self.send(dest, Tag::Broadcast, buf.clone())?;
            }
            tracing::trace!(rank = self.rank, len = buf.len(), "broadcast sent");
        } else {
            *buf = self.recv(root, Tag::Broadcast)?;
            tracing::trace!(rank = self.rank, len = buf.len(), "broadcast received");
        }
        Ok(())
    }

    /// Replicate a single value from `root` to every rank
    pub fn broadcast_value<T: Copy + Send + 'static>(
        &self,
        value: &mut T,
        root: usize,
    ) -> CommResult<()> {
        self.check_rank(root)?;
        if self.rank == root {
            for dest in (0..self.size).filter(|&r| r != root) {
                self.send(dest, Tag::Broadcast, vec![*value])?;
            }
        } else {
            *value = self.recv_value(root, Tag::Broadcast)?;
        }
        Ok(())
    }

    /// Concatenate every rank's `local` buffer on `root`
    ///
    /// Returns `Some(buffer)` on the root, ordered by ascending rank, and
    /// `None` elsewhere. Per-rank lengths may differ.
    pub fn gather<T: Clone + Send + 'static>(
        &self,
        local: &[T],
        root: usize,
    ) -> CommResult<Option<Vec<T>>> {
        self.check_rank(root)?;
        if self.rank != root {
            self.send(root, Tag::Gather, local.to_vec())?;
            return Ok(None);
        }

        let mut out = Vec::with_capacity(local.len() * self.size);
        for source in 0..self.size {
            if source == root {
                out.extend_from_slice(local);
            } else {
                let part: Vec<T> = self.recv(source, Tag::Gather)?;
                out.extend(part);
            }
        }
        tracing::trace!(rank = self.rank, len = out.len(), "gather complete");
        Ok(Some(out))
    }

    /// Fold every rank's value on `root` with `op`, in ascending rank order
    ///
    /// Returns `Some(result)` on the root and `None` elsewhere.
    pub fn reduce<T, F>(&self, value: T, root: usize, op: F) -> CommResult<Option<T>>
    where
        T: Send + 'static,
        F: Fn(T, T) -> T,
    {
        self.check_rank(root)?;
        if self.rank != root {
            self.send(root, Tag::Reduce, vec![value])?;
            return Ok(None);
        }

        let mut own = Some(value);
        let mut acc: Option<T> = None;
        for source in 0..self.size {
            let item = if source == root {
                match own.take() {
                    Some(v) => v,
                    None => continue,
                }
            } else {
                self.recv_value(source, Tag::Reduce)?
            };
            acc = Some(match acc {
                Some(a) => op(a, item),
                None => item,
            });
        }
        Ok(acc)
    }
}
