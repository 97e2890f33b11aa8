//! Fixed-size worker group
//!
//! A [`World`] runs the same closure on every rank, one scoped thread per
//! rank, and hands each thread its own [`Communicator`]. The worker count is
//! fixed when the world is created.

use crate::communicator::{Communicator, Envelope};
use crate::config::WorldConfig;
use crate::error::{CommError, CommResult};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// A fixed group of cooperating ranks
#[derive(Debug, Clone, Copy)]
pub struct World {
    config: WorldConfig,
}

impl World {
    /// Create a world, rejecting a size of zero
    pub fn new(config: WorldConfig) -> CommResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of ranks
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Run `f` on every rank and collect the results in rank order
    ///
    /// Blocks until every rank has returned. A panicking rank is reported as
    /// [`CommError::WorkerPanicked`]; the lowest panicking rank wins.
    pub fn run<F, R>(&self, f: F) -> CommResult<Vec<R>>
    where
        F: Fn(Communicator) -> R + Sync,
        R: Send,
    {
        let communicators = self.connect();
        let f = &f;

        std::thread::scope(|scope| {
            let handles: Vec<_> = communicators
                .into_iter()
                .map(|comm| scope.spawn(move || f(comm)))
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| {
                    handle.join().map_err(|_| {
                        tracing::error!(rank, "worker panicked");
                        CommError::WorkerPanicked { rank }
                    })
                })
                .collect()
        })
    }

    /// Build one channel per ordered (source, destination) pair.
    fn connect(&self) -> Vec<Communicator> {
        let size = self.config.size;
        let mut outboxes: Vec<Vec<Sender<Envelope>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        let mut inboxes: Vec<Vec<Receiver<Envelope>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();

        for outbox in outboxes.iter_mut() {
            for inbox in inboxes.iter_mut() {
                let (tx, rx) = unbounded();
                outbox.push(tx);
                inbox.push(rx);
            }
        }

        outboxes
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(rank, (out, inb))| Communicator::new(rank, out, inb))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communicator::{COORDINATOR, Tag};

    #[test]
    fn test_zero_size_world_rejected() {
        assert!(matches!(
            World::new(WorldConfig::new(0)),
            Err(CommError::InvalidWorldSize { size: 0 })
        ));
    }

    #[test]
    fn test_ranks_are_distinct() {
        let world = World::new(WorldConfig::new(4)).unwrap();
        let ranks = world.run(|comm| (comm.rank(), comm.size())).unwrap();
        assert_eq!(ranks, vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_point_to_point_ring() {
        let world = World::new(WorldConfig::new(3)).unwrap();
        let received = world
            .run(|comm| {
                let next = (comm.rank() + 1) % comm.size();
                let prev = (comm.rank() + comm.size() - 1) % comm.size();
                comm.send(next, Tag::User(7), vec![comm.rank() as u64])?;
                comm.recv::<u64>(prev, Tag::User(7))
            })
            .unwrap();
        let received: Vec<_> = received.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(received, vec![vec![2], vec![0], vec![1]]);
    }

    #[test]
    fn test_broadcast() {
        let world = World::new(WorldConfig::new(3)).unwrap();
        let bufs = world
            .run(|comm| {
                let mut buf = if comm.is_coordinator() {
                    vec![1, 0, 1, 1]
                } else {
                    Vec::new()
                };
                comm.broadcast(&mut buf, COORDINATOR).map(|_| buf)
            })
            .unwrap();
        for buf in bufs {
            assert_eq!(buf.unwrap(), vec![1, 0, 1, 1]);
        }
    }

    #[test]
    fn test_broadcast_value() {
        let world = World::new(WorldConfig::new(2)).unwrap();
        let values = world
            .run(|comm| {
                let mut rows: u32 = if comm.is_coordinator() { 12 } else { 0 };
                comm.broadcast_value(&mut rows, COORDINATOR).map(|_| rows)
            })
            .unwrap();
        assert!(values.into_iter().all(|v| v == Ok(12)));
    }

    #[test]
    fn test_gather_orders_by_rank() {
        let world = World::new(WorldConfig::new(3)).unwrap();
        let results = world
            .run(|comm| {
                // Uneven lengths: rank r contributes r + 1 copies of r.
                let local = vec![comm.rank() as i32; comm.rank() + 1];
                comm.gather(&local, COORDINATOR)
            })
            .unwrap();
        assert_eq!(results[0], Ok(Some(vec![0, 1, 1, 2, 2, 2])));
        assert_eq!(results[1], Ok(None));
        assert_eq!(results[2], Ok(None));
    }

    #[test]
    fn test_reduce_to_non_zero_root() {
        let world = World::new(WorldConfig::new(4)).unwrap();
        let results = world
            .run(|comm| comm.reduce(comm.rank() as i64 + 1, 2, |a, b| a + b))
            .unwrap();
        assert_eq!(results[2], Ok(Some(10)));
        assert_eq!(results[0], Ok(None));
    }

    #[test]
    fn test_invalid_root() {
        let world = World::new(WorldConfig::new(2)).unwrap();
        let results = world
            .run(|comm| comm.gather(&[1u8], 5).map(|_| ()))
            .unwrap();
        for r in results {
            assert_eq!(r, Err(CommError::InvalidRank { rank: 5, size: 2 }));
        }
    }

    #[test]
    fn test_type_mismatch() {
        let world = World::new(WorldConfig::new(2)).unwrap();
        let results = world
            .run(|comm| {
                if comm.is_coordinator() {
                    comm.send(1, Tag::User(0), vec![1u8]).map(|_| ())
                } else {
                    comm.recv::<u32>(0, Tag::User(0)).map(|_| ())
                }
            })
            .unwrap();
        assert_eq!(results[0], Ok(()));
        assert!(matches!(
            results[1],
            Err(CommError::TypeMismatch { peer: 0, .. })
        ));
    }

    #[test]
    fn test_single_rank_world() {
        let world = World::new(WorldConfig::new(1)).unwrap();
        let results = world
            .run(|comm| {
                let mut buf = vec![5, 6];
                comm.broadcast(&mut buf, COORDINATOR)?;
                comm.gather(&buf, COORDINATOR)
            })
            .unwrap();
        assert_eq!(results, vec![Ok(Some(vec![5, 6]))]);
    }
}
