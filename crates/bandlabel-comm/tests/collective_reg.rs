//! Collective operation regression test
//!
//! Run with:
//! ```
//! cargo test -p bandlabel-comm --test collective_reg
//! ```

use bandlabel_comm::{COORDINATOR, CommError, Tag, World, WorldConfig};
use bandlabel_test::RegParams;

#[test]
fn collective_reg() {
    bandlabel_test::init_tracing();
    let mut rp = RegParams::new("collective");

    // --- Test 1: gather orders blocks by rank for every world size ---
    for size in 1..=6 {
        let world = World::new(WorldConfig::new(size)).unwrap();
        let results = world
            .run(|comm| {
                let local: Vec<i32> = (0..=comm.rank() as i32).collect();
                comm.gather(&local, COORDINATOR)
            })
            .unwrap();
        let expected: Vec<i32> = (0..size as i32).flat_map(|r| 0..=r).collect();
        rp.check(
            results[0] == Ok(Some(expected)),
            "coordinator holds rank-ordered blocks",
        );
        rp.check(
            results[1..].iter().all(|r| *r == Ok(None)),
            "workers receive nothing from gather",
        );
    }

    // --- Test 2: broadcast then reduce round trip ---
    let world = World::new(WorldConfig::new(4)).unwrap();
    let results = world
        .run(|comm| {
            let mut seed = if comm.is_coordinator() { 10u64 } else { 0 };
            comm.broadcast_value(&mut seed, COORDINATOR)?;
            comm.reduce(seed + comm.rank() as u64, COORDINATOR, |a, b| a + b)
        })
        .unwrap();
    rp.check(results[0] == Ok(Some(46)), "reduce sums broadcast values");

    // --- Test 3: coordinator leaving early releases blocked workers ---
    let world = World::new(WorldConfig::new(3)).unwrap();
    let results = world
        .run(|comm| {
            if comm.is_coordinator() {
                return Ok(Vec::new());
            }
            let mut buf: Vec<u8> = Vec::new();
            comm.broadcast(&mut buf, COORDINATOR).map(|_| buf)
        })
        .unwrap();
    for result in &results[1..] {
        rp.check(
            *result == Err(CommError::Disconnected { peer: COORDINATOR }),
            "worker sees coordinator disconnect",
        );
    }

    // --- Test 4: queued messages survive the sender's exit ---
    let world = World::new(WorldConfig::new(2)).unwrap();
    let results = world
        .run(|comm| {
            if comm.rank() == 0 {
                comm.send(1, Tag::User(3), vec![1u16, 2, 3]).unwrap();
                return None;
            }
            let first = comm.recv::<u16>(0, Tag::User(3));
            let second = comm.recv::<u16>(0, Tag::User(3));
            Some((first, second))
        })
        .unwrap();
    rp.check(
        results[1]
            == Some((
                Ok(vec![1, 2, 3]),
                Err(CommError::Disconnected { peer: 0 }),
            )),
        "queued message delivered before disconnect",
    );

    // --- Test 5: mismatched tags are reported ---
    let world = World::new(WorldConfig::new(2)).unwrap();
    let results = world
        .run(|comm| {
            if comm.rank() == 0 {
                comm.send(1, Tag::User(1), vec![0u8])?;
                return Ok(());
            }
            comm.recv::<u8>(0, Tag::User(2)).map(|_| ())
        })
        .unwrap();
    rp.check(
        results[1]
            == Err(CommError::UnexpectedTag {
                peer: 0,
                expected: Tag::User(2),
                actual: Tag::User(1),
            }),
        "tag mismatch reported",
    );

    assert!(rp.cleanup(), "collective regression test failed");
}

