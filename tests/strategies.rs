use sumbench::{
    expected_sum,
    strategy::{is_single_cycle, Direct, Indirect, RandomShuffle, Vector},
    BenchError, Strategy, StrategyKind,
};

use crate::helper::{FixedShuffle, IdentityShuffle};


const SIZES: &[usize] = &[1, 2, 3, 6, 10, 1000, 4096];

fn setup_and_sum(strategy: &mut dyn Strategy, n: usize) -> Result<u64, BenchError> {
    let mut buffer = vec![0u64; n];
    strategy.setup(n, &mut buffer)?;
    Ok(strategy.sum(n, &buffer))
}

#[test]
fn test_every_strategy_matches_closed_form() -> anyhow::Result<()> {
    for kind in [
        StrategyKind::Direct,
        StrategyKind::Vector,
        StrategyKind::Indirect,
    ] {
        let mut strategy = kind.build(None);
        assert_eq!(strategy.name(), kind.name());
        for &n in SIZES {
            assert_eq!(setup_and_sum(&mut strategy, n)?, expected_sum(n), "{kind} N={n}");
        }
    }
    Ok(())
}

#[test]
fn test_strategy_names_match_tags() {
    assert_eq!(Direct.name(), StrategyKind::Direct.to_string());
    assert_eq!(Vector.name(), StrategyKind::Vector.to_string());
    assert_eq!(Indirect::new(IdentityShuffle).name(), StrategyKind::Indirect.name());
}

#[test]
fn test_expected_sum() {
    assert_eq!(expected_sum(0), 0);
    assert_eq!(expected_sum(1), 0);
    assert_eq!(expected_sum(6), 15);
    assert_eq!(expected_sum(1 << 28), 36028796884746240);
    // Largest accepted size: 2^31 * (2^32 - 1)
    assert_eq!(expected_sum(1 << 32), 9223372034707292160);
}

#[test]
fn test_direct_degenerate_size() -> anyhow::Result<()> {
    assert_eq!(setup_and_sum(&mut Direct, 1)?, 0);
    Ok(())
}

#[test]
fn test_direct_leaves_buffer_untouched() -> anyhow::Result<()> {
    let mut buffer = vec![7u64; 16];
    Direct.setup(16, &mut buffer)?;
    assert!(buffer.iter().all(|v| *v == 7));
    Ok(())
}

#[test]
fn test_vector_setup_is_identity() -> anyhow::Result<()> {
    let mut buffer = vec![u64::MAX; 100];
    Vector.setup(100, &mut buffer)?;
    for (i, v) in buffer.iter().enumerate() {
        assert_eq!(*v, i as u64);
    }
    Ok(())
}

#[test]
fn test_indirect_setup_builds_single_cycle() -> anyhow::Result<()> {
    let mut strategy = Indirect::new(RandomShuffle::new(None));
    for n in [1, 2, 6, 257, 10_000] {
        let mut buffer = vec![0u64; n];
        strategy.setup(n, &mut buffer)?;
        assert!(is_single_cycle(&buffer), "N={n}");
        // Still a permutation of 0..n
        let mut sorted = buffer.clone();
        sorted.sort_unstable();
        assert!(sorted.iter().enumerate().all(|(i, v)| *v == i as u64));
    }
    Ok(())
}

#[test]
fn test_indirect_six() -> anyhow::Result<()> {
    let mut strategy: Indirect = Indirect::default();
    let mut buffer = vec![0u64; 6];
    strategy.setup(6, &mut buffer)?;
    assert!(is_single_cycle(&buffer));
    assert_eq!(strategy.sum(6, &buffer), 15);
    Ok(())
}

#[test]
fn test_indirect_seed_is_reproducible() -> anyhow::Result<()> {
    let build = |seed| -> anyhow::Result<Vec<u64>> {
        let mut strategy = Indirect::new(RandomShuffle::new(Some(seed)));
        let mut buffer = vec![0u64; 512];
        strategy.setup(512, &mut buffer)?;
        Ok(buffer)
    };
    assert_eq!(build(42)?, build(42)?);
    assert_ne!(build(42)?, build(43)?);
    Ok(())
}

#[test]
fn test_indirect_rejects_broken_permutation() {
    let mut strategy = Indirect::new(IdentityShuffle);
    let mut buffer = vec![0u64; 10];
    let err = strategy.setup(10, &mut buffer).unwrap_err();
    assert!(matches!(err, BenchError::SetupConsistency { n: 10 }));
    assert_eq!(err.problem_size(), Some(10));
    assert!(err.to_string().contains("N=10"));
}

#[test]
fn test_indirect_rejects_two_cycles() {
    // (0 1 2)(3 4 5)
    let mut strategy = Indirect::new(FixedShuffle(vec![1, 2, 0, 4, 5, 3]));
    let mut buffer = vec![0u64; 6];
    assert!(matches!(
        strategy.setup(6, &mut buffer),
        Err(BenchError::SetupConsistency { n: 6 })
    ));
}

#[test]
fn test_single_cycle_check() {
    assert!(is_single_cycle(&[0]));
    assert!(is_single_cycle(&[1, 2, 3, 0]));
    assert!(is_single_cycle(&[3, 0, 1, 2]));
    assert!(!is_single_cycle(&[1, 0, 3, 2]));
    assert!(!is_single_cycle(&[0, 1]));
    // Not a permutation at all
    assert!(!is_single_cycle(&[1, 1, 1]));
    assert!(!is_single_cycle(&[1, 9, 0]));
}
