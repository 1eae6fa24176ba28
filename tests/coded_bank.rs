//! End-to-end runs of the coded bank, shaped like the reference experiments:
//! several random sets encoded into a few shared filters, then decoded.

use coded_bloom::{
    assign_codes, BitFilter, CodedConfig, CodedFilterBank, CountingFilter, Error, Filter,
    FilterConfig, SaltSet, SetCode,
};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_sets(rng: &mut StdRng, num_sets: usize, per_set: usize) -> Vec<Vec<u64>> {
    let distribution = Uniform::new(0, 10_000_000u64);
    let mut seen = HashSet::new();
    (0..num_sets)
        .map(|_| {
            let mut set = Vec::with_capacity(per_set);
            while set.len() < per_set {
                let value = rng.sample(distribution);
                if seen.insert(value) {
                    set.push(value);
                }
            }
            set
        })
        .collect()
}

#[test]
fn seven_sets_in_three_filters() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(2021);
    let config =
        CodedConfig::new(7, FilterConfig::new(100_000, 3).with_seed(17)).with_filter_count(3);
    let mut bank: CodedFilterBank = config.build_bank().unwrap();

    let sets = random_sets(&mut rng, 7, 100);
    for (i, set) in sets.iter().enumerate() {
        bank.encode_set_elements(i + 1, set.iter().copied()).unwrap();
    }

    let mut correct = 0;
    let total = sets.iter().map(Vec::len).sum::<usize>();
    for (i, set) in sets.iter().enumerate() {
        let expected = bank.code_book().code_for(i + 1).copied().unwrap();
        for &element in set {
            let decoded = bank.decode(element);
            // a decoded code can only gain ones, never lose them
            assert_eq!(decoded.value() & expected.value(), expected.value());
            if decoded == expected {
                correct += 1;
            }
        }
    }
    println!("correctly decoded: {}/{}", correct, total);
    assert!(correct > total * 9 / 10, "too many misdecodes: {correct}/{total}");
}

#[test]
fn assigned_codes_match_bank_layout() {
    let codes = assign_codes(7).unwrap();
    let salts = SaltSet::new(vec![1]).unwrap();
    let bank: CodedFilterBank = CodedFilterBank::new(7, 10, salts).unwrap();
    assert_eq!(bank.num_filters(), codes[0].len());
    assert_eq!(bank.code_book().iter().copied().collect::<Vec<_>>(), codes);
}

#[test]
fn filter_of_position_serves_every_set_with_a_one_there() {
    let salts = SaltSet::new(vec![5, 6]).unwrap();
    let mut bank: CodedFilterBank = CodedFilterBank::new(3, 10_000, salts).unwrap();
    bank.encode_set(1_234_567, 1).unwrap(); // 01
    bank.encode_set(7_654_321, 3).unwrap(); // 11

    let low: &BitFilter = bank.filter(1).unwrap();
    assert!(low.probably_contains(1_234_567));
    assert!(low.probably_contains(7_654_321));
    assert_eq!(bank.lookup_set(1_234_567), Some(1));
    assert_eq!(bank.lookup_set(7_654_321), Some(3));
}

#[test]
fn counting_bank_tracks_removals() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(7);
    let mut bank: CodedFilterBank<CountingFilter> =
        CodedConfig::new(3, FilterConfig::new(50_000, 3).with_seed(3))
            .build_bank()
            .unwrap();

    let sets = random_sets(&mut rng, 3, 200);
    for (i, set) in sets.iter().enumerate() {
        bank.encode_set_elements(i + 1, set.iter().copied()).unwrap();
    }
    for (i, set) in sets.iter().enumerate() {
        for &element in set {
            bank.remove_set(element, i + 1).unwrap();
        }
    }

    for set in &sets {
        for &element in set {
            assert!(bank.decode(element).is_zero());
        }
    }
    let code: SetCode = "11".parse().unwrap();
    assert_eq!(
        bank.remove(sets[0][0], &code),
        Err(Error::CounterUnderflow {
            index: *bank.scheme().derive_indices(sets[0][0]).iter().min().unwrap()
        })
    );
}
