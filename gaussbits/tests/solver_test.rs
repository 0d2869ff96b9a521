use gaussbits::{solve, BitMatrix, BitVector, Elimination, Word};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn consistent_system<W: Word>(rows: usize, cols: usize, seed: u64) -> (BitMatrix<W>, BitVector<W>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let a = BitMatrix::random(&mut rng, rows, cols);
    let x0 = BitVector::random(&mut rng, cols);
    let b = a.dot(&x0).unwrap();
    (a, b)
}

fn check_consistent<W: Word>(rows: usize, cols: usize, seed: u64) {
    let (a, b) = consistent_system::<W>(rows, cols, seed);
    let x = a
        .x_for(&b)
        .unwrap()
        .unwrap_or_else(|| panic!("{}x{} system built from a solution must solve", rows, cols));
    assert_eq!(x.len(), cols);
    assert_eq!(a.dot(&x).unwrap(), b);
}

#[test]
fn square_systems() {
    for size in [1, 2, 7, 8, 63, 64, 65, 100] {
        check_consistent::<u64>(size, size, size as u64);
        check_consistent::<u8>(size, size, size as u64);
    }
}

#[test]
fn underdetermined_systems() {
    check_consistent::<u16>(10, 200, 1);
    check_consistent::<u32>(63, 64, 2);
    check_consistent::<u64>(1, 1000, 3);
}

#[test]
fn overdetermined_systems() {
    check_consistent::<u8>(200, 10, 4);
    check_consistent::<u64>(129, 128, 5);

    // a random right-hand side is almost never in the column space of a tall matrix
    let mut rng = SmallRng::seed_from_u64(6);
    let a: BitMatrix = BitMatrix::random(&mut rng, 200, 10);
    let b = BitVector::random(&mut rng, 200);
    if let Some(x) = a.x_for(&b).unwrap() {
        assert_eq!(a.dot(&x).unwrap(), b);
    }
}

#[test]
fn stacked_contradiction() {
    // the same equation twice with different right-hand sides
    let mut rng = SmallRng::seed_from_u64(7);
    let row = BitVector::<u32>::random(&mut rng, 50);
    let a = BitMatrix::from_rows(50, vec![row.clone(), row]).unwrap();
    assert_eq!(a.x_for(&BitVector::from_int_vec(&[1, 0])).unwrap(), None);
    assert_eq!(a.x_for(&BitVector::from_int_vec(&[0, 1])).unwrap(), None);
    assert!(a.x_for(&BitVector::from_int_vec(&[1, 1])).unwrap().is_some());
}

#[test]
fn solution_is_width_independent() {
    let (a, b) = consistent_system::<u64>(40, 70, 8);
    let x64 = a.x_for(&b).unwrap().unwrap();

    let a8: BitMatrix<u8> = a.convert();
    let b8: BitVector<u8> = b.convert();
    let x8 = a8.x_for(&b8).unwrap().unwrap();
    assert_eq!(x8, x64);
}

#[test]
fn free_function_matches_method() {
    let (a, b) = consistent_system::<u16>(30, 30, 9);
    assert_eq!(solve(&a, &b).unwrap(), a.x_for(&b).unwrap());
}

proptest! {
    #[test]
    fn solutions_satisfy_system(rows in 0usize..80, cols in 0usize..80, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let a: BitMatrix<u16> = BitMatrix::random(&mut rng, rows, cols);
        let b = BitVector::random(&mut rng, rows);
        let elim = Elimination::new(&a, &b).unwrap();
        let consistent = elim.is_consistent();
        match elim.into_solution() {
            Some(x) => {
                prop_assert!(consistent);
                prop_assert_eq!(a.dot(&x).unwrap(), b);
            }
            None => prop_assert!(!consistent),
        }
    }

    #[test]
    fn consistent_systems_solve(rows in 0usize..80, cols in 0usize..80, seed in any::<u64>()) {
        let (a, b) = consistent_system::<u32>(rows, cols, seed);
        let x = a.x_for(&b).unwrap();
        prop_assert!(x.is_some());
        prop_assert_eq!(a.dot(&x.unwrap()).unwrap(), b);
    }

    #[test]
    fn zero_row_with_one_is_inconsistent(size in 1usize..60, bad_row in 0usize..60, seed in any::<u64>()) {
        let bad_row = bad_row % size;
        let (mut a, mut b) = consistent_system::<u8>(size, size, seed);
        for j in 0..size {
            a.set_bit(bad_row, j, false);
        }
        b.set_bit(bad_row, true);
        prop_assert_eq!(a.x_for(&b).unwrap(), None);
    }
}
