use seqdeck_core::{evaluate, SequenceType};

use SequenceType::{Arithmetic, Decreasing, Even, Fibonacci, Geometric, Increasing, Odd};

macro_rules! sequence_case {
    ($name:ident, [$($rank:expr),*], has [$($yes:expr),*], lacks [$($no:expr),*]) => {
        #[test]
        fn $name() {
            let result = evaluate(&[$($rank),*]);
            $(assert!(result.contains(&$yes), "{:?} missing {:?}", result, $yes);)*
            $(assert!(!result.contains(&$no), "{:?} unexpectedly has {:?}", result, $no);)*
        }
    };
}

sequence_case!(
    evens_step_two_also_sum,
    [2, 4, 6],
    has [Arithmetic, Increasing, Even, Fibonacci],
    lacks [Odd, Decreasing, Geometric]
);
sequence_case!(
    doubling,
    [2, 4, 8],
    has [Geometric, Increasing, Even],
    lacks [Arithmetic, Odd, Decreasing]
);
sequence_case!(
    fibonacci_run,
    [1, 2, 3, 5],
    has [Fibonacci, Increasing],
    lacks [Arithmetic, Geometric, Decreasing, Odd, Even]
);
sequence_case!(
    odd_descent,
    [5, 3, 1],
    has [Arithmetic, Decreasing, Odd],
    lacks [Increasing, Even, Geometric, Fibonacci]
);
sequence_case!(
    tripling,
    [1, 3, 9],
    has [Geometric, Increasing, Odd],
    lacks [Arithmetic, Even, Fibonacci]
);
sequence_case!(
    fibonacci_ignores_first_pair,
    [8, 5, 13],
    has [Fibonacci],
    lacks [Increasing, Decreasing, Arithmetic]
);
sequence_case!(
    halving_is_not_geometric,
    [8, 4, 2],
    has [Decreasing, Even],
    lacks [Geometric, Arithmetic]
);
sequence_case!(
    plateau_breaks_monotonic,
    [3, 3, 5],
    has [Odd],
    lacks [Increasing, Decreasing, Arithmetic, Geometric, Fibonacci]
);
sequence_case!(
    mixed_parity_nothing,
    [5, 5, 2],
    has [],
    lacks [Arithmetic, Geometric, Increasing, Decreasing, Odd, Even, Fibonacci]
);

#[test]
fn short_inputs_satisfy_nothing() {
    assert!(evaluate(&[]).is_empty());
    assert!(evaluate(&[4]).is_empty());
    assert!(evaluate(&[2, 4]).is_empty());
}

#[test]
fn fibonacci_plus_others_is_a_set() {
    let result = evaluate(&[1, 2, 3]);
    assert!(result.contains(&Fibonacci));
    assert!(result.contains(&Arithmetic));
    assert!(result.contains(&Increasing));
    assert_eq!(result.len(), 3);
}
