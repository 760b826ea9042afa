//! Quadratic voting arithmetic.
//!
//! Casting `n` votes costs `n^2` credits, so a vote's weight is the
//! square root of the credits spent on it.

/// Integer square root using Newton's method.
/// Returns floor(sqrt(n)).
pub fn integer_sqrt(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }

    // Iterate in u128 so the first guess cannot overflow near u64::MAX.
    let n = n as u128;
    let mut x = n;
    let mut y = (x + 1) / 2;

    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }

    x as u64
}

/// Check whether `n` is a perfect square.
pub fn is_perfect_square(n: u64) -> bool {
    let root = integer_sqrt(n);
    root * root == n
}

/// Calculate cost for quadratic voting.
///
/// In quadratic voting, cost = votes^2 (not linear).
/// This ensures that expressing strong preferences is more expensive.
/// Returns `None` on overflow.
pub fn quadratic_cost(votes: u64) -> Option<u64> {
    votes.checked_mul(votes)
}

/// Calculate maximum votes given a credit budget.
///
/// Returns floor(sqrt(budget)).
pub fn max_votes_from_budget(budget: u64) -> u64 {
    integer_sqrt(budget)
}
