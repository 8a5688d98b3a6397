//! SOL and lamport conversions for funding amounts

use crate::constants::LAMPORTS_PER_SOL;

/// Whole SOL to lamports
pub fn lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

/// Lamports to SOL
pub fn sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(lamports(1.5), 1_500_000_000);
        assert_eq!(sol(2_500_000_000), 2.5);
        assert_eq!(lamports(0.0), 0);
    }
}
