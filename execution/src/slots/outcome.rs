//! Win evaluation. A roll wins when all reels show the same symbol.

use slots_types::slots::Reels;

pub fn is_winning_combination(reels: &Reels) -> bool {
    reels.iter().all(|symbol| *symbol == reels[0])
}

/// Credits paid for the roll, or `None` when it does not win.
pub fn reward_for(reels: &Reels) -> Option<u64> {
    is_winning_combination(reels).then(|| reels[0].reward())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slots_types::slots::Symbol::{self, *};

    #[test]
    fn test_winning_combination() {
        assert!(is_winning_combination(&[Cherry, Cherry, Cherry]));
        assert!(is_winning_combination(&[Watermelon, Watermelon, Watermelon]));
    }

    #[test]
    fn test_losing_combination() {
        assert!(!is_winning_combination(&[Cherry, Lemon, Cherry]));
        assert!(!is_winning_combination(&[Cherry, Cherry, Lemon]));
        assert!(!is_winning_combination(&[Lemon, Cherry, Cherry]));
        assert!(!is_winning_combination(&[Cherry, Lemon, Orange]));
    }

    #[test]
    fn test_every_combination() {
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                for c in Symbol::ALL {
                    let expected = a == b && b == c;
                    assert_eq!(is_winning_combination(&[a, b, c]), expected);
                }
            }
        }
    }

    #[test]
    fn test_reward_for() {
        assert_eq!(reward_for(&[Cherry, Cherry, Cherry]), Some(10));
        assert_eq!(reward_for(&[Lemon, Lemon, Lemon]), Some(20));
        assert_eq!(reward_for(&[Orange, Orange, Orange]), Some(30));
        assert_eq!(reward_for(&[Watermelon, Watermelon, Watermelon]), Some(40));
        assert_eq!(reward_for(&[Watermelon, Watermelon, Orange]), None);
    }
}
