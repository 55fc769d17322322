//! Reel generation.

use slots_types::slots::{Reels, Symbol};

use super::outcome::is_winning_combination;
use super::RandomSource;

fn draw_symbol<R: RandomSource>(rng: &mut R) -> Symbol {
    Symbol::ALL[rng.next_index(Symbol::ALL.len())]
}

/// Three independent, uniform draws from the catalog.
pub fn generate_roll<R: RandomSource>(rng: &mut R) -> Reels {
    [draw_symbol(rng), draw_symbol(rng), draw_symbol(rng)]
}

/// A roll that never wins.
///
/// Draws normally; if all three reels match, only the last reel is redrawn
/// from the symbols other than the first reel's.
pub fn generate_losing_roll<R: RandomSource>(rng: &mut R) -> Reels {
    let mut reels = generate_roll(rng);
    if is_winning_combination(&reels) {
        let first = reels[0];
        let others: Vec<Symbol> = Symbol::ALL
            .iter()
            .copied()
            .filter(|symbol| *symbol != first)
            .collect();
        reels[2] = others[rng.next_index(others.len())];
    }
    reels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ScriptedRng;
    use crate::slots::GameRng;
    use slots_types::slots::Symbol::*;
    use slots_types::SessionId;

    #[test]
    fn test_generate_roll_uses_catalog_order() {
        let mut rng = ScriptedRng::new().with_indices(&[0, 1, 3]);
        assert_eq!(generate_roll(&mut rng), [Cherry, Lemon, Watermelon]);
        assert_eq!(rng.unit_draws(), 0);
    }

    #[test]
    fn test_losing_roll_keeps_non_winning_draw() {
        let mut rng = ScriptedRng::new().with_indices(&[2, 2, 1]);
        assert_eq!(generate_losing_roll(&mut rng), [Orange, Orange, Lemon]);
        assert_eq!(rng.index_draws(), 3);
    }

    #[test]
    fn test_losing_roll_redraws_third_reel() {
        // Draws orange x3, then index 2 among [cherry, lemon, watermelon].
        let mut rng = ScriptedRng::new().with_indices(&[2, 2, 2, 2]);
        assert_eq!(generate_losing_roll(&mut rng), [Orange, Orange, Watermelon]);
        assert_eq!(rng.index_draws(), 4);
    }

    #[test]
    fn test_losing_roll_never_wins() {
        let seed = [3u8; 32];
        let session = SessionId::random();
        for roll in 0..2_000 {
            let mut rng = GameRng::new(&seed, &session, roll);
            assert!(!is_winning_combination(&generate_losing_roll(&mut rng)));
        }
    }

    #[test]
    fn test_generate_roll_is_roughly_uniform() {
        let seed = [9u8; 32];
        let session = SessionId::random();
        let mut counts = [[0u32; 4]; 3];
        let rolls = 8_000;
        for roll in 0..rolls {
            let mut rng = GameRng::new(&seed, &session, roll);
            for (reel, symbol) in generate_roll(&mut rng).iter().enumerate() {
                counts[reel][*symbol as usize] += 1;
            }
        }
        // Expected 2000 per cell; allow a generous band.
        for reel in counts {
            for count in reel {
                assert!((1_800..=2_200).contains(&count), "count {count} outside band");
            }
        }
    }
}
