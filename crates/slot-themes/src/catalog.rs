//! Built-in themes and strip generation

use std::collections::BTreeMap;

use rand::Rng;

use crate::config::{REEL_COUNT, ScatterRules, SymbolId, ThemeConfig};

/// Names of the built-in themes, in catalog order.
pub fn builtin_names() -> Vec<&'static str> {
    vec!["Classic", "AncientEgypt"]
}

/// Look up a built-in theme by name.
pub fn builtin(name: &str) -> Option<ThemeConfig> {
    match name {
        "Classic" => Some(classic()),
        "AncientEgypt" => Some(ancient_egypt()),
        _ => None,
    }
}

/// The classic fruit-machine theme: five fixed 30-symbol strips, nine
/// paylines, five symbols from Jackpot (rare, top-paying) down to Lemon
/// (filler).
pub fn classic() -> ThemeConfig {
    ThemeConfig {
        name: "Classic".into(),
        symbol_names: vec![
            "Jackpot".into(),
            "Seven".into(),
            "Bell".into(),
            "Cherry".into(),
            "Lemon".into(),
        ],
        reel_strips: vec![
            // Reel 1
            vec![
                4, 3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 0, 4, 3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 4, 3, 4,
                1, 4, 2, 4,
            ],
            // Reel 2
            vec![
                4, 2, 3, 4, 1, 4, 2, 4, 3, 4, 1, 4, 2, 4, 0, 4, 1, 4, 2, 3, 4, 1, 4, 4, 2, 3,
                4, 3, 4, 3,
            ],
            // Reel 3
            vec![
                3, 4, 2, 4, 3, 1, 4, 2, 3, 4, 2, 4, 3, 0, 4, 2, 3, 1, 4, 2, 3, 4, 2, 4, 3, 4,
                1, 2, 4, 2,
            ],
            // Reel 4
            vec![
                4, 2, 3, 4, 1, 4, 2, 4, 3, 4, 1, 4, 2, 4, 0, 4, 1, 4, 2, 3, 4, 1, 4, 4, 2, 3,
                4, 3, 4, 3,
            ],
            // Reel 5
            vec![
                4, 3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 0, 4, 3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 4, 3, 4,
                1, 4, 2, 4,
            ],
        ],
        paylines: vec![
            vec![1, 1, 1, 1, 1], // Middle row
            vec![0, 0, 0, 0, 0], // Top row
            vec![2, 2, 2, 2, 2], // Bottom row
            vec![0, 1, 2, 1, 0], // V shape
            vec![2, 1, 0, 1, 2], // Inverted V shape
            vec![1, 0, 0, 0, 1], // U shape top
            vec![1, 2, 2, 2, 1], // U shape bottom
            vec![0, 0, 1, 2, 2], // Diagonal top-left to bottom-right
            vec![2, 2, 1, 0, 0], // Diagonal bottom-left to top-right
        ],
        multipliers: BTreeMap::from([
            (0, BTreeMap::from([(3, 50), (4, 200), (5, 1000)])), // Jackpot
            (1, BTreeMap::from([(3, 25), (4, 100), (5, 500)])),  // Seven
            (2, BTreeMap::from([(3, 15), (4, 50), (5, 200)])),   // Bell
            (3, BTreeMap::from([(3, 10), (4, 25), (5, 100)])),   // Cherry
            (4, BTreeMap::from([(3, 5), (4, 15), (5, 50)])),     // Lemon
        ]),
        min_win_length: 3,
        epic_win_length: 5,
        scatter: Some(ScatterRules {
            payouts: BTreeMap::from([(3, 5), (4, 10), (5, 50)]),
            bonus_requirement: 3,
        }),
    }
}

/// Ancient Egypt theme. Slightly higher top multiplier than Classic, same
/// 3x/10x progression for the 4- and 5-of-a-kind counts.
pub fn ancient_egypt() -> ThemeConfig {
    ThemeConfig {
        name: "AncientEgypt".into(),
        symbol_names: vec![
            "Pharaoh Mask".into(),
            "Scarab Beetle".into(),
            "Eye of Horus".into(),
            "Ankh".into(),
            "Papyrus Scroll".into(),
        ],
        reel_strips: vec![
            vec![
                4, 3, 4, 2, 4, 1, 4, 3, 2, 4, 3, 0, 4, 3, 4, 2, 4, 1, 3, 4, 2, 4, 3, 4, 1, 4,
                2, 4, 3, 4,
            ],
            vec![
                3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 0, 4, 3, 2, 4, 1, 4, 3, 4, 2, 4, 3, 1, 4, 2, 4,
                3, 4, 4, 2,
            ],
            vec![
                4, 2, 3, 4, 3, 1, 4, 2, 4, 3, 2, 4, 3, 0, 4, 2, 3, 1, 4, 2, 4, 3, 2, 4, 3, 4,
                1, 4, 2, 4,
            ],
            vec![
                3, 4, 2, 4, 1, 4, 3, 4, 2, 4, 0, 4, 3, 2, 4, 1, 4, 3, 4, 2, 4, 3, 1, 4, 2, 4,
                3, 4, 4, 2,
            ],
            vec![
                4, 3, 4, 2, 4, 1, 4, 3, 2, 4, 3, 0, 4, 3, 4, 2, 4, 1, 3, 4, 2, 4, 3, 4, 1, 4,
                2, 4, 3, 4,
            ],
        ],
        paylines: vec![
            vec![1, 1, 1, 1, 1],
            vec![0, 0, 0, 0, 0],
            vec![2, 2, 2, 2, 2],
            vec![0, 1, 2, 1, 0],
            vec![2, 1, 0, 1, 2],
            vec![1, 0, 0, 0, 1],
            vec![1, 2, 2, 2, 1],
            vec![0, 0, 1, 2, 2],
            vec![2, 2, 1, 0, 0],
        ],
        multipliers: BTreeMap::from([
            (0, BTreeMap::from([(3, 12), (4, 36), (5, 120)])), // Pharaoh Mask
            (1, BTreeMap::from([(3, 6), (4, 18), (5, 60)])),   // Scarab Beetle
            (2, BTreeMap::from([(3, 4), (4, 12), (5, 40)])),   // Eye of Horus
            (3, BTreeMap::from([(3, 3), (4, 9), (5, 30)])),    // Ankh
            (4, BTreeMap::from([(3, 2), (4, 6), (5, 20)])),    // Papyrus Scroll
        ]),
        min_win_length: 3,
        epic_win_length: 5,
        scatter: None,
    }
}

/// Generate one uniform random strip per reel. Used by tests and by custom
/// themes that do not hand-author strip layouts.
pub fn random_strips(
    symbol_count: u32,
    strip_len: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<SymbolId>> {
    (0..REEL_COUNT)
        .map(|_| {
            (0..strip_len)
                .map(|_| rng.random_range(0..symbol_count))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtins_validate() {
        for name in builtin_names() {
            let theme = builtin(name).unwrap();
            theme.validate().unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_builtin_unknown_name() {
        assert!(builtin("Atlantis").is_none());
    }

    #[test]
    fn test_classic_paytable_values() {
        let theme = classic();
        assert_eq!(theme.multiplier(0, 5), Some(1000));
        assert_eq!(theme.multiplier(4, 3), Some(5));
        assert_eq!(theme.multiplier(4, 6), None);
        assert_eq!(theme.symbol_name(1), "Seven");
    }

    #[test]
    fn test_random_strips_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let strips = random_strips(5, 30, &mut rng);
        assert_eq!(strips.len(), REEL_COUNT);
        for strip in &strips {
            assert_eq!(strip.len(), 30);
            assert!(strip.iter().all(|&s| s < 5));
        }
    }
}
