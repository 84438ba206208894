//! Dice-pool damage resolution.

use crate::config::GameConfig;

use super::dice::{DiceRng, PcgStream};

/// Breakdown of one resolved attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Highest single die.
    pub max_roll: u32,
    /// Extra natural maximums beyond the one that set `max_roll`.
    pub bonus: u32,
    /// `max_roll + bonus`, before defense.
    pub raw: u32,
    /// Damage that got through defense.
    pub net: u32,
    pub hp_before: u32,
    pub hp_after: u32,
}

impl DamageRoll {
    /// Portion of the raw roll absorbed by defense.
    pub fn blocked(&self) -> u32 {
        self.raw - self.net
    }
}

/// Seeded damage computation shared by the interactive client and the
/// verifiable transition.
///
/// # Formula
///
/// ```text
/// roll `attack` dice in [1, sides]
/// max_roll = highest die
/// bonus    = natural `sides` that did not raise the running maximum
/// raw      = max_roll + bonus           (never above sides + attack - 1)
/// net      = max(0, raw - defense)
/// hp'      = max(0, hp - net)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatResolver {
    dice_sides: u32,
}

impl CombatResolver {
    pub fn new(dice_sides: u32) -> Self {
        Self {
            dice_sides: dice_sides.max(1),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.dice_sides)
    }

    pub fn dice_sides(&self) -> u32 {
        self.dice_sides
    }

    /// Rolls `attack_power` dice seeded by `seed` and applies the result.
    pub fn roll(
        &self,
        seed: u64,
        attack_power: u32,
        defender_hp: u32,
        defender_defense: u32,
    ) -> DamageRoll {
        let mut rng = PcgStream::from_seed(seed);
        self.roll_with(&mut rng, attack_power, defender_hp, defender_defense)
    }

    /// Same as [`roll`](Self::roll) with a caller-provided generator.
    pub fn roll_with(
        &self,
        rng: &mut impl DiceRng,
        attack_power: u32,
        defender_hp: u32,
        defender_defense: u32,
    ) -> DamageRoll {
        let mut max_roll = 0;
        let mut bonus = 0;
        for _ in 0..attack_power {
            let roll = rng.roll_die(self.dice_sides);
            if roll > max_roll {
                max_roll = roll;
                continue;
            }
            if roll == self.dice_sides {
                bonus += 1;
            }
        }

        let raw = max_roll.saturating_add(bonus);
        let net = raw.saturating_sub(defender_defense);
        DamageRoll {
            max_roll,
            bonus,
            raw,
            net,
            hp_before: defender_hp,
            hp_after: apply_damage(defender_hp, net),
        }
    }

    /// Returns only the defender's new hit points.
    pub fn resolve(
        &self,
        seed: u64,
        attack_power: u32,
        defender_hp: u32,
        defender_defense: u32,
    ) -> u32 {
        self.roll(seed, attack_power, defender_hp, defender_defense)
            .hp_after
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_DICE_SIDES)
    }
}

/// Resolves damage with the default six-sided dice.
pub fn resolve_damage(
    seed: u64,
    attack_power: u32,
    defender_hp: u32,
    defender_defense: u32,
) -> u32 {
    CombatResolver::default().resolve(seed, attack_power, defender_hp, defender_defense)
}

/// Like [`resolve_damage`] but returns the full breakdown.
pub fn roll_damage(
    seed: u64,
    attack_power: u32,
    defender_hp: u32,
    defender_defense: u32,
) -> DamageRoll {
    CombatResolver::default().roll(seed, attack_power, defender_hp, defender_defense)
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of die faces.
    struct Loaded<'a> {
        faces: &'a [u32],
        index: usize,
    }

    impl DiceRng for Loaded<'_> {
        fn next_u32(&mut self) -> u32 {
            // roll_die adds one back
            let face = self.faces[self.index] - 1;
            self.index += 1;
            face
        }
    }

    fn roll_faces(faces: &[u32], defense: u32) -> DamageRoll {
        let mut rng = Loaded { faces, index: 0 };
        CombatResolver::default().roll_with(&mut rng, faces.len() as u32, 20, defense)
    }

    #[test]
    fn single_die_deals_its_face() {
        let roll = roll_faces(&[4], 0);
        assert_eq!((roll.max_roll, roll.bonus, roll.raw), (4, 0, 4));
        assert_eq!(roll.hp_after, 16);
    }

    #[test]
    fn repeated_natural_max_adds_bonus() {
        let roll = roll_faces(&[6, 6, 6], 0);
        assert_eq!((roll.max_roll, roll.bonus, roll.raw), (6, 2, 8));
    }

    #[test]
    fn raw_damage_saturates_on_huge_dice() {
        let mut rng = Loaded {
            faces: &[u32::MAX, u32::MAX],
            index: 0,
        };
        let roll = CombatResolver::new(u32::MAX).roll_with(&mut rng, 2, 20, 0);
        assert_eq!((roll.max_roll, roll.bonus), (u32::MAX, 1));
        assert_eq!(roll.raw, u32::MAX);
        assert_eq!(roll.hp_after, 0);
    }

    #[test]
    fn first_natural_max_only_sets_maximum() {
        // The six raises the running maximum, so it is not a bonus.
        let roll = roll_faces(&[3, 6, 2], 0);
        assert_eq!((roll.max_roll, roll.bonus, roll.raw), (6, 0, 6));
    }

    #[test]
    fn defense_reduces_and_clamps() {
        let roll = roll_faces(&[5, 6], 4);
        assert_eq!(roll.raw, 6);
        assert_eq!(roll.net, 2);
        assert_eq!(roll.blocked(), 4);

        let roll = roll_faces(&[5], 9);
        assert_eq!(roll.net, 0);
        assert_eq!(roll.hp_after, 20);
    }

    #[test]
    fn hp_never_goes_negative() {
        let resolver = CombatResolver::default();
        for seed in 0..64 {
            assert_eq!(resolver.resolve(seed, 4, 1, 0), 0);
        }
    }

    #[test]
    fn defense_at_max_roll_absorbs_everything() {
        for seed in 0..256 {
            assert_eq!(resolve_damage(seed, 1, 10, 11), 10);
            assert_eq!(resolve_damage(seed, 1, 10, 6), 10);
            assert_eq!(resolve_damage(seed, 3, 10, 8), 10);
        }
    }

    #[test]
    fn undefended_single_die_always_hurts() {
        for seed in 0..256 {
            let hp = resolve_damage(seed, 1, 10, 0);
            assert!(hp < 10);
            assert!(hp >= 4);
        }
    }

    #[test]
    fn zero_attack_power_deals_nothing() {
        assert_eq!(resolve_damage(3, 0, 10, 0), 10);
    }

    #[test]
    fn resolution_is_deterministic() {
        for seed in [0, 1, 99, u64::MAX] {
            assert_eq!(resolve_damage(seed, 3, 30, 1), resolve_damage(seed, 3, 30, 1));
        }
    }
}
