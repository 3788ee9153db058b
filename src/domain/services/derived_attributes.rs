//! Derived attribute calculators
//!
//! Pure functions over characteristic scores. Sums are widened to `i64` and
//! divisions floor toward negative infinity, so any `i32` input is accepted.

use crate::domain::value_objects::{
    Characteristics, DamageBonus, DerivedAttributes, HitPoints, Luck, MagicPoints, Sanity,
};

/// Maximum sanity before Cthulhu Mythos is subtracted
pub const SANITY_MAXIMUM: i32 = 99;

/// 7 when both STR and DEX are below SIZ, 9 when both are above, otherwise 8
pub fn movement_rate(strength: i32, dexterity: i32, size: i32) -> u8 {
    if strength < size && dexterity < size {
        7
    } else if strength > size && dexterity > size {
        9
    } else {
        8
    }
}

/// Damage bonus and build from the STR + SIZ table.
///
/// Above 444 the table extrapolates one extra d6 per 80 points, counted from
/// 204. That makes 445 land on `+4d6`/5 rather than the next step.
pub fn damage_bonus_and_build(strength: i32, size: i32) -> DamageBonus {
    let total = i64::from(strength) + i64::from(size);

    let (damage_bonus, build) = match total {
        t if t <= 64 => ("-2".to_string(), -2),
        t if t <= 84 => ("-1".to_string(), -1),
        t if t <= 124 => ("0".to_string(), 0),
        t if t <= 164 => ("+1d4".to_string(), 1),
        t if t <= 204 => ("+1d6".to_string(), 2),
        t if t <= 284 => ("+2d6".to_string(), 3),
        t if t <= 364 => ("+3d6".to_string(), 4),
        t if t <= 444 => ("+4d6".to_string(), 5),
        t => {
            let extra = (t - 204).div_euclid(80);
            let dice = (extra + 1).min(12);
            let build = (extra + 2).min(13) as i32;
            (format!("+{}d6", dice), build)
        }
    };

    DamageBonus {
        damage_bonus,
        build,
    }
}

pub fn hit_points(constitution: i32, size: i32) -> HitPoints {
    // |CON + SIZ| < 2^32, so a tenth of it always fits back in i32
    let maximum = (i64::from(constitution) + i64::from(size)).div_euclid(10) as i32;
    HitPoints {
        current: maximum,
        maximum,
    }
}

pub fn sanity(power: i32) -> Sanity {
    Sanity {
        current: power,
        maximum: SANITY_MAXIMUM,
        starting: power,
    }
}

pub fn luck(power: i32) -> Luck {
    Luck {
        current: power,
        starting: power,
    }
}

pub fn magic_points(power: i32) -> MagicPoints {
    let maximum = power.div_euclid(5);
    MagicPoints {
        current: maximum,
        maximum,
    }
}

/// All derived attributes for a fresh investigator
pub fn compute_derived_attributes(characteristics: &Characteristics) -> DerivedAttributes {
    let DamageBonus {
        damage_bonus,
        build,
    } = damage_bonus_and_build(characteristics.strength, characteristics.size);

    DerivedAttributes {
        hit_points: hit_points(characteristics.constitution, characteristics.size),
        sanity: sanity(characteristics.power),
        luck: luck(characteristics.power),
        magic_points: magic_points(characteristics.power),
        movement_rate: movement_rate(
            characteristics.strength,
            characteristics.dexterity,
            characteristics.size,
        ),
        damage_bonus,
        build,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonus(strength: i32, size: i32) -> (String, i32) {
        let db = damage_bonus_and_build(strength, size);
        (db.damage_bonus, db.build)
    }

    #[test]
    fn test_movement_rate() {
        assert_eq!(movement_rate(50, 50, 50), 8);
        assert_eq!(movement_rate(40, 45, 50), 7);
        assert_eq!(movement_rate(60, 55, 50), 9);
        assert_eq!(movement_rate(60, 40, 50), 8);
    }

    #[test]
    fn test_damage_bonus_table() {
        assert_eq!(bonus(0, 0), ("-2".to_string(), -2));
        assert_eq!(bonus(40, 40), ("-1".to_string(), -1));
        assert_eq!(bonus(60, 60), ("0".to_string(), 0));
        assert_eq!(bonus(80, 70), ("+1d4".to_string(), 1));
        assert_eq!(bonus(100, 100), ("+1d6".to_string(), 2));
        assert_eq!(bonus(222, 222), ("+4d6".to_string(), 5));
    }

    #[test]
    fn test_damage_bonus_extrapolation() {
        assert_eq!(bonus(223, 222), ("+4d6".to_string(), 5));
        assert_eq!(bonus(262, 262), ("+5d6".to_string(), 6));
        assert_eq!(bonus(10_000, 10_000), ("+12d6".to_string(), 13));
    }

    #[test]
    fn test_damage_bonus_is_monotone() {
        let mut last_build = i32::MIN;
        for total in 0..=2000 {
            let (_, build) = bonus(total, 0);
            assert!(build >= last_build, "build dropped at total {}", total);
            last_build = build;
        }
    }

    #[test]
    fn test_hit_points_and_pools() {
        assert_eq!(hit_points(60, 70).maximum, 13);
        let s = sanity(55);
        assert_eq!((s.current, s.starting, s.maximum), (55, 55, 99));
        assert_eq!(luck(55).current, 55);
        assert_eq!(magic_points(55).maximum, 11);
    }

    #[test]
    fn test_negative_inputs_floor() {
        assert_eq!(hit_points(-5, 0).maximum, -1);
        assert_eq!(magic_points(-1).maximum, -1);
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let c = Characteristics::uniform(i32::MAX);
        let derived = compute_derived_attributes(&c);
        assert_eq!(derived.hit_points.maximum, 429_496_729);
        assert_eq!(derived.damage_bonus, "+12d6");

        let c = Characteristics::uniform(i32::MIN);
        let derived = compute_derived_attributes(&c);
        assert_eq!(derived.build, -2);
        assert_eq!(derived.movement_rate, 8);
    }

    #[test]
    fn test_compute_is_pure() {
        let c = Characteristics {
            strength: 80,
            dexterity: 60,
            intelligence: 70,
            constitution: 60,
            appearance: 50,
            power: 55,
            size: 70,
            education: 75,
        };
        let first = compute_derived_attributes(&c);
        let second = compute_derived_attributes(&c);
        assert_eq!(first, second);
        // STR + SIZ = 150 sits in the +1d4 band
        assert_eq!(first.damage_bonus, "+1d4");
        assert_eq!(first.build, 1);
        assert_eq!(first.hit_points.maximum, 13);
        assert_eq!(first.sanity.current, 55);
        assert_eq!(first.sanity.maximum, 99);
        assert_eq!(first.magic_points.maximum, 11);
        assert_eq!(first.movement_rate, 8);
    }
}
