//! Skill table and experience/level arithmetic.
//!
//! The level curve is the game's own: each level `l` contributes
//! `floor(l + 300 * 2^(l / 7))` points and the experience needed to leave level
//! `l` is a quarter of the running total.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECONDS_IN_MINUTE: u64 = 60;
pub const SECONDS_IN_HOUR: u64 = 3_600;
pub const SECONDS_IN_DAY: u64 = 86_400;
pub const SECONDS_IN_WEEK: u64 = SECONDS_IN_DAY * 7;
/// The tracker's "month" is a rolling 31-day window.
pub const SECONDS_IN_MONTH: u64 = SECONDS_IN_DAY * 31;

pub const MAX_LEVEL: u32 = 99;
pub const MAX_VIRTUAL_LEVEL: u32 = 126;

/// Column of a stats row holding efficient hours played, right after the skills.
pub const EHP_INDEX: usize = 24;

/// Tracked skills, in the order the API reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Overall,
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
}

const SKILL_NAMES: [&str; 24] = [
    "Overall",
    "Attack",
    "Defence",
    "Strength",
    "Hitpoints",
    "Ranged",
    "Prayer",
    "Magic",
    "Cooking",
    "Woodcutting",
    "Fletching",
    "Fishing",
    "Firemaking",
    "Crafting",
    "Smithing",
    "Mining",
    "Herblore",
    "Agility",
    "Thieving",
    "Slayer",
    "Farming",
    "Runecrafting",
    "Hunter",
    "Construction",
];

impl Skill {
    pub const ALL: [Skill; 24] = [
        Skill::Overall,
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Hitpoints,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecrafting,
        Skill::Hunter,
        Skill::Construction,
    ];

    /// Position of this skill in API responses.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Skill> {
        Skill::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        SKILL_NAMES[self.index()]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the skill at `index` (0 = Overall … 23 = Construction).
pub fn skill_name(index: usize) -> Option<&'static str> {
    SKILL_NAMES.get(index).copied()
}

/// Yields `(level, xp needed to reach level + 1)` for levels `1..=126`.
fn thresholds() -> impl Iterator<Item = (u32, u32)> {
    let mut points = 0.0_f64;
    (1..=MAX_VIRTUAL_LEVEL).map(move |lvl| {
        let l = f64::from(lvl);
        points += (l + 300.0 * 2f64.powf(l / 7.0)).floor();
        (lvl, (points / 4.0).floor() as u32)
    })
}

/// Level reached with `xp` experience, beyond 99 and up to 126.
pub fn virtual_level(xp: u32) -> u32 {
    thresholds()
        .find(|&(_, next)| next > xp)
        .map(|(lvl, _)| lvl)
        .unwrap_or(MAX_VIRTUAL_LEVEL)
}

/// Level reached with `xp` experience, capped at 99.
pub fn level(xp: u32) -> u32 {
    virtual_level(xp).min(MAX_LEVEL)
}

/// Experience at which `level` starts. `None` outside `1..=126`.
pub fn xp_for_level(level: u32) -> Option<u32> {
    match level {
        1 => Some(0),
        2..=MAX_VIRTUAL_LEVEL => thresholds()
            .find(|&(lvl, _)| lvl == level - 1)
            .map(|(_, xp)| xp),
        _ => None,
    }
}

/// Short duration string such as `2d8h3m5s`. Zero-valued units are left out.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let days = seconds / SECONDS_IN_DAY;
    let hours = seconds % SECONDS_IN_DAY / SECONDS_IN_HOUR;
    let minutes = seconds % SECONDS_IN_HOUR / SECONDS_IN_MINUTE;
    let secs = seconds % SECONDS_IN_MINUTE;

    [(days, 'd'), (hours, 'h'), (minutes, 'm'), (secs, 's')]
        .into_iter()
        .filter(|&(n, _)| n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_level_boundaries() {
        assert_eq!(level(0), 1);
        assert_eq!(level(82), 1);
        assert_eq!(level(83), 2);
        assert_eq!(level(1_154), 10);
        assert_eq!(level(13_034_430), 98);
        assert_eq!(level(13_034_431), 99);
    }

    #[test]
    fn caps() {
        assert_eq!(level(200_000_000), 99);
        assert_eq!(virtual_level(200_000_000), 126);
        assert_eq!(virtual_level(u32::MAX), 126);
        assert_eq!(virtual_level(13_034_431), 99);
        assert!(virtual_level(14_391_160) >= 100);
    }

    #[test]
    fn xp_for_level_inverts_level() {
        assert_eq!(xp_for_level(1), Some(0));
        assert_eq!(xp_for_level(2), Some(83));
        assert_eq!(xp_for_level(99), Some(13_034_431));
        assert_eq!(xp_for_level(0), None);
        assert_eq!(xp_for_level(127), None);
        for lvl in 1..=MAX_VIRTUAL_LEVEL {
            let xp = xp_for_level(lvl).unwrap();
            assert_eq!(virtual_level(xp), lvl);
            if xp > 0 {
                assert_eq!(virtual_level(xp - 1), lvl - 1);
            }
        }
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(90_061), "1d1h1m1s");
        assert_eq!(format_duration(3_600), "1h");
        assert_eq!(format_duration(86_401), "1d1s");
        assert_eq!(format_duration(SECONDS_IN_WEEK), "7d");
    }

    #[test]
    fn skill_table() {
        let expected = [
            "Overall",
            "Attack",
            "Defence",
            "Strength",
            "Hitpoints",
            "Ranged",
            "Prayer",
            "Magic",
            "Cooking",
            "Woodcutting",
            "Fletching",
            "Fishing",
            "Firemaking",
            "Crafting",
            "Smithing",
            "Mining",
            "Herblore",
            "Agility",
            "Thieving",
            "Slayer",
            "Farming",
            "Runecrafting",
            "Hunter",
            "Construction",
        ];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(skill_name(i), Some(*name), "index {i}");
        }
        assert_eq!(skill_name(24), None);
        assert_eq!(skill_name(usize::MAX), None);
        for (i, s) in Skill::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Skill::from_index(i), Some(*s));
            assert_eq!(skill_name(i), Some(s.name()));
        }
    }
}
