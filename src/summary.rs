use crate::models::Stats;
use crate::skills::{MAX_LEVEL, Skill};
use serde::{Deserialize, Serialize};

/// Account-wide figures derived from a stats response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSummary {
    /// Sum of capped levels over every skill except Overall.
    pub total_level: u32,
    pub total_virtual_level: u32,
    /// Skills at level 99.
    pub maxed_skills: usize,
    pub overall_xp: i64,
    pub ehp: Option<i64>,
}

/// Compute the account summary for one player.
pub fn summarize(stats: &Stats) -> AccountSummary {
    let mut total_level = 0;
    let mut total_virtual_level = 0;
    let mut maxed_skills = 0;
    for (skill, row) in stats.iter_skills() {
        if skill == Skill::Overall {
            continue;
        }
        let lvl = row.level();
        total_level += lvl;
        total_virtual_level += row.virtual_level();
        if lvl == MAX_LEVEL {
            maxed_skills += 1;
        }
    }
    AccountSummary {
        total_level,
        total_virtual_level,
        maxed_skills,
        overall_xp: stats.get(Skill::Overall).map(|r| r.xp).unwrap_or(0),
        ehp: stats.ehp().map(|r| r.xp),
    }
}
