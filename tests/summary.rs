use cml_rs::models::{SkillStat, Stats};
use cml_rs::skills::{EHP_INDEX, Skill};
use cml_rs::summary::summarize;

fn stats_with(xp_per_skill: i64, ehp: Option<i64>) -> Stats {
    let mut skills: Vec<SkillStat> = Skill::ALL
        .iter()
        .map(|s| SkillStat {
            xp: if *s == Skill::Overall { xp_per_skill * 23 } else { xp_per_skill },
            rank: 1,
        })
        .collect();
    if let Some(h) = ehp {
        assert_eq!(skills.len(), EHP_INDEX);
        skills.push(SkillStat { xp: h, rank: 10 });
    }
    Stats {
        timestamp: 0,
        skills,
    }
}

#[test]
fn maxed_account() {
    let s = summarize(&stats_with(13_034_431, Some(12_000)));
    assert_eq!(s.total_level, 99 * 23);
    assert_eq!(s.total_virtual_level, 99 * 23);
    assert_eq!(s.maxed_skills, 23);
    assert_eq!(s.overall_xp, 13_034_431 * 23);
    assert_eq!(s.ehp, Some(12_000));
}

#[test]
fn fresh_account_has_no_ehp_column() {
    let s = summarize(&stats_with(0, None));
    assert_eq!(s.total_level, 23);
    assert_eq!(s.maxed_skills, 0);
    assert_eq!(s.ehp, None);
}

#[test]
fn virtual_total_exceeds_capped_total() {
    let s = summarize(&stats_with(200_000_000, None));
    assert_eq!(s.total_level, 99 * 23);
    assert_eq!(s.total_virtual_level, 126 * 23);
}
