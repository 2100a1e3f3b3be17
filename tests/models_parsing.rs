use cml_rs::models::{ParseError, SearchResult, SkillStat, Stats, Track};
use cml_rs::skills::Skill;

/// Timestamp line, then `rows` padded with `filler` to 25 rows (24 skills + EHP).
fn body(timestamp: &str, rows: &[&str], filler: &str) -> String {
    let mut lines = vec![timestamp.to_string()];
    lines.extend(rows.iter().map(|r| r.to_string()));
    while lines.len() < 26 {
        lines.push(filler.to_string());
    }
    lines.join("\n")
}

#[test]
fn parse_stats_sample() {
    let sample = body(
        "1414000000",
        &["4600000000,1", "200000000,3", "13034431,120", "-1,-1"],
        "0,-1",
    );
    let stats: Stats = sample.parse().unwrap();
    assert_eq!(stats.timestamp, 1_414_000_000);
    assert_eq!(stats.skills.len(), 25);
    assert_eq!(
        stats.get(Skill::Attack),
        Some(&SkillStat {
            xp: 200_000_000,
            rank: 3
        })
    );
    assert_eq!(stats.get(Skill::Defence).unwrap().level(), 99);
    assert_eq!(stats.get(Skill::Attack).unwrap().virtual_level(), 126);
    assert_eq!(stats.get(Skill::Strength).unwrap().level(), 1);
    assert_eq!(stats.get(Skill::Construction).unwrap().xp, 0);
    assert!(stats.ehp().is_some());
}

#[test]
fn parse_track_sample() {
    let sample = body(
        "1413500000",
        &["12000,-40,4599988000", "0,0,200000000"],
        "0,0,0",
    );
    let track: Track = sample.parse().unwrap();
    assert_eq!(track.timestamp, 1_413_500_000);
    let overall = track.get(Skill::Overall).unwrap();
    assert_eq!(overall.xp_gained, 12_000);
    assert_eq!(overall.rank_change, -40);
    assert_eq!(overall.xp_start, 4_599_988_000);
}

#[test]
fn track_rows_need_three_fields() {
    let err = "1\n1,2\n".parse::<Track>().unwrap_err();
    assert_eq!(
        err,
        ParseError::BadRow {
            line: 2,
            expected: 3,
            got: "1,2".into()
        }
    );
}

#[test]
fn bad_responses() {
    assert_eq!("".parse::<Stats>(), Err(ParseError::Empty));
    assert_eq!("-4".parse::<Stats>(), Err(ParseError::ErrorCode(-4)));
    assert_eq!("-1\n".parse::<Track>(), Err(ParseError::ErrorCode(-1)));
    assert_eq!(
        "1414000000\n100,5\n83,9".parse::<Stats>(),
        Err(ParseError::TooFewRows {
            expected: 24,
            got: 2
        })
    );
    assert!(matches!(
        "Network error".parse::<Stats>(),
        Err(ParseError::BadTimestamp(_))
    ));
}

#[test]
fn parse_search() {
    let r: SearchResult = "3 duke,Dukey,xduk".parse().unwrap();
    assert_eq!(r.count, 3);
    assert_eq!(r.names, vec!["duke", "Dukey", "xduk"]);

    let none: SearchResult = "0".parse().unwrap();
    assert_eq!(none.count, 0);
    assert!(none.names.is_empty());
}
