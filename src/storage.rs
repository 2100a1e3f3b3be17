use crate::models::Stats;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save per-skill stats as CSV with header.
pub fn save_stats_csv<P: AsRef<Path>>(stats: &Stats, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("skill", "xp", "rank", "level", "virtual_level"))?;
    for (skill, row) in stats.iter_skills() {
        wtr.serialize((
            skill.name(),
            row.xp,
            row.rank,
            row.level(),
            row.virtual_level(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any parsed response as pretty JSON.
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
