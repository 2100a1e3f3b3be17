use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cml_rs::models::Stats;
use cml_rs::{Client, Period, skills, storage, summary};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cml",
    version,
    about = "Query the CrystalMathLabs OSRS tracker and do level/xp arithmetic"
)]
struct Cli {
    /// Tracker endpoint to query.
    #[arg(long, global = true, default_value = cml_rs::api::DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh a player from the hiscores and print the status code.
    Update(PlayerArgs),
    /// Seconds since the most recent datapoint.
    LastCheck(PlayerArgs),
    /// Seconds since the most recent datapoint with an xp change.
    LastChange(PlayerArgs),
    /// Current xp and rank per skill.
    Stats(StatsArgs),
    /// Hours left until max total.
    Ttm(PlayerArgs),
    /// Rank by closeness to max.
    TtmRank(PlayerArgs),
    /// Player name as stored by the tracker.
    FormatName(PlayerArgs),
    /// Find player names containing a fragment.
    Search(PlayerArgs),
    /// Record gains per skill.
    Records(PlayerArgs),
    /// Gains over a time window.
    Track(WindowArgs),
    /// Raw datapoints over a time window.
    Datapoints(WindowArgs),
    /// Level and virtual level for an amount of xp (offline).
    Level {
        #[arg(long)]
        xp: u32,
    },
    /// Xp at which a level starts (offline).
    Xp {
        #[arg(long)]
        level: u32,
    },
    /// Format a number of seconds as e.g. 1d1h1m1s (offline).
    Duration { seconds: u64 },
    /// Skill name for an API index 0..=23 (offline).
    Skill { index: usize },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PeriodArg {
    Day,
    Week,
    Month,
    All,
}

impl From<PeriodArg> for Period {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Day => Period::Day,
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::All => Period::All,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct PlayerArgs {
    /// Player name (spaces allowed).
    player: String,
}

#[derive(Args, Debug)]
struct WindowArgs {
    player: String,
    /// Window length in seconds (0 = all time).
    #[arg(long, conflicts_with = "period")]
    time: Option<u64>,
    /// Named window; defaults to week.
    #[arg(long, value_enum)]
    period: Option<PeriodArg>,
}

impl WindowArgs {
    fn seconds(&self) -> u64 {
        self.time
            .unwrap_or_else(|| Period::from(self.period.unwrap_or(PeriodArg::Week)).seconds())
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    player: String,
    /// Print a per-skill table with levels instead of the raw response.
    #[arg(long, default_value_t = false)]
    table: bool,
    /// Save parsed stats to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::with_base_url(cli.base_url);
    match cli.cmd {
        Command::Update(a) => {
            let body = client.update(&a.player)?;
            match body.parse::<cml_rs::UpdateStatus>() {
                Ok(status) => println!("{} {}", status.code(), status.description()),
                Err(_) => println!("{}", body),
            }
        }
        Command::LastCheck(a) => println!("{}", client.last_check(&a.player)?),
        Command::LastChange(a) => println!("{}", client.last_change(&a.player)?),
        Command::Stats(a) => cmd_stats(&client, a)?,
        Command::Ttm(a) => println!("{}", client.ttm(&a.player)?),
        Command::TtmRank(a) => println!("{}", client.ttm_rank(&a.player)?),
        Command::FormatName(a) => println!("{}", client.format_name(&a.player)?),
        Command::Search(a) => println!("{}", client.search(&a.player)?),
        Command::Records(a) => println!("{}", client.records_of_player(&a.player)?),
        Command::Track(a) => println!("{}", client.track(&a.player, a.seconds())?),
        Command::Datapoints(a) => println!("{}", client.datapoints(&a.player, a.seconds())?),
        Command::Level { xp } => println!(
            "level {} (virtual {})",
            skills::level(xp),
            skills::virtual_level(xp)
        ),
        Command::Xp { level } => {
            let xp = skills::xp_for_level(level).with_context(|| {
                format!("level must be 1..={}", skills::MAX_VIRTUAL_LEVEL)
            })?;
            println!("{}", xp.to_formatted_string(&Locale::en));
        }
        Command::Duration { seconds } => println!("{}", skills::format_duration(seconds)),
        Command::Skill { index } => {
            let name = skills::skill_name(index)
                .with_context(|| format!("no skill at index {}", index))?;
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_stats(client: &Client, args: StatsArgs) -> Result<()> {
    let body = client.stats(&args.player)?;
    if !args.table && args.out.is_none() {
        println!("{}", body);
        return Ok(());
    }

    let stats: Stats = body
        .parse()
        .with_context(|| format!("parse stats for {}", args.player))?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_stats_csv(&stats, path)?,
            "json" => storage::save_json(&stats, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} skills to {}", stats.skills.len(), path.display());
    }

    if args.table {
        print_table(&stats);
    }
    Ok(())
}

fn print_table(stats: &Stats) {
    let age = chrono::Utc::now().timestamp() - stats.timestamp;
    if age >= 0 {
        println!("last datapoint {} ago", skills::format_duration(age as u64));
    }
    println!("{:<14}{:>6}{:>6}{:>14}{:>10}", "skill", "lvl", "vlvl", "xp", "rank");
    for (skill, row) in stats.iter_skills() {
        println!(
            "{:<14}{:>6}{:>6}{:>14}{:>10}",
            skill.name(),
            row.level(),
            row.virtual_level(),
            row.xp.to_formatted_string(&Locale::en),
            row.rank
        );
    }
    let s = summary::summarize(stats);
    println!(
        "total level {}  virtual {}  99s {}",
        s.total_level, s.total_virtual_level, s.maxed_skills
    );
    if let Some(ehp) = s.ehp {
        println!("ehp {}", ehp);
    }
}
