//! Synchronous client for the **CrystalMathLabs tracker API**.
//!
//! Every operation is a single `GET <base>?type=<op>&player=<name>[&time=<secs>]`
//! whose body is returned as trimmed text. The response layout is owned by the
//! tracker; see `models` for parsers of the common ones.
//!
//! ### Notes
//! - Spaces in player names are sent as underscores, as the tracker expects.
//! - There is no retry, caching or pagination. One call is one request.
//! - A non-2xx status is reported as `ApiError::Network`.
//!
//! Typical usage:
//! ```no_run
//! # use cml_rs::{Client, Period};
//! let client = Client::default();
//! let body = client.track("Lynx Titan", Period::Day.seconds())?;
//! # Ok::<(), cml_rs::ApiError>(())
//! ```
use crate::error::ApiError;
use crate::models::{Operation, ParseError, SearchResult, Stats, Track, UpdateStatus};
use log::{debug, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;

pub const DEFAULT_BASE_URL: &str = "http://crystalmathlabs.com/tracker/api.php";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

// Allow -, _, . unescaped in player names
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Player name as the tracker expects it in a query string.
pub fn encode_player(player: &str) -> String {
    let underscored = player.replace(' ', "_");
    percent_encoding::utf8_percent_encode(&underscored, SAFE).to_string()
}

/// Body text on success, otherwise the error's fixed sentinel string.
pub fn text_or_sentinel(result: Result<String, ApiError>) -> String {
    result.unwrap_or_else(|e| e.sentinel().to_string())
}

/// Failure of a typed request: either the request or the parse went wrong.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unexpected response: {0}")]
    Parse(#[from] ParseError),
}

impl Client {
    /// Client against an alternate endpoint (a mirror, or a local test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("cml_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Full request URL for `op`. `time` is appended only when given.
    pub fn request_url(
        &self,
        op: Operation,
        player: &str,
        time: Option<u64>,
    ) -> Result<Url, ApiError> {
        let mut query = format!("type={}&player={}", op.tag(), encode_player(player));
        if let Some(t) = time {
            query.push_str(&format!("&time={}", t));
        }
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::MalformedUrl(e.to_string()))?;
        // Keep any query the base already carries (e.g. a mirror's key).
        if let Some(existing) = url.query().filter(|q| !q.is_empty()) {
            query = format!("{}&{}", existing, query);
        }
        url.set_query(Some(&query));
        Ok(url)
    }

    fn send(&self, op: Operation, player: &str, time: Option<u64>) -> Result<String, ApiError> {
        let url = self.request_url(op, player, time)?;
        debug!("GET {}", url);

        let body = self
            .http
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .inspect_err(|e| warn!("{} request failed: {}", op.tag(), e))?;

        debug!("{} returned {} bytes", url, body.len());
        Ok(body.lines().collect::<Vec<_>>().join("\n").trim().to_string())
    }

    /// Ask the tracker to refresh `player` from the hiscores. The body is a
    /// status code; see `UpdateStatus`.
    pub fn update(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::Update, player, None)
    }

    /// Seconds since the most recent datapoint.
    pub fn last_check(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::LastCheck, player, None)
    }

    /// Seconds since the most recent datapoint in which experience changed.
    pub fn last_change(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::LastChange, player, None)
    }

    /// Updates the player, then returns the time of the latest datapoint
    /// followed by one `xp,rank` line per skill.
    pub fn stats(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::Stats, player, None)
    }

    /// Approximate hours of play left until max total level.
    pub fn ttm(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::Ttm, player, None)
    }

    /// The player's rank among tracked players by closeness to maxing.
    pub fn ttm_rank(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::TtmRank, player, None)
    }

    /// The player's name as formatted in the tracker database.
    pub fn format_name(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::FormatName, player, None)
    }

    /// Names containing `fragment`: a count, then a comma separated list.
    pub fn search(&self, fragment: &str) -> Result<String, ApiError> {
        self.send(Operation::Search, fragment, None)
    }

    /// Record day/week/month gains per skill, each with the time it was set.
    pub fn records_of_player(&self, player: &str) -> Result<String, ApiError> {
        self.send(Operation::RecordsOfPlayer, player, None)
    }

    /// Updates the player and returns gains over the last `time` seconds
    /// (`0` = all time): earliest datapoint time, then one
    /// `xp_gained,rank_change,xp_start` line per skill.
    pub fn track(&self, player: &str, time: u64) -> Result<String, ApiError> {
        self.send(Operation::Track, player, Some(time))
    }

    /// Raw datapoints within the last `time` seconds (`0` = all time).
    pub fn datapoints(&self, player: &str, time: u64) -> Result<String, ApiError> {
        self.send(Operation::Datapoints, player, Some(time))
    }

    pub fn update_status(&self, player: &str) -> Result<UpdateStatus, FetchError> {
        Ok(self.update(player)?.parse()?)
    }

    pub fn stats_parsed(&self, player: &str) -> Result<Stats, FetchError> {
        Ok(self.stats(player)?.parse()?)
    }

    pub fn track_parsed(&self, player: &str, time: u64) -> Result<Track, FetchError> {
        Ok(self.track(player, time)?.parse()?)
    }

    pub fn search_parsed(&self, fragment: &str) -> Result<SearchResult, FetchError> {
        Ok(self.search(fragment)?.parse()?)
    }
}
