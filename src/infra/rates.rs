//! Thin asynchronous client for the Frankfurter exchange-rate API.
//!
//! - Provides `get_rate(from, to)` for settlement-currency conversion.
//! - Maintains a simple 60-minute in-memory cache with stale fallbacks.
//! - Falls back to hardcoded rates when the endpoint is unreachable, so
//!   pricing never blocks on the network.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};
use tokio::sync::Mutex;

use crate::domain::Currency;

const DEFAULT_BASE_URL: &str = "https://api.frankfurter.dev/v1/";
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const USER_AGENT: &str = "print-price-planner/0.1.0";

#[derive(Debug, Error)]
pub enum RateClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateSource {
    Fresh,
    Cached,
    Stale,
    Fallback,
}

/// A conversion rate plus where it came from, so the caller can show how
/// trustworthy the figure is.
#[derive(Clone, Debug)]
pub struct RateQuote {
    pub rate: f64,
    pub fetched_at: SystemTime,
    pub source: RateSource,
}

impl RateQuote {
    fn new(rate: f64, fetched_at: SystemTime, source: RateSource) -> Self {
        Self {
            rate,
            fetched_at,
            source,
        }
    }
}

type Pair = (Currency, Currency);

#[derive(Default)]
struct RateCache {
    rates: HashMap<Pair, Cached>,
}

impl RateCache {
    fn clear(&mut self) {
        self.rates.clear();
    }
}

#[derive(Clone)]
pub struct RateClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<RateCache>>,
    ttl: Duration,
}

impl RateClient {
    pub fn new() -> Result<Self, RateClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, RateClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(RateCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    /// Process-wide client, so the rate cache survives across fetches.
    /// `None` only when the underlying HTTP client cannot be built.
    pub fn shared() -> Option<&'static RateClient> {
        static SHARED: OnceLock<RateClient> = OnceLock::new();
        if SHARED.get().is_none() {
            if let Ok(client) = RateClient::new() {
                let _ = SHARED.set(client);
            }
        }
        SHARED.get()
    }

    /// Rate for converting one unit of `from` into `to`.
    ///
    /// Never fails: a dead endpoint degrades fresh → cached → stale →
    /// hardcoded fallback. The identity pair short-circuits to 1.0.
    pub async fn get_rate(&self, from: Currency, to: Currency) -> RateQuote {
        if from == to {
            return RateQuote::new(1.0, SystemTime::now(), RateSource::Fresh);
        }

        if let Some(quote) = self.cached_rate((from, to)).await {
            return quote;
        }

        match self.fetch_rate(from, to).await {
            Ok(rate) => self.store_rate((from, to), rate).await,
            Err(error) => {
                println!("[rates] fetch failed for {}->{}: {error}", from.code(), to.code());
                if let Some(stale) = self.stale_rate((from, to)).await {
                    return stale;
                }
                fallback_quote(from, to)
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn fetch_rate(&self, from: Currency, to: Currency) -> Result<f64, RateClientError> {
        let mut url = self.base_url.join("latest")?;
        url.query_pairs_mut()
            .append_pair("base", from.code())
            .append_pair("symbols", to.code());

        println!("[rates] requesting {url}");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let payload: LatestRatesDto = response.json().await?;

        let rate = payload
            .rates
            .get(to.code())
            .copied()
            .ok_or_else(|| RateClientError::Api(format!("no {} rate in response", to.code())))?;

        if let Some(date) = payload.as_of_date() {
            println!("[rates] {}->{} = {rate} (as of {date})", from.code(), to.code());
        }
        Ok(rate)
    }

    async fn cached_rate(&self, pair: Pair) -> Option<RateQuote> {
        let cache = self.cache.lock().await;
        let quote = cache.rates.get(&pair).and_then(|entry| entry.if_fresh(self.ttl));
        if quote.is_some() {
            println!(
                "[rates] serving cached rate for {}->{}",
                pair.0.code(),
                pair.1.code()
            );
        }
        quote
    }

    async fn stale_rate(&self, pair: Pair) -> Option<RateQuote> {
        let cache = self.cache.lock().await;
        cache.rates.get(&pair).map(Cached::stale)
    }

    async fn store_rate(&self, pair: Pair, rate: f64) -> RateQuote {
        let fetched_at = SystemTime::now();
        let mut cache = self.cache.lock().await;
        cache.rates.insert(pair, Cached { rate, fetched_at });
        RateQuote::new(rate, fetched_at, RateSource::Fresh)
    }
}

fn fallback_quote(from: Currency, to: Currency) -> RateQuote {
    let rate = from.fallback_rate(to);
    println!(
        "[rates] using fallback rate {rate} for {}->{}",
        from.code(),
        to.code()
    );
    RateQuote::new(rate, SystemTime::now(), RateSource::Fallback)
}

struct Cached {
    rate: f64,
    fetched_at: SystemTime,
}

impl Cached {
    fn if_fresh(&self, ttl: Duration) -> Option<RateQuote> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(RateQuote::new(self.rate, self.fetched_at, RateSource::Cached))
        } else {
            None
        }
    }

    fn stale(&self) -> RateQuote {
        RateQuote::new(self.rate, self.fetched_at, RateSource::Stale)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesDto {
    #[serde(default)]
    date: Option<String>,
    rates: HashMap<String, f64>,
}

impl LatestRatesDto {
    /// The API reports a plain `YYYY-MM-DD`; accept a full RFC 3339 stamp too.
    fn as_of_date(&self) -> Option<Date> {
        let raw = self.date.as_deref()?;
        if let Ok(format) = time::format_description::parse("[year]-[month]-[day]") {
            if let Ok(date) = Date::parse(raw, &format) {
                return Some(date);
            }
        }
        OffsetDateTime::parse(raw, &Rfc3339).ok().map(|dt| dt.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_pair_is_always_one() {
        let client = RateClient::with_base_url("http://127.0.0.1:9/").unwrap();
        let quote = client.get_rate(Currency::Eur, Currency::Eur).await;
        assert_eq!(quote.rate, 1.0);
        assert_eq!(quote.source, RateSource::Fresh);
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_fallback() {
        // Port 9 (discard) refuses connections immediately.
        let client = RateClient::with_base_url("http://127.0.0.1:9/").unwrap();
        let quote = client.get_rate(Currency::Gbp, Currency::Eur).await;
        assert_eq!(quote.source, RateSource::Fallback);
        assert_eq!(quote.rate, Currency::Gbp.fallback_rate(Currency::Eur));
    }

    #[test]
    fn response_date_parses_plain_dates() {
        let dto = LatestRatesDto {
            date: Some("2025-06-02".to_string()),
            rates: HashMap::new(),
        };
        assert!(dto.as_of_date().is_some());
    }
}
