//! Yahoo Finance data fetcher
//!
//! Daily history from the chart endpoint, expirations and chains from the
//! options endpoint, and the live price from the quote endpoint. Uses Yahoo
//! Finance's unofficial API.
//!
//! Note: Yahoo Finance data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::core::{OptionChain, OptionQuote, OptionType, PriceSeries, ScanError, ScanResult};

use super::source::MarketDataSource;

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
    history_range: String,
}

impl YahooClient {
    pub fn new() -> ScanResult<Self> {
        Self::with_config(&DataConfig::default())
    }

    pub fn with_config(config: &DataConfig) -> ScanResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScanError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            history_range: config.history_range.clone(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> ScanResult<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScanError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScanError::data_unavailable("No data found for this symbol"));
        }
        if !status.is_success() {
            return Err(ScanError::Network(format!("{} request failed with {}", what, status)));
        }

        response
            .json()
            .map_err(|e| ScanError::data(format!("Failed to parse {}: {}", what, e)))
    }

    /// Get one range of daily closes
    pub fn get_history(&self, symbol: &str) -> ScanResult<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, self.history_range
        );

        let response: YahooChartResponse = self.get_json(&url, "chart")?;
        let series = convert_chart(symbol, response)?;

        info!("Fetched {} daily closes for {}", series.len(), symbol);
        Ok(series)
    }

    /// Get current quote price for a symbol
    pub fn get_quote_price(&self, symbol: &str) -> ScanResult<Option<f64>> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self.get_json(&url, "quote")?;
        let price = response
            .quote_response
            .result
            .into_iter()
            .next()
            .and_then(|q| q.regular_market_price)
            .filter(|p| *p > 0.0 && p.is_finite());

        Ok(price)
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, symbol);

        let response: YahooOptionsResponse = self.get_json(&url, "options")?;
        let chain = first_chain_result(response)?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        Ok(expiries)
    }

    /// Get option chain for a specific expiration
    pub fn get_option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain> {
        // Yahoo lists expirations at 00:00 UTC
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();

        let url = format!(
            "{}/v7/finance/options/{}?date={}",
            self.base_url, symbol, expiry_ts
        );

        let response: YahooOptionsResponse = self.get_json(&url, "options")?;
        let chain = convert_chain(symbol, expiry, first_chain_result(response)?);

        info!(
            "Fetched chain for {} {}: {} calls, {} puts",
            symbol,
            expiry,
            chain.calls.len(),
            chain.puts.len()
        );
        Ok(chain)
    }
}

impl MarketDataSource for YahooClient {
    fn price_history(&self, symbol: &str) -> ScanResult<PriceSeries> {
        self.get_history(symbol)
    }

    fn expirations(&self, symbol: &str) -> ScanResult<Vec<NaiveDate>> {
        self.get_expirations(symbol)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> ScanResult<OptionChain> {
        self.get_option_chain(symbol, expiry)
    }

    fn current_price(&self, symbol: &str) -> ScanResult<Option<f64>> {
        self.get_quote_price(symbol)
    }
}

fn first_chain_result(response: YahooOptionsResponse) -> ScanResult<YahooOptionChainData> {
    response
        .option_chain
        .result
        .into_iter()
        .next()
        .ok_or_else(|| ScanError::options_unavailable("No options data available"))
}

/// Convert a chart response into a close series, skipping null closes
fn convert_chart(symbol: &str, response: YahooChartResponse) -> ScanResult<PriceSeries> {
    if let Some(err) = response.chart.error {
        return Err(ScanError::data_unavailable(
            err.description.unwrap_or_else(|| "No data found for this symbol".into()),
        ));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ScanError::data_unavailable("No data found for this symbol"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let series = PriceSeries::from_closes(
        symbol,
        result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&ts, close)| {
                let close = close.filter(|c| c.is_finite())?;
                let date = DateTime::from_timestamp(ts, 0)?.date_naive();
                Some((date, close))
            }),
    );

    if series.is_empty() {
        return Err(ScanError::data_unavailable("No data found for this symbol"));
    }
    Ok(series)
}

/// Convert Yahoo chain data, keeping the provider's row order
fn convert_chain(symbol: &str, expiry: NaiveDate, data: YahooOptionChainData) -> OptionChain {
    let mut chain = OptionChain::new(symbol, expiry);
    chain.spot = data.quote.and_then(|q| q.regular_market_price);

    if let Some(options) = data.options.into_iter().next() {
        for call in &options.calls {
            if let Some(quote) = convert_option_quote(call, OptionType::Call) {
                chain.push(quote);
            }
        }
        for put in &options.puts {
            if let Some(quote) = convert_option_quote(put, OptionType::Put) {
                chain.push(quote);
            }
        }
    }

    chain
}

/// Convert one Yahoo option row; rows without a strike are dropped
fn convert_option_quote(data: &YahooOptionData, option_type: OptionType) -> Option<OptionQuote> {
    let strike = data.strike.filter(|k| *k > 0.0 && k.is_finite())?;

    Some(OptionQuote {
        contract_symbol: data.contract_symbol.clone(),
        strike,
        last_price: data.last_price.filter(|p| p.is_finite()).unwrap_or(0.0).max(0.0),
        volume: data.volume.and_then(|v| u64::try_from(v).ok()),
        open_interest: data.open_interest.and_then(|oi| u64::try_from(oi).ok()),
        option_type,
    })
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    #[serde(default)]
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    #[serde(default)]
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    quote: Option<YahooQuoteData>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_JSON: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD"},
                "timestamp": [1735828200, 1735914600, 1736173800],
                "indicators": {"quote": [{"close": [243.85, null, 245.0]}]}
            }],
            "error": null
        }
    }"#;

    const OPTIONS_JSON: &str = r#"{
        "optionChain": {
            "result": [{
                "expirationDates": [1737072000, 1737676800],
                "quote": {"regularMarketPrice": 245.0},
                "options": [{
                    "calls": [
                        {"contractSymbol": "AAPL250117C00250000", "strike": 250.0, "lastPrice": 1.25, "volume": 1200, "openInterest": 5400},
                        {"contractSymbol": "AAPL250117C00255000", "strike": 255.0, "lastPrice": 0.4},
                        {"contractSymbol": "broken", "lastPrice": 0.1}
                    ],
                    "puts": [
                        {"contractSymbol": "AAPL250117P00240000", "strike": 240.0, "lastPrice": 1.1, "volume": 80, "openInterest": 900}
                    ]
                }]
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_convert_chart_skips_nulls() {
        let response: YahooChartResponse = serde_json::from_str(CHART_JSON).unwrap();
        let series = convert_chart("AAPL", response).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.last_close(), Some(245.0));
    }

    #[test]
    fn test_convert_chart_error() {
        let json = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();

        assert!(matches!(convert_chart("ZZZZ", response), Err(ScanError::DataUnavailable(_))));
    }

    #[test]
    fn test_convert_chain() {
        let response: YahooOptionsResponse = serde_json::from_str(OPTIONS_JSON).unwrap();
        let data = first_chain_result(response).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        let chain = convert_chain("AAPL", expiry, data);

        assert_eq!(chain.spot, Some(245.0));
        assert_eq!(chain.calls.len(), 2);
        assert_eq!(chain.puts.len(), 1);
        assert_eq!(chain.calls[0].volume, Some(1200));
        assert_eq!(chain.calls[1].open_interest, None);
        assert_eq!(chain.puts[0].option_type, OptionType::Put);
    }

    #[test]
    fn test_empty_options_result() {
        let json = r#"{"optionChain": {"result": [], "error": null}}"#;
        let response: YahooOptionsResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(first_chain_result(response), Err(ScanError::OptionsUnavailable(_))));
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_history() {
        let client = YahooClient::new().unwrap();
        let history = client.get_history("SPY").unwrap();

        assert!(history.len() > 200);
        println!("SPY closes: {}", history.len());
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_option_chain() {
        let client = YahooClient::new().unwrap();
        let expiries = client.get_expirations("SPY").unwrap();

        if let Some(&expiry) = expiries.first() {
            let chain = client.get_option_chain("SPY", expiry).unwrap();

            println!("Chain for {}: {} calls, {} puts",
                expiry, chain.calls.len(), chain.puts.len());

            assert!(!chain.calls.is_empty());
            assert!(!chain.puts.is_empty());
        }
    }
}
