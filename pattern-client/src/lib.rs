use pattern_core::{DailyBar, PatternRecord, PAGE_SIZE};
use thiserror::Error;

pub mod mock;

const DEFAULT_BASE_URL: &str = "https://modern-stock-api-9dd7c6923f13.herokuapp.com";
// Demo key the public service ships with; override via PATTERNRADAR_API_KEY.
const DEFAULT_API_KEY: &str = "973827821435462";

#[derive(Debug, Clone)]
pub struct PatternApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl PatternApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for PatternApiConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("PATTERNRADAR_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key =
            std::env::var("PATTERNRADAR_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        Self { base_url, api_key }
    }
}

/// Failure taxonomy for the two remote operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected http status: {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Parse(String),
    #[error("missing API key")]
    MissingApiKey,
    #[error("empty symbol")]
    EmptySymbol,
}

/// HTTP client for the remote pattern/quote service.
///
/// The `get_*` operations surface [`FetchError`]; the `*_or_mock` wrappers
/// are the policy layer the views call — on any failure they log and serve
/// the deterministic dataset from [`mock`], so the UI always has something
/// to render while the service is unreachable.
#[derive(Debug, Clone)]
pub struct PatternApiClient {
    config: PatternApiConfig,
    http: reqwest::Client,
}

impl PatternApiClient {
    pub fn new(config: PatternApiConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .user_agent("patternradar-client/0.1")
            .build()?;
        // Browsers own the user agent; the fetch backend takes no builder options here.
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();
        Ok(Self { config, http })
    }

    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(PatternApiConfig::default())
    }

    pub fn config(&self) -> &PatternApiConfig {
        &self.config
    }

    /// Fetch one page of pattern records, in server order.
    pub async fn get_patterns_page(&self, page: u32) -> Result<Vec<PatternRecord>, FetchError> {
        let url = format!("{}/patterns/latest", self.base());
        let resp = self
            .http
            .get(&url)
            .query(&[("page", page), ("limit", PAGE_SIZE as u32)])
            .header("x-api-key", self.config.api_key.as_str())
            .header("accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Fetch a symbol's daily OHLCV series, in server order (not sorted —
    /// the chart sorts ascending by date before rendering).
    pub async fn get_stock_series(&self, symbol: &str) -> Result<Vec<DailyBar>, FetchError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(FetchError::EmptySymbol);
        }
        let url = format!("{}/stock/{}", self.base(), symbol);
        let resp = self
            .http
            .get(&url)
            .header("x-api-key", self.config.api_key.as_str())
            .header("accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Page fetch with the adopted fallback policy: any failure yields the
    /// deterministic mock page for `page`.
    pub async fn patterns_page_or_mock(&self, page: u32) -> Vec<PatternRecord> {
        match self.get_patterns_page(page).await {
            Ok(records) => records,
            Err(err) => {
                log::warn!("pattern fetch failed for page {page}, serving mock data: {err}");
                mock::mock_patterns_page(page)
            }
        }
    }

    /// Series fetch with the adopted fallback policy: any failure yields the
    /// fixed mock series.
    pub async fn stock_series_or_mock(&self, symbol: &str) -> Vec<DailyBar> {
        match self.get_stock_series(symbol).await {
            Ok(bars) => bars,
            Err(err) => {
                log::warn!("chart fetch failed for {symbol}, serving mock data: {err}");
                mock::mock_chart_series()
            }
        }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> PatternApiClient {
        // Discard port; connections are refused immediately.
        let cfg = PatternApiConfig::new("test-key").with_base_url("http://127.0.0.1:9");
        PatternApiClient::new(cfg).unwrap()
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = PatternApiClient::new(PatternApiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, FetchError::MissingApiKey));
    }

    #[test]
    fn records_parse_from_wire_shape() {
        let body = r#"[{
            "id": "1",
            "symbol": "RELIANCE",
            "date": "2024-01-15",
            "open": 2450.5,
            "close": 2475.3,
            "high": 2485.0,
            "low": 2440.25,
            "volume": 1250000,
            "prev_close": 2440.75,
            "avg_price": 2462.5,
            "matched_patterns": "Bullish Engulfing, Morning Star"
        }]"#;
        let records: Vec<PatternRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "RELIANCE");
        assert_eq!(
            records[0].pattern_labels(),
            vec!["Bullish Engulfing", "Morning Star"]
        );
    }

    #[tokio::test]
    async fn unreachable_service_surfaces_transport_error() {
        let client = unreachable_client();
        let err = client.get_patterns_page(1).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn page_fallback_is_the_deterministic_mock_page() {
        let client = unreachable_client();
        let records = client.patterns_page_or_mock(2).await;
        assert_eq!(records, mock::mock_patterns_page(2));
        assert_eq!(records.len(), PAGE_SIZE);
    }

    #[tokio::test]
    async fn series_fallback_for_tcs_is_the_fixed_mock_series() {
        let client = unreachable_client();
        let bars = client.stock_series_or_mock("TCS").await;
        assert_eq!(bars, mock::mock_chart_series());
    }

    #[tokio::test]
    async fn empty_symbol_is_rejected_before_any_request() {
        let client = unreachable_client();
        let err = client.get_stock_series("   ").await.unwrap_err();
        assert!(matches!(err, FetchError::EmptySymbol));
    }

    #[tokio::test]
    async fn integration_fetch_page_if_key_present() -> Result<(), Box<dyn std::error::Error>> {
        if std::env::var("PATTERNRADAR_API_KEY").is_err() {
            return Ok(()); // skip when no key configured
        }
        let client = PatternApiClient::from_env()?;
        let records = client.get_patterns_page(1).await?;
        assert_eq!(records.len(), PAGE_SIZE);
        Ok(())
    }
}
