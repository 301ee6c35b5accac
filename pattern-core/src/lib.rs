use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Records per page requested from the pattern endpoint.
pub const PAGE_SIZE: usize = 40;

/// Pages exposed by the pager. The server may hold more or fewer; the UI
/// never discovers the true count.
pub const PAGE_COUNT: u32 = 5;

/// One daily pattern match as returned by `/patterns/latest`.
///
/// Field names mirror the wire format. `id` is optional; callers fall back
/// to the positional index via [`PatternRecord::display_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub prev_close: f64,
    pub avg_price: f64,
    pub matched_patterns: String,
}

impl PatternRecord {
    /// Stable key for list rendering: the record id, or the positional
    /// index when the server sent none.
    pub fn display_key(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| index.to_string())
    }

    /// Matched pattern labels, split out of the comma-separated field.
    pub fn pattern_labels(&self) -> Vec<&str> {
        self.matched_patterns
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Close-to-previous-close change in percent, when prev_close is usable.
    pub fn change_pct(&self) -> Option<f64> {
        if self.prev_close > 0.0 {
            Some((self.close - self.prev_close) / self.prev_close * 100.0)
        } else {
            None
        }
    }
}

/// One OHLCV bar of a symbol's daily series, as returned by `/stock/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl DailyBar {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_trading_date(&self.date)
    }

    /// Wick-contains-body invariant. Malformed bars still render (the chart
    /// never rejects them); this exists so tests and callers can flag them.
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// Parse a `YYYY-M-D` calendar date. Month/day need not be zero-padded,
/// matching the fallback dataset's date strings.
pub fn parse_trading_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Sort bars ascending by parsed date (stable; unparseable dates first).
///
/// Series come back in server order with no ordering guarantee; the chart
/// always renders through this.
pub fn sort_ascending_by_date(bars: &mut [DailyBar]) {
    bars.sort_by_key(|b| b.parsed_date());
}

/// Page selection state machine: page ∈ 1..=[`PAGE_COUNT`].
///
/// Mutators report whether the page actually changed so callers can skip
/// refetching on clamped edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn prev(&mut self) -> bool {
        let next = self.page.saturating_sub(1).max(1);
        let changed = next != self.page;
        self.page = next;
        changed
    }

    pub fn next(&mut self) -> bool {
        let next = (self.page + 1).min(PAGE_COUNT);
        let changed = next != self.page;
        self.page = next;
        changed
    }

    pub fn jump(&mut self, page: u32) -> bool {
        let next = page.clamp(1, PAGE_COUNT);
        let changed = next != self.page;
        self.page = next;
        changed
    }
}

/// Token handed out for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic fetch sequence: only the most recently issued token may commit
/// its response. A fast response to a superseded request arriving late is
/// discarded instead of overwriting newer data.
#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a fetch that is about to start. Any earlier token
    /// becomes stale.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Invalidate all outstanding tokens (component teardown).
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, open: f64, high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar {
            date: date.to_string(),
            open,
            high,
            low,
            close,
            volume: Some(1_000),
        }
    }

    #[test]
    fn pager_clamps_at_both_edges() {
        let mut pager = Pager::new();
        assert_eq!(pager.page(), 1);
        assert!(!pager.prev());
        assert_eq!(pager.page(), 1);

        assert!(pager.jump(PAGE_COUNT));
        assert!(!pager.next());
        assert_eq!(pager.page(), PAGE_COUNT);
    }

    #[test]
    fn pager_jump_clamps_out_of_range() {
        let mut pager = Pager::new();
        assert!(pager.jump(3));
        assert_eq!(pager.page(), 3);
        assert!(pager.jump(99));
        assert_eq!(pager.page(), PAGE_COUNT);
        assert!(pager.jump(0));
        assert_eq!(pager.page(), 1);
        // Jumping to the current page is a no-op.
        assert!(!pager.jump(1));
    }

    #[test]
    fn request_seq_discards_stale_responses() {
        let mut seq = RequestSeq::new();
        let page1 = seq.begin();
        let page2 = seq.begin();
        // Page 2's response arrives first and commits.
        assert!(seq.is_current(page2));
        // The slow page-1 response arrives afterwards and must be dropped.
        assert!(!seq.is_current(page1));
    }

    #[test]
    fn request_seq_invalidate_drops_in_flight_token() {
        let mut seq = RequestSeq::new();
        let token = seq.begin();
        seq.invalidate();
        assert!(!seq.is_current(token));
    }

    #[test]
    fn sort_orders_shuffled_series_ascending() {
        let mut bars = vec![
            bar("2024-01-14", 2475.0, 2490.0, 2470.0, 2485.0),
            bar("2024-01-10", 2420.0, 2445.0, 2415.0, 2440.0),
            bar("2024-01-15", 2485.0, 2500.0, 2480.0, 2495.0),
            bar("2024-01-12", 2450.0, 2470.0, 2445.0, 2465.0),
        ];
        sort_ascending_by_date(&mut bars);
        let dates: Vec<&str> = bars.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-01-10", "2024-01-12", "2024-01-14", "2024-01-15"]
        );
        // Idempotent on already-sorted input.
        let before = bars.clone();
        sort_ascending_by_date(&mut bars);
        assert_eq!(bars, before);
    }

    #[test]
    fn parse_accepts_unpadded_dates() {
        assert_eq!(
            parse_trading_date("2024-1-5"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_trading_date("2024-01-29"),
            NaiveDate::from_ymd_opt(2024, 1, 29)
        );
        assert!(parse_trading_date("not a date").is_none());
    }

    #[test]
    fn well_formed_flags_broken_wicks() {
        assert!(bar("2024-01-10", 10.0, 12.0, 9.0, 11.0).is_well_formed());
        // High below the body.
        assert!(!bar("2024-01-10", 10.0, 10.5, 9.0, 11.0).is_well_formed());
        // Low above the body.
        assert!(!bar("2024-01-10", 10.0, 12.0, 10.5, 11.0).is_well_formed());
        // Doji where high == open == close is fine.
        assert!(bar("2024-01-10", 10.0, 10.0, 10.0, 10.0).is_well_formed());
    }

    #[test]
    fn record_key_falls_back_to_index() {
        let mut rec: PatternRecord = serde_json::from_str(
            r#"{
                "symbol": "TCS",
                "date": "2024-01-15",
                "open": 3650.0,
                "close": 3680.25,
                "high": 3695.5,
                "low": 3645.75,
                "volume": 980000,
                "prev_close": 3645.5,
                "avg_price": 3670.25,
                "matched_patterns": "Hammer, Doji"
            }"#,
        )
        .unwrap();
        assert_eq!(rec.display_key(7), "7");
        rec.id = Some("2".into());
        assert_eq!(rec.display_key(7), "2");
        assert_eq!(rec.pattern_labels(), vec!["Hammer", "Doji"]);
    }

    #[test]
    fn daily_bar_volume_is_optional_on_the_wire() {
        let bar: DailyBar =
            serde_json::from_str(r#"{"date":"2024-01-10","open":1,"high":2,"low":0.5,"close":1.5}"#)
                .unwrap();
        assert_eq!(bar.volume, None);
        assert!(bar.is_well_formed());
    }

    #[test]
    fn change_pct_handles_zero_prev_close() {
        let rec = PatternRecord {
            id: None,
            symbol: "SBIN".into(),
            date: "2024-01-15".into(),
            open: 580.25,
            close: 590.75,
            high: 595.5,
            low: 578.9,
            volume: 1_650_000,
            prev_close: 582.15,
            avg_price: 586.35,
            matched_patterns: "Ascending Triangle".into(),
        };
        let pct = rec.change_pct().unwrap();
        assert!((pct - 1.477).abs() < 0.01);
        let zeroed = PatternRecord {
            prev_close: 0.0,
            ..rec
        };
        assert!(zeroed.change_pct().is_none());
    }
}
