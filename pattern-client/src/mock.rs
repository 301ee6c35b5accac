//! Deterministic fallback dataset served when the remote service is
//! unreachable. Values are fixed; tests pin them exactly, so edits here are
//! wire-format changes.

use pattern_core::{DailyBar, PatternRecord, PAGE_SIZE};

fn seed(
    id: &str,
    symbol: &str,
    open: f64,
    close: f64,
    high: f64,
    low: f64,
    volume: u64,
    prev_close: f64,
    avg_price: f64,
    matched_patterns: &str,
) -> PatternRecord {
    PatternRecord {
        id: Some(id.to_string()),
        symbol: symbol.to_string(),
        date: "2024-01-15".to_string(),
        open,
        close,
        high,
        low,
        volume,
        prev_close,
        avg_price,
        matched_patterns: matched_patterns.to_string(),
    }
}

/// The six seed records every mock page cycles through.
pub fn seed_patterns() -> Vec<PatternRecord> {
    vec![
        seed(
            "1",
            "RELIANCE",
            2450.50,
            2475.30,
            2485.00,
            2440.25,
            1_250_000,
            2440.75,
            2462.50,
            "Bullish Engulfing, Morning Star",
        ),
        seed(
            "2", "TCS", 3650.00, 3680.25, 3695.50, 3645.75, 980_000, 3645.50, 3670.25,
            "Hammer, Doji",
        ),
        seed(
            "3",
            "INFY",
            1520.30,
            1535.80,
            1540.00,
            1515.25,
            1_150_000,
            1518.75,
            1527.50,
            "Rising Wedge, Breakout",
        ),
        seed(
            "4",
            "HDFC",
            1680.50,
            1695.25,
            1702.00,
            1675.30,
            890_000,
            1678.40,
            1688.75,
            "Cup and Handle",
        ),
        seed(
            "5",
            "ICICIBANK",
            950.75,
            965.50,
            968.25,
            948.60,
            1_350_000,
            952.30,
            958.25,
            "Double Bottom, Support Break",
        ),
        seed(
            "6",
            "SBIN",
            580.25,
            590.75,
            595.50,
            578.90,
            1_650_000,
            582.15,
            586.35,
            "Ascending Triangle",
        ),
    ]
}

/// Synthesize one full mock page: [`PAGE_SIZE`] records cycling the seed
/// set, with `id = "{page}-{i}"`, a date walking day `15 + (i % 15)` of
/// January 2024, and a numeric symbol suffix of `i - 5` past the first six
/// slots so synthesized tickers stay distinct.
pub fn mock_patterns_page(page: u32) -> Vec<PatternRecord> {
    let seeds = seed_patterns();
    (0..PAGE_SIZE)
        .map(|i| {
            let base = &seeds[i % seeds.len()];
            let mut record = base.clone();
            record.id = Some(format!("{page}-{i}"));
            record.symbol = if i > 5 {
                format!("{}{}", base.symbol, i - 5)
            } else {
                base.symbol.clone()
            };
            record.date = format!("2024-01-{}", 15 + (i % 15));
            record
        })
        .collect()
}

fn bar(date: &str, open: f64, high: f64, low: f64, close: f64, volume: u64) -> DailyBar {
    DailyBar {
        date: date.to_string(),
        open,
        high,
        low,
        close,
        volume: Some(volume),
    }
}

/// The fixed six-point series used whenever a symbol's chart fetch fails.
pub fn mock_chart_series() -> Vec<DailyBar> {
    vec![
        bar("2024-01-10", 2420.0, 2445.0, 2415.0, 2440.0, 1_200_000),
        bar("2024-01-11", 2440.0, 2455.0, 2435.0, 2450.0, 1_100_000),
        bar("2024-01-12", 2450.0, 2470.0, 2445.0, 2465.0, 1_300_000),
        bar("2024-01-13", 2465.0, 2480.0, 2460.0, 2475.0, 1_150_000),
        bar("2024-01-14", 2475.0, 2490.0, 2470.0, 2485.0, 1_250_000),
        bar("2024-01-15", 2485.0, 2500.0, 2480.0, 2495.0, 1_400_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_core::{parse_trading_date, PAGE_COUNT};

    #[test]
    fn every_page_has_the_generated_ids_and_dates() {
        for page in 1..=PAGE_COUNT {
            let records = mock_patterns_page(page);
            assert_eq!(records.len(), PAGE_SIZE);
            for (i, record) in records.iter().enumerate() {
                assert_eq!(record.id.as_deref(), Some(format!("{page}-{i}").as_str()));
                let date = parse_trading_date(&record.date).unwrap();
                assert_eq!(date.format("%Y-%m").to_string(), "2024-01");
                assert_eq!(
                    date.format("%d").to_string(),
                    format!("{}", 15 + (i % 15)),
                    "day offset cycles with the index"
                );
            }
        }
    }

    #[test]
    fn symbol_suffix_starts_past_the_seed_set() {
        let records = mock_patterns_page(1);
        let seeds = seed_patterns();
        for (i, record) in records.iter().enumerate() {
            let base = &seeds[i % seeds.len()];
            if i > 5 {
                assert_eq!(record.symbol, format!("{}{}", base.symbol, i - 5));
            } else {
                assert_eq!(record.symbol, base.symbol);
            }
        }
    }

    #[test]
    fn mock_series_is_ascending_and_well_formed() {
        let bars = mock_chart_series();
        assert_eq!(bars.len(), 6);
        for pair in bars.windows(2) {
            assert!(pair[0].parsed_date().unwrap() < pair[1].parsed_date().unwrap());
        }
        for bar in &bars {
            assert!(bar.is_well_formed());
        }
        assert_eq!(bars[0].open, 2420.0);
        assert_eq!(bars[5].close, 2495.0);
        assert_eq!(bars[5].volume, Some(1_400_000));
    }
}
