//! Pure projection from daily bars to canvas-space geometry. Kept free of
//! web APIs so the math is testable on any target.

use pattern_core::DailyBar;

/// Pixels kept clear around the plot area.
pub const PLOT_PADDING: f64 = 12.0;

/// Fraction of one x-slot used for the candle body (per side).
const BODY_HALF_FRACTION: f64 = 0.35;

/// One bar projected into canvas coordinates (y grows downward).
#[derive(Debug, Clone)]
pub struct PlotCandle {
    pub x: f64,
    pub half_w: f64,
    pub y_open: f64,
    pub y_close: f64,
    pub y_high: f64,
    pub y_low: f64,
    pub open: f64,
    pub close: f64,
}

/// Lowest low and highest high across the series, padded so wicks never
/// touch the frame edge. `None` for an empty series.
pub fn price_bounds(bars: &[DailyBar]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for bar in bars {
        lo = lo.min(bar.low);
        hi = hi.max(bar.high);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let span = (hi - lo).abs();
    let pad = if span > 0.0 { span * 0.04 } else { lo.abs().max(1.0) * 0.01 };
    Some((lo - pad, hi + pad))
}

/// Project bars into evenly spaced slots across `width` x `height`.
///
/// Bars are taken in the order given (callers sort first). Malformed bars
/// project like any other; geometry is always produced, never rejected.
pub fn project(bars: &[DailyBar], width: f64, height: f64) -> Vec<PlotCandle> {
    let Some((lo, hi)) = price_bounds(bars) else {
        return Vec::new();
    };
    let plot_w = (width - 2.0 * PLOT_PADDING).max(1.0);
    let plot_h = (height - 2.0 * PLOT_PADDING).max(1.0);
    let slot = plot_w / bars.len() as f64;
    let half_w = (slot * BODY_HALF_FRACTION).max(0.5);
    let span = hi - lo;

    let y_of = |price: f64| -> f64 {
        if span > 0.0 {
            PLOT_PADDING + (hi - price) / span * plot_h
        } else {
            PLOT_PADDING + plot_h / 2.0
        }
    };

    bars.iter()
        .enumerate()
        .map(|(i, bar)| PlotCandle {
            x: PLOT_PADDING + slot * (i as f64 + 0.5),
            half_w,
            y_open: y_of(bar.open),
            y_close: y_of(bar.close),
            y_high: y_of(bar.high),
            y_low: y_of(bar.low),
            open: bar.open,
            close: bar.close,
        })
        .collect()
}

/// Close-price polyline over projected candles, for the line fallback.
pub fn close_polyline(candles: &[PlotCandle]) -> Vec<(f64, f64)> {
    candles.iter().map(|c| (c.x, c.y_close)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar {
            date: "2024-01-10".to_string(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    #[test]
    fn x_positions_are_monotone() {
        let bars: Vec<DailyBar> = (0..20)
            .map(|i| bar(10.0 + i as f64, 12.0 + i as f64, 9.0 + i as f64, 11.0 + i as f64))
            .collect();
        let plot = project(&bars, 800.0, 400.0);
        assert_eq!(plot.len(), 20);
        for pair in plot.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn body_lies_within_the_wick_for_well_formed_bars() {
        let bars = vec![bar(10.0, 12.0, 9.0, 11.0), bar(11.0, 11.5, 9.5, 9.8)];
        let plot = project(&bars, 400.0, 300.0);
        for c in &plot {
            // y grows downward: high maps to the smallest y.
            assert!(c.y_high <= c.y_open.min(c.y_close));
            assert!(c.y_low >= c.y_open.max(c.y_close));
        }
    }

    #[test]
    fn flat_series_projects_without_dividing_by_zero() {
        let bars = vec![bar(10.0, 10.0, 10.0, 10.0); 5];
        let plot = project(&bars, 400.0, 300.0);
        assert_eq!(plot.len(), 5);
        for c in &plot {
            assert!(c.y_close.is_finite());
            assert!(c.y_high.is_finite());
        }
    }

    #[test]
    fn malformed_bars_still_produce_geometry() {
        // High below the body: renders wrong, must not panic or be dropped.
        let bars = vec![bar(10.0, 10.2, 9.0, 11.0)];
        let plot = project(&bars, 400.0, 300.0);
        assert_eq!(plot.len(), 1);
        assert!(plot[0].y_high > plot[0].y_close);
    }

    #[test]
    fn empty_series_yields_no_geometry() {
        assert!(project(&[], 400.0, 300.0).is_empty());
        assert!(price_bounds(&[]).is_none());
    }

    #[test]
    fn polyline_follows_closes() {
        let bars = vec![bar(10.0, 12.0, 9.0, 11.0), bar(11.0, 13.0, 10.0, 12.0)];
        let plot = project(&bars, 400.0, 300.0);
        let line = close_polyline(&plot);
        assert_eq!(line.len(), 2);
        // Second close is higher, so its y is smaller.
        assert!(line[1].1 < line[0].1);
    }
}
