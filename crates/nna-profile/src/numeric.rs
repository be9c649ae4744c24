//! Numeric statistics: summaries, quantiles, histograms and boxplots.

use nna_model::{BoxplotStats, HistogramBin, NumericSummary};

/// Tukey fence multiplier.
const WHISKER_IQR: f64 = 1.5;

/// Sorts a copy of `values` in ascending order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile of already sorted values, interpolating linearly at `p * (n - 1)`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Count, mean, sample std, min, quartiles and max; `None` without values.
pub fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    let ordered = sorted(values);
    let count = ordered.len();
    let (&min, &max) = (ordered.first()?, ordered.last()?);
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count >= 2).then(|| {
        let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });
    Some(NumericSummary {
        count,
        mean,
        std,
        min,
        q25: quantile(&ordered, 0.25)?,
        median: quantile(&ordered, 0.5)?,
        q75: quantile(&ordered, 0.75)?,
        max,
    })
}

/// Equal-width bins over the value range.
///
/// A constant series is spread over `[v - 0.5, v + 0.5]`. Values on the upper
/// edge land in the last bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || values.is_empty() {
        return Vec::new();
    }
    let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = ((value - low) / width).floor() as usize;
        counts[index.min(bins - 1)] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBin {
            lower: low + width * index as f64,
            upper: if index + 1 == bins {
                high
            } else {
                low + width * (index + 1) as f64
            },
            count,
        })
        .collect()
}

/// Boxplot statistics with whiskers at the furthest values inside the
/// 1.5 IQR fences.
pub fn boxplot(values: &[f64]) -> Option<BoxplotStats> {
    let ordered = sorted(values);
    let q1 = quantile(&ordered, 0.25)?;
    let median = quantile(&ordered, 0.5)?;
    let q3 = quantile(&ordered, 0.75)?;
    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR * iqr;
    let high_fence = q3 + WHISKER_IQR * iqr;
    let inside = || {
        ordered
            .iter()
            .copied()
            .filter(|value| (low_fence..=high_fence).contains(value))
    };
    let whisker_low = inside().next().unwrap_or(q1);
    let whisker_high = inside().last().unwrap_or(q3);
    let outliers = ordered
        .iter()
        .copied()
        .filter(|value| !(low_fence..=high_fence).contains(value))
        .collect();
    Some(BoxplotStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Pearson correlation over paired values.
///
/// `None` with fewer than two pairs or when either side has no variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
