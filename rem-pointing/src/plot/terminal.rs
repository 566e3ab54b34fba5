use textplots::{Chart, Plot, Shape};

pub fn scatter_terminal(
    points: &[(f64, f64)],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> String {
    if points.is_empty() {
        return format!("{title}\n  (no data)\n");
    }
    let f32_pts: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x as f32, y as f32)).collect();
    let (xmin, xmax) = padded_extent(f32_pts.iter().map(|p| p.0));
    let shape = Shape::Points(&f32_pts);
    let mut chart = Chart::new(80, 24, xmin, xmax);
    let rendered = chart.lineplot(&shape);
    rendered.axis();
    rendered.figures();
    format!("{title}\n  {y_label} vs {x_label}\n{rendered}")
}

pub fn histogram_terminal(values: &[f64], title: &str, label: &str) -> String {
    if values.is_empty() {
        return format!("{title}\n  (no data)\n");
    }
    let (bins, bin_width, min_val) = bin_values(values, 20);
    let max_count = bins.iter().copied().max().unwrap_or(1).max(1);
    let (mean, sigma) = mean_sigma(values);
    let mut out = format!("{title}\n\n");
    for (i, &count) in bins.iter().enumerate() {
        let edge = min_val + i as f64 * bin_width;
        let bar = "\u{2588}".repeat((count * 40) / max_count);
        out.push_str(&format!("  {edge:>8.2} \u{2502}{bar} {count}\n"));
    }
    out.push_str(&format!(
        "\n  {label}  mean: {mean:.2}\"  sigma: {sigma:.2}\"\n"
    ));
    out
}

fn padded_extent(iter: impl Iterator<Item = f32>) -> (f32, f32) {
    let (lo, hi) = iter.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (hi - lo).abs() < 1e-6 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

fn bin_values(values: &[f64], n_bins: usize) -> (Vec<usize>, f64, f64) {
    let (min_val, max_val) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let bin_width = (max_val - min_val).max(1e-10) / n_bins as f64;
    let mut bins = vec![0usize; n_bins];
    for &v in values {
        let idx = libm::floor((v - min_val) / bin_width) as usize;
        bins[idx.min(n_bins - 1)] += 1;
    }
    (bins, bin_width, min_val)
}

fn mean_sigma(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, libm::sqrt(variance))
}
