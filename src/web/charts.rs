//! Chart geometry for the profile page.
//!
//! The templates only place pre-computed shapes: pie slice arc paths for the
//! language distribution and relative bar heights for the star ranking are
//! all worked out here.

use crate::analytics::LanguageShare;
use crate::github::Repository;

/// Fixed series palette, assigned in rank order and cycled when exhausted.
pub const PALETTE: [&str; 7] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658",
];

const PIE_CX: f64 = 100.0;
const PIE_CY: f64 = 100.0;
const PIE_R: f64 = 80.0;

/// Longest repository name shown under a bar before truncation.
const BAR_LABEL_LEN: usize = 15;

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub percent_label: String,
    pub color: &'static str,
    /// SVG path for the slice; unused when `full_circle` is set.
    pub path: String,
    /// A single language fills the whole pie; an arc between two identical
    /// points would collapse, so the template draws a circle instead.
    pub full_circle: bool,
}

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub full_name: String,
    pub stars: u64,
    /// Bar height as a percentage of the tallest bar.
    pub height_pct: f64,
    pub color: &'static str,
}

fn polar(angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (PIE_CX + PIE_R * rad.cos(), PIE_CY + PIE_R * rad.sin())
}

/// Build pie slices from a ranked language breakdown. Slices start at twelve
/// o'clock and run clockwise in rank order.
pub fn pie_chart(shares: &[LanguageShare]) -> Vec<PieSlice> {
    let mut slices = Vec::with_capacity(shares.len());
    let mut angle = -90.0;

    for (index, share) in shares.iter().enumerate() {
        let sweep = share.percent * 3.6;
        let start = angle;
        let end = angle + sweep;
        angle = end;

        let full_circle = sweep >= 359.99;
        let path = if full_circle {
            String::new()
        } else {
            let (x0, y0) = polar(start);
            let (x1, y1) = polar(end);
            let large_arc = i32::from(sweep > 180.0);
            format!(
                "M {PIE_CX:.2} {PIE_CY:.2} L {x0:.2} {y0:.2} A {PIE_R:.2} {PIE_R:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
            )
        };

        slices.push(PieSlice {
            label: share.language.clone(),
            count: share.count,
            percent_label: format!("{:.0}%", share.percent),
            color: PALETTE[index % PALETTE.len()],
            path,
            full_circle,
        });
    }

    slices
}

/// Build the star-ranking bars for the top repositories.
pub fn star_bars(repos: &[Repository]) -> Vec<Bar> {
    let max_stars = repos.iter().map(|r| r.stargazers_count).max().unwrap_or(0);

    repos
        .iter()
        .enumerate()
        .map(|(index, repo)| {
            let label = if repo.name.chars().count() > BAR_LABEL_LEN {
                let truncated: String = repo.name.chars().take(BAR_LABEL_LEN).collect();
                format!("{truncated}...")
            } else {
                repo.name.clone()
            };

            let height_pct = if max_stars == 0 {
                0.0
            } else {
                // Rounded to one decimal so the CSS height stays readable
                let pct = repo.stargazers_count as f64 * 100.0 / max_stars as f64;
                (pct * 10.0).round() / 10.0
            };

            Bar {
                label,
                full_name: repo.name.clone(),
                stars: repo.stargazers_count,
                height_pct,
                color: PALETTE[index % PALETTE.len()],
            }
        })
        .collect()
}
