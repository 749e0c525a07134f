//! Market assets, client-side filtering and chart series

use serde::Deserialize;

/// One ranked asset from the markets endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Default)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl Asset {
    pub fn change_24h(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }

    pub fn is_up(&self) -> bool {
        self.change_24h() >= 0.0
    }

    pub fn history(&self) -> &[f64] {
        self.sparkline_in_7d
            .as_ref()
            .map(|s| s.price.as_slice())
            .unwrap_or(&[])
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// A labelled point on a chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Price history of `asset` as `Day 1..Day n` points
pub fn price_series(asset: &Asset) -> Vec<ChartPoint> {
    asset
        .history()
        .iter()
        .enumerate()
        .map(|(i, price)| ChartPoint {
            label: format!("Day {}", i + 1),
            value: *price,
        })
        .collect()
}

/// Case-insensitive substring match on name or symbol against the raw input
pub fn filter_assets<'a>(assets: &'a [Asset], input: &str) -> Vec<&'a Asset> {
    let needle = input.trim().to_lowercase();
    assets.iter().filter(|asset| asset.matches(&needle)).collect()
}

/// The selected asset, falling back to the first one when nothing (valid) is selected
pub fn resolve_selection<'a>(assets: &'a [Asset], selected_id: Option<&str>) -> Option<&'a Asset> {
    selected_id
        .and_then(|id| assets.iter().find(|asset| asset.id == id))
        .or_else(|| assets.first())
}

/// Id of the asset `step` places away from the current selection within `visible`.
/// A selection hidden by the filter enters the list at the first row going down
/// and at the last row going up.
pub fn step_selection(visible: &[&Asset], selected_id: Option<&str>, step: isize) -> Option<String> {
    if visible.is_empty() {
        return None;
    }
    let last = visible.len() as isize - 1;
    let current = selected_id.and_then(|id| visible.iter().position(|asset| asset.id == id));
    let next = match current {
        Some(index) => (index as isize + step).clamp(0, last),
        None if step < 0 => last,
        None => 0,
    };
    Some(visible[next as usize].id.clone())
}
