use chrono::DateTime;
use coinview_coinranking::{Coin, Data, Stats};
use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{row, Table};

pub fn render_home(data: &Data, favorites: &[String]) -> String {
    let mut out = render_stats(&data.stats);
    out.push('\n');
    out.push_str(&render_coins(&data.coins, favorites));
    out
}

/// `None` means no favorites are stored.
pub fn render_favorites(data: Option<&Data>) -> String {
    match data {
        Some(data) if !data.coins.is_empty() => {
            let favorites: Vec<String> = data.coins.iter().map(|c| c.uuid.clone()).collect();
            let mut out = format!("Favorites ({})\n\n", data.coins.len());
            out.push_str(&render_coins(&data.coins, &favorites));
            out
        }
        _ => "No favorites yet. Add one with `coinview like <uuid>`.\n".to_string(),
    }
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Crypto Market Overview\n\n\
         Total cryptocurrencies: {}\n\
         Total markets: {}\n\
         Total exchanges: {}\n\
         Total market cap: {}\n\
         Total 24h volume: {}\n",
        stats.total_coins,
        stats.total_markets,
        stats.total_exchanges,
        format_usd(stats.total_market_cap),
        format_usd(stats.total_24h_volume),
    )
}

pub fn render_coins(coins: &[Coin], favorites: &[String]) -> String {
    if coins.is_empty() {
        return "No coins found.\n".to_string();
    }

    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(row![
        "", "#", "Symbol", "Name", "Price", "24h", "Market Cap", "24h Volume", "Listed", "UUID"
    ]);

    for coin in coins {
        let marker = if favorites.iter().any(|f| f == &coin.uuid) { "*" } else { "" };
        table.add_row(row![
            marker,
            coin.rank,
            coin.symbol,
            coin.name,
            format_price(coin.price),
            format_change(coin.change),
            format_usd(coin.market_cap),
            format_usd(coin.volume_24h),
            format_listed(coin.listed_at),
            coin.uuid
        ]);
    }

    table.to_string()
}

fn format_price(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v >= 1.0 => format!("${v:.2}"),
        Some(v) => format!("${v:.6}"),
    }
}

fn format_change(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => format!("{v:+.2}%"),
    }
}

/// Compact dollars: `$2.42T`, `$913.45B`, `$12.30M`.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };

    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if v.abs() >= scale {
            return format!("${:.2}{suffix}", v / scale);
        }
    }
    format!("${v:.2}")
}

fn format_listed(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
