//! Read-only queries: data status, product listing, single recommendations
//! and the embedded regional statistics.

use anyhow::Context;
use log::{info, warn};
use spe_core::api::PricingApi;
use spe_core::controller::NO_PRODUCTS_MESSAGE;
use spe_core::data_source::DataSource;
use spe_core::product::Product;
use spe_core::recommendation::Recommendation;
use spe_core::region::{format_millions, Region, StateStats};

pub async fn run_status<A: PricingApi>(api: &A, json: bool) -> anyhow::Result<()> {
    let status = api.data_status().await.context("Failed to check data status")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    if status.has_custom_data {
        println!("Custom data: available ({} products)", status.product_count);
    } else {
        println!("Custom data: none uploaded, using demo data");
    }
    Ok(())
}

/// One aligned listing line per product.
pub fn format_product_row(product: &Product) -> String {
    format!(
        "{:<32} {:>10} {:>8} {:<9} {}",
        product.name,
        format!("${:.2}", product.unit_price),
        format!("{}d", product.days_to_expiry),
        product.expiry_band().label(),
        product.category_or_unknown()
    )
}

pub async fn run_products<A: PricingApi>(api: &A, source: DataSource) -> anyhow::Result<()> {
    let products = api
        .list_products(source)
        .await
        .with_context(|| format!("Failed to load {} products", source))?;
    if products.is_empty() {
        warn!("{}", NO_PRODUCTS_MESSAGE);
        return Ok(());
    }

    info!("Loaded {} {} products", products.len(), source);
    println!(
        "{:<32} {:>10} {:>8} {:<9} Category",
        "Product", "Price", "Expiry", "Band"
    );
    for product in &products {
        println!("{}", format_product_row(product));
    }
    Ok(())
}

pub fn print_recommendation(product: &str, day: u32, rec: &Recommendation) {
    println!("{} - day {}", product, day);
    println!("  Current price:     {}", rec.predicted_price_text());
    println!("  Discount:          {}", rec.discount_text());
    println!("  Final price:       {}", rec.discounted_price_text());
    println!("  Expected revenue:  {}", rec.estimated_revenue_text());
    println!("  Waste reduction:   {}", rec.waste_reduction_text());
}

pub async fn run_recommend<A: PricingApi>(
    api: &A,
    source: DataSource,
    product: &str,
    day: u32,
    json: bool,
) -> anyhow::Result<()> {
    if day == 0 {
        anyhow::bail!("Days start at 1");
    }
    let rec = api
        .recommendation(source, product, day)
        .await
        .with_context(|| format!("No recommendation for {:?} on day {}", product, day))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        print_recommendation(product, day, &rec);
    }
    Ok(())
}

/// States to show: all of them, or those in the named region.
pub fn filter_states(states: Vec<StateStats>, region: Option<&str>) -> anyhow::Result<Vec<StateStats>> {
    let Some(label) = region else {
        return Ok(states);
    };
    let Some(region) = Region::from_label(label) else {
        let known: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
        anyhow::bail!("Unknown region {:?}, expected one of: {}", label, known.join(", "));
    };
    Ok(states.into_iter().filter(|s| s.region() == region).collect())
}

pub fn run_regions(region: Option<&str>) -> anyhow::Result<()> {
    let states = StateStats::embedded().context("Failed to load regional statistics")?;
    let states = filter_states(states, region)?;

    println!(
        "{:<24} {:<8} {:>10} {:>10} {:>7}",
        "State", "Region", "Sales", "Revenue", "Stores"
    );
    for s in &states {
        println!(
            "{:<24} {:<8} {:>10} {:>10} {:>7}",
            s.name,
            s.region(),
            format_millions(s.sales),
            format_millions(s.revenue),
            s.stores
        );
    }
    println!(
        "{:<24} {:<8} {:>10} {:>10} {:>7}",
        "Total",
        "",
        format_millions(StateStats::total_sales(&states)),
        format_millions(StateStats::total_revenue(&states)),
        StateStats::total_stores(&states)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_product_row() {
        let product = Product {
            name: "Paneer".to_string(),
            unit_price: 3.5,
            days_to_expiry: 2.0,
            category: None,
        };
        let row = format_product_row(&product);
        assert!(row.starts_with("Paneer"));
        assert!(row.contains("$3.50"));
        assert!(row.contains("2d"));
        assert!(row.contains("critical"));
        assert!(row.ends_with("Unknown"));
    }

    #[test]
    fn test_filter_states_by_region() {
        let states = StateStats::embedded().unwrap();
        let west = filter_states(states.clone(), Some("west")).unwrap();
        assert_eq!(west.len(), 3);
        assert!(west.iter().all(|s| s.region() == Region::West));

        assert_eq!(filter_states(states.clone(), None).unwrap().len(), states.len());
        assert!(filter_states(states, Some("Atlantis")).is_err());
    }
}
