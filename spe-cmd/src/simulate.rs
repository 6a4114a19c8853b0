//! Day-by-day price simulation driven through the selection controller.

use log::{info, warn};
use spe_core::client::HttpClient;
use spe_core::controller::{DayAdjust, Message};
use spe_core::data_source::DataSource;

use crate::open_session;
use crate::query::print_recommendation;

pub async fn run_simulate(
    client: HttpClient,
    source: DataSource,
    product: Option<&str>,
    days: u32,
) -> anyhow::Result<()> {
    if days == 0 {
        anyhow::bail!("Nothing to simulate for 0 days");
    }
    let mut session = open_session(client, source).await?;

    if let Some(name) = product {
        session.send(Message::SelectProduct(name.to_string())).await;
        if session.controller().selected() != Some(name) {
            anyhow::bail!("Product {:?} is not in the {} data", name, source);
        }
    }
    let Some(selected) = session.controller().selected().map(str::to_string) else {
        anyhow::bail!("No products in the {} data", source);
    };

    info!("Simulating {} days for {:?}", days, selected);
    for step in 0..days {
        if step > 0 {
            session.send(Message::AdjustDay(DayAdjust::Increment)).await;
        }
        let controller = session.controller();
        if controller.source() != source {
            warn!(
                "Switched to {} data mid-simulation: {}",
                controller.source(),
                controller.error().unwrap_or("unknown reason")
            );
            break;
        }
        match controller.recommendation() {
            Some(rec) => print_recommendation(&selected, controller.day(), rec),
            None => warn!("No recommendation for day {}", controller.day()),
        }
    }
    Ok(())
}
