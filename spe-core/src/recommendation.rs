use serde::{Deserialize, Serialize};

/// Pricing output for one product on one simulated day.
///
/// Every figure is optional on the wire; display helpers fall back to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub predicted_price: Option<f64>,
    #[serde(default)]
    pub discount_percent: Option<f64>,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub estimated_revenue: Option<f64>,
    #[serde(default)]
    pub waste_reduction: Option<f64>,
}

/// Body of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest<'a> {
    pub product_name: &'a str,
    pub current_day: u32,
}

fn money(value: Option<f64>) -> String {
    format!("${:.2}", value.unwrap_or_default())
}

impl Recommendation {
    pub fn predicted_price_text(&self) -> String {
        money(self.predicted_price)
    }

    pub fn discount_text(&self) -> String {
        format!("{}%", self.discount_percent.unwrap_or_default())
    }

    pub fn discounted_price_text(&self) -> String {
        money(self.discounted_price)
    }

    pub fn estimated_revenue_text(&self) -> String {
        money(self.estimated_revenue)
    }

    pub fn waste_reduction_text(&self) -> String {
        format!("{:.0} units", self.waste_reduction.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_with_nulls() {
        let rec: Recommendation = serde_json::from_value(json!({
            "predictedPrice": 12.5,
            "discountPercent": 15,
            "discountedPrice": null,
            "estimatedRevenue": 240.0,
            "confidence": 0.8
        }))
        .unwrap();
        assert_eq!(rec.predicted_price_text(), "$12.50");
        assert_eq!(rec.discount_text(), "15%");
        assert_eq!(rec.discounted_price_text(), "$0.00");
        assert_eq!(rec.estimated_revenue_text(), "$240.00");
        assert_eq!(rec.waste_reduction_text(), "0 units");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(RecommendationRequest {
            product_name: "Milk",
            current_day: 3,
        })
        .unwrap();
        assert_eq!(body, json!({"productName": "Milk", "currentDay": 3}));
    }
}
