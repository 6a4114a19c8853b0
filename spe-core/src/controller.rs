//! Selection controller: the data-source / selection state machine.
//!
//! The controller never performs I/O. Every operation mutates the state and
//! returns the [`Effect`]s the caller must run; each effect carries a ticket
//! that comes back inside the completion [`Message`]. Completions whose ticket
//! no longer matches the current state are dropped, so effects may be run
//! concurrently and resolve in any order.

use log::{debug, info, warn};

use crate::data_source::{DataSource, DataStatus};
use crate::error::Result;
use crate::product::Product;
use crate::recommendation::Recommendation;

pub const NO_PRODUCTS_MESSAGE: &str = "No products found in the data";
pub const CUSTOM_EXPIRED_MESSAGE: &str = "Custom data expired, switched to demo data";

/// Data-source dimension of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Demo,
    Custom,
    SwitchingToDemo,
    SwitchingToCustom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAdjust {
    Increment,
    Decrement,
    Reset,
}

/// Identifies one product-list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    pub generation: u64,
    pub source: DataSource,
}

/// What a recommendation was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecommendationKey {
    /// Bumped on every source switch, so a re-upload of the same source
    /// still invalidates responses from the previous dataset.
    pub epoch: u64,
    pub source: DataSource,
    pub product: String,
    pub day: u32,
}

/// Identifies one recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTicket {
    pub seq: u64,
    pub key: RecommendationKey,
}

/// Work the caller must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadStatus,
    LoadProducts(ListTicket),
    FetchRecommendation(RecommendationTicket),
}

/// Inputs to [`Controller::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Start,
    StatusLoaded(Result<DataStatus>),
    SwitchSource(DataSource),
    UploadFinished { success: bool },
    RefreshProducts,
    ProductsLoaded {
        ticket: ListTicket,
        result: Result<Vec<Product>>,
    },
    SelectProduct(String),
    AdjustDay(DayAdjust),
    RecommendationLoaded {
        ticket: RecommendationTicket,
        result: Result<Recommendation>,
    },
}

/// Keep `prior` if it names a product in `products`, otherwise fall back to
/// the first product. The result is `None` exactly when `products` is empty.
pub fn reconcile(products: &[Product], prior: Option<&str>) -> Option<String> {
    match prior {
        Some(name) if products.iter().any(|p| p.name == name) => Some(name.to_string()),
        _ => products.first().map(|p| p.name.clone()),
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    source: DataSource,
    /// Transition guard: set while the list is reloading after a switch.
    switching: bool,
    epoch: u64,
    products: Vec<Product>,
    selected: Option<String>,
    day: u32,
    recommendation: Option<Recommendation>,
    error: Option<String>,
    status: Option<DataStatus>,
    auto_switch_on_status: bool,
    list_generation: u64,
    list_in_flight: bool,
    next_seq: u64,
    in_flight: Option<RecommendationTicket>,
    /// Last key a request was issued for; prevents retry loops on failure.
    attempted: Option<RecommendationKey>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            source: DataSource::Demo,
            switching: false,
            epoch: 0,
            products: Vec::new(),
            selected: None,
            day: 1,
            recommendation: None,
            error: None,
            status: None,
            auto_switch_on_status: false,
            list_generation: 0,
            list_in_flight: false,
            next_seq: 0,
            in_flight: None,
            attempted: None,
        }
    }

    /// Apply one message and return the effects it triggers.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Start => self.start(),
            Message::StatusLoaded(result) => self.status_loaded(result),
            Message::SwitchSource(target) => self.switch_source(target),
            Message::UploadFinished { success } => self.upload_finished(success),
            Message::RefreshProducts => vec![self.refresh_products()],
            Message::ProductsLoaded { ticket, result } => self.products_loaded(ticket, result),
            Message::SelectProduct(name) => self.select_product(&name),
            Message::AdjustDay(adjust) => self.adjust_day(adjust),
            Message::RecommendationLoaded { ticket, result } => {
                self.recommendation_loaded(ticket, result)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Initial load: status plus the demo list. The first status reporting
    /// custom data switches to it.
    pub fn start(&mut self) -> Vec<Effect> {
        info!("Starting on {} data", self.source);
        self.auto_switch_on_status = true;
        self.switching = true;
        vec![Effect::LoadStatus, self.reload_products()]
    }

    pub fn status_loaded(&mut self, result: Result<DataStatus>) -> Vec<Effect> {
        let auto_switch = std::mem::take(&mut self.auto_switch_on_status);
        match result {
            Ok(status) => {
                info!(
                    "Data status: custom data {}, {} products",
                    if status.has_custom_data { "available" } else { "absent" },
                    status.product_count
                );
                let has_custom = status.has_custom_data;
                self.status = Some(status);
                if auto_switch && has_custom && self.source == DataSource::Demo {
                    return self.switch_source(DataSource::Custom);
                }
                Vec::new()
            }
            Err(e) => {
                warn!("Error checking data status: {}", e);
                Vec::new()
            }
        }
    }

    /// Explicit switch. Switching to custom requires the status to report a
    /// custom dataset; otherwise nothing happens.
    pub fn switch_source(&mut self, target: DataSource) -> Vec<Effect> {
        if target.is_custom() && !self.custom_available() {
            info!("Ignoring switch to custom data: none uploaded");
            return Vec::new();
        }
        self.day = 1;
        self.error = None;
        self.begin_switch(target);
        vec![self.reload_products()]
    }

    /// Notification from the upload collaborator.
    pub fn upload_finished(&mut self, success: bool) -> Vec<Effect> {
        if !success {
            warn!("Upload failed; keeping {} data", self.source);
            return Vec::new();
        }
        self.auto_switch_on_status = false;
        self.day = 1;
        self.error = None;
        self.begin_switch(DataSource::Custom);
        vec![Effect::LoadStatus, self.reload_products()]
    }

    /// User-requested reload. Clears the error so the banner only reflects
    /// the outcome of this load.
    pub fn refresh_products(&mut self) -> Effect {
        self.error = None;
        self.reload_products()
    }

    /// Issue a list request for the current source. Any earlier list request
    /// becomes stale.
    pub fn reload_products(&mut self) -> Effect {
        self.list_generation += 1;
        self.list_in_flight = true;
        debug!(
            "Loading products from {} (generation {})",
            self.source.products_path(),
            self.list_generation
        );
        Effect::LoadProducts(ListTicket {
            generation: self.list_generation,
            source: self.source,
        })
    }

    pub fn products_loaded(
        &mut self,
        ticket: ListTicket,
        result: Result<Vec<Product>>,
    ) -> Vec<Effect> {
        if ticket.generation != self.list_generation || ticket.source != self.source {
            debug!(
                "Dropping stale product list (generation {}, current {})",
                ticket.generation, self.list_generation
            );
            return Vec::new();
        }
        self.list_in_flight = false;
        self.recommendation = None;
        self.in_flight = None;
        self.attempted = None;

        match result {
            Ok(products) if !products.is_empty() => {
                info!("Products loaded successfully: {}", products.len());
                self.selected = if self.switching {
                    products.first().map(|p| p.name.clone())
                } else {
                    reconcile(&products, self.selected.as_deref())
                };
                self.products = products;
                self.switching = false;
                self.request_recommendation().into_iter().collect()
            }
            Ok(_) => {
                info!("No products in {} data", self.source);
                self.products.clear();
                self.selected = None;
                self.error = Some(NO_PRODUCTS_MESSAGE.to_string());
                self.switching = false;
                Vec::new()
            }
            Err(e) => {
                warn!("Error loading {} products: {}", self.source, e);
                self.products.clear();
                self.selected = None;
                self.error = Some(e.display_message());
                if self.source.is_custom() {
                    info!("Custom data failed, falling back to demo data");
                    self.begin_switch(DataSource::Demo);
                    vec![self.reload_products()]
                } else {
                    self.switching = false;
                    Vec::new()
                }
            }
        }
    }

    pub fn select_product(&mut self, name: &str) -> Vec<Effect> {
        let effective = reconcile(&self.products, Some(name));
        if effective.as_deref() != Some(name) {
            info!("Product {:?} not in current data, selecting first available", name);
        }
        if effective != self.selected {
            self.selected = effective;
            self.recommendation = None;
        }
        self.request_recommendation().into_iter().collect()
    }

    /// Every adjustment clears the recommendation and forces a new request,
    /// even when the day does not change (decrement at 1, reset at 1).
    pub fn adjust_day(&mut self, adjust: DayAdjust) -> Vec<Effect> {
        self.day = match adjust {
            DayAdjust::Increment => self.day.saturating_add(1),
            DayAdjust::Decrement => self.day.saturating_sub(1).max(1),
            DayAdjust::Reset => 1,
        };
        self.recommendation = None;
        self.in_flight = None;
        self.attempted = None;
        self.request_recommendation().into_iter().collect()
    }

    pub fn recommendation_loaded(
        &mut self,
        ticket: RecommendationTicket,
        result: Result<Recommendation>,
    ) -> Vec<Effect> {
        let current = self.in_flight.as_ref() == Some(&ticket)
            && !self.switching
            && self.current_key().as_ref() == Some(&ticket.key);
        if !current {
            debug!(
                "Dropping stale recommendation for {:?} day {} ({} data)",
                ticket.key.product, ticket.key.day, ticket.key.source
            );
            return Vec::new();
        }
        self.in_flight = None;

        match result {
            Ok(recommendation) => {
                debug!("Recommendation received for {:?}", ticket.key.product);
                self.recommendation = Some(recommendation);
                Vec::new()
            }
            Err(e) if e.requests_demo_fallback() && self.source.is_custom() => {
                warn!("Custom data missing, falling back to demo data: {}", e);
                self.error = Some(CUSTOM_EXPIRED_MESSAGE.to_string());
                self.begin_switch(DataSource::Demo);
                vec![self.reload_products()]
            }
            Err(e) => {
                warn!("Recommendation error for {:?}: {}", ticket.key.product, e);
                self.recommendation = None;
                Vec::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn begin_switch(&mut self, target: DataSource) {
        info!("Switching to {} data", target);
        self.switching = true;
        self.recommendation = None;
        self.in_flight = None;
        self.attempted = None;
        self.source = target;
        self.epoch += 1;
    }

    /// Key for the current (source, selection, day), if the selection is valid.
    fn current_key(&self) -> Option<RecommendationKey> {
        let product = self.selected_product()?;
        Some(RecommendationKey {
            epoch: self.epoch,
            source: self.source,
            product: product.name.clone(),
            day: self.day,
        })
    }

    /// Emit a recommendation request if the guard is clear, the selection is
    /// valid and no request was made for this key yet.
    fn request_recommendation(&mut self) -> Option<Effect> {
        if self.switching {
            return None;
        }
        if self.selected_product().is_none() && !self.products.is_empty() {
            self.selected = reconcile(&self.products, self.selected.as_deref());
            self.recommendation = None;
        }
        let key = self.current_key()?;
        if self.attempted.as_ref() == Some(&key) {
            return None;
        }
        self.next_seq += 1;
        let ticket = RecommendationTicket {
            seq: self.next_seq,
            key: key.clone(),
        };
        debug!(
            "Requesting recommendation for {:?} day {} from {}",
            key.product,
            key.day,
            key.source.recommendation_path()
        );
        self.in_flight = Some(ticket.clone());
        self.attempted = Some(key);
        Some(Effect::FetchRecommendation(ticket))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read-only views
    // ─────────────────────────────────────────────────────────────────────

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn source_state(&self) -> SourceState {
        match (self.source, self.switching) {
            (DataSource::Demo, false) => SourceState::Demo,
            (DataSource::Custom, false) => SourceState::Custom,
            (DataSource::Demo, true) => SourceState::SwitchingToDemo,
            (DataSource::Custom, true) => SourceState::SwitchingToCustom,
        }
    }

    pub fn is_switching(&self) -> bool {
        self.switching
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let name = self.selected.as_deref()?;
        self.products.iter().find(|p| p.name == name)
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    /// The recommendation, but only when it can be shown next to a product.
    pub fn visible_recommendation(&self) -> Option<(&Product, &Recommendation)> {
        Some((self.selected_product()?, self.recommendation.as_ref()?))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> Option<&DataStatus> {
        self.status.as_ref()
    }

    pub fn custom_available(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.has_custom_data)
    }

    pub fn is_loading(&self) -> bool {
        self.list_in_flight || self.in_flight.is_some()
    }

    pub fn can_export(&self) -> bool {
        !self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn product(name: &str, price: f64, expiry: f64) -> Product {
        Product {
            name: name.to_string(),
            unit_price: price,
            days_to_expiry: expiry,
            category: None,
        }
    }

    fn rec(price: f64) -> Recommendation {
        Recommendation {
            predicted_price: Some(price),
            ..Default::default()
        }
    }

    fn list_ticket(effects: &[Effect]) -> ListTicket {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::LoadProducts(t) => Some(*t),
                _ => None,
            })
            .expect("expected a product list effect")
    }

    fn rec_ticket(effects: &[Effect]) -> RecommendationTicket {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchRecommendation(t) => Some(t.clone()),
                _ => None,
            })
            .expect("expected a recommendation effect")
    }

    fn custom_status() -> Result<DataStatus> {
        Ok(DataStatus {
            has_custom_data: true,
            product_count: 2,
        })
    }

    /// Controller started with the status answered (no custom data) and the
    /// demo list loaded. Returns the first recommendation ticket.
    fn loaded(products: Vec<Product>) -> (Controller, RecommendationTicket) {
        let mut c = Controller::new();
        let effects = c.update(Message::Start);
        assert_eq!(effects[0], Effect::LoadStatus);
        let ticket = list_ticket(&effects);
        assert!(c.update(Message::StatusLoaded(Ok(DataStatus::default()))).is_empty());
        let effects = c.update(Message::ProductsLoaded {
            ticket,
            result: Ok(products),
        });
        (c, rec_ticket(&effects))
    }

    #[test]
    fn test_reconcile_is_empty_only_for_empty_lists() {
        let lists = vec![
            vec![],
            vec![product("A", 1.0, 1.0)],
            vec![product("A", 1.0, 1.0), product("B", 2.0, 2.0)],
            vec![product("B", 2.0, 2.0), product("C", 3.0, 3.0)],
        ];
        let priors = [None, Some(""), Some("A"), Some("B"), Some("Z")];
        for list in &lists {
            for prior in priors {
                let result = reconcile(list, prior);
                if list.is_empty() {
                    assert_eq!(result, None);
                } else {
                    let name = result.expect("non-empty list must yield a selection");
                    assert!(list.iter().any(|p| p.name == name));
                    if let Some(p) = prior.filter(|p| list.iter().any(|q| q.name == *p)) {
                        assert_eq!(name, p, "present selection must be kept");
                    }
                }
            }
        }
    }

    #[test]
    fn test_first_load_selects_first_and_requests() {
        let (c, ticket) = loaded(vec![product("A", 10.0, 1.0), product("B", 20.0, 10.0)]);
        assert_eq!(c.selected(), Some("A"));
        assert_eq!(c.source_state(), SourceState::Demo);
        assert_eq!(ticket.key.product, "A");
        assert_eq!(ticket.key.day, 1);
        assert_eq!(ticket.key.source, DataSource::Demo);
        assert!(c.is_loading());
    }

    #[test]
    fn test_refreshed_list_without_selection_moves_to_first() {
        let (mut c, ticket) = loaded(vec![product("A", 10.0, 1.0), product("B", 20.0, 10.0)]);
        c.update(Message::RecommendationLoaded {
            ticket,
            result: Ok(rec(9.0)),
        });
        assert!(c.recommendation().is_some());

        let refresh = list_ticket(&c.update(Message::RefreshProducts));
        let effects = c.update(Message::ProductsLoaded {
            ticket: refresh,
            result: Ok(vec![product("B", 20.0, 10.0)]),
        });
        assert_eq!(c.selected(), Some("B"));
        assert!(c.recommendation().is_none());
        let ticket = rec_ticket(&effects);
        assert_eq!(ticket.key.product, "B");
        assert_eq!(ticket.key.day, 1);
    }

    #[test]
    fn test_refresh_keeps_a_selection_that_still_exists() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0), product("B", 20.0, 10.0)]);
        c.update(Message::SelectProduct("B".into()));
        let refresh = list_ticket(&c.update(Message::RefreshProducts));
        c.update(Message::ProductsLoaded {
            ticket: refresh,
            result: Ok(vec![product("A", 11.0, 1.0), product("B", 21.0, 9.0)]),
        });
        assert_eq!(c.selected(), Some("B"));
    }

    #[test]
    fn test_switching_source_clears_recommendation_immediately() {
        let (mut c, ticket) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::StatusLoaded(custom_status()));
        c.update(Message::RecommendationLoaded {
            ticket: ticket.clone(),
            result: Ok(rec(9.0)),
        });
        assert!(c.recommendation().is_some());

        let effects = c.update(Message::SwitchSource(DataSource::Custom));
        assert!(c.recommendation().is_none());
        assert_eq!(c.source_state(), SourceState::SwitchingToCustom);
        assert_eq!(list_ticket(&effects).source, DataSource::Custom);

        // A late response from the demo source must not reappear.
        c.update(Message::RecommendationLoaded {
            ticket,
            result: Ok(rec(9.0)),
        });
        assert!(c.recommendation().is_none());

        // No requests while the guard is set.
        assert!(c.update(Message::SelectProduct("A".into())).is_empty());
        assert!(c.update(Message::AdjustDay(DayAdjust::Increment)).is_empty());
    }

    #[test]
    fn test_switch_resets_day_and_error() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::AdjustDay(DayAdjust::Increment));
        c.update(Message::AdjustDay(DayAdjust::Increment));
        assert_eq!(c.day(), 3);
        let effects = c.update(Message::SwitchSource(DataSource::Demo));
        assert_eq!(c.day(), 1);
        assert!(c.error().is_none());
        let effects = c.update(Message::ProductsLoaded {
            ticket: list_ticket(&effects),
            result: Ok(vec![product("A", 10.0, 1.0)]),
        });
        assert_eq!(rec_ticket(&effects).key.day, 1);
        assert_eq!(c.source_state(), SourceState::Demo);
    }

    #[test]
    fn test_switch_to_custom_requires_custom_data() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        assert!(c.update(Message::SwitchSource(DataSource::Custom)).is_empty());
        assert_eq!(c.source(), DataSource::Demo);
        assert!(!c.is_switching());
    }

    #[test]
    fn test_custom_reload_failure_falls_back_to_demo() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::StatusLoaded(custom_status()));
        let custom = list_ticket(&c.update(Message::SwitchSource(DataSource::Custom)));

        let effects = c.update(Message::ProductsLoaded {
            ticket: custom,
            result: Err(Error::Transport("connection refused".into())),
        });
        assert_eq!(c.source_state(), SourceState::SwitchingToDemo);
        assert_eq!(c.error(), Some("Network error - failed to load products"));
        let demo = list_ticket(&effects);
        assert_eq!(demo.source, DataSource::Demo);

        let effects = c.update(Message::ProductsLoaded {
            ticket: demo,
            result: Ok(vec![product("D", 5.0, 4.0)]),
        });
        assert_eq!(c.source_state(), SourceState::Demo);
        assert_eq!(c.products().len(), 1);
        assert_eq!(c.selected(), Some("D"));
        assert_eq!(c.error(), Some("Network error - failed to load products"));
        assert_eq!(rec_ticket(&effects).key.product, "D");
    }

    #[test]
    fn test_demo_reload_failure_does_not_retry() {
        let mut c = Controller::new();
        let ticket = list_ticket(&c.update(Message::Start));
        let effects = c.update(Message::ProductsLoaded {
            ticket,
            result: Err(Error::Api {
                status: Some(500),
                message: "Failed to load products".into(),
                fallback_to_demo: false,
            }),
        });
        assert!(effects.is_empty());
        assert!(!c.is_switching());
        assert!(!c.is_loading());
        assert_eq!(c.error(), Some("Failed to load products"));
        assert!(c.products().is_empty());
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_refresh_after_failed_load_clears_error() {
        let mut c = Controller::new();
        let ticket = list_ticket(&c.update(Message::Start));
        c.update(Message::ProductsLoaded {
            ticket,
            result: Err(Error::Transport("connection refused".into())),
        });
        assert_eq!(c.error(), Some("Network error - failed to load products"));

        let refresh = c.update(Message::RefreshProducts);
        assert!(c.error().is_none());
        let effects = c.update(Message::ProductsLoaded {
            ticket: list_ticket(&refresh),
            result: Ok(vec![product("A", 10.0, 1.0)]),
        });
        assert!(c.error().is_none());
        assert_eq!(c.products().len(), 1);
        assert_eq!(c.selected(), Some("A"));
        assert_eq!(rec_ticket(&effects).key.product, "A");
    }

    #[test]
    fn test_failed_refresh_on_custom_falls_back_to_demo() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::StatusLoaded(custom_status()));
        let custom = list_ticket(&c.update(Message::SwitchSource(DataSource::Custom)));
        c.update(Message::ProductsLoaded {
            ticket: custom,
            result: Ok(vec![product("C", 3.0, 2.0)]),
        });
        assert_eq!(c.source_state(), SourceState::Custom);

        let refresh = list_ticket(&c.update(Message::RefreshProducts));
        assert_eq!(refresh.source, DataSource::Custom);
        let effects = c.update(Message::ProductsLoaded {
            ticket: refresh,
            result: Err(Error::Api {
                status: Some(404),
                message: "No custom data available".into(),
                fallback_to_demo: true,
            }),
        });
        assert_eq!(c.source_state(), SourceState::SwitchingToDemo);
        assert!(c.products().is_empty());
        assert!(c.selected().is_none());
        assert_eq!(c.error(), Some("No custom data available"));
        let demo = list_ticket(&effects);
        assert_eq!(demo.source, DataSource::Demo);

        let effects = c.update(Message::ProductsLoaded {
            ticket: demo,
            result: Ok(vec![product("A", 10.0, 1.0)]),
        });
        assert_eq!(c.source_state(), SourceState::Demo);
        assert_eq!(c.selected(), Some("A"));
        assert_eq!(c.error(), Some("No custom data available"));
        assert_eq!(rec_ticket(&effects).key.source, DataSource::Demo);
    }

    #[test]
    fn test_empty_list_clears_selection_and_keeps_source() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        let effects = c.update(Message::UploadFinished { success: true });
        assert!(effects.contains(&Effect::LoadStatus));
        let ticket = list_ticket(&effects);
        let effects = c.update(Message::ProductsLoaded {
            ticket,
            result: Ok(vec![]),
        });
        assert!(effects.is_empty());
        assert_eq!(c.source_state(), SourceState::Custom);
        assert!(c.selected().is_none());
        assert_eq!(c.error(), Some(NO_PRODUCTS_MESSAGE));
        assert!(!c.can_export());
    }

    #[test]
    fn test_stale_recommendation_is_discarded() {
        let (mut c, _) = loaded(vec![product("X", 10.0, 1.0), product("Y", 20.0, 10.0)]);
        c.update(Message::AdjustDay(DayAdjust::Increment));
        let x3 = rec_ticket(&c.update(Message::AdjustDay(DayAdjust::Increment)));
        assert_eq!((x3.key.product.as_str(), x3.key.day), ("X", 3));

        c.update(Message::SelectProduct("Y".into()));
        let y4 = rec_ticket(&c.update(Message::AdjustDay(DayAdjust::Increment)));
        assert_eq!((y4.key.product.as_str(), y4.key.day), ("Y", 4));

        c.update(Message::RecommendationLoaded {
            ticket: x3,
            result: Ok(rec(1.0)),
        });
        assert_eq!(c.selected(), Some("Y"));
        assert_eq!(c.day(), 4);
        assert!(c.recommendation().is_none());

        c.update(Message::RecommendationLoaded {
            ticket: y4,
            result: Ok(rec(2.0)),
        });
        assert_eq!(c.recommendation(), Some(&rec(2.0)));
        assert!(c.visible_recommendation().is_some());
    }

    #[test]
    fn test_decrement_at_day_one_still_clears() {
        let (mut c, ticket) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::RecommendationLoaded {
            ticket,
            result: Ok(rec(3.0)),
        });
        let effects = c.update(Message::AdjustDay(DayAdjust::Decrement));
        assert_eq!(c.day(), 1);
        assert!(c.recommendation().is_none());
        let ticket = rec_ticket(&effects);
        assert_eq!(ticket.key.day, 1);
    }

    #[test]
    fn test_reset_returns_to_day_one() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        for _ in 0..4 {
            c.update(Message::AdjustDay(DayAdjust::Increment));
        }
        assert_eq!(c.day(), 5);
        let effects = c.update(Message::AdjustDay(DayAdjust::Reset));
        assert_eq!(c.day(), 1);
        assert_eq!(rec_ticket(&effects).key.day, 1);
    }

    #[test]
    fn test_failed_recommendation_is_not_retried_for_same_key() {
        let (mut c, ticket) = loaded(vec![product("A", 10.0, 1.0)]);
        let effects = c.update(Message::RecommendationLoaded {
            ticket,
            result: Err(Error::Transport("timeout".into())),
        });
        assert!(effects.is_empty());
        assert!(c.recommendation().is_none());
        assert!(c.error().is_none());
        assert!(c.update(Message::SelectProduct("A".into())).is_empty());
    }

    #[test]
    fn test_recommendation_fallback_signal_switches_to_demo() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        c.update(Message::StatusLoaded(custom_status()));
        let custom = list_ticket(&c.update(Message::SwitchSource(DataSource::Custom)));
        let effects = c.update(Message::ProductsLoaded {
            ticket: custom,
            result: Ok(vec![product("C", 7.0, 2.0)]),
        });
        let ticket = rec_ticket(&effects);
        assert_eq!(ticket.key.source, DataSource::Custom);

        let effects = c.update(Message::RecommendationLoaded {
            ticket,
            result: Err(Error::Api {
                status: Some(404),
                message: "Custom data not found".into(),
                fallback_to_demo: true,
            }),
        });
        assert_eq!(c.source_state(), SourceState::SwitchingToDemo);
        assert_eq!(c.error(), Some(CUSTOM_EXPIRED_MESSAGE));
        assert!(c.recommendation().is_none());
        assert_eq!(list_ticket(&effects).source, DataSource::Demo);
    }

    #[test]
    fn test_fallback_signal_on_demo_is_swallowed() {
        let (mut c, ticket) = loaded(vec![product("A", 10.0, 1.0)]);
        let effects = c.update(Message::RecommendationLoaded {
            ticket,
            result: Err(Error::Api {
                status: Some(404),
                message: "gone".into(),
                fallback_to_demo: true,
            }),
        });
        assert!(effects.is_empty());
        assert_eq!(c.source_state(), SourceState::Demo);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_start_auto_switches_when_custom_data_exists() {
        let mut c = Controller::new();
        let demo = list_ticket(&c.update(Message::Start));
        let effects = c.update(Message::StatusLoaded(custom_status()));
        let custom = list_ticket(&effects);
        assert_eq!(custom.source, DataSource::Custom);

        // The demo list from the initial load is now stale.
        c.update(Message::ProductsLoaded {
            ticket: demo,
            result: Ok(vec![product("A", 1.0, 1.0)]),
        });
        assert!(c.products().is_empty());
        assert_eq!(c.source_state(), SourceState::SwitchingToCustom);

        c.update(Message::ProductsLoaded {
            ticket: custom,
            result: Ok(vec![product("C", 1.0, 1.0)]),
        });
        assert_eq!(c.source_state(), SourceState::Custom);
        assert_eq!(c.selected(), Some("C"));

        // Later status refreshes do not switch again.
        assert!(c.update(Message::StatusLoaded(custom_status())).is_empty());
    }

    #[test]
    fn test_reupload_invalidates_responses_from_previous_dataset() {
        let mut c = Controller::new();
        c.update(Message::Start);
        let custom = list_ticket(&c.update(Message::StatusLoaded(custom_status())));
        let effects = c.update(Message::ProductsLoaded {
            ticket: custom,
            result: Ok(vec![product("C", 1.0, 1.0)]),
        });
        let old = rec_ticket(&effects);

        let upload = list_ticket(&c.update(Message::UploadFinished { success: true }));
        let effects = c.update(Message::ProductsLoaded {
            ticket: upload,
            result: Ok(vec![product("C", 2.0, 1.0)]),
        });
        let fresh = rec_ticket(&effects);
        assert_ne!(old.key, fresh.key);

        c.update(Message::RecommendationLoaded {
            ticket: old,
            result: Ok(rec(1.0)),
        });
        assert!(c.recommendation().is_none());
    }

    #[test]
    fn test_failed_upload_changes_nothing() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0)]);
        assert!(c.update(Message::UploadFinished { success: false }).is_empty());
        assert_eq!(c.source_state(), SourceState::Demo);
    }

    #[test]
    fn test_unknown_selection_is_reconciled() {
        let (mut c, _) = loaded(vec![product("A", 10.0, 1.0), product("B", 20.0, 10.0)]);
        c.update(Message::SelectProduct("B".into()));
        assert_eq!(c.selected(), Some("B"));
        c.update(Message::SelectProduct("Nope".into()));
        assert_eq!(c.selected(), Some("A"));
    }
}
