//! Effect execution.
//!
//! [`perform`] runs a single [`Effect`] and returns the completion message.
//! [`Session`] drains effects one at a time, which is what the CLI and the
//! tests want. The web dashboard calls [`perform`] from independent tasks.

use std::collections::VecDeque;

use log::debug;

use crate::api::PricingApi;
use crate::controller::{Controller, Effect, Message};

/// Run one effect against the API and wrap the outcome as a message.
pub async fn perform<A: PricingApi + ?Sized>(api: &A, effect: Effect) -> Message {
    match effect {
        Effect::LoadStatus => Message::StatusLoaded(api.data_status().await),
        Effect::LoadProducts(ticket) => Message::ProductsLoaded {
            ticket,
            result: api.list_products(ticket.source).await,
        },
        Effect::FetchRecommendation(ticket) => {
            let result = api
                .recommendation(ticket.key.source, &ticket.key.product, ticket.key.day)
                .await;
            Message::RecommendationLoaded { ticket, result }
        }
    }
}

/// A controller bound to an API, run to quiescence after every message.
pub struct Session<A> {
    api: A,
    controller: Controller,
}

impl<A: PricingApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            controller: Controller::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Apply `message` and run every effect it transitively triggers.
    pub async fn send(&mut self, message: Message) {
        let mut queue: VecDeque<Effect> = self.controller.update(message).into();
        while let Some(effect) = queue.pop_front() {
            debug!("Running {:?}", effect);
            let completion = perform(&self.api, effect).await;
            queue.extend(self.controller.update(completion));
        }
    }

    pub async fn start(&mut self) {
        self.send(Message::Start).await;
    }
}
