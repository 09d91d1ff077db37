//! Decision core for the transactions page.
//!
//! Every user gesture is a method call on [`Controller`] that updates its state and
//! returns the [`Effect`]s the page host has to carry out. Nothing in here touches the
//! DOM or the network.

use std::fmt;

use chrono::NaiveDate;

use crate::config::PageConfig;
use crate::dates;
use crate::filters::{self, FilterCriteria};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// The token is kept exactly as the page wrote it; only an empty one is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| TransactionId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ShowModal,
    HideModal,
    SetConfirmEnabled(bool),
    Delete(TransactionId),
    Reload,
    Navigate(String),
    Alert(String),
    FillDateRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
}

#[derive(Debug)]
pub struct Controller {
    listing_path: String,
    delete_failed_message: String,
    pending: Option<TransactionId>,
    in_flight: Option<TransactionId>,
}

impl Controller {
    pub fn new(config: &PageConfig) -> Self {
        Controller {
            listing_path: config.listing_path.clone(),
            delete_failed_message: config.delete_failed_message.clone(),
            pending: None,
            in_flight: None,
        }
    }

    pub fn on_trigger_delete(&mut self, raw_id: Option<&str>) -> Vec<Effect> {
        let Some(id) = raw_id.and_then(TransactionId::parse) else {
            log::debug!("ignoring delete trigger without a usable id: {raw_id:?}");
            return Vec::new();
        };
        self.pending = Some(id);
        vec![Effect::ShowModal]
    }

    pub fn on_confirm(&mut self) -> Vec<Effect> {
        if let Some(id) = &self.in_flight {
            log::debug!("delete of transaction {id} still running, ignoring confirm");
            return Vec::new();
        }
        let Some(id) = self.pending.clone() else {
            return Vec::new();
        };
        log::info!("deleting transaction {id}");
        self.in_flight = Some(id.clone());
        vec![Effect::SetConfirmEnabled(false), Effect::Delete(id)]
    }

    pub fn on_delete_settled(&mut self, outcome: DeleteOutcome) -> Vec<Effect> {
        let id = self.in_flight.take();
        self.pending = None;
        let id = id.as_ref().map_or("?", TransactionId::as_str);

        let mut effects = Vec::with_capacity(3);
        match outcome {
            DeleteOutcome::Deleted => {
                log::info!("transaction {id} deleted, reloading");
                effects.push(Effect::Reload);
            }
            DeleteOutcome::Failed => {
                log::warn!("transaction {id} was not deleted");
                effects.push(Effect::Alert(self.delete_failed_message.clone()));
            }
        }
        effects.push(Effect::HideModal);
        effects.push(Effect::SetConfirmEnabled(true));
        effects
    }

    pub fn on_cancel(&mut self) -> Vec<Effect> {
        self.pending = None;
        vec![Effect::HideModal]
    }

    pub fn on_backdrop_click(&mut self, target_is_backdrop: bool) -> Vec<Effect> {
        if target_is_backdrop {
            self.on_cancel()
        } else {
            Vec::new()
        }
    }

    pub fn on_filter_submit(&mut self, criteria: &FilterCriteria) -> Vec<Effect> {
        vec![Effect::Navigate(filters::listing_url(
            &self.listing_path,
            criteria,
        ))]
    }

    pub fn on_reset(&mut self) -> Vec<Effect> {
        vec![Effect::Navigate(self.listing_path.clone())]
    }

    pub fn on_load(
        &mut self,
        search: &str,
        today: NaiveDate,
        date_fields_present: bool,
    ) -> Vec<Effect> {
        if !date_fields_present || dates::has_date_filter(search) {
            return Vec::new();
        }
        match dates::month_range(today) {
            Some((start, end)) => vec![Effect::FillDateRange { start, end }],
            None => Vec::new(),
        }
    }
}
