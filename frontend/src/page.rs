use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

use crate::api;
use crate::config::PageConfig;
use crate::controller::{Controller, DeleteOutcome, Effect, TransactionId};
use crate::dates;
use crate::error::PageError;
use crate::filters::FilterCriteria;
use crate::rows::RowKind;

/// Binds the server-rendered transactions page to a [`Controller`] and runs its effects.
///
/// Listeners live for the lifetime of the page, so they are forgotten once attached.
pub fn mount(window: Window, document: Document, config: PageConfig) -> Result<(), PageError> {
    attach(window, document, config).map(|_| ())
}

fn attach(window: Window, document: Document, config: PageConfig) -> Result<Host, PageError> {
    let modal = required(&document, &config.modal_id)?;
    let confirm = required(&document, &config.confirm_id)?;
    let cancel = required(&document, &config.cancel_id)?;

    let host = Host {
        controller: Rc::new(RefCell::new(Controller::new(&config))),
        config: Rc::new(config),
        window,
        document,
        modal,
        confirm,
    };

    host.bind_delete_triggers();
    host.on_click(&host.confirm, Controller::on_confirm);
    host.on_click(&cancel, Controller::on_cancel);
    host.bind_backdrop();
    host.bind_filter_form();
    if let Some(reset) = host.document.get_element_by_id(&host.config.reset_id) {
        host.on_click(&reset, Controller::on_reset);
    }

    host.fill_default_dates();
    host.tint_rows();
    Ok(host)
}

fn required(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(id.to_string()))
}

#[derive(Clone)]
struct Host {
    window: Window,
    document: Document,
    config: Rc<PageConfig>,
    modal: Element,
    confirm: Element,
    controller: Rc<RefCell<Controller>>,
}

impl Host {
    fn dispatch(&self, command: impl FnOnce(&mut Controller) -> Vec<Effect>) {
        let effects = {
            let mut controller = self.controller.borrow_mut();
            command(&mut *controller)
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn on_click(&self, target: &Element, command: fn(&mut Controller) -> Vec<Effect>) {
        let host = self.clone();
        EventListener::new(target, "click", move |_| host.dispatch(command)).forget();
    }

    fn bind_delete_triggers(&self) {
        let triggers = match self
            .document
            .query_selector_all(&self.config.delete_trigger_selector)
        {
            Ok(triggers) => triggers,
            Err(err) => {
                log::warn!("bad delete trigger selector: {err:?}");
                return;
            }
        };

        for index in 0..triggers.length() {
            let Some(trigger) = triggers
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let host = self.clone();
            let element = trigger.clone();
            EventListener::new(&trigger, "click", move |_| {
                let raw_id = element.get_attribute(&host.config.id_attribute);
                host.dispatch(|c| c.on_trigger_delete(raw_id.as_deref()));
            })
            .forget();
        }
    }

    // The modal container doubles as the dimmed backdrop, so only clicks that land on it
    // directly dismiss. Clicks on anything inside it carry a different target.
    fn bind_backdrop(&self) {
        let host = self.clone();
        EventListener::new(&self.window, "click", move |event| {
            let on_backdrop = event.target().is_some_and(|target| {
                let target: &JsValue = target.as_ref();
                let modal: &JsValue = host.modal.as_ref();
                target == modal
            });
            host.dispatch(|c| c.on_backdrop_click(on_backdrop));
        })
        .forget();
    }

    fn bind_filter_form(&self) {
        let Some(form) = self.document.get_element_by_id(&self.config.filter_form_id) else {
            return;
        };
        let host = self.clone();
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let criteria = host.read_filters();
                host.dispatch(|c| c.on_filter_submit(&criteria));
            },
        )
        .forget();
    }

    fn read_filters(&self) -> FilterCriteria {
        FilterCriteria {
            category: self.field_value(&self.config.category_field_id),
            kind: self.field_value(&self.config.type_field_id),
            start_date: self.field_value(&self.config.start_date_field_id),
            end_date: self.field_value(&self.config.end_date_field_id),
        }
    }

    fn field_value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn date_input(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn fill_default_dates(&self) {
        let fields_present = self.date_input(&self.config.start_date_field_id).is_some()
            && self.date_input(&self.config.end_date_field_id).is_some();
        let search = self.window.location().search().unwrap_or_default();
        let today = dates::today();
        self.dispatch(|c| c.on_load(&search, today, fields_present));
    }

    fn tint_rows(&self) {
        let rows = match self.document.query_selector_all(&self.config.row_selector) {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!("bad row selector: {err:?}");
                return;
            }
        };

        for index in 0..rows.length() {
            let Some(row) = rows
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let classes = row.class_list();
            let Some(kind) = RowKind::classify(
                |class| classes.contains(class),
                &self.config.income_class,
                &self.config.expense_class,
            ) else {
                continue;
            };
            let Ok(Some(cell)) = row.query_selector(&self.config.amount_selector) else {
                continue;
            };
            if let Some(cell) = cell.dyn_ref::<HtmlElement>() {
                if let Err(err) = cell.style().set_property("color", self.config.tint_color(kind)) {
                    log::warn!("could not tint amount cell: {err:?}");
                }
            }
        }
    }

    fn apply(&self, effect: Effect) {
        match effect {
            Effect::ShowModal => self.set_modal_active(true),
            Effect::HideModal => self.set_modal_active(false),
            Effect::SetConfirmEnabled(enabled) => {
                let result = if enabled {
                    self.confirm.remove_attribute("disabled")
                } else {
                    self.confirm.set_attribute("disabled", "")
                };
                if let Err(err) = result {
                    log::warn!("could not toggle confirm button: {err:?}");
                }
            }
            Effect::Delete(id) => self.spawn_delete(id),
            Effect::Reload => {
                if let Err(err) = self.window.location().reload() {
                    log::error!("reload failed: {err:?}");
                }
            }
            Effect::Navigate(url) => {
                log::debug!("navigating to {url}");
                if let Err(err) = self.window.location().set_href(&url) {
                    log::error!("navigation to {url} failed: {err:?}");
                }
            }
            Effect::Alert(message) => {
                if let Err(err) = self.window.alert_with_message(&message) {
                    log::error!("alert failed: {err:?}");
                }
            }
            Effect::FillDateRange { start, end } => {
                if let Some(input) = self.date_input(&self.config.start_date_field_id) {
                    input.set_value(&dates::format_date(start));
                }
                if let Some(input) = self.date_input(&self.config.end_date_field_id) {
                    input.set_value(&dates::format_date(end));
                }
            }
        }
    }

    fn set_modal_active(&self, active: bool) {
        let classes = self.modal.class_list();
        let result = if active {
            classes.add_1(&self.config.active_class)
        } else {
            classes.remove_1(&self.config.active_class)
        };
        if let Err(err) = result {
            log::warn!("could not toggle modal: {err:?}");
        }
    }

    fn spawn_delete(&self, id: TransactionId) {
        let url = self.config.delete_url(&id);
        let host = self.clone();
        spawn_local(async move {
            let outcome = match api::delete_transaction(&url).await {
                Ok(()) => DeleteOutcome::Deleted,
                Err(err) => {
                    log::error!("failed to delete transaction {id}: {err}");
                    DeleteOutcome::Failed
                }
            };
            host.dispatch(|c| c.on_delete_settled(outcome));
        });
    }
}
