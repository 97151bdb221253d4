//! Browser bindings: element lookup, listeners and class toggling.
//!
//! Lookups return `Option`/`Vec` so behaviors can no-op when the page does not
//! render a widget. Listeners registered here live for the page's lifetime.

pub mod page;
pub mod video;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

use crate::config::BehaviorConfig;
use crate::error::PortfolioResult;

const ACTIVE: &str = "active";

/// Mount every page behavior.
pub fn mount(document: &Document, config: &BehaviorConfig) -> PortfolioResult<()> {
    let selectors = &config.selectors;
    page::mount_sidebar(document, selectors)?;
    page::mount_testimonials(document, selectors)?;
    page::mount_filters(document, selectors)?;
    page::mount_contact_form(document, selectors)?;
    page::mount_navigation(document, selectors)?;
    video::mount(document, config)?;
    log::info!("[Page] Behaviors mounted");
    Ok(())
}

pub(crate) fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// First match of `selector` cast to `T`.
pub(crate) fn query_as<T: JsCast>(root: &Document, selector: &str) -> Option<T> {
    query(root, selector).and_then(|el| el.dyn_into::<T>().ok())
}

pub(crate) fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::error!("[Page] Invalid selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn toggle_active(el: &Element) {
    let _ = el.class_list().toggle(ACTIVE);
}

pub(crate) fn set_active(el: &Element, active: bool) {
    let classes = el.class_list();
    let _ = if active {
        classes.add_1(ACTIVE)
    } else {
        classes.remove_1(ACTIVE)
    };
}

/// Rendered text of an element, as `innerText` reports it.
pub(crate) fn inner_text(el: &Element) -> String {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.inner_text(),
        None => el.text_content().unwrap_or_default(),
    }
}

pub(crate) fn set_inner_text(el: &Element, text: &str) {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.set_inner_text(text),
        None => el.set_text_content(Some(text)),
    }
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::debug!("[Page] Failed to set {}: {:?}", property, e);
    }
}

/// Register a page-lifetime listener.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> PortfolioResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Register a listener that runs at most once.
pub(crate) fn listen_once<F>(target: &EventTarget, event: &str, handler: F) -> PortfolioResult<()>
where
    F: FnOnce() + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.unchecked_ref::<js_sys::Function>(),
        &options,
    )?;
    Ok(())
}
