//! Sidebar, testimonials, project filter, contact form and navigation.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, HtmlImageElement};

use super::{
    inner_text, listen, query, query_all, query_as, query_within, set_active, set_inner_text,
    toggle_active,
};
use crate::config::Selectors;
use crate::error::PortfolioResult;
use crate::page::{category_visible, filter_value, navigation_targets, FilterBar};

pub fn mount_sidebar(document: &Document, selectors: &Selectors) -> PortfolioResult<()> {
    let (Some(sidebar), Some(button)) = (
        query(document, &selectors.sidebar),
        query(document, &selectors.sidebar_button),
    ) else {
        log::error!("[Page] Sidebar or Sidebar Button not found");
        return Ok(());
    };

    listen(&button, "click", move |_| toggle_active(&sidebar))
}

/// Testimonials modal: container and overlay toggle together.
#[derive(Clone)]
struct TestimonialsModal {
    container: Option<Element>,
    overlay: Option<Element>,
    img: Option<HtmlImageElement>,
    title: Option<Element>,
    text: Option<Element>,
}

impl TestimonialsModal {
    fn toggle(&self) {
        log::debug!("[Page] Toggling testimonials modal");
        for el in [&self.container, &self.overlay].into_iter().flatten() {
            toggle_active(el);
        }
    }

    fn show(&self, item: &Element, selectors: &Selectors) {
        let avatar = query_within(item, &selectors.testimonials_avatar)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        let title = query_within(item, &selectors.testimonials_title);
        let text = query_within(item, &selectors.testimonials_text);

        let (Some(avatar), Some(title), Some(text)) = (avatar, title, text) else {
            log::error!("[Page] Modal content not found in testimonial item");
            return;
        };

        if let Some(img) = &self.img {
            img.set_src(&avatar.src());
            img.set_alt(&avatar.alt());
        }
        if let Some(modal_title) = &self.title {
            modal_title.set_inner_html(&title.inner_html());
        }
        if let Some(modal_text) = &self.text {
            modal_text.set_inner_html(&text.inner_html());
        }
        self.toggle();
    }
}

pub fn mount_testimonials(document: &Document, selectors: &Selectors) -> PortfolioResult<()> {
    let modal = TestimonialsModal {
        container: query(document, &selectors.modal_container),
        overlay: query(document, &selectors.overlay),
        img: query_as(document, &selectors.modal_img),
        title: query(document, &selectors.modal_title),
        text: query(document, &selectors.modal_text),
    };

    for item in query_all(document, &selectors.testimonials_item) {
        let modal = modal.clone();
        let selectors = selectors.clone();
        let target = item.clone();
        listen(&target, "click", move |_| modal.show(&item, &selectors))?;
    }

    match (query(document, &selectors.modal_close_button), &modal.overlay) {
        (Some(close), Some(overlay)) => {
            let on_close = modal.clone();
            listen(&close, "click", move |_| on_close.toggle())?;
            let on_overlay = modal.clone();
            listen(overlay, "click", move |_| on_overlay.toggle())?;
        }
        _ => log::error!("[Page] Modal close button or overlay not found"),
    }

    Ok(())
}

fn filter_items(items: &[Element], selected: &str) {
    for item in items {
        let category = item.get_attribute("data-category");
        set_active(item, category_visible(selected, category.as_deref()));
    }
}

pub fn mount_filters(document: &Document, selectors: &Selectors) -> PortfolioResult<()> {
    let select = query(document, &selectors.select);
    let select_value = query(document, &selectors.select_value);
    let items = Rc::new(query_all(document, &selectors.filter_item));

    match &select {
        Some(select) => {
            let dropdown = select.clone();
            listen(select, "click", move |_| toggle_active(&dropdown))?;
        }
        None => log::error!("[Page] Select element not found"),
    }

    for option in query_all(document, &selectors.select_item) {
        let select = select.clone();
        let select_value = select_value.clone();
        let items = Rc::clone(&items);
        let target = option.clone();
        listen(&target, "click", move |_| {
            let label = inner_text(&option);
            if let Some(value) = &select_value {
                set_inner_text(value, &label);
            }
            if let Some(select) = &select {
                toggle_active(select);
            }
            filter_items(&items, &filter_value(&label));
        })?;
    }

    let buttons = Rc::new(query_all(document, &selectors.filter_button));
    let bar = Rc::new(RefCell::new(FilterBar::new(buttons.len())));

    for (index, button) in buttons.iter().enumerate() {
        let buttons = Rc::clone(&buttons);
        let bar = Rc::clone(&bar);
        let select_value = select_value.clone();
        let items = Rc::clone(&items);
        listen(button, "click", move |_| {
            let button = &buttons[index];
            let label = inner_text(button);
            if let Some(value) = &select_value {
                set_inner_text(value, &label);
            }
            filter_items(&items, &filter_value(&label));

            if let Some(previous) = bar.borrow_mut().click(index) {
                set_active(&buttons[previous], false);
            }
            set_active(button, true);
        })?;
    }

    Ok(())
}

pub fn mount_contact_form(document: &Document, selectors: &Selectors) -> PortfolioResult<()> {
    let (Some(form), Some(button)) = (
        query_as::<HtmlFormElement>(document, &selectors.form),
        query_as::<HtmlButtonElement>(document, &selectors.form_button),
    ) else {
        log::error!("[Page] Form or Form Button not found");
        return Ok(());
    };

    for input in query_all(document, &selectors.form_input) {
        let form = form.clone();
        let button = button.clone();
        listen(&input, "input", move |_| {
            button.set_disabled(!form.check_validity());
        })?;
    }

    Ok(())
}

pub fn mount_navigation(document: &Document, selectors: &Selectors) -> PortfolioResult<()> {
    let links = Rc::new(query_all(document, &selectors.nav_link));
    let pages = Rc::new(query_all(document, &selectors.page));

    for link in links.iter() {
        let link_for_click = link.clone();
        let links = Rc::clone(&links);
        let pages = Rc::clone(&pages);
        listen(link, "click", move |_| {
            let names: Vec<String> = pages
                .iter()
                .map(|page| page.get_attribute("data-page").unwrap_or_default())
                .collect();
            let targets = navigation_targets(&link_for_click.inner_html(), &names);

            for (i, (page, active)) in pages.iter().zip(&targets).enumerate() {
                set_active(page, *active);
                if let Some(nav) = links.get(i) {
                    set_active(nav, *active);
                }
            }

            if targets.iter().any(|active| *active) {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
            }
        })?;
    }

    Ok(())
}
