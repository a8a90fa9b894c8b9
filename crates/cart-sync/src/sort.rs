//! Sort Controller
//!
//! The server owns result ordering; changing the sort control only rewrites
//! the query string and reloads the page.

use std::rc::Rc;

use log::info;
use url::Url;

use crate::context::AppContext;
use crate::domain::{CartError, CartResult, ToastKind};
use crate::traits::{Dom, Navigator, Notifier};

/// Class marking the product grid while the sorted page loads
pub const SORTING_CLASS: &str = "is-sorting";
pub const SORTING_MESSAGE: &str = "Aplicando ordenamiento...";
const SORTING_TOAST_MS: u32 = 2000;

pub struct SortController {
    navigator: Rc<dyn Navigator>,
    dom: Rc<dyn Dom>,
    notifier: Rc<dyn Notifier>,
    param: String,
    grid_selector: String,
}

impl SortController {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            navigator: Rc::clone(&ctx.navigator),
            dom: Rc::clone(&ctx.dom),
            notifier: Rc::clone(&ctx.notifier),
            param: ctx.config.sort_param.clone(),
            grid_selector: ctx.config.selectors.products_grid.clone(),
        }
    }

    /// Navigate to the current page sorted by `value` (blank clears the
    /// sort). Returns the URL navigated to.
    pub fn apply(&self, value: &str) -> CartResult<String> {
        let target = sorted_url(&self.navigator.current_url(), &self.param, value)?;
        info!("[SORT] {} -> {}", value, target);

        self.dom.toggle_class(&self.grid_selector, SORTING_CLASS, true);
        self.notifier.notify(SORTING_MESSAGE, ToastKind::Info, Some(SORTING_TOAST_MS));
        self.navigator.navigate(&target);
        Ok(target)
    }
}

/// Set or remove one query parameter, keeping the others in place.
pub fn sorted_url(current: &str, param: &str, value: &str) -> CartResult<String> {
    let mut url = Url::parse(current).map_err(|e| CartError::InvalidInput(format!("bad page URL {}: {}", current, e)))?;
    let value = value.trim();

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, existing) in url.query_pairs() {
        if key == param {
            if !replaced && !value.is_empty() {
                pairs.push((key.into_owned(), value.to_string()));
            }
            replaced = true;
        } else {
            pairs.push((key.into_owned(), existing.into_owned()));
        }
    }
    if !replaced && !value.is_empty() {
        pairs.push((param.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    #[test]
    fn test_sets_param_preserving_others() {
        assert_eq!(
            sorted_url("https://tienda.test/productos/?categoria=3&sort=nombre&page=2", "sort", "precio").unwrap(),
            "https://tienda.test/productos/?categoria=3&sort=precio&page=2"
        );
        assert_eq!(
            sorted_url("https://tienda.test/productos/", "sort", "-precio").unwrap(),
            "https://tienda.test/productos/?sort=-precio"
        );
    }

    #[test]
    fn test_blank_value_removes_param() {
        assert_eq!(
            sorted_url("https://tienda.test/productos/?sort=precio", "sort", "  ").unwrap(),
            "https://tienda.test/productos/"
        );
        assert_eq!(
            sorted_url("https://tienda.test/productos/?q=mouse&sort=precio", "sort", "").unwrap(),
            "https://tienda.test/productos/?q=mouse"
        );
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(matches!(sorted_url("/productos/", "sort", "precio"), Err(CartError::InvalidInput(_))));
    }

    #[test]
    fn test_apply_navigates_and_marks_grid() {
        let h = Harness::new();
        h.dom.add(".products-grid", "");
        h.navigator.set_current("https://tienda.test/productos/?page=3");
        let sort = SortController::new(&h.ctx);

        let target = sort.apply("precio").unwrap();

        assert_eq!(target, "https://tienda.test/productos/?page=3&sort=precio");
        assert_eq!(h.navigator.visited(), vec![target]);
        assert!(h.dom.has_class(".products-grid", SORTING_CLASS));
        assert_eq!(h.notifier.kinds(), vec![ToastKind::Info]);
    }
}
