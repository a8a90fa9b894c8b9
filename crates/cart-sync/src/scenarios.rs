//! End-to-end flows through a fully wired context, the way a page drives
//! them: several controllers sharing one client, projector and panel.

use crate::add_to_cart::{AddOutcome, AddToCartController};
use crate::domain::{ProductId, ToastKind};
use crate::panel::{PanelState, LOAD_ERROR_MESSAGE};
use crate::panel_items::{ItemOutcome, PanelAction, PanelItemController};
use crate::test_support::{FakeControl, Harness, RenderedContent};

fn id(raw: &str) -> ProductId {
    ProductId::parse(raw).unwrap()
}

#[tokio::test]
async fn test_shopping_session() {
    let h = Harness::new();
    h.dom.add(".cart-badge", "0");
    h.dom.add("#cartPanelCount", "0");
    h.dom.add("#cartPanelTotal", "$0");
    let adds = AddToCartController::new(&h.ctx);
    let items = PanelItemController::new(&h.ctx);

    // grid add with the panel closed: no fragment fetch
    h.http.reply_json(200, r#"{"success": true, "message": "Agregado", "cart_total_items": 1, "cart_total_price": "10.00"}"#);
    let outcome = adds.quick_add(&id("7"), &FakeControl::new("Agregar")).await;
    assert!(matches!(outcome, AddOutcome::Added(_)));
    h.runtime.run_pending().await;
    assert_eq!(h.http.count("GET"), 0);
    assert_eq!(h.dom.texts("#cartPanelTotal"), vec!["$10.00"]);

    // open the panel; the fragment now has the row
    h.http.set_fragment(200, "<div class=\"cart-panel-item\">7</div>");
    h.panel.open();
    items.on_open_trigger();
    h.runtime.run_pending().await;
    assert_eq!(h.panel.state(), PanelState::Open);
    assert_eq!(h.http.count("GET"), 2);
    h.dom.add_row("7", "1", "$10.00 c/u", "$10.00");

    // increment
    h.http.reply_json(200, r#"{"success": true, "cart_total_items": 2, "cart_total_price": "20.00"}"#);
    let outcome = items.handle(PanelAction::Increment(id("7"))).await;
    assert!(matches!(outcome, ItemOutcome::Updated(_)));
    assert_eq!(h.dom.texts("#total7"), vec!["$20.00"]);
    assert_eq!(h.dom.texts(".cart-badge"), vec!["2"]);
    assert_eq!(h.dom.texts("#cartPanelTotal"), vec!["$20.00"]);
    // the item change does not publish; only adds notify the panel
    h.runtime.run_pending().await;
    assert_eq!(h.http.count("GET"), 2);

    // remove, confirmed
    h.http.reply_json(200, r#"{"success": true, "cart_total_items": 0, "cart_total_price": "0.00"}"#);
    h.http.set_fragment(200, "<div class=\"cart-panel-empty\">Vacío</div>");
    items.handle(PanelAction::Remove(id("7"))).await;
    h.runtime.run_pending().await;
    assert_eq!(h.dom.texts(".cart-badge"), vec!["0"]);
    assert_eq!(h.dom.content(), RenderedContent::Html("<div class=\"cart-panel-empty\">Vacío</div>".into()));

    assert_eq!(
        h.notifier.messages(),
        vec![
            (ToastKind::Success, "Agregado".to_string()),
            (ToastKind::Success, "Carrito actualizado".to_string()),
            (ToastKind::Success, "Producto eliminado del carrito".to_string()),
        ]
    );

    h.panel.close();
    assert!(!h.dom.scroll_locked());
}

#[tokio::test]
async fn test_add_with_open_panel_refreshes_it() {
    let h = Harness::new();
    h.panel.open();
    h.runtime.run_pending().await;
    h.http.clear_requests();

    h.http.reply_json(200, r#"{"success": true, "cart_total_items": 4}"#);
    h.http.set_fragment(200, "<div>four items</div>");
    AddToCartController::new(&h.ctx)
        .add_with_quantity(&id("3"), "4", &FakeControl::new("Agregar al carrito"))
        .await;
    h.runtime.run_pending().await;

    assert_eq!(h.http.count("POST"), 1);
    assert_eq!(h.http.count("GET"), 1);
    assert_eq!(h.dom.content(), RenderedContent::Html("<div>four items</div>".into()));
}

#[tokio::test]
async fn test_server_outage_leaves_retry_and_recovers() {
    let h = Harness::new();
    h.dom.add(".cart-badge", "2");
    h.http.set_fragment(200, "<div>two items</div>");
    h.panel.open();
    h.runtime.run_pending().await;

    h.dom.add_row("5", "2", "$3,50 c/u", "$7,00");
    h.http.reply_json(503, "Service Unavailable");
    h.http.set_fragment(500, "Internal Server Error");
    let items = PanelItemController::new(&h.ctx);
    let outcome = items.change_quantity(&id("5"), 1).await;

    assert!(matches!(outcome, ItemOutcome::Resynced(_)));
    assert_eq!(h.dom.content(), RenderedContent::Error(LOAD_ERROR_MESSAGE.into()));
    assert!(h.dom.texts("#quantity5").is_empty());
    assert_eq!(h.dom.texts(".cart-badge"), vec!["2"]);
    assert_eq!(h.notifier.messages(), vec![(ToastKind::Error, "Error HTTP: 503".to_string())]);
    assert!(h.panel.is_open());

    h.http.set_fragment(200, "<div>two items</div>");
    h.dom.click_retry();
    h.runtime.run_pending().await;
    assert_eq!(h.dom.content(), RenderedContent::Html("<div>two items</div>".into()));
}
