//! Confirmation email rendering.

use std::fmt::Write as _;

use crate::notifications::models::PurchaseEmail;

/// Subject line for a purchase confirmation.
#[must_use]
pub fn purchase_subject(order_id: i64) -> String {
    format!("¡Compra exitosa! Orden #{order_id}")
}

/// HTML body: one row per item, engraving line when present, grand total.
#[must_use]
pub fn purchase_html(email: &PurchaseEmail) -> String {
    let mut rows = String::new();

    for item in &email.items {
        let line_price = item.unit_price.saturating_add(item.engraving_surcharge);

        let engraving = item
            .engraving_text
            .as_deref()
            .map(|text| {
                format!(
                    "<p style=\"margin: 2px 0 0; font-size: 11px;\">Grabado: \"{text}\"</p>"
                )
            })
            .unwrap_or_default();

        let image = item
            .image_url
            .as_deref()
            .map(|url| format!("<img src=\"{url}\" width=\"50\" height=\"50\" alt=\"\" />"))
            .unwrap_or_default();

        let _ = write!(
            rows,
            "<tr>\
               <td style=\"padding: 10px;\">{image}</td>\
               <td style=\"padding: 10px;\">\
                 <p style=\"margin: 0; font-weight: bold;\">{name}</p>\
                 <p style=\"margin: 5px 0 0; font-size: 12px;\">Cantidad: {quantity}</p>\
                 {engraving}\
               </td>\
               <td style=\"padding: 10px; text-align: right;\">${line_price}</td>\
             </tr>",
            name = item.name,
            quantity = item.quantity,
        );
    }

    format!(
        "<div style=\"font-family: Helvetica, Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h1>¡Gracias por tu compra!</h1>\
           <p>Tu pedido #{order_id} ha sido confirmado.</p>\
           <table style=\"width: 100%; border-collapse: collapse;\">{rows}</table>\
           <p style=\"text-align: right; font-weight: bold;\">Total: ${total}</p>\
         </div>",
        order_id = email.order_id,
        total = email.total,
    )
}
