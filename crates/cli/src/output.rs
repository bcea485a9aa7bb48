//! Plain-text rendering of menu items, carts, and notifications.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use tasty_eats_core::{CartTotals, Category, MenuItem, Notification, NotificationLevel, Price};
use tasty_eats_storefront::cart::CartStore;

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    if !text.is_empty() {
        println!("{}", text.trim_end());
    }
}

fn money(amount: Decimal) -> String {
    Price::usd(amount).to_string()
}

/// One row per item: id, name, price, category.
pub fn menu_table(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "No menu items found.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>8}  {}",
            item.id.as_str(),
            item.name,
            money(item.price),
            item.category
        );
    }
    out
}

/// Full details of one item.
pub fn menu_item(item: &MenuItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", item.name, money(item.price));
    let _ = writeln!(out, "  id:       {}", item.id);
    let _ = writeln!(out, "  category: {}", item.category);
    if let Some(description) = &item.description {
        let _ = writeln!(out, "  about:    {description}");
    }
    let _ = writeln!(out, "  image:    {}", item.image);
    out
}

pub fn categories(categories: &[Category]) -> String {
    categories
        .iter()
        .fold(String::new(), |mut out, category| {
            let _ = writeln!(out, "{:>4}  {}", category.id.as_str(), category.label);
            out
        })
}

pub fn notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
    };
    format!("[{tag}] {}\n", notification.message)
}

/// Cart lines followed by rounded totals.
pub fn cart(store: &CartStore) -> String {
    if store.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in store.lines() {
        let _ = writeln!(
            out,
            "{:>3} x {:<24} {:>8}",
            line.quantity,
            line.name,
            money(line.line_total())
        );
    }
    out.push_str(&totals(&store.totals()));
    out
}

fn totals(totals: &CartTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:-<38}", "");
    let _ = writeln!(out, "{:<29} {:>8}", "Subtotal", money(totals.subtotal));
    let _ = writeln!(out, "{:<29} {:>8}", "Tax (8.25%)", money(totals.tax));
    let _ = writeln!(out, "{:<29} {:>8}", "Delivery", money(totals.delivery_fee));
    let _ = writeln!(out, "{:<29} {:>8}", "Total", money(totals.total));
    let _ = writeln!(out, "{} item(s)", totals.total_items);
    out
}
