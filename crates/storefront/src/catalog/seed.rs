//! The built-in demo menu.

use rust_decimal::Decimal;
use tasty_eats_core::{ItemId, MenuItem};

const SEED: &[(&str, &str, i64, &str, &str)] = &[
    (
        "1",
        "Margherita Pizza",
        1299,
        "https://www.themealdb.com/images/media/meals/x0lk931587671540.jpg",
        "Pizza",
    ),
    (
        "2",
        "Chicken Tikka Masala",
        1499,
        "https://www.themealdb.com/images/media/meals/qptpvt1487339892.jpg",
        "Curry",
    ),
    (
        "3",
        "Caesar Salad",
        899,
        "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "Salad",
    ),
    (
        "4",
        "Beef Burger",
        1099,
        "https://www.themealdb.com/images/media/meals/urzj1d1587670726.jpg",
        "Burger",
    ),
    (
        "5",
        "Vegetable Pasta",
        1199,
        "https://www.themealdb.com/images/media/meals/uttuxy1487348128.jpg",
        "Pasta",
    ),
    (
        "6",
        "Sushi Rolls",
        1599,
        "https://www.themealdb.com/images/media/meals/g046bb1663013291.jpg",
        "Sushi",
    ),
];

/// The six dishes served by default.
pub fn menu() -> Vec<MenuItem> {
    SEED.iter()
        .map(|&(id, name, cents, image, category)| MenuItem {
            id: ItemId::new(id),
            name: name.to_owned(),
            price: Decimal::new(cents, 2),
            image: image.to_owned(),
            category: category.to_owned(),
            description: None,
        })
        .collect()
}
