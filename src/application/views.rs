//! Rendered views - message text and keyboards shown to users

use crate::application::messaging::parser::Action;
use crate::domain::entities::{Cart, CartLine, Catalog, Order, Product, CURRENCY};
use crate::domain::traits::KeyboardButton;

pub const WELCOME: &str = "Добро пожаловать в Uludağ Market Bot! 🥤\n\n\
    ООО 'Serrada Uludağ Uzbekistan' предлагает продукцию Uludağ. \
    Продолжая, вы соглашаетесь с условиями публичной оферты.";
pub const CATALOG_HEADER: &str = "Добро пожаловать в Uludağ Market! 🥤\nВыберите продукт для добавления в корзину:";
pub const EMPTY_CART: &str = "Ваша корзина пуста. 🛒";
pub const CART_CLEARED: &str = "Корзина очищена! 🗑️";
pub const PRODUCT_NOT_FOUND: &str = "Ошибка: продукт не найден.";
pub const INVALID_QUANTITY: &str = "Ошибка: неверное количество.";
pub const ORDER_FAILED: &str = "Произошла ошибка при оформлении заказа. Попробуйте снова.";
pub const OPERATOR_NOT_NOTIFIED: &str = "Заказ оформлен, но не удалось уведомить админа.";
pub const ORDER_CONFIRMED: &str = "Заказ успешно оформлен! Спасибо за покупку! 🎉";

/// Quantities offered by the picker
pub const QUANTITY_CHOICES: [u32; 3] = [1, 2, 5];

/// A rendered outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Vec<Vec<KeyboardButton>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Vec<KeyboardButton>) -> Self {
        self.keyboard.push(row);
        self
    }
}

fn button(text: impl Into<String>, action: Action) -> KeyboardButton {
    KeyboardButton::new(text).with_callback(action.to_string())
}

fn back_to_catalog() -> Vec<KeyboardButton> {
    vec![button("Вернуться к каталогу 🔙", Action::Catalog)]
}

pub fn agreement_prompt() -> Reply {
    Reply::text(WELCOME).with_row(vec![button("Я согласен", Action::Agree)])
}

pub fn catalog(catalog: &Catalog) -> Reply {
    let reply = catalog.list_products().iter().fold(Reply::text(CATALOG_HEADER), |reply, p| {
        reply.with_row(vec![button(
            format!("{} - {} {}", p.name, p.price, CURRENCY),
            Action::SelectProduct(p.id),
        )])
    });
    reply.with_row(vec![button("Посмотреть корзину 🛒", Action::ShowCart)])
}

pub fn quantity_picker(product: &Product) -> Reply {
    let choices = QUANTITY_CHOICES
        .iter()
        .map(|&quantity| {
            button(
                quantity.to_string(),
                Action::ChooseQuantity { product_id: product.id, quantity },
            )
        })
        .collect();

    Reply::text(format!(
        "Вы выбрали: {}\nЦена: {} {}\n\nВыберите количество:",
        product.name, product.price, CURRENCY
    ))
    .with_row(choices)
    .with_row(back_to_catalog())
}

pub fn added_to_cart(name: &str, quantity: u32) -> Reply {
    Reply::text(format!("Добавлено в корзину: {} ({} шт.)", name, quantity))
}

fn push_lines(text: &mut String, lines: &[CartLine], total: u64) {
    for line in lines {
        text.push_str(&format!(
            "- {} ({} шт.) - {} {}\n",
            line.name,
            line.quantity,
            line.line_total(),
            CURRENCY
        ));
    }
    text.push_str(&format!("\nИтого: {} {}", total, CURRENCY));
}

/// Line-per-item breakdown plus total; an empty cart gets its own message
pub fn render_cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return EMPTY_CART.to_string();
    }
    let mut text = String::from("🛒 Ваша корзина:\n\n");
    push_lines(&mut text, cart.lines(), cart.total());
    text
}

pub fn cart(cart: &Cart) -> Reply {
    if cart.is_empty() {
        return Reply::text(EMPTY_CART);
    }
    Reply::text(render_cart_summary(cart))
        .with_row(vec![button("Оформить заказ ✅", Action::Checkout)])
        .with_row(vec![button("Очистить корзину 🗑️", Action::ClearCart)])
        .with_row(back_to_catalog())
}

/// Order summary addressed to the operator channel
pub fn operator_notification(order: &Order) -> String {
    let mut text = format!("🔔 Новый заказ от @{} (ID: {}):\n\n", order.username, order.user_id);
    push_lines(&mut text, &order.cart, order.total());
    text
}
