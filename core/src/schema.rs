//! Client-side validation and coercion of item form input.
//!
//! `validate_item` is the one policy the workflows use: the description is
//! optional and price is coerced from text or number, matching the server's
//! create contract. The older form rule set (name of at least 3 characters,
//! description of at least 10, price in `ddddd.dd` shape) survives as the
//! deprecated `LegacyItemSchema` and is not wired into any hook.

use serde::{Deserialize, Serialize};

use crate::field_errors::FieldErrorMap;
use crate::types::{Item, ItemPayload};

pub const NAME_MAX_CHARS: usize = 50;
pub const PRICE_MAX: f64 = 99_999.99;
pub const PRICE_MAX_FRACTION_DIGITS: usize = 2;

const LEGACY_NAME_MIN_CHARS: usize = 3;
const LEGACY_DESCRIPTION_MIN_CHARS: usize = 10;

/// Price as entered: form text or an already numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

/// Raw, unvalidated form input for creating or editing an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: PriceInput,
}

impl ItemForm {
    pub fn new(name: impl Into<String>, description: Option<&str>, price: impl Into<PriceInput>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            price: price.into(),
        }
    }
}

/// Prefill an edit form from a fetched item.
impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: Some(item.description.clone()),
            price: PriceInput::Number(item.price),
        }
    }
}

/// The older form rule set. Kept for reference while the product settles
/// which rules it wants; nothing in the crate validates with it.
#[deprecated(note = "use `validate_item`; the workflows validate with the standard rules")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyItemSchema;

#[allow(deprecated)]
impl LegacyItemSchema {
    pub fn validate(&self, form: &ItemForm) -> Result<ItemPayload, FieldErrorMap> {
        validate_item_legacy(form)
    }
}

/// Validate and coerce form input.
///
/// Either every field passes and a typed payload is returned, or one message
/// per failing field is reported and nothing is passed on.
pub fn validate_item(form: &ItemForm) -> Result<ItemPayload, FieldErrorMap> {
    let mut errors = FieldErrorMap::new();

    let name_len = form.name.trim().chars().count();
    if name_len == 0 {
        errors.add("name", "Name is required");
    } else if name_len > NAME_MAX_CHARS {
        errors.add("name", "Name cannot exceed 50 characters");
    }

    let price = match coerce_price(&form.price) {
        Some(value) => check_price(value, &mut errors),
        None => {
            errors.add("price", "Price must be a number");
            None
        }
    };

    match price {
        Some(price) if errors.is_empty() => Ok(ItemPayload {
            name: form.name.clone(),
            description: form.description.clone().unwrap_or_default(),
            price,
        }),
        _ => Err(errors),
    }
}

/// Numeric prices are checked in their shortest decimal rendering, so a
/// form prefilled from a stored item passes the `ddddd.dd` shape.
fn validate_item_legacy(form: &ItemForm) -> Result<ItemPayload, FieldErrorMap> {
    let mut errors = FieldErrorMap::new();

    let name_len = form.name.chars().count();
    if name_len < LEGACY_NAME_MIN_CHARS {
        errors.add("name", "Name must be at least 3 characters");
    } else if name_len > NAME_MAX_CHARS {
        errors.add("name", "Name must be less than 50 characters");
    }

    let description = form.description.clone().unwrap_or_default();
    if description.chars().count() < LEGACY_DESCRIPTION_MIN_CHARS {
        errors.add("description", "Description must be at least 10 characters");
    }

    let text = match &form.price {
        PriceInput::Text(text) => text.clone(),
        PriceInput::Number(n) if n.is_finite() => n.to_string(),
        PriceInput::Number(_) => String::new(),
    };
    let price = if is_price_text(&text) {
        text.parse::<f64>().ok()
    } else {
        None
    };
    let price = match price {
        Some(value) if value > PRICE_MAX => {
            errors.add("price", "Price must be less than or equal to 99999.99");
            None
        }
        Some(value) => Some(value),
        None => {
            errors.add("price", "Price can only be from 0 to 99999.99");
            None
        }
    };

    match price {
        Some(price) if errors.is_empty() => Ok(ItemPayload {
            name: form.name.clone(),
            description,
            price,
        }),
        _ => Err(errors),
    }
}

/// Number coercion: text is trimmed and parsed; blank or non-finite is `None`.
fn coerce_price(input: &PriceInput) -> Option<f64> {
    let value = match input {
        PriceInput::Number(n) => *n,
        PriceInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

fn check_price(value: f64, errors: &mut FieldErrorMap) -> Option<f64> {
    if value < 0.0 {
        errors.add("price", "Price must be a positive number");
        None
    } else if value > PRICE_MAX {
        errors.add("price", "Price must not exceed 99999.99");
        None
    } else if fraction_digits(value) > PRICE_MAX_FRACTION_DIGITS {
        errors.add("price", "Price must be in the format 0.00");
        None
    } else {
        Some(value)
    }
}

/// Digits after the point in the shortest decimal rendering of `value`.
fn fraction_digits(value: f64) -> usize {
    let rendered = value.to_string();
    rendered
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

/// `^\d{1,5}(\.\d{1,2})?$`
fn is_price_text(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    digits(whole, 1, 5) && fraction.map_or(true, |f| digits(f, 1, 2))
}
