//! Plain-text rendering of items, pages and errors.

use std::fmt::Write;

use item_admin_core::{FieldErrorMap, HookError, Item, ItemList};

pub fn item_table(list: &ItemList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6}  {:<50}  {:>10}  DESCRIPTION", "ID", "NAME", "PRICE");
    for item in list.items() {
        let _ = writeln!(
            out,
            "{:>6}  {:<50}  {:>10.2}  {}",
            item.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            item.name,
            item.price,
            item.description
        );
    }
    if list.items().is_empty() {
        let _ = writeln!(out, "(no items)");
    }
    let _ = write!(
        out,
        "page {} of {} ({} items)",
        list.page(),
        list.total_pages(),
        list.total_count()
    );
    out
}

pub fn item_detail(item: &Item) -> String {
    let id = item.id.map(|id| id.to_string()).unwrap_or_else(|| "draft".to_string());
    format!(
        "id:          {id}\nname:        {}\ndescription: {}\nprice:       {:.2}",
        item.name, item.description, item.price
    )
}

pub fn field_errors(errors: &FieldErrorMap) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn hook_error(error: &HookError) -> String {
    match error {
        HookError::FieldErrors(errors) => format!("validation failed:\n{}", field_errors(errors)),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: Some(3),
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: 12.5,
        }
    }

    #[test]
    fn detail_formats_price_with_two_decimals() {
        let out = item_detail(&item());
        assert!(out.contains("id:          3"));
        assert!(out.contains("price:       12.50"));
    }

    #[test]
    fn empty_table_says_so() {
        let out = item_table(&ItemList::default());
        assert!(out.contains("(no items)"));
        assert!(out.ends_with("page 1 of 0 (0 items)"));
    }

    #[test]
    fn field_errors_one_per_line() {
        let errors = FieldErrorMap::from_iter([("name", "Name is required"), ("price", "bad")]);
        assert_eq!(
            field_errors(&errors),
            "  name: Name is required\n  price: bad"
        );
        assert!(hook_error(&HookError::FieldErrors(errors)).starts_with("validation failed:"));
        assert_eq!(hook_error(&HookError::NotFound), "Item not found");
    }
}
