//! Command implementations. Each one is a thin view over a core hook.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use item_admin_core::{
    parse_item_id, AuthGate, CreateItem, DeleteItem, Gateway, ItemClient, ItemFetch, ItemForm,
    ItemList, PriceInput, Route, UpdateItem,
};

use crate::args::Command;
use crate::config::Config;
use crate::navigator::TerminalNavigator;
use crate::render;
use crate::token_file::FileTokenStore;
use crate::transport::UreqTransport;

type ConsoleGateway = Gateway<UreqTransport, FileTokenStore, TerminalNavigator>;

pub fn gateway(config: &Config) -> ConsoleGateway {
    Gateway::new(
        ItemClient::new(&config.api_url),
        UreqTransport::new(),
        FileTokenStore::new(&config.token_file),
        TerminalNavigator::default(),
    )
}

/// Run one command. Returns whether it succeeded.
pub fn execute(gw: &ConsoleGateway, config: &Config, command: Command) -> Result<bool> {
    let protected = !matches!(command, Command::Login { .. } | Command::Logout);
    if protected && !AuthGate::guard(gw.tokens(), gw.navigator()) {
        eprintln!("Not logged in. Run `item-admin login` first.");
        return Ok(false);
    }

    let ok = match command {
        Command::Login { username, password } => login(gw, &username, &password),
        Command::Logout => {
            AuthGate::logout(gw.tokens(), gw.navigator());
            println!("Logged out.");
            true
        }
        Command::List { page, page_size } => {
            list(gw, page, page_size.unwrap_or(config.page_size))
        }
        Command::Show { id } => show(gw, &id),
        Command::Create {
            name,
            description,
            price,
        } => create(gw, ItemForm {
            name,
            description,
            price: PriceInput::Text(price),
        }),
        Command::Update {
            id,
            name,
            description,
            price,
        } => update(gw, &id, name, description, price),
        Command::Delete { id, yes } => {
            let go_ahead = yes || confirm(&format!("Delete item {id}? [y/N] "))?;
            if go_ahead {
                delete(gw, &id)
            } else {
                println!("Cancelled.");
                true
            }
        }
    };

    if protected && gw.navigator().last() == Some(Route::Login) {
        eprintln!("Session expired. Run `item-admin login` to sign in again.");
    }
    Ok(ok)
}

fn login(gw: &ConsoleGateway, username: &str, password: &str) -> bool {
    match AuthGate::login(gw, username, password) {
        Ok(()) => {
            println!("Logged in as {username}.");
            true
        }
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}

fn list(gw: &ConsoleGateway, page: u32, page_size: u32) -> bool {
    let mut items = ItemList::new(1, page_size);
    let ok = if page == 1 {
        items.reload(gw)
    } else {
        items.set_page(gw, page)
    };
    match items.error() {
        Some(message) if !ok => {
            eprintln!("{message}");
            false
        }
        _ => {
            println!("{}", render::item_table(&items));
            true
        }
    }
}

fn show(gw: &ConsoleGateway, raw_id: &str) -> bool {
    let mut fetch = ItemFetch::new();
    if fetch.load(gw, parse_item_id(raw_id)) {
        if let Some(item) = fetch.item() {
            println!("{}", render::item_detail(item));
        }
        return true;
    }
    if let Some(error) = fetch.error() {
        eprintln!("{}", render::hook_error(error));
    }
    false
}

fn create(gw: &ConsoleGateway, form: ItemForm) -> bool {
    let mut hook = CreateItem::new();
    match hook.submit(gw, &form) {
        Some(item) => {
            println!("Item created successfully!\n{}", render::item_detail(&item));
            true
        }
        None => {
            if let Some(error) = hook.state().error() {
                eprintln!("{}", render::hook_error(error));
            }
            false
        }
    }
}

fn update(
    gw: &ConsoleGateway,
    raw_id: &str,
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
) -> bool {
    let id = parse_item_id(raw_id);
    let mut fetch = ItemFetch::new();
    if !fetch.load(gw, id) {
        if let Some(error) = fetch.error() {
            eprintln!("{}", render::hook_error(error));
        }
        return false;
    }
    let Some(current) = fetch.item() else {
        return false;
    };

    let mut form = ItemForm::from(current);
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = Some(description);
    }
    if let Some(price) = price {
        form.price = PriceInput::Text(price);
    }

    let mut hook = UpdateItem::new();
    match hook.submit(gw, id, &form) {
        Some(item) => {
            println!("Item updated successfully!\n{}", render::item_detail(&item));
            true
        }
        None => {
            if let Some(error) = hook.state().error() {
                eprintln!("{}", render::hook_error(error));
            }
            false
        }
    }
}

fn delete(gw: &ConsoleGateway, raw_id: &str) -> bool {
    let mut hook = DeleteItem::new();
    if hook.submit(gw, parse_item_id(raw_id)) {
        println!("Item deleted successfully!");
        return true;
    }
    if let Some(error) = hook.state().error() {
        eprintln!("{}", render::hook_error(error));
    }
    false
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("reading confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
