//! SmartBite CLI - drives a storefront session from the command line.
//!
//! The CLI plays the role of the application shell: it owns the state
//! container, applies the redirects operations return, and prints the
//! fragments the presenters render. Both stores are file-backed so the
//! session survives between invocations the way a browser tab survives
//! page loads.
//!
//! # Usage
//!
//! ```bash
//! # Page-load auth check (applies gating redirects)
//! smartbite check --path cart.html
//!
//! # Log in; any non-empty pair succeeds
//! smartbite login -u alice -p secret --remember
//!
//! # Cart operations
//! smartbite cart add --id p1 --name Pizza --price 199.00 --image img.png
//! smartbite cart qty --id p1 --delta -1
//! smartbite cart remove --id p1
//! smartbite cart show
//!
//! # Render the navigation fragment for a page
//! smartbite nav --path menu.html
//!
//! # Log out (clears the cart too)
//! smartbite logout
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use askama::Template;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;

use smartbite_core::ItemId;
use smartbite_storefront::config::StorefrontConfig;
use smartbite_storefront::models::Cart;
use smartbite_storefront::presenters::cart::{CartCountTemplate, CartItemsTemplate, CartView};
use smartbite_storefront::presenters::nav::{NavTemplate, NavView};
use smartbite_storefront::services::auth::{AuthService, LoginForm};
use smartbite_storefront::services::cart::{AddOutcome, CartService};
use smartbite_storefront::state::AppState;
use smartbite_storefront::store::FileStore;

#[derive(Parser)]
#[command(name = "smartbite")]
#[command(author, version, about = "SmartBite storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the page-load auth check for a path
    Check {
        /// Current page path
        #[arg(short, long, default_value = "index.html")]
        path: String,
    },
    /// Log in (any non-empty pair succeeds)
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (not verified, never persisted)
        #[arg(short, long)]
        password: String,

        /// Persist the remember-me flag
        #[arg(long)]
        remember: bool,
    },
    /// Log out and clear the cart
    Logout,
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Render the navigation fragment for a path
    Nav {
        /// Current page path
        #[arg(short, long, default_value = "index.html")]
        path: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of an item
    Add {
        /// Item identifier
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,

        /// Image URL or relative path
        #[arg(long)]
        image: String,

        /// Page the add was clicked on (stored for the post-login redirect)
        #[arg(long, default_value = "menu.html")]
        path: String,
    },
    /// Apply a signed quantity delta to an item
    Qty {
        /// Item identifier
        #[arg(long)]
        id: String,

        /// Signed delta, typically 1 or -1
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove an item
    Remove {
        /// Item identifier
        #[arg(long)]
        id: String,
    },
    /// Render the cart fragment and badge
    Show,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = open_state(config);

    state.events().subscribe(|event| {
        tracing::debug!(authenticated = event.authenticated, "auth state changed");
    });

    match cli.command {
        Commands::Check { path } => check(&state, &path)?,
        Commands::Login {
            username,
            password,
            remember,
        } => login(&state, username, password, remember)?,
        Commands::Logout => {
            let redirect = AuthService::new(&state).logout();
            println!("-> {}", redirect.target);
        }
        Commands::Cart { action } => cart(&state, action)?,
        Commands::Nav { path } => {
            let authenticated = AuthService::new(&state).is_authenticated();
            let nav = NavTemplate {
                nav: NavView::build(authenticated, &path, state.config()),
            };
            println!("{}", nav.render()?);
        }
    }

    Ok(())
}

/// Build application state over file-backed stores.
///
/// The persistent store lives at `SMARTBITE_STORE_PATH` (default
/// `smartbite-store.json`); the session store sits next to it so the
/// redirect target survives between invocations like a browser tab's
/// session storage.
fn open_state(mut config: StorefrontConfig) -> AppState {
    let store_path = config
        .store_path
        .take()
        .unwrap_or_else(|| PathBuf::from("smartbite-store.json"));
    let session_path = store_path.with_extension("session.json");

    AppState::with_stores(
        config,
        Box::new(FileStore::open(store_path)),
        Box::new(FileStore::open(session_path)),
    )
}

fn check(state: &AppState, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let check = AuthService::new(state).check(path);
    println!(
        "authenticated: {}",
        if check.authenticated { "yes" } else { "no" }
    );
    if let Some(redirect) = check.redirect {
        println!("-> {}", redirect.target);
    }

    let nav = NavTemplate {
        nav: NavView::build(check.authenticated, path, state.config()),
    };
    println!("{}", nav.render()?);
    Ok(())
}

fn login(
    state: &AppState,
    username: String,
    password: String,
    remember: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = LoginForm {
        username,
        password: SecretString::from(password),
        remember_me: remember,
    };

    match AuthService::new(state).login(&form) {
        Ok(outcome) => {
            println!("{}", outcome.message);
            // The scheduled post-login redirect
            std::thread::sleep(outcome.redirect.delay);
            println!("-> {}", outcome.redirect.target);
        }
        // Validation errors are recovered locally and shown inline
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn cart(state: &AppState, action: CartAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = CartService::new(state);

    match action {
        CartAction::Add {
            id,
            name,
            price,
            image,
            path,
        } => match service.add_item(&id, &name, price, &image, &path)? {
            AddOutcome::Added(cart) => render_cart(state, &cart)?,
            AddOutcome::LoginRequired(redirect) => {
                println!("Please log in to add items to your cart");
                println!("-> {}", redirect.target);
            }
        },
        CartAction::Qty { id, delta } => {
            let id = ItemId::parse(&id)?;
            let cart = service.update_quantity(&id, delta);
            render_cart(state, &cart)?;
        }
        CartAction::Remove { id } => {
            let id = ItemId::parse(&id)?;
            let cart = service.remove_item(&id);
            render_cart(state, &cart)?;
        }
        CartAction::Show => {
            let cart = service.cart();
            render_cart(state, &cart)?;
        }
    }

    Ok(())
}

fn render_cart(state: &AppState, cart: &Cart) -> Result<(), Box<dyn std::error::Error>> {
    let items = CartItemsTemplate {
        cart: CartView::build(cart, state.config().tax_rate),
    };
    let badge = CartCountTemplate {
        count: cart.item_count(),
    };
    println!("{}", items.render()?);
    println!("{}", badge.render()?);
    Ok(())
}
