use std::sync::Arc;

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::{debug, info};

use crate::{
    cli::args::Commands,
    models::{
        cart::{CartLineItem, CartState},
        catalog::Catalog,
        intent::Intent,
        product::ProductId,
    },
    services::{
        BuiltinCatalog, CartStore, CartStoreError, CatalogSource, Dispatch, Dispatcher,
        JsonFileCatalog,
    },
    utils::{
        formatting::{format_cart_footer, format_cart_table, format_catalog_table, CurrencyFormatter},
        Config,
    },
    views::{CartView, CatalogView},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    catalog: Arc<Catalog>,
    formatter: CurrencyFormatter,
}

impl CliApp {
    pub async fn new(config: &Config) -> Result<Self> {
        let source: Box<dyn CatalogSource> = match &config.catalog_path {
            Some(path) => Box::new(JsonFileCatalog::new(path)),
            None => Box::new(BuiltinCatalog),
        };

        let catalog = source.load().await.context("Failed to load catalog")?;
        info!("Catalog ready with {} products", catalog.len());

        Ok(Self::with_catalog(
            Arc::new(catalog),
            CurrencyFormatter::new(config.locale),
        ))
    }

    pub fn with_catalog(catalog: Arc<Catalog>, formatter: CurrencyFormatter) -> Self {
        Self { catalog, formatter }
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog => self.handle_catalog(),
            Commands::Cart { add } => self.handle_cart(add),
            Commands::Shop => self.handle_shop(),
        }
    }

    pub fn render_catalog<D: Dispatch>(&self, cart: &CartState, dispatch: &D) -> String {
        let view = CatalogView::new(cart, &self.formatter, dispatch);
        format_catalog_table(&view.render(self.catalog.products()))
    }

    pub fn render_cart<D: Dispatch>(&self, cart: &CartState, dispatch: &D) -> String {
        let model = CartView::new(cart, &self.formatter, dispatch).render();
        format!("{}\n{}", format_cart_table(&model), format_cart_footer(&model))
    }

    /// Replays one add-to-cart per id through a fresh store.
    pub fn fill_cart(&self, ids: &[u64]) -> (CartState, Vec<CartStoreError>) {
        let (mut store, dispatcher) = CartStore::new(self.catalog.clone());
        add_all(&dispatcher, ids);
        let rejected = store.process_pending();
        (store.state().clone(), rejected)
    }

    fn handle_catalog(&self) -> Result<()> {
        if self.catalog.is_empty() {
            println!("{} No products found", INFO);
            return Ok(());
        }

        let (_store, dispatcher) = CartStore::new(self.catalog.clone());
        println!("{} {}", INFO, style(format!("Found {} products", self.catalog.len())).bold());
        println!("{}", self.render_catalog(&CartState::new(), &dispatcher));
        Ok(())
    }

    fn handle_cart(&self, ids: Vec<u64>) -> Result<()> {
        let (mut store, dispatcher) = CartStore::new(self.catalog.clone());
        add_all(&dispatcher, &ids);
        self.settle(&mut store);

        println!("{} {}", CART, style("Cart").bold().cyan());
        println!("{}", self.render_cart(store.state(), &dispatcher));
        Ok(())
    }

    fn handle_shop(&self) -> Result<()> {
        let (mut store, dispatcher) = CartStore::new(self.catalog.clone());
        let theme = ColorfulTheme::default();

        loop {
            let prompt = format!("Storefront ({} items in cart)", store.state().unit_count());
            let choice = Select::with_theme(&theme)
                .with_prompt(prompt)
                .items(&["Browse catalog", "View cart", "Quit"])
                .default(0)
                .interact_opt()?;

            match choice {
                Some(0) => self.browse_catalog(&mut store, &dispatcher, &theme)?,
                Some(1) => self.manage_cart(&mut store, &dispatcher, &theme)?,
                _ => break,
            }
        }

        info!("Shopping session ended with {} lines in cart", store.state().len());
        Ok(())
    }

    fn browse_catalog(&self, store: &mut CartStore, dispatcher: &Dispatcher, theme: &ColorfulTheme) -> Result<()> {
        loop {
            {
                let view = CatalogView::new(store.state(), &self.formatter, dispatcher);
                let model = view.render(self.catalog.products());
                println!("{}", format_catalog_table(&model));

                let mut items: Vec<String> = model
                    .entries
                    .iter()
                    .map(|entry| format!("Add {} ({})", entry.title, entry.price_formatted))
                    .collect();
                items.push("Back".to_string());

                let selection = Select::with_theme(theme)
                    .with_prompt("Add to cart")
                    .items(&items)
                    .default(0)
                    .interact_opt()?;

                match selection {
                    Some(index) if index < model.entries.len() => {
                        view.add_to_cart(&self.catalog.products()[index]);
                    }
                    _ => return Ok(()),
                }
            }

            if self.settle(store) {
                println!("{} Added to cart", CHECKMARK);
            }
        }
    }

    fn manage_cart(&self, store: &mut CartStore, dispatcher: &Dispatcher, theme: &ColorfulTheme) -> Result<()> {
        loop {
            {
                let view = CartView::new(store.state(), &self.formatter, dispatcher);
                let model = view.render();
                println!("{}", format_cart_table(&model));
                println!("{}", format_cart_footer(&model));

                if model.rows.is_empty() {
                    println!("{} Your cart is empty", INFO);
                }

                let mut items: Vec<String> = model
                    .rows
                    .iter()
                    .map(|row| format!("{} x{} ({})", row.item.product.title, row.item.amount, row.subtotal))
                    .collect();
                items.push(model.checkout_label.to_string());
                items.push("Back".to_string());

                let selection = Select::with_theme(theme)
                    .with_prompt("Cart")
                    .items(&items)
                    .default(0)
                    .interact_opt()?;

                let item: &CartLineItem = match selection {
                    Some(index) if index < model.rows.len() => &model.rows[index].item,
                    Some(index) if index == model.rows.len() => {
                        println!("{} Checkout is not available yet", WARNING);
                        continue;
                    }
                    _ => return Ok(()),
                };

                let action = Select::with_theme(theme)
                    .with_prompt(item.product.title.as_str())
                    .items(&["Increment", "Decrement", "Remove", "Back"])
                    .default(0)
                    .interact_opt()?;

                match action {
                    Some(0) => view.increment(item),
                    Some(1) => view.decrement(item),
                    Some(2) => view.remove(item),
                    _ => continue,
                }
            }

            self.settle(store);
        }
    }

    /// Applies queued intents and reports rejections. Returns true when
    /// every intent was accepted.
    fn settle(&self, store: &mut CartStore) -> bool {
        let rejected = store.process_pending();
        for e in &rejected {
            println!("{} {}", CROSS, style(e).red());
        }
        debug!("Cart now holds {} units", store.state().unit_count());
        rejected.is_empty()
    }
}

fn add_all<D: Dispatch>(dispatch: &D, ids: &[u64]) {
    for id in ids {
        dispatch.dispatch(Intent::AddToCart {
            product_id: ProductId(*id),
        });
    }
}
