//! Terminal front end for the inventory service.
//!
//! Each subcommand drives one of the core screen state machines against a
//! live backend until no request is pending, then prints the result or the
//! screen's error message.

mod transport;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use inventory_core::{
    run, Field, FormPhase, FormState, InventoryClient, ListState, Product, ProductId, ProductType,
    CURRENCY,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "inventory", about = "Manage inventory products from the terminal", version)]
struct Cli {
    #[arg(
        long,
        env = "INVENTORY_API_URL",
        value_name = "URL",
        default_value = "http://localhost:3000",
        global = true,
        help = "Base URL of the inventory API"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every product
    List,
    /// Search products by name
    Search { query: String },
    /// Show a single product
    Show { id: ProductId },
    /// Add a new product
    Add(ProductArgs),
    /// Update an existing product; omitted fields keep their current value
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product and print the remaining list
    Delete { id: ProductId },
    /// Print the accepted product types
    Types,
}

#[derive(Args, Debug, Default)]
struct ProductArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    product_type: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long, value_name = "PRICE")]
    price: Option<String>,
}

impl ProductArgs {
    fn apply(self, form: &mut FormState) {
        let fields = [
            (Field::ProductName, self.name),
            (Field::Description, self.description),
            (Field::ProductType, self.product_type),
            (Field::Quantity, self.quantity),
            (Field::UnitPrice, self.price),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = InventoryClient::new(&cli.base_url);
    let transport = UreqTransport::new();
    debug!(base_url = client.base_url(), command = ?cli.command, "starting");

    match cli.command {
        Command::List => {
            let mut list = ListState::new(client);
            let ticket = list.mount();
            run(&mut list, &transport, Some(ticket));
            finish_list(&list)
        }
        Command::Search { query } => {
            let mut list = ListState::new(client);
            let ticket = list.mount();
            run(&mut list, &transport, Some(ticket));
            if let Some(err) = list.error() {
                bail!("{err}");
            }
            let ticket = list.submit_search(&query);
            run(&mut list, &transport, ticket);
            if list.no_matches() {
                println!("No matching products for \"{}\".", list.query());
                return Ok(());
            }
            finish_list(&list)
        }
        Command::Show { id } => {
            let product = client
                .get_by_id(&transport, id)
                .map_err(|e| anyhow::anyhow!(e.user_message("Product not found.")))?;
            print_product(&product);
            Ok(())
        }
        Command::Add(fields) => {
            let mut form = FormState::add(client);
            fields.apply(&mut form);
            let ticket = form.submit();
            run(&mut form, &transport, ticket);
            finish_form(&form, "Added")
        }
        Command::Update { id, fields } => {
            let (mut form, ticket) = FormState::update(client, id);
            run(&mut form, &transport, Some(ticket));
            if form.phase() == FormPhase::NotFound {
                bail!("{}", form.error().unwrap_or("Product not found."));
            }
            fields.apply(&mut form);
            let ticket = form.submit();
            run(&mut form, &transport, ticket);
            finish_form(&form, "Updated")
        }
        Command::Delete { id } => {
            let mut list = ListState::new(client);
            let ticket = list.mount();
            run(&mut list, &transport, Some(ticket));
            let ticket = list.delete(id);
            run(&mut list, &transport, Some(ticket));
            if list.error().is_none() {
                println!("Deleted product {id}.");
            }
            finish_list(&list)
        }
        Command::Types => {
            for name in ProductType::names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn finish_list(list: &ListState) -> Result<()> {
    if let Some(err) = list.error() {
        bail!("{err}");
    }
    if list.filtered().is_empty() {
        println!("No products available.");
    }
    for product in list.filtered() {
        print_product(product);
    }
    Ok(())
}

fn finish_form(form: &FormState, verb: &str) -> Result<()> {
    if form.navigation().is_none() {
        bail!("{}", form.error().unwrap_or("Request did not complete."));
    }
    if let Some(product) = form.saved() {
        println!("{verb} product {}.", product.id);
        print_product(product);
    }
    Ok(())
}

fn print_product(p: &Product) {
    println!(
        "#{:<4} {:<28} {:<12} qty {:>6}  {:>10.2} {CURRENCY}",
        p.id.to_string(),
        p.product_name,
        p.product_type.to_string(),
        p.quantity,
        p.unit_price,
    );
    println!("      {}", p.description);
}
