use std::{env, io, process, str::FromStr};

use resale_core::{
    config::ConfigManager,
    core::{
        services::{DeleteScope, MigrationOutcome, SkipReason},
        InventoryManager,
    },
    domain::Displayable,
    init,
    storage::ItemFilter,
    utils::build_info,
};
use uuid::Uuid;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| usage_exit());

    if command == "version" {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let config = ConfigManager::new()?.load()?;
    let mut manager = InventoryManager::open(config)?;
    let migration = manager.migrate_legacy();

    match command.as_str() {
        "migrate" => match migration? {
            MigrationOutcome::Migrated { items, tags } => {
                println!("Migrated {items} item(s) and {tags} tag(s)");
            }
            MigrationOutcome::Skipped(SkipReason::AlreadyMigrated) => {
                println!("Legacy data was already migrated");
            }
            MigrationOutcome::Skipped(SkipReason::NoLegacyData) => {
                println!("No legacy data found");
            }
        },
        "stats" => {
            let summary = manager.summary()?;
            println!("Total profit:      {:.2}", summary.total_profit);
            println!("Estimated profit:  {:.2}", summary.estimated_profit);
            println!("Inventory value:   {:.2}", summary.inventory_value);
            println!("Investment:        {:.2}", summary.investment);
            println!("Units in stock:    {}", summary.inventory_units);
            println!("Sold records:      {}", summary.sold_count);
            println!("Sold value:        {:.2}", summary.sold_value);
        }
        "list" => {
            let filter = match args.next().as_deref() {
                None | Some("all") => ItemFilter::All,
                Some("inventory") => ItemFilter::Inventory,
                Some("sold") => ItemFilter::Sold,
                Some(_) => usage_exit(),
            };
            for item in manager.items(filter)? {
                println!("{}  {}", item.id, item.display_label());
            }
        }
        "add" => {
            let title = args.next().unwrap_or_else(|| usage_exit());
            let quantity: u32 = parse_arg(args.next())?;
            let purchase_price: f64 = parse_arg(args.next())?;
            let listed_price: f64 = parse_arg(args.next())?;
            let input = manager.new_item(title, quantity, purchase_price, listed_price);
            let item = manager.add_item(input)?;
            println!("{}", item.id);
        }
        "sell" => {
            let item_id: Uuid = parse_arg(args.next())?;
            let quantity: u32 = parse_arg(args.next())?;
            let sale_price: f64 = parse_arg(args.next())?;
            let mut request = manager.sale_request(quantity, sale_price);
            if let Some(fee) = args.next() {
                request.platform_fee = fee.parse()?;
            }
            if let Some(other) = args.next() {
                request.other_fees = other.parse()?;
            }
            let outcome = manager.sell(item_id, request)?;
            println!("Recorded sale {}", outcome.sold.id);
            match outcome.remaining {
                Some(remaining) => println!("{} unit(s) left", remaining.quantity),
                None => println!("Sold out; item removed"),
            }
        }
        "delete" => {
            let scope: DeleteScope = parse_arg(args.next())?;
            let report = manager.delete(scope)?;
            println!(
                "Deleted {} item(s) and {} tag(s)",
                report.items_removed, report.tags_removed
            );
        }
        "export" => {
            let filter = match args.next().as_deref() {
                Some("inventory") => ItemFilter::Inventory,
                Some("sold") => ItemFilter::Sold,
                _ => usage_exit(),
            };
            manager.export(filter, io::stdout().lock())?;
        }
        _ => usage_exit(),
    }

    Ok(())
}

fn parse_arg<T>(value: Option<String>) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
{
    let value = value.unwrap_or_else(|| usage_exit());
    Ok(value.parse::<T>()?)
}

fn usage_exit() -> ! {
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Usage: resale_core_cli <command>\n\
         Commands:\n  \
         stats\n  \
         list [all|inventory|sold]\n  \
         add <title> <quantity> <purchase price> <listed price>\n  \
         sell <item id> <quantity> <price> [platform fee] [other fees]\n  \
         delete <inventory|sold|tags|everything>\n  \
         export <inventory|sold>\n  \
         migrate\n  \
         version"
    );
}
