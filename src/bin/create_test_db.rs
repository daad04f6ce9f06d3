use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use candy_shop_rs::{
    CategoryId, EscapedText, NewCategory, NewItem, Price, create_category, create_item,
    initialize_db,
};

/// A utility for creating a sample candy shop database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CATEGORIES: [(&str, &str); 3] = [
    ("Chocolate", "Delicious chocolate candies"),
    ("Gummies", "Chewy and fruity gummy candies"),
    ("Hard Candies", "Classic hard candies"),
];

/// Name, description, price in cents, amount and the index of the item's
/// category in [CATEGORIES].
const ITEMS: [(&str, &str, i64, u32, usize); 4] = [
    (
        "Milk Chocolate Bar",
        "A classic milk chocolate bar",
        299,
        50,
        0,
    ),
    (
        "Dark Chocolate Truffles",
        "Rich and decadent chocolate truffles",
        499,
        25,
        0,
    ),
    (
        "Sour Gummy Worms",
        "Tangy and chewy gummy worms",
        199,
        75,
        1,
    ),
    (
        "Cherry Lollipops",
        "Hard candy lollipops in cherry flavor",
        99,
        100,
        2,
    ),
];

/// Create a database populated with sample categories and items.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'candy_shop.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let mut category_ids: Vec<CategoryId> = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = create_category(
            NewCategory {
                name: EscapedText::sanitize(name),
                description: EscapedText::sanitize(description),
            },
            &conn,
        )?;
        category_ids.push(category.id);
    }

    println!("Creating items...");
    for (name, description, cents, amount, category_index) in ITEMS {
        create_item(
            NewItem {
                name: EscapedText::sanitize(name),
                description: EscapedText::sanitize(description),
                price: Price::from_cents(cents),
                amount,
            },
            &category_ids[category_index..=category_index],
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
