use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::macros::datetime;

use finance_tracker::{
    CategoryName, NewUser, PasswordHash, Transaction, TransactionKind, ValidatedPassword,
    create_category, create_default_categories, create_transaction, create_user, initialize_db,
};

/// A utility for creating a test database for the REST API server of finance_tracker.
///
/// The database contains the user "test@test.com" with the password "test".
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    let user = create_user(
        NewUser {
            email: EmailAddress::from_str("test@test.com")?,
            first_name: "Test".to_owned(),
            password_hash,
        },
        &conn,
    )?;

    println!("Creating categories...");

    let expense_categories = create_default_categories(user.id, &conn)?;
    let salary = create_category(
        CategoryName::new("Salary")?,
        TransactionKind::Income,
        user.id,
        &conn,
    )?;

    let category_id = |name: &str| {
        expense_categories
            .iter()
            .chain([&salary])
            .find(|category| category.name.as_ref() == name)
            .map(|category| category.id)
            .ok_or_else(|| format!("missing category {name}"))
    };

    println!("Creating transactions...");

    let transactions = [
        ("Rent", "1800.00", "Rent", datetime!(2025-04-01 08:00 UTC)),
        ("Groceries", "142.37", "Food", datetime!(2025-04-05 17:30 UTC)),
        ("Pay day", "4250.00", "Salary", datetime!(2025-04-15 09:00 UTC)),
        ("Power bill", "96.10", "Utilities", datetime!(2025-04-20 12:00 UTC)),
        ("Rent", "1800.00", "Rent", datetime!(2025-05-01 08:00 UTC)),
        ("Cinema", "32.00", "Entertainment", datetime!(2025-05-10 19:45 UTC)),
        ("Groceries", "168.92", "Food", datetime!(2025-05-12 18:10 UTC)),
        ("Pay day", "4250.00", "Salary", datetime!(2025-05-15 09:00 UTC)),
        ("Rent", "1800.00", "Rent", datetime!(2025-06-01 08:00 UTC)),
        ("Pay day", "4250.00", "Salary", datetime!(2025-06-15 09:00 UTC)),
        ("Concert tickets", "120.00", "Entertainment", datetime!(2025-06-21 20:00 UTC)),
    ];

    for (title, amount, category_name, date) in transactions {
        let kind = if category_name == "Salary" {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let transaction =
            Transaction::build(title, amount.parse()?, kind, category_id(category_name)?)
                .date(date);

        create_transaction(transaction, user.id, &conn)?;
    }

    println!("Success!");

    Ok(())
}
