use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::money;
use crate::models::Category;
use crate::pipeline::summarize;
use crate::settings::shellexpand_path;

fn category_table(categories: &[Category], total: Decimal) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Subcategory", "Amount", "Category Total"]);
    for category in categories {
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(""),
            Cell::new(""),
            Cell::new(money(category.total)),
        ]);
        for sub in &category.subcategories {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(format!("  {}", sub.name)),
                Cell::new(money(sub.total)),
                Cell::new(""),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(money(total)),
    ]);
    table
}

pub fn run(csv: &str) -> Result<()> {
    let summary = summarize(&PathBuf::from(shellexpand_path(csv)))?;
    if summary.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let totals = summary.totals;
    println!("{}\n", summary.period_label().bold());

    if summary.credits.is_empty() {
        println!("Income: none");
    } else {
        println!("Income\n{}", category_table(&summary.credits, totals.total_inflows));
    }
    if summary.debits.is_empty() {
        println!("Expenses: none");
    } else {
        println!("\nExpenses\n{}", category_table(&summary.debits, totals.total_outflows));
    }

    let net = if totals.net_total > Decimal::ZERO {
        money(totals.net_total).green()
    } else {
        money(totals.net_total).red()
    };
    println!("\nTotal Income:   {}", money(totals.total_inflows));
    println!("Total Expenses: {}", money(totals.total_outflows));
    println!("Net Change:     {net}");
    Ok(())
}
