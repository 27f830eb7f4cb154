use std::fmt::Write as _;
use std::path::Path;

use rust_decimal::Decimal;

use crate::models::Category;
use crate::reports::Summary;

const SPACER: &str = "\n\n<p>&nbsp;</p>\n\n";

/// Inputs for one rendered document.
pub struct ReportMeta<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub starting_balance: Decimal,
    pub ending_balance: Decimal,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Pandoc metadata block. The floatrow include is passed straight through to
/// the LaTeX engine.
fn yaml_header(out: &mut String, author: &str) {
    out.push_str("---\n");
    let _ = writeln!(out, "author: {author}");
    out.push_str("mainfont: Consolas\n");
    out.push_str("geometry: margin=2cm\n");
    out.push_str("header-includes:\n");
    out.push_str("  - |\n");
    out.push_str("    ```{=latex}\n");
    out.push_str("    \\usepackage[margins=raggedright]{floatrow}\n");
    out.push_str("    ```\n");
    out.push_str("---\n");
}

fn narrative(out: &mut String, meta: &ReportMeta, summary: &Summary, period: &str) {
    let net = summary.totals.net_total;
    let direction = if net > Decimal::ZERO { "increase" } else { "decrease" };
    let _ = write!(
        out,
        "# {} for {period}\n\n\
         The beginning balance for {period} was ${}\n\n\n\
         The ending balance for {period} was ${}, a net {direction} of ${}\n\
         <p>&nbsp;</p>\n",
        meta.title,
        meta.starting_balance,
        meta.ending_balance,
        net.abs(),
    );
}

fn cash_flow_table(out: &mut String, meta: &ReportMeta, summary: &Summary, period: &str) {
    let t = &summary.totals;
    let _ = writeln!(out, "| **Cash Flow for {period}** | | ");
    out.push_str("| :--------------- | --------------: |\n");
    let _ = writeln!(out, "| Starting Balance | {}|", meta.starting_balance);
    let _ = writeln!(out, "| Ending Balance | {}|", meta.ending_balance);
    out.push_str("| | |\n");
    let _ = writeln!(out, "| Total Income | {}|", t.total_inflows);
    let _ = writeln!(out, "| Total Expenses | {}|", t.total_outflows);
    out.push_str("| | |\n");
    let _ = writeln!(out, "| Net Change | {}|", t.net_total);
    out.push_str(SPACER);
}

/// Category table. Expenses get two blank rows after each category block.
fn category_table(
    out: &mut String,
    heading: &str,
    categories: &[Category],
    total: Decimal,
    spaced: bool,
) {
    let _ = writeln!(out, "**{heading}**\n");
    out.push_str("| **Category** | **Subcategory** | **Amount** | **Category Total** |\n");
    out.push_str("| :--- | :--- | ---: | ---: |\n");

    for category in categories {
        let _ = writeln!(out, "| {} | | | {} |", category.name, category.total);
        for sub in &category.subcategories {
            let _ = writeln!(out, "| | {}  | {} | |", sub.name, sub.total);
        }
        if spaced {
            out.push_str("|||||\n|||||\n");
        }
    }

    out.push_str("| | | | |\n");
    let _ = writeln!(out, "| **TOTAL** | | | **{}** |", total);
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

pub fn render(meta: &ReportMeta, summary: &Summary) -> String {
    let period = summary.period_label();
    let mut out = String::new();

    yaml_header(&mut out, meta.author);
    narrative(&mut out, meta, summary, &period);
    cash_flow_table(&mut out, meta, summary, &period);

    if summary.credits.is_empty() {
        out.push_str("**Income By Category: No Income**\n\n");
    } else {
        category_table(
            &mut out,
            "Income By Category",
            &summary.credits,
            summary.totals.total_inflows,
            false,
        );
    }

    out.push_str(SPACER);

    if summary.debits.is_empty() {
        out.push_str("**Expenses By Category: No Expenses**\n\n");
    } else {
        category_table(
            &mut out,
            "Expenses By Category",
            &summary.debits,
            summary.totals.total_outflows,
            true,
        );
    }

    out.push_str(SPACER);
    let _ = write!(
        out,
        "\n\n<p>*Respectfully Submitted by {}, Treasurer*</p>\n\n",
        meta.author
    );
    out
}

pub fn write_markdown(path: &Path, text: &str) -> std::io::Result<()> {
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::reports::aggregate;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(day: u32, category: &str, sub: &str, amount: Decimal) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            payee: "Payee".to_string(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            amount,
            account: "Checking".to_string(),
            notes: String::new(),
        }
    }

    fn meta() -> ReportMeta<'static> {
        ReportMeta {
            author: "Pat Doe, W1AW",
            title: "Treasurer's Report",
            starting_balance: dec!(1000.00),
            ending_balance: dec!(600.00),
        }
    }

    fn dues_and_rent() -> Summary {
        aggregate(vec![
            txn(1, "Dues", "Annual", dec!(100.00)),
            txn(2, "Rent", "Other", dec!(-500.00)),
        ])
        .unwrap()
    }

    #[test]
    fn test_header_and_narrative() {
        let md = render(&meta(), &dues_and_rent());
        assert!(md.starts_with("---\nauthor: Pat Doe, W1AW\nmainfont: Consolas\n"));
        assert!(md.contains("\\usepackage[margins=raggedright]{floatrow}"));
        assert!(md.contains("# Treasurer's Report for March 2024\n"));
        assert!(md.contains("The beginning balance for March 2024 was $1000.00"));
        assert!(md.contains(
            "The ending balance for March 2024 was $600.00, a net decrease of $400.00\n"
        ));
        assert!(md.ends_with("<p>*Respectfully Submitted by Pat Doe, W1AW, Treasurer*</p>\n\n"));
    }

    #[test]
    fn test_cash_flow_table() {
        let md = render(&meta(), &dues_and_rent());
        assert!(md.contains("| **Cash Flow for March 2024** | | \n"));
        assert!(md.contains("| Starting Balance | 1000.00|\n"));
        assert!(md.contains("| Total Income | 100.00|\n"));
        assert!(md.contains("| Total Expenses | -500.00|\n"));
        assert!(md.contains("| Net Change | -400.00|\n"));
    }

    #[test]
    fn test_category_tables() {
        let md = render(&meta(), &dues_and_rent());
        assert!(md.contains("**Income By Category**\n\n"));
        assert!(md.contains("| Dues | | | 100.00 |\n| | Annual  | 100.00 | |\n| | | | |\n| **TOTAL** | | | **100.00** |\n"));
        assert!(md.contains("| Rent | | | -500.00 |\n| | Other  | -500.00 | |\n|||||\n|||||\n| | | | |\n| **TOTAL** | | | **-500.00** |\n"));
    }

    #[test]
    fn test_increase_only_when_positive() {
        let up = aggregate(vec![txn(1, "Dues", "Other", dec!(25.00))]).unwrap();
        assert!(render(&meta(), &up).contains("a net increase of $25.00"));

        let flat = aggregate(vec![
            txn(1, "Dues", "Other", dec!(25.00)),
            txn(2, "Rent", "Other", dec!(-25.00)),
        ])
        .unwrap();
        assert!(render(&meta(), &flat).contains("a net decrease of $0.00"));
    }

    #[test]
    fn test_empty_sides_use_placeholders() {
        let md = render(&meta(), &Summary::default());
        assert!(md.contains("# Treasurer's Report for ???\n"));
        assert!(md.contains("**Income By Category: No Income**\n\n"));
        assert!(md.contains("**Expenses By Category: No Expenses**\n\n"));
        assert!(!md.contains("**TOTAL**"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let summary = aggregate(vec![
            txn(1, "Zoo", "B", dec!(1.00)),
            txn(2, "Alpha", "A", dec!(2.00)),
            txn(3, "Mid", "C", dec!(-3.00)),
            txn(4, "Aaa", "D", dec!(-4.00)),
        ])
        .unwrap();
        let first = render(&meta(), &summary);
        assert_eq!(first, render(&meta(), &summary));
        assert!(first.find("| Zoo |").unwrap() < first.find("| Alpha |").unwrap());
        assert!(first.find("| Mid |").unwrap() < first.find("| Aaa |").unwrap());
    }

    #[test]
    fn test_write_markdown_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("report.md");
        assert!(write_markdown(&path, "x").is_err());
    }
}
