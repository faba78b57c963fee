// Expense Extraction API - CLI
// One-shot extraction: fragment in (file or stdin), JSON record out

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Read;

use expense_extract::ExpenseExtractor;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let text = if args.len() > 1 {
        fs::read_to_string(&args[1]).with_context(|| format!("Failed to read {}", args[1]))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    };

    let extractor = ExpenseExtractor::new();
    match extractor.extract(&text) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
