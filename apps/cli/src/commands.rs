//! # Shell Commands
//!
//! Parses one input line into a [`Command`] and runs it against the shared
//! catalog.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shell Command Flow                                   │
//! │                                                                         │
//! │  stdin line ──► Command::parse ──► Command::execute ──► stdout          │
//! │                      │                    │                             │
//! │                      │ ValidationError    │ CatalogError                │
//! │                      ▼                    ▼                             │
//! │                 ┌─────────────────────────────────┐                     │
//! │                 │ error [CODE]: message           │                     │
//! │                 │ (session continues)             │                     │
//! │                 └─────────────────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Argument Encoding
//! Arguments are split on whitespace. In names, brands, sizes, materials
//! and search text an underscore stands for a space: `add clothing C9
//! Rain_Coat 49.99 3 XL Gore_Tex`. Product IDs are taken literally.

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use stockroom_core::validation::ValidationResult;
use stockroom_core::{
    local_today, CatalogError, Category, Money, Product, SearchQuery, ValidationError,
};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::state::CatalogState;

/// Shown before each line is read.
pub const PROMPT: &str = "stockroom> ";

const ADD_ELECTRONICS_USAGE: &str =
    "add electronics <id> <name> <price> <qty> <warranty_years> <brand>";
const ADD_GROCERY_USAGE: &str = "add grocery <id> <name> <price> <qty> <YYYY-MM-DD>";
const ADD_CLOTHING_USAGE: &str = "add clothing <id> <name> <price> <qty> <size> <material>";

/// Text printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  add electronics <id> <name> <price> <qty> <warranty_years> <brand>
  add grocery <id> <name> <price> <qty> <YYYY-MM-DD>
  add clothing <id> <name> <price> <qty> <size> <material>
  sell <id> <qty>            remove units from stock
  restock <id> <qty>         add units to stock
  remove <id>                delete a product
  search <text>              products whose name contains <text>
  category <kind>            electronics, grocery or clothing
  show <id> [--json]         one product
  list [--json]              every product, ordered by ID
  sweep                      remove expired groceries
  flagged                    out of stock, expired and low stock items
  value                      total inventory value
  summary [--json]           counts and totals
  help                       this text
  quit                       leave the shell

Use _ for spaces in names, e.g. Rain_Coat.";

// =============================================================================
// Command
// =============================================================================

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Product),
    Sell { id: String, quantity: i64 },
    Restock { id: String, quantity: i64 },
    Remove(String),
    Search(SearchQuery),
    Show { id: String, json: bool },
    List { json: bool },
    Sweep,
    Flagged,
    Value,
    Summary { json: bool },
    Help,
    Quit,
}

/// What the session loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

impl Command {
    /// Parses a non-empty input line.
    ///
    /// The command word is case-insensitive; arguments are not.
    pub fn parse(line: &str) -> CliResult<Command> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((word, args)) = tokens.split_first() else {
            return Err(CliError::Usage("type 'help' for a list of commands".into()));
        };

        match word.to_lowercase().as_str() {
            "add" => parse_add(args),
            "sell" => {
                let [id, qty] = exact_args::<2>(args, "sell <id> <qty>")?;
                Ok(Command::Sell {
                    id: id.to_string(),
                    quantity: parse_quantity(qty)?,
                })
            }
            "restock" => {
                let [id, qty] = exact_args::<2>(args, "restock <id> <qty>")?;
                Ok(Command::Restock {
                    id: id.to_string(),
                    quantity: parse_quantity(qty)?,
                })
            }
            "remove" => {
                let [id] = exact_args::<1>(args, "remove <id>")?;
                Ok(Command::Remove(id.to_string()))
            }
            "search" => {
                if args.is_empty() {
                    return Err(CliError::Usage("search <text>".into()));
                }
                let text = decode_spaces(&args.join(" "));
                Ok(Command::Search(SearchQuery::name(&text)?))
            }
            "category" => {
                let [kind] = exact_args::<1>(args, "category <electronics|grocery|clothing>")?;
                Ok(Command::Search(SearchQuery::Category(Category::from_str(kind)?)))
            }
            "show" => {
                let (rest, json) = split_json_flag(args);
                let [id] = exact_args::<1>(&rest, "show <id> [--json]")?;
                Ok(Command::Show {
                    id: id.to_string(),
                    json,
                })
            }
            "list" => {
                let (rest, json) = split_json_flag(args);
                let [] = exact_args::<0>(&rest, "list [--json]")?;
                Ok(Command::List { json })
            }
            "summary" => {
                let (rest, json) = split_json_flag(args);
                let [] = exact_args::<0>(&rest, "summary [--json]")?;
                Ok(Command::Summary { json })
            }
            "sweep" => no_args(args, "sweep", Command::Sweep),
            "flagged" => no_args(args, "flagged", Command::Flagged),
            "value" => no_args(args, "value", Command::Value),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }

    /// Runs the command and writes its report to `out`.
    ///
    /// Expiry is judged against `today`.
    pub fn execute<W: Write>(
        &self,
        state: &CatalogState,
        config: &AppConfig,
        today: NaiveDate,
        out: &mut W,
    ) -> CliResult<Outcome> {
        let symbol = config.display.currency_symbol.as_str();
        let describe = |p: &Product| p.describe_with_symbol(today, symbol);

        match self {
            Command::Add(product) => {
                let line = describe(product);
                state.with_catalog_mut(|c| c.add(product.clone()))?;
                writeln!(out, "Added: {}", line)?;
            }
            Command::Sell { id, quantity } => {
                let left = state.with_catalog_mut(|c| c.sell(id, *quantity))?;
                writeln!(out, "Sold {} of {}; {} left", quantity, id, left)?;
            }
            Command::Restock { id, quantity } => {
                let now = state.with_catalog_mut(|c| c.restock(id, *quantity))?;
                writeln!(out, "Restocked {}; {} on hand", id, now)?;
            }
            Command::Remove(id) => {
                let removed = state.with_catalog_mut(|c| c.remove(id))?;
                writeln!(out, "Removed: {}", describe(&removed))?;
            }
            Command::Search(query) => {
                let lines: Vec<String> =
                    state.with_catalog(|c| c.search(query).into_iter().map(describe).collect());
                write_lines(out, &lines, "No products found.")?;
            }
            Command::Show { id, json } => {
                let rendered = state.with_catalog(|c| match c.get(id) {
                    Some(p) if *json => serde_json::to_string_pretty(p).map_err(CliError::from),
                    Some(p) => Ok(describe(p)),
                    None => Err(CatalogError::ProductNotFound(id.clone()).into()),
                })?;
                writeln!(out, "{}", rendered)?;
            }
            Command::List { json: true } => {
                let rendered = state.with_catalog(|c| serde_json::to_string_pretty(&c.list()))?;
                writeln!(out, "{}", rendered)?;
            }
            Command::List { json: false } => {
                let lines: Vec<String> =
                    state.with_catalog(|c| c.list().into_iter().map(describe).collect());
                write_lines(out, &lines, "Inventory is empty.")?;
            }
            Command::Sweep => {
                let removed = state.with_catalog_mut(|c| c.remove_expired_as_of(today));
                writeln!(out, "Removed {} expired product(s)", removed.len())?;
                for product in &removed {
                    writeln!(out, "  {}", describe(product))?;
                }
            }
            Command::Flagged => {
                let threshold = config.inventory.low_stock_threshold;
                let (empty, expired, low) = state.with_catalog(|c| {
                    let render = |ps: Vec<&Product>| ps.into_iter().map(describe).collect::<Vec<_>>();
                    (
                        render(c.out_of_stock()),
                        render(c.expired_as_of(today)),
                        if threshold > 0 {
                            render(c.low_stock(threshold))
                        } else {
                            Vec::new()
                        },
                    )
                });

                writeln!(out, "Out of stock:")?;
                write_indented(out, &empty)?;
                writeln!(out, "Expired:")?;
                write_indented(out, &expired)?;
                if threshold > 0 {
                    writeln!(out, "Low stock (<= {}):", threshold)?;
                    write_indented(out, &low)?;
                }
            }
            Command::Value => {
                let total = state.with_catalog(|c| c.total_value());
                writeln!(out, "Total inventory value: {}", total.format_with(symbol))?;
            }
            Command::Summary { json } => {
                let summary = state.with_catalog(|c| c.summary_as_of(today));
                if *json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
                } else {
                    writeln!(out, "As of:         {}", summary.as_of)?;
                    writeln!(out, "Products:      {}", summary.product_count)?;
                    writeln!(out, "Units:         {}", summary.total_units)?;
                    writeln!(out, "Value:         {}", summary.total_value.format_with(symbol))?;
                    writeln!(out, "Out of stock:  {}", summary.out_of_stock)?;
                    writeln!(out, "Expired:       {}", summary.expired)?;
                    for (category, count) in &summary.by_category {
                        writeln!(out, "  {:<12} {}", category, count)?;
                    }
                }
            }
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Continue)
    }
}

// =============================================================================
// Session Loop
// =============================================================================

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are printed as `error [CODE]: message` and the loop goes
/// on. Only I/O failures end the session early.
pub fn run_session<R, W>(
    state: &CatalogState,
    config: &AppConfig,
    input: R,
    mut output: W,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result =
            Command::parse(line).and_then(|cmd| cmd.execute(state, config, local_today(), &mut output));

        match result {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            Err(err) if err.is_recoverable() => {
                debug!(code = err.code(), error = %err, "Command rejected");
                writeln!(output, "error [{}]: {}", err.code(), err)?;
            }
            Err(err) => return Err(err),
        }
    }

    info!("Session ended");
    Ok(())
}

// =============================================================================
// Output Helpers
// =============================================================================

/// One line per entry, or `empty` when there are none.
fn write_lines<W: Write>(out: &mut W, lines: &[String], empty: &str) -> CliResult<()> {
    if lines.is_empty() {
        writeln!(out, "{}", empty)?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Entries under a section heading; `(none)` when the section is empty.
fn write_indented<W: Write>(out: &mut W, lines: &[String]) -> CliResult<()> {
    write_lines(out, &lines.iter().map(|l| format!("  {}", l)).collect::<Vec<_>>(), "  (none)")
}

// =============================================================================
// Parsing Helpers
// =============================================================================

fn parse_add(args: &[&str]) -> CliResult<Command> {
    let Some((kind, rest)) = args.split_first() else {
        return Err(CliError::Usage("add <electronics|grocery|clothing> ...".into()));
    };

    let product = match Category::from_str(kind)? {
        Category::Electronics => {
            let [id, name, price, qty, warranty, brand] =
                exact_args::<6>(rest, ADD_ELECTRONICS_USAGE)?;
            Product::electronics(
                id,
                decode_spaces(name),
                parse_price(price)?,
                parse_quantity(qty)?,
                parse_warranty(warranty)?,
                decode_spaces(brand),
            )?
        }
        Category::Grocery => {
            let [id, name, price, qty, expiry] = exact_args::<5>(rest, ADD_GROCERY_USAGE)?;
            Product::grocery(
                id,
                decode_spaces(name),
                parse_price(price)?,
                parse_quantity(qty)?,
                parse_date(expiry)?,
            )?
        }
        Category::Clothing => {
            let [id, name, price, qty, size, material] =
                exact_args::<6>(rest, ADD_CLOTHING_USAGE)?;
            Product::clothing(
                id,
                decode_spaces(name),
                parse_price(price)?,
                parse_quantity(qty)?,
                decode_spaces(size),
                decode_spaces(material),
            )?
        }
    };

    Ok(Command::Add(product))
}

/// Destructures `args` into exactly `N` arguments or fails with `usage`.
fn exact_args<'a, const N: usize>(args: &[&'a str], usage: &str) -> CliResult<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| CliError::Usage(usage.to_string()))
}

fn no_args(args: &[&str], usage: &str, command: Command) -> CliResult<Command> {
    let [] = exact_args::<0>(args, usage)?;
    Ok(command)
}

fn split_json_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let json = args.contains(&"--json");
    let rest = args.iter().copied().filter(|a| *a != "--json").collect();
    (rest, json)
}

fn decode_spaces(text: &str) -> String {
    text.replace('_', " ")
}

fn parse_price(text: &str) -> ValidationResult<Money> {
    Money::from_str(text)
}

fn parse_quantity(text: &str) -> ValidationResult<i64> {
    text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: format!("'{}' is not a whole number", text),
    })
}

fn parse_warranty(text: &str) -> ValidationResult<u32> {
    text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "warranty_years".to_string(),
        reason: format!("'{}' is not a whole number of years", text),
    })
}

fn parse_date(text: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: format!("'{}' is not a YYYY-MM-DD date", text),
    })
}
