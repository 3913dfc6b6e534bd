//! Interactive prompt loop for the dashboard.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use tipboard::{parse_day_choice, parse_sex_choice, stats, Config, Dashboard};

use crate::errors::Result;
use crate::loader;

/// Events sent from the watcher to the prompt loop.
pub enum RunnerEvent {
    DatasetChanged,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Continue,
    Quit,
}

pub async fn run(
    dashboard: Arc<Dashboard>,
    dataset_path: Option<PathBuf>,
    config: Config,
    mut event_rx: mpsc::Receiver<RunnerEvent>,
) -> Result<()> {
    print_header(&dashboard);

    let (input_tx, mut input_rx) = mpsc::channel::<String>(32);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let reader = stdin.lock();
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if input_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    print!("> ");
    std::io::stdout().flush()?;

    let mut events_open = true;

    loop {
        tokio::select! {
            biased;

            event = event_rx.recv(), if events_open => {
                match event {
                    Some(RunnerEvent::DatasetChanged) => {
                        if let Some(path) = &dataset_path {
                            reload_from_file(&dashboard, path);
                        }
                        print!("> ");
                        std::io::stdout().flush()?;
                    }
                    None => {
                        // Watcher gone; keep serving prompt input.
                        events_open = false;
                    }
                }
            }

            input = input_rx.recv() => {
                match input {
                    Some(line) => {
                        match handle_line(&dashboard, &config, &line) {
                            Outcome::Quit => break,
                            Outcome::Continue => {}
                        }
                        println!();
                        print!("> ");
                        std::io::stdout().flush()?;
                    }
                    None => {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn handle_line(dashboard: &Dashboard, config: &Config, line: &str) -> Outcome {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => {}
        ["q"] | ["quit"] => return Outcome::Quit,
        ["s"] | ["show"] => print_summary(dashboard),
        ["t"] | ["table"] => print_table(dashboard, config),
        ["reset"] => {
            dashboard.reset_filters();
            print_status(dashboard);
        }
        ["?"] | ["h"] | ["help"] => print_help(),
        ["day", value] => match parse_day_choice(value) {
            Ok(day) => {
                dashboard.set_day(day);
                print_status(dashboard);
            }
            Err(e) => println!("{e}"),
        },
        ["smoker", value] => match parse_flag(value) {
            Ok(include) => {
                dashboard.set_smoker(include);
                print_status(dashboard);
            }
            Err(e) => println!("{e}"),
        },
        ["sex", value] => match parse_sex_choice(value) {
            Ok(sex) => {
                dashboard.set_sex(sex);
                print_status(dashboard);
            }
            Err(e) => println!("{e}"),
        },
        ["bill", lo, hi] => match parse_bill(lo, hi) {
            Ok((lo, hi)) => match dashboard.set_bill_range(lo, hi) {
                Ok(()) => print_status(dashboard),
                Err(e) => println!("{e}"),
            },
            Err(e) => println!("{e}"),
        },
        _ => println!("Unknown command: {} (type ? for help)", line.trim()),
    }
    Outcome::Continue
}

fn parse_flag(s: &str) -> std::result::Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(format!("expected on or off, got '{s}'")),
    }
}

fn parse_bill(lo: &str, hi: &str) -> std::result::Result<(f64, f64), String> {
    let lo: f64 = lo
        .parse()
        .map_err(|_| format!("'{lo}' is not a number"))?;
    let hi: f64 = hi
        .parse()
        .map_err(|_| format!("'{hi}' is not a number"))?;
    Ok((lo, hi))
}

fn reload_from_file(dashboard: &Dashboard, path: &Path) {
    match loader::load_records(path) {
        Ok(records) => match dashboard.reload_dataset(records) {
            Ok(()) => {
                let rows = dashboard.dataset().len();
                info!(path = %path.display(), rows, "dataset reloaded");
                println!("\n✓ Reloaded {rows} rows\n");
                print_status(dashboard);
            }
            Err(e) => {
                println!("\nReload rejected: {e}\n");
            }
        },
        Err(e) => {
            println!("\nReload error: {e}\n");
        }
    }
}

fn print_header(dashboard: &Dashboard) {
    let dataset = dashboard.dataset();
    let (min, max) = dataset.bill_bounds();
    println!(
        "Tipboard - {} records loaded, bills {min:.2}..{max:.2}\n",
        dataset.len()
    );
    println!("  day <d|all>   smoker <on|off>   bill <lo> <hi>   sex <s|all>");
    println!("  [s] Show  [t] Table  [reset] Reset  [q] Quit  [?] Help\n");
}

/// Current selection and match count, printed after every mutation.
fn print_status(dashboard: &Dashboard) {
    let state = dashboard.filter_state();
    let day = state
        .day
        .map(|d| d.to_string())
        .unwrap_or_else(|| "All".to_string());
    let sex = state
        .sex
        .map(|s| s.to_string())
        .unwrap_or_else(|| "All".to_string());
    println!(
        "Showing day: {day}, smoker included: {}, bill {:.2}..{:.2}, sex: {sex} - {} records",
        state.include_smoker,
        state.bill_range.min,
        state.bill_range.max,
        dashboard.filtered_view().len()
    );
}

fn print_summary(dashboard: &Dashboard) {
    let view = dashboard.filtered_view();
    println!("Records:    {}", stats::record_count(&view));
    println!("Bill total: {:.2}", stats::total_bill_sum(&view));
    match stats::average_tip_percent(&view) {
        Some(percent) => println!("Avg tip:    {percent:.2}%"),
        None => println!("Avg tip:    N/A"),
    }

    let by_day = stats::average_tip_by_day(&view);
    if !by_day.is_empty() {
        println!("Avg tip by day:");
        for (day, tip) in by_day {
            println!("  {day:<5} {tip:.2}");
        }
    }

    let by_sex = stats::tips_by_sex(&view);
    if !by_sex.is_empty() {
        println!("Tips by sex:");
        for (sex, tips) in by_sex {
            println!("  {sex:<7} {} tips", tips.len());
        }
    }
}

fn print_table(dashboard: &Dashboard, config: &Config) {
    let view = dashboard.filtered_view();
    if view.is_empty() {
        println!("No records match the current filters");
        return;
    }

    println!(
        "{:>10}  {:>6}  {:<6}  {:<6}  {:<4}  {:<6}  {:>4}",
        "total_bill", "tip", "sex", "smoker", "day", "time", "size"
    );
    for row in view.iter().take(config.table_rows) {
        println!(
            "{:>10.2}  {:>6.2}  {:<6}  {:<6}  {:<4}  {:<6}  {:>4}",
            row.total_bill, row.tip, row.sex, row.smoker, row.day, row.time, row.size
        );
    }

    let hidden = view.len().saturating_sub(config.table_rows);
    if hidden > 0 {
        println!("... {hidden} more rows");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  day <thur|fri|sat|sun|all>   Filter by day of the week");
    println!("  smoker <on|off>              Include or exclude smoker rows");
    println!("  bill <lo> <hi>               Keep bills inside an inclusive range");
    println!("  sex <male|female|all>        Filter by sex");
    println!("  s, show                      Summary metrics and groupings");
    println!("  t, table                     Print the filtered rows");
    println!("  reset                        Restore the load-time filters");
    println!("  q, quit                      Exit");
    println!();
    println!("Dataset reload is automatic on file save.");
}
