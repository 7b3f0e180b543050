//! Interactive prompt loop
//!
//! Repeatedly asks for a strategy and a symbol, prints the report and starts
//! over. `quit`, `exit` or `q` at either prompt ends the session. Generic over
//! input and output so it can be driven from tests.

use std::io::{BufRead, Write};

use crate::analysis::Analyzer;
use crate::core::{ScanResult, Strategy};
use crate::data::MarketDataSource;
use crate::report::ReportFormatter;

fn is_quit(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> ScanResult<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the prompt loop until the user quits or input ends
///
/// Returns the number of reports printed.
pub fn run_interactive<S, R, W>(analyzer: &Analyzer<S>, mut input: R, mut output: W) -> ScanResult<usize>
where
    S: MarketDataSource,
    R: BufRead,
    W: Write,
{
    let formatter = ReportFormatter::new();
    let mut reports = 0;

    writeln!(output, "Simple Stock Options Analyzer")?;
    writeln!(output, "{}", "=".repeat(50))?;
    writeln!(output, "Choose your strategy and enter stock symbols")?;
    writeln!(output, "Type 'quit' to exit")?;
    writeln!(output, "{}", "=".repeat(50))?;

    loop {
        writeln!(output)?;
        writeln!(output, "Strategy Options:")?;
        writeln!(output, "1. Sell Covered Calls (strikes ABOVE current price)")?;
        writeln!(output, "2. Sell Cash Secured Puts (strikes BELOW current price)")?;

        let Some(choice) = prompt(&mut input, &mut output, "\nChoose strategy (1 or 2): ")? else {
            break;
        };
        if is_quit(&choice) {
            writeln!(output, "Goodbye!")?;
            break;
        }
        let strategy = match choice.as_str() {
            "1" => Strategy::CoveredCalls,
            "2" => Strategy::CashSecuredPuts,
            _ => {
                writeln!(output, "Please enter 1 or 2")?;
                continue;
            }
        };

        let text = format!("\nEnter stock symbol for {}: ", strategy.label());
        let Some(symbol) = prompt(&mut input, &mut output, &text)? else {
            break;
        };
        if is_quit(&symbol) {
            writeln!(output, "Goodbye!")?;
            break;
        }
        if symbol.is_empty() {
            writeln!(output, "Please enter a valid stock symbol")?;
            continue;
        }

        let symbol = symbol.to_ascii_uppercase();
        writeln!(output, "\nAnalyzing {} for {}...", symbol, strategy.label())?;

        match analyzer.analyze(&symbol, strategy) {
            Ok(report) => {
                writeln!(output)?;
                write!(output, "{}", formatter.render(&report))?;
                writeln!(output, "\n{}", "=".repeat(80))?;
                reports += 1;
            }
            Err(e) => writeln!(output, "{}", e)?,
        }
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;
    use crate::data::StaticSource;
    use std::io::Cursor;

    #[test]
    fn test_quit_immediately() {
        let analyzer = Analyzer::new(StaticSource::new(), ScannerConfig::default());
        let mut out = Vec::new();

        let n = run_interactive(&analyzer, Cursor::new("q\n"), &mut out).unwrap();
        assert_eq!(n, 0);
        assert!(String::from_utf8(out).unwrap().contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_choice_and_unknown_symbol() {
        let analyzer = Analyzer::new(StaticSource::new(), ScannerConfig::default());
        let mut out = Vec::new();

        let n = run_interactive(&analyzer, Cursor::new("7\n1\nnope\n2\n\nexit\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(n, 0);
        assert!(text.contains("Please enter 1 or 2"));
        assert!(text.contains("Analyzing NOPE for Covered Calls"));
        assert!(text.contains("No data found for this symbol"));
        assert!(text.contains("Please enter a valid stock symbol"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let analyzer = Analyzer::new(StaticSource::new(), ScannerConfig::default());
        let n = run_interactive(&analyzer, Cursor::new("1\n"), Vec::new()).unwrap();
        assert_eq!(n, 0);
    }
}
