//! Convert a formula and print every normal form

use normalform::{ConversionConfig, ConversionResult, Converter, OutcomeJson, Result, EXAMPLES};
use std::io::Read;
use std::time::Duration;

fn usage(program: &str) {
    eprintln!("Usage: {} [options] [formula]", program);
    eprintln!("\nReads the formula from standard input when none is given.");
    eprintln!("\nOptions:");
    eprintln!("  --json              Print the result as JSON");
    eprintln!("  --max-nodes <n>     Node budget for intermediate formulas (default: 100000)");
    eprintln!("  --unbounded         Disable the node budget");
    eprintln!("  --timeout-ms <ms>   Wall-clock budget for the conversion");
    eprintln!("  --examples          Convert the built-in example formulas");
}

fn render_text(result: &ConversionResult) -> String {
    let predicates: Vec<String> = result.predicates.iter().map(|p| p.to_string()).collect();
    let mut out = format!(
        "Input: {}\nKind: {}\nPredicates: {}\n\n",
        result.input,
        result.kind,
        predicates.join(", ")
    );
    for step in &result.steps {
        out.push_str(&format!("{}:\n  {}\n", step.label, step.formula));
    }
    out.push_str(&format!("PCNF:\n  {}\n", result.pcnf));
    out.push_str(&format!("PDNF:\n  {}\n", result.pdnf));
    out.push_str(&format!("Clausal form:\n  {}\n\n", result.clausal_form()));
    out.push_str(&result.horn_report());
    out
}

/// Convert every built-in example; `Err` carries the text when one failed
fn render_examples(converter: &Converter, json: bool) -> std::result::Result<String, String> {
    let outcomes: Vec<(&str, Result<ConversionResult>)> = EXAMPLES
        .iter()
        .map(|example| (*example, converter.convert(example)))
        .collect();
    let failed = outcomes.iter().any(|(_, outcome)| outcome.is_err());

    let text = if json {
        let values: Vec<OutcomeJson> = outcomes.iter().map(|(_, o)| OutcomeJson::from(o)).collect();
        serde_json::to_string_pretty(&values).map_err(|e| format!("Failed to serialize result: {}", e))?
    } else {
        let sections: Vec<String> = outcomes
            .iter()
            .map(|(example, outcome)| match outcome {
                Ok(result) => render_text(result),
                Err(e) => format!("{}: {}", example, e),
            })
            .collect();
        sections.join(&format!("\n\n{}\n\n", "-".repeat(60)))
    };

    if failed {
        Err(text)
    } else {
        Ok(text)
    }
}

/// Render one conversion; `Err` carries the text for a failed request
fn render(outcome: &Result<ConversionResult>, json: bool) -> std::result::Result<String, String> {
    let text = if json {
        serde_json::to_string_pretty(&OutcomeJson::from(outcome))
            .map_err(|e| format!("Failed to serialize result: {}", e))?
    } else {
        match outcome {
            Ok(result) => render_text(result),
            Err(e) => e.to_string(),
        }
    };
    match outcome {
        Ok(_) => Ok(text),
        Err(_) => Err(text),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = ConversionConfig::default();
    let mut json = false;
    let mut examples = false;
    let mut formula: Option<String> = None;

    // Parse command line options
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--unbounded" => config.max_nodes = None,
            "--max-nodes" => {
                match args.get(i + 1).and_then(|n| n.parse::<usize>().ok()) {
                    Some(n) => config.max_nodes = Some(n),
                    None => {
                        eprintln!("--max-nodes expects a number");
                        std::process::exit(2);
                    }
                }
                i += 1;
            }
            "--timeout-ms" => {
                match args.get(i + 1).and_then(|n| n.parse::<u64>().ok()) {
                    Some(ms) => config.timeout = Some(Duration::from_millis(ms)),
                    None => {
                        eprintln!("--timeout-ms expects a number");
                        std::process::exit(2);
                    }
                }
                i += 1;
            }
            "--examples" => examples = true,
            "-h" | "--help" => {
                usage(&args[0]);
                return;
            }
            arg if arg.starts_with("--") => {
                eprintln!("Unknown option: {}", arg);
                usage(&args[0]);
                std::process::exit(2);
            }
            arg => formula = Some(arg.to_string()),
        }
        i += 1;
    }

    if examples {
        match render_examples(&Converter::new(config), json) {
            Ok(text) => println!("{}", text),
            Err(text) => {
                println!("{}", text);
                std::process::exit(1);
            }
        }
        return;
    }

    let input = match formula {
        Some(text) => text,
        None => {
            let mut text = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                eprintln!("Failed to read standard input: {}", e);
                std::process::exit(1);
            }
            text.trim_end().to_string()
        }
    };

    log::info!("converting {:?} with {:?}", input, config);
    match render(&Converter::new(config).convert(&input), json) {
        Ok(text) => println!("{}", text),
        Err(text) => {
            if json {
                println!("{}", text);
            } else {
                eprintln!("{}", text);
            }
            std::process::exit(1);
        }
    }
}
