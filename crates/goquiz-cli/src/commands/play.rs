//! The `goquiz play` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};
use tokio::io::{AsyncBufReadExt, BufReader};

use goquiz_client::config::{create_services, load_config_from};
use goquiz_core::bank::load_question_bank;
use goquiz_core::runner::{Entry, QuizRunner, Step};
use goquiz_core::scoring::ResultSummary;

use super::TerminalNavigator;

const HELP: &str = "Commands: start, <number> to pick an option, n/next, p/prev, restart, q/quit";

pub async fn execute(questions: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let services = create_services(&config, Arc::new(TerminalNavigator))?;
    let path = questions.unwrap_or_else(|| config.questions.clone());
    let load_bank = || load_question_bank(&path).map(Arc::new);

    let mut runner =
        match QuizRunner::enter_with(&services, config.notification.clone(), load_bank)? {
            Entry::Redirected => return Ok(()),
            Entry::Entered(runner) => runner,
        };

    println!("{}", runner.greeting());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "q" | "quit" => break,
            "start" => match runner.start() {
                Ok(()) => render(&runner),
                Err(e) => println!("{e}"),
            },
            "restart" => match runner.restart() {
                Ok(()) => println!("{}", runner.greeting()),
                Err(e) => println!("{e}"),
            },
            "p" | "prev" => match runner.prev() {
                Ok(_) => render(&runner),
                Err(e) => println!("{e}"),
            },
            "n" | "next" => match runner.next() {
                Ok(Step::Advanced(_)) => render(&runner),
                Ok(Step::Finished {
                    summary,
                    notification,
                }) => {
                    print_result(&summary);
                    if let Some(pending) = notification {
                        runner.send_notification(pending).await;
                    }
                    println!("Type `restart` to play again or `q` to quit.");
                }
                Err(e) => println!("{e}"),
            },
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => match runner.select(n - 1).map(|_| ()) {
                    Ok(_) => render(&runner),
                    Err(e) => println!("{e}"),
                },
                _ => println!("Unknown command: {other}\n{HELP}"),
            },
        }
    }

    runner.leave();
    Ok(())
}

fn render(runner: &QuizRunner) {
    let Some(view) = runner.view() else {
        return;
    };
    println!("\n{}", view.heading);
    for (i, option) in view.options.iter().enumerate() {
        let mark = if view.selected == Some(i) { '*' } else { ' ' };
        println!(" {mark} {}. {}", i + 1, option.text);
    }
    let mut moves = Vec::new();
    if view.prev_enabled {
        moves.push("p: previous");
    }
    if view.next_enabled {
        moves.push(if view.number == view.total {
            "n: finish"
        } else {
            "n: next"
        });
    }
    if !moves.is_empty() {
        println!("   ({})", moves.join(", "));
    }
}

fn print_result(summary: &ResultSummary) {
    let mut table = Table::new();
    table.set_header(vec!["Passed", "Failed", "Unanswered", "Total average"]);
    table.add_row(vec![
        Cell::new(format!("{}/{}", summary.passed, summary.total)),
        Cell::new(format!("{}/{}", summary.failed, summary.total)),
        Cell::new(summary.unanswered()),
        Cell::new(format!("{:.1}%", summary.average_percent)),
    ]);

    println!("\nQuiz finished!\n{table}");
}
