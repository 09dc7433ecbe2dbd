use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use netcheck::*;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = cli::Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if cli.fast {
        cli.ports = "443".to_string();
        cli.timeout = cli.timeout.min(1);
    }

    let ports = match PortSpec::parse(&cli.ports) {
        Ok(ports) => ports,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let timeout = Duration::from_secs(cli.timeout.max(1));

    let mut diagnostic = Diagnostic::new(cli.target.clone())
        .with_ports(ports)
        .with_timeout(timeout);
    if let Some(servers) = cli.dns_servers.clone() {
        diagnostic = diagnostic.with_dns_servers(servers);
    }

    let spinner = (!cli.json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Probing {}...", cli.target));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let (elapsed, result) = measure_time(|| diagnostic.run()).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else {
        print_result_human(&result, elapsed);

        let mut sink = report::FileSink::new(&cli.out);
        match sink.submit(&result) {
            Ok(()) => {
                for path in &sink.written {
                    println!("Report exported -> {}", path.display());
                }
            }
            Err(e) => eprintln!("{} could not write reports: {}", "error:".red().bold(), e),
        }
    }

    if result.diagnosis == Diagnosis::Stable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_result_human(result: &DiagnosticResult, elapsed: Duration) {
    println!("\n{}", "=".repeat(60).blue());
    println!("{}", "Internet Connectivity Check".bold().blue());
    println!("{}", "=".repeat(60).blue());

    println!("Target: {}", result.target.bold());
    match &result.resolved_ip {
        Some(ip) => println!("Resolved: {}", ip.to_string().green()),
        None => println!("Resolved: {}", "FAILED".red()),
    }

    for (server, ok) in &result.dns_servers {
        println!("DNS {}: {}", server, status(*ok, "OK", "FAILED"));
    }
    println!(
        "Liveness (TCP connect): {}",
        status(result.liveness_ok, "OK", "FAILED")
    );

    if !result.ports.is_empty() {
        println!("Ports:");
        for (port, ok) in &result.ports {
            println!("  {}: {}", port, status(*ok, "OPEN", "CLOSED"));
        }
    }

    println!("{}", "-".repeat(60).blue());
    let diagnosis = match result.diagnosis {
        Diagnosis::Stable => "Internet connection seems stable.".green().bold(),
        Diagnosis::DnsOkPortsClosed => "DNS reachable but target ports closed.".yellow().bold(),
        Diagnosis::ConnectivitySuspect => {
            "Suspect DNS or outbound connectivity issue.".red().bold()
        }
    };
    println!(
        "Diagnosis: {diagnosis} ({})",
        format_duration(elapsed).cyan()
    );
}

fn status(ok: bool, good: &str, bad: &str) -> ColoredString {
    if ok {
        good.green().bold()
    } else {
        bad.red().bold()
    }
}
