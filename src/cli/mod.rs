use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netcheck")]
#[command(about = "Bounded network connectivity diagnostics over TCP-connect probes")]
#[command(version)]
pub struct Cli {
    /// Target host or IP
    #[arg(long, default_value = "8.8.8.8")]
    pub target: String,

    /// Ports to check, e.g. '443' or '80,443' or '20-25'
    #[arg(long, default_value = "80,443,22,3389,445")]
    pub ports: String,

    /// Per-probe timeout in seconds
    #[arg(short, long, default_value = "2")]
    pub timeout: u64,

    /// Fast mode: ports=443, timeout capped at 1s
    #[arg(long)]
    pub fast: bool,

    /// Output directory for reports
    #[arg(long, default_value = "reports")]
    pub out: PathBuf,

    /// DNS servers to probe instead of the public defaults
    #[arg(long, value_delimiter = ',')]
    pub dns_servers: Option<Vec<String>>,

    /// Print the result as JSON instead of writing report files
    #[arg(long)]
    pub json: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_tool() {
        let cli = Cli::parse_from(["netcheck"]);
        assert_eq!(cli.target, "8.8.8.8");
        assert_eq!(cli.ports, "80,443,22,3389,445");
        assert_eq!(cli.timeout, 2);
        assert!(!cli.fast);
        assert_eq!(cli.out, PathBuf::from("reports"));
        assert!(cli.dns_servers.is_none());
    }

    #[test]
    fn test_dns_servers_comma_split() {
        let cli = Cli::parse_from(["netcheck", "--dns-servers", "9.9.9.9,1.1.1.1"]);
        assert_eq!(
            cli.dns_servers,
            Some(vec!["9.9.9.9".to_string(), "1.1.1.1".to_string()])
        );
    }
}
