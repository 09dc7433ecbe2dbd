use crate::diagnose::{Diagnosis, DiagnosticResult};
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reporting collaborator: the core hands over one finished
/// [`DiagnosticResult`] and never touches files or the console itself.
pub trait ReportSink {
    fn submit(&mut self, result: &DiagnosticResult) -> io::Result<()>;
}

fn server_label(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:53")
    }
}

/// Human-readable report.
pub fn render_text(result: &DiagnosticResult) -> String {
    let mut out = String::new();
    out.push_str("INTERNET CONNECTIVITY CHECK\n");
    out.push_str("------------------------------------------\n");
    out.push_str(&format!("Target Host: {}\n", result.target));
    for (server, ok) in &result.dns_servers {
        out.push_str(&format!(
            "DNS {} -> {}\n",
            server_label(server),
            if *ok { "OK" } else { "FAILED" }
        ));
    }
    out.push_str(&format!(
        "Ping {}   -> {}\n",
        result.target,
        if result.liveness_ok { "OK" } else { "FAILED" }
    ));
    match &result.resolved_ip {
        Some(ip) => out.push_str(&format!("Resolve {} -> {}\n", result.target, ip)),
        None => out.push_str(&format!("Resolve {} -> FAILED\n", result.target)),
    }
    out.push_str("\nPort Checks:\n");
    for (port, ok) in &result.ports {
        out.push_str(&format!(
            "  {}:{} -> {}\n",
            result.target,
            port,
            if *ok { "OPEN" } else { "CLOSED/NO RESPONSE" }
        ));
    }
    out.push_str("\nDiagnosis:\n");
    out.push_str(match result.diagnosis {
        Diagnosis::Stable => "  \u{2713} Internet connection seems stable.\n",
        Diagnosis::DnsOkPortsClosed => "  ! DNS reachable but target ports closed.\n",
        Diagnosis::ConnectivitySuspect => "  \u{2717} Suspect DNS or outbound connectivity issue.\n",
    });
    out
}

/// Flat `metric,value` table.
pub fn render_csv(result: &DiagnosticResult) -> String {
    let mut out = String::new();
    out.push_str("metric,value\n");
    out.push_str(&format!("target,{}\n", result.target));
    for (server, ok) in &result.dns_servers {
        out.push_str(&format!(
            "dns_{},{}\n",
            server_label(server).replace(':', "_"),
            if *ok { "OK" } else { "FAILED" }
        ));
    }
    out.push_str(&format!(
        "ping_like_443,{}\n",
        if result.liveness_ok { "OK" } else { "FAILED" }
    ));
    match &result.resolved_ip {
        Some(ip) => out.push_str(&format!("resolved_ip,{ip}\n")),
        None => out.push_str("resolved_ip,FAILED\n"),
    }
    for (port, ok) in &result.ports {
        out.push_str(&format!(
            "port_{},{}\n",
            port,
            if *ok { "OPEN" } else { "CLOSED" }
        ));
    }
    out.push_str(&format!("diagnosis,{}\n", result.diagnosis));
    out
}

/// Writes one timestamped TXT and CSV report pair per submitted result.
pub struct FileSink {
    outdir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(outdir: impl AsRef<Path>) -> Self {
        Self {
            outdir: outdir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }
}

impl ReportSink for FileSink {
    fn submit(&mut self, result: &DiagnosticResult) -> io::Result<()> {
        fs::create_dir_all(&self.outdir)?;
        let ts = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let txt = self.outdir.join(format!("network_report_{ts}.txt"));
        let csv = self.outdir.join(format!("network_report_{ts}.csv"));
        fs::write(&txt, render_text(result))?;
        fs::write(&csv, render_csv(result))?;
        self.written.push(txt);
        self.written.push(csv);
        Ok(())
    }
}
