use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Answer Service Args ---
    /// Base URL of the answer service; questions are posted to {api_url}/preguntar
    #[arg(long, env = "API_URL", default_value = "http://localhost:5000/api")]
    pub api_url: String,

    /// Request timeout in seconds. 0 disables the timeout.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,

    /// Optional context string forwarded with every question
    #[arg(long, env = "EMI_CONTEXTO")]
    pub contexto: Option<String>,

    // --- General App Args ---
    /// Ask a single question, print the answer and exit (no interactive view)
    #[arg(long, short = 'q')]
    pub pregunta: Option<String>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// File receiving log output while the interactive view owns the terminal
    #[arg(long, env = "LOG_FILE", default_value = "emi-chat.log")]
    pub log_file: String,
}

impl Args {
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    pub fn contexto(&self) -> Option<String> {
        self.contexto.clone().filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let args = Args::parse_from(["emi-chat"]);
        assert_eq!(args.api_url, "http://localhost:5000/api");
        assert_eq!(args.request_timeout(), Some(Duration::from_secs(60)));
        assert!(args.pregunta.is_none());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let args = Args::parse_from(["emi-chat", "--timeout-secs", "0"]);
        assert_eq!(args.request_timeout(), None);
    }

    #[test]
    fn blank_contexto_is_ignored() {
        let args = Args::parse_from(["emi-chat", "--contexto", "   "]);
        assert_eq!(args.contexto(), None);

        let args = Args::parse_from(["emi-chat", "--contexto", "RAC-2"]);
        assert_eq!(args.contexto().as_deref(), Some("RAC-2"));
    }
}
