// General imports
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to serve the application on
    #[arg(long, default_value = "127.0.0.1:4000")]
    pub address: String,

    /// Assets directory
    #[arg(long, default_value = ".")]
    pub assets_dir: String,

    /// Directory holding the persisted key-value items
    #[arg(long, default_value = ".labsafe")]
    pub data_dir: String,

    /// Secret used to sign the JWTs
    #[arg(long, env = "LABSAFE_JWT_SECRET", default_value = "randomstring")]
    pub jwt_secret: String,

    /// Artificial delay before the assistant replies, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub response_delay_ms: u64,

    /// Optional JSON file replacing the bundled knowledge base
    #[arg(long)]
    pub knowledge_base: Option<String>,

    /// Lifetime of the issued tokens, in hours
    #[arg(long, default_value_t = 24)]
    pub token_hours: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::parse_from(["labsafe-server"]);
        assert_eq!(config.address, "127.0.0.1:4000");
        assert_eq!(config.response_delay_ms, 1000);
        assert_eq!(config.token_hours, 24);
        assert!(config.knowledge_base.is_none());

        let config = ServerConfig::parse_from([
            "labsafe-server",
            "--data-dir",
            "/tmp/labsafe",
            "--response-delay-ms",
            "0",
        ]);
        assert_eq!(config.data_dir, "/tmp/labsafe");
        assert_eq!(config.response_delay_ms, 0);
    }
}
