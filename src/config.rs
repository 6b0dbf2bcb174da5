use clap::Args;

const DATABASES: usize = 16;

/// Server settings. Shared by the library constructor and the replay binary, which flattens it
/// into its own arguments.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of logical databases reachable through SELECT
    #[arg(long, env = "FAKEDIS_DATABASES", default_value_t = DATABASES)]
    pub databases: usize,

    /// Seed for SPOP, SRANDMEMBER and RANDOMKEY; random when absent
    #[arg(long, env = "FAKEDIS_SEED")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            databases: DATABASES,
            seed: None,
        }
    }
}
