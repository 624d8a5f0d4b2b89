use crate::cli::Cli;
use crate::client::{ClientConfig, SkillsClient};
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    pub client: SkillsClient,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let mut client_config = ClientConfig::from(&config);
        if !cli.skill_paths.is_empty() {
            client_config.sources.clone_from(&cli.skill_paths);
        }

        Ok(Self {
            client: SkillsClient::new(client_config),
            config,
            robot_mode: cli.robot,
        })
    }
}
