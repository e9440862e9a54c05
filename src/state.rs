use std::sync::Arc;

use anyhow::Result;

use crate::cache::CalculatorSessions;
use crate::config::Config;
use crate::store::{self, SignupStore};

pub struct AppState {
    pub config: Config,
    pub signups: Arc<dyn SignupStore>,
    pub calculators: CalculatorSessions,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let signups = store::connect(&config.store).await?;
        Ok(Self::with_store(config, signups))
    }

    pub fn with_store(config: Config, signups: Arc<dyn SignupStore>) -> Self {
        let calculators = CalculatorSessions::new(config.calculator_session_ttl);
        Self {
            config,
            signups,
            calculators,
        }
    }
}
