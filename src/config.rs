use std::env;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// When true, a passed test is locked against retakes.
    pub pass_blocks_retake: bool,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            pass_blocks_retake: env::var("PASS_BLOCKS_RETAKE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn test_config() -> Self {
        Self {
            pass_blocks_retake: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_blocks_retake: false,
        }
    }
}
