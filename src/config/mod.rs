pub mod personalization;

pub use personalization::{
    PersonalizationConfig, DEFAULT_PERSONALIZATION_CONFIG_PATH, ENV_MIN_ENTRIES,
    ENV_PERSONALIZATION_CONFIG_PATH, ENV_SEED,
};
