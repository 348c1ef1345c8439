use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub api: ApiSettings,
    pub poll: PollSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the sensor node, e.g. "http://192.168.1.40:5001".
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    pub interval_ms: u64,
    /// How many recent records seed the live charts at startup.
    pub backfill_points: usize,
}

fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.base_url", "http://localhost:5001")?
        .set_default("poll.interval_ms", 1000)?
        .set_default("poll.backfill_points", 100)?)
}

pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = defaults()?
        .add_source(config::File::with_name("config/monitor").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_live_view_contract() {
        let config: MonitorConfig = defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.poll.interval_ms, 1000);
        assert_eq!(config.poll.backfill_points, 100);
        assert_eq!(config.api.base_url, "http://localhost:5001");
    }
}
