use crate::constants::UpdateRate;

/// Driver settings supplied at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Filter rate used by `read`
    pub update_rate: UpdateRate,
    /// Status register reads before `poll_ready` gives up
    pub max_polls: u32,
    /// Sleep between status register reads
    pub poll_interval_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            update_rate: UpdateRate::Hz10,
            max_polls: 10_000,
            poll_interval_us: 100,
        }
    }
}

impl Config {
    pub fn with_update_rate(mut self, update_rate: UpdateRate) -> Self {
        self.update_rate = update_rate;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_poll_interval_us(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_ten_hertz() {
        let config = Config::default();
        assert_eq!(config.update_rate as u8, 0x0C);
        assert!(config.max_polls > 0);
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_update_rate(UpdateRate::Hz470)
            .with_max_polls(3)
            .with_poll_interval_us(0);
        assert_eq!(config.update_rate, UpdateRate::Hz470);
        assert_eq!(config.max_polls, 3);
        assert_eq!(config.poll_interval_us, 0);
    }
}
