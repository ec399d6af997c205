pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsConfig {
    pub histogram_max_buckets: usize,
    pub histograms_enabled: bool,
}

impl StatisticsConfig {
    pub fn new() -> StatisticsConfig {
        // Read environment variables 'OXIDSQL_HISTOGRAM_BUCKETS' and 'OXIDSQL_HISTOGRAMS'
        // If not set (or garbage), fall back to the defaults
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> StatisticsConfig {
        let histogram_max_buckets = match var("OXIDSQL_HISTOGRAM_BUCKETS") {
            Some(val) => val.trim().parse::<usize>().unwrap_or(DEFAULT_HISTOGRAM_BUCKETS),
            None => DEFAULT_HISTOGRAM_BUCKETS
        };
        let histograms_enabled = match var("OXIDSQL_HISTOGRAMS") {
            Some(val) => !matches!(val.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"),
            None => true
        };
        StatisticsConfig {
            histogram_max_buckets,
            histograms_enabled
        }
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        StatisticsConfig {
            histogram_max_buckets: DEFAULT_HISTOGRAM_BUCKETS,
            histograms_enabled: true
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> StatisticsConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        StatisticsConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_with(&[]), StatisticsConfig::default());
        assert_eq!(StatisticsConfig::default().histogram_max_buckets, 200);
    }

    #[test]
    fn test_bucket_count() {
        assert_eq!(config_with(&[("OXIDSQL_HISTOGRAM_BUCKETS", "32")]).histogram_max_buckets, 32);
        assert_eq!(config_with(&[("OXIDSQL_HISTOGRAM_BUCKETS", " 0 ")]).histogram_max_buckets, 0);
        assert_eq!(config_with(&[("OXIDSQL_HISTOGRAM_BUCKETS", "lots")]).histogram_max_buckets, DEFAULT_HISTOGRAM_BUCKETS);
        assert_eq!(config_with(&[("OXIDSQL_HISTOGRAM_BUCKETS", "-5")]).histogram_max_buckets, DEFAULT_HISTOGRAM_BUCKETS);
    }

    #[test]
    fn test_histograms_switch() {
        for off in ["0", "false", "OFF"] {
            assert!(!config_with(&[("OXIDSQL_HISTOGRAMS", off)]).histograms_enabled);
        }
        for on in ["1", "true", "yes"] {
            assert!(config_with(&[("OXIDSQL_HISTOGRAMS", on)]).histograms_enabled);
        }
    }
}
