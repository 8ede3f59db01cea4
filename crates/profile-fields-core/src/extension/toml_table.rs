use crate::datetime;
use std::time::Duration;
use toml::Table;

/// Extension trait for [`Table`](toml::Table).
pub trait TomlTableExt {
    /// Extracts the boolean value corresponding to the key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Extracts the integer value corresponding to the key and
    /// represents it as `u64` if possible.
    fn get_u64(&self, key: &str) -> Option<u64>;

    /// Extracts the integer value corresponding to the key.
    fn get_i64(&self, key: &str) -> Option<i64>;

    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the table corresponding to the key.
    fn get_table(&self, key: &str) -> Option<&Table>;

    /// Extracts the array of tables corresponding to the key.
    fn get_tables(&self, key: &str) -> Vec<&Table>;

    /// Extracts the string corresponding to the key
    /// and parses it as `Duration`.
    fn get_duration(&self, key: &str) -> Option<Duration>;
}

impl TomlTableExt for Table {
    #[inline]
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    #[inline]
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|i| u64::try_from(i).ok())
    }

    #[inline]
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_integer())
    }

    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(|v| v.as_table())
    }

    fn get_tables(&self, key: &str) -> Vec<&Table> {
        self.get(key)
            .and_then(|v| v.as_array())
            .map(|values| values.iter().filter_map(|v| v.as_table()).collect())
            .unwrap_or_default()
    }

    fn get_duration(&self, key: &str) -> Option<Duration> {
        let value = self.get_str(key)?;
        datetime::parse_duration(value)
            .inspect_err(|err| tracing::warn!("invalid duration `{value}` for `{key}`: {err}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::TomlTableExt;
    use std::time::Duration;
    use toml::Table;

    #[test]
    fn it_reads_config_values() {
        let config: Table = r#"
            [http-client]
            request-timeout = "30s"
            connect-timeout = "9999999999999999h"
            retries = 2

            [[profile-fields.field]]
            id = 5
            kind = "date"
        "#
        .parse()
        .unwrap();
        let http_client = config.get_table("http-client").unwrap();
        assert_eq!(
            http_client.get_duration("request-timeout"),
            Some(Duration::from_secs(30))
        );
        assert_eq!(http_client.get_duration("connect-timeout"), None);
        assert_eq!(http_client.get_u64("retries"), Some(2));
        assert_eq!(http_client.get_bool("retries"), None);

        let fields = config.get_table("profile-fields").unwrap().get_tables("field");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].get_i64("id"), Some(5));
        assert_eq!(fields[0].get_str("kind"), Some("date"));
    }
}
