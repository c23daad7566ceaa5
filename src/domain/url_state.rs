// Query-string state mirrored between the form and the address bar
use std::borrow::Cow;
use std::fmt;

pub const PARAM_CITY: &str = "city";
pub const PARAM_STATE: &str = "state";
pub const PARAM_LATITUDE: &str = "latitude";
pub const PARAM_LONGITUDE: &str = "longitude";

/// Ordered `application/x-www-form-urlencoded` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` in place (dropping later duplicates) or append it.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value.to_string();
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    /// Drop every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(key), encode_component(value))?;
        }
        Ok(())
    }
}

pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

pub fn decode_component(value: &str) -> String {
    let spaced: Cow<str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// The four location parameters carried in the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl UrlState {
    pub fn located(city: &str, state: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
        }
    }

    pub fn from_query(query: &QueryString) -> Self {
        let read = |key: &str| query.get(key).map(str::to_string);
        Self {
            city: read(PARAM_CITY),
            state: read(PARAM_STATE),
            latitude: read(PARAM_LATITUDE),
            longitude: read(PARAM_LONGITUDE),
        }
    }

    /// Write every present parameter into `query` and remove the absent ones,
    /// leaving other keys alone.
    pub fn apply_to(&self, query: &mut QueryString) {
        let params = [
            (PARAM_CITY, &self.city),
            (PARAM_STATE, &self.state),
            (PARAM_LATITUDE, &self.latitude),
            (PARAM_LONGITUDE, &self.longitude),
        ];
        for (key, value) in params {
            match value {
                Some(value) => query.set(key, value),
                None => query.remove(key),
            }
        }
    }
}
