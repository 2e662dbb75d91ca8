use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Decode query or form pairs into `T`, keeping the first value of a
/// repeated key. `T` is expected to hold only text fields; anything that
/// still fails to decode yields `T::default()`.
pub fn first_values<T>(pairs: Vec<(String, String)>) -> T
where
    T: DeserializeOwned + Default,
{
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }

    serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
        debug!("Ignoring undecodable parameters: {e}");
        T::default()
    })
}
