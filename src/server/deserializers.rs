use serde::{Deserialize, Deserializer};

// the quiz frontend sends category ids either as numbers or as numeric strings
// ("1"), depending on which button was clicked
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(v) => Ok(v),
        NumberOrString::String(s) => s.trim().parse::<i64>().map_err(|_| {
            serde::de::Error::custom(format!("Wrong value {s}, can not parse to i64"))
        }),
    }
}
