use super::*;
use serde_json as json;

/// Duplication through [JSON](json) text.
///
/// JSON cannot represent every value exactly: non-finite floats serialize as `null`, and
/// without the `json_float_roundtrip` feature the last digit of a float may change on the way back.
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Json {
    pretty: bool,
}

impl Json {
    /// Compact JSON.
    pub fn new() -> Self {
        Json::default()
    }

    /// Indented JSON, which is easier to read when tracing a failed duplication.
    pub fn pretty() -> Self {
        Json { pretty: true }
    }
}

impl Default for Json {
    fn default() -> Self {
        Json { pretty: false }
    }
}

impl Serializer for Json {
    type Error = json::Error;
    type Output = String;

    fn serialize<T: Serialize>(&mut self, item: &T) -> Result<Self::Output, Self::Error> {
        if self.pretty {
            json::to_string_pretty(item)
        } else {
            json::to_string(item)
        }
    }
}

impl<Input: AsRef<str>> Deserializer<Input> for Json {
    type Error = json::Error;

    fn deserialize<T: for<'a> Deserialize<'a>>(&mut self, src: &Input) -> Result<T, Self::Error> {
        json::from_str(src.as_ref())
    }
}
