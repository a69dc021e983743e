use super::*;
use bincode_crate as bincode;

pub use bincode::Options;

/// Duplication through the compact binary encoding of [Bincode](bincode).
///
/// `Bincode::default()` encodes with bincode's default [Options]. Any other set of options converts
/// into a `Bincode` with [`From`], so the encoding used for duplication can match the one used
/// elsewhere in a program.
#[cfg_attr(docsrs, doc(cfg(feature = "bincode")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Bincode<O: bincode::Options = bincode::DefaultOptions>(O);

impl<O: bincode::Options> From<O> for Bincode<O> {
    fn from(o: O) -> Self {
        Bincode(o)
    }
}

impl<O: bincode::Options + Clone> Serializer for Bincode<O> {
    type Error = bincode::Error;
    type Output = Vec<u8>;

    fn serialize<T: Serialize>(&mut self, item: &T) -> Result<Self::Output, Self::Error> {
        self.0.clone().serialize(item)
    }
}

impl<O: bincode::Options + Clone, Input> Deserializer<Input> for Bincode<O>
where
    Input: AsRef<[u8]>,
{
    type Error = bincode::Error;

    fn deserialize<T: for<'a> Deserialize<'a>>(&mut self, src: &Input) -> Result<T, Self::Error> {
        self.0.clone().deserialize(src.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_options_round_trip() {
        let mut format: Bincode<_> = bincode::DefaultOptions::new().with_big_endian().into();
        let original = (7u64, vec![1.5f64, -2.25], "seven".to_string());
        assert_eq!(format.round_trip(&original).unwrap(), original);
    }

    #[test]
    fn truncated_input_is_an_error() {
        let mut format: Bincode = Bincode::default();
        let result: Result<(u64, u64), _> = format.deserialize(&vec![1u8]);
        assert!(result.is_err());
    }
}
