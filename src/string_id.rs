use crate::encoding::{self, Encoder};
use crate::error::Error;
use crate::generator::IdGenerator;

/// Turns a 64-bit id generator into a string id generator.
///
/// Each id is `prefix + encoder(id)`. The wrapper holds no mutable state, so
/// it is exactly as thread-safe as the generator it wraps.
///
/// ```
/// use flakeid::{encoding, IdGenerator, Snowflake, StringIdGenerator};
///
/// let ids = StringIdGenerator::with_encoder(Snowflake::new()?, encoding::base32_padded)
///     .prefix("evt_");
/// let id = ids.generate()?;
/// assert!(id.starts_with("evt_"));
/// assert_eq!(id.len(), 4 + 13);
/// # Ok::<(), flakeid::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct StringIdGenerator<G, F = Encoder> {
    source: G,
    encoder: F,
    prefix: String,
}

impl<G> StringIdGenerator<G>
where
    G: IdGenerator<Id = i64>,
{
    /// Wrap `source` with the decimal encoder and no prefix.
    pub fn new(source: G) -> Self {
        Self::with_encoder(source, encoding::decimal)
    }
}

impl<G, F> StringIdGenerator<G, F>
where
    G: IdGenerator<Id = i64>,
    F: Fn(i64) -> String,
{
    pub fn with_encoder(source: G, encoder: F) -> Self {
        Self {
            source,
            encoder,
            prefix: String::new(),
        }
    }

    /// Prepend `prefix` to every generated id.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn source(&self) -> &G {
        &self.source
    }
}

impl<G, F> IdGenerator for StringIdGenerator<G, F>
where
    G: IdGenerator<Id = i64>,
    F: Fn(i64) -> String,
{
    type Id = String;

    fn generate(&self) -> Result<String, Error> {
        let encoded = (self.encoder)(self.source.generate()?);
        let mut id = String::with_capacity(self.prefix.len() + encoded.len());
        id.push_str(&self.prefix);
        id.push_str(&encoded);
        Ok(id)
    }
}
