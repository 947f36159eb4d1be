use crate::error::Error;
use std::sync::Arc;

/// Anything that produces a fresh identifier on demand.
pub trait IdGenerator {
    type Id;

    /// Generates a new identifier every time it is called.
    fn generate(&self) -> Result<Self::Id, Error>;

    /// A lazy, never-ending iterator over newly generated ids.
    ///
    /// Each call starts an independent iterator; stop it with `take`,
    /// `take_while` and the like.
    fn iter(&self) -> Ids<'_, Self> {
        Ids { generator: self }
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    type Id = G::Id;

    fn generate(&self) -> Result<G::Id, Error> {
        (**self).generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    type Id = G::Id;

    fn generate(&self) -> Result<G::Id, Error> {
        (**self).generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    type Id = G::Id;

    fn generate(&self) -> Result<G::Id, Error> {
        (**self).generate()
    }
}

/// Iterator returned by [`IdGenerator::iter`].
pub struct Ids<'a, G: ?Sized> {
    generator: &'a G,
}

impl<G: IdGenerator + ?Sized> Iterator for Ids<'_, G> {
    type Item = Result<G::Id, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
