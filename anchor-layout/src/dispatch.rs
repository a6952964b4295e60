//! Discriminator dispatch.
//!
//! A [`Dispatcher`] maps each known discriminator to exactly one decoder.
//! It is assembled once through [`DispatcherBuilder`] and is read-only
//! afterwards, so a single instance can sit in a `static` and be shared
//! across threads.

use std::collections::HashMap;

use crate::{
    codec::Decode,
    cursor::Reader,
    discriminator::Discriminator,
    error::{CodecError, CodecResult},
    schema::{AccountSchema, EventSchema, InstructionArgs},
};

type DecodeFn<T> = Box<dyn Fn(&mut Reader<'_>) -> CodecResult<T> + Send + Sync>;

struct SchemaEntry<T> {
    name: &'static str,
    decode: DecodeFn<T>,
}

pub struct Dispatcher<T> {
    entries: HashMap<Discriminator, SchemaEntry<T>>,
    strict: bool,
}

impl<T> Dispatcher<T> {
    pub fn builder() -> DispatcherBuilder<T> {
        DispatcherBuilder::new()
    }

    /// Read the leading discriminator and run the matching decoder on the
    /// bytes behind it.
    ///
    /// An unregistered discriminator fails with
    /// [`CodecError::UnknownSchema`] without invoking any decoder.
    pub fn dispatch(&self, data: &[u8]) -> CodecResult<T> {
        self.dispatch_named(data).map(|(_, value)| value)
    }

    /// Like [`dispatch`](Self::dispatch), also returning the schema name.
    pub fn dispatch_named(&self, data: &[u8]) -> CodecResult<(&'static str, T)> {
        self.dispatch_with(data, false)
    }

    /// Dispatch, additionally rejecting trailing bytes when `strict` is set
    /// even if the dispatcher itself is lenient.
    pub fn dispatch_with(&self, data: &[u8], strict: bool) -> CodecResult<(&'static str, T)> {
        let mut reader = Reader::new(data);
        let discriminator = Discriminator::decode(&mut reader)?;
        let Some(entry) = self.entries.get(&discriminator) else {
            tracing::debug!(%discriminator, len = data.len(), "no schema registered");
            return Err(CodecError::UnknownSchema(discriminator));
        };
        let value = (entry.decode)(&mut reader)?;
        if self.strict || strict {
            reader.finish()?;
        }
        tracing::trace!(
            schema = entry.name,
            %discriminator,
            consumed = reader.position(),
            len = data.len(),
            "dispatched"
        );
        Ok((entry.name, value))
    }

    /// Schema name registered for `discriminator`.
    pub fn lookup(&self, discriminator: &Discriminator) -> Option<&'static str> {
        self.entries.get(discriminator).map(|entry| entry.name)
    }

    pub fn contains(&self, discriminator: &Discriminator) -> bool {
        self.entries.contains_key(discriminator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Registered `(discriminator, name)` pairs, sorted by name.
    pub fn schemas(&self) -> Vec<(Discriminator, &'static str)> {
        let mut schemas: Vec<_> = self
            .entries
            .iter()
            .map(|(discriminator, entry)| (*discriminator, entry.name))
            .collect();
        schemas.sort_by_key(|(_, name)| *name);
        schemas
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("schemas", &self.schemas())
            .field("strict", &self.strict)
            .finish()
    }
}

pub struct DispatcherBuilder<T> {
    entries: HashMap<Discriminator, SchemaEntry<T>>,
    strict: bool,
}

impl<T> std::fmt::Debug for DispatcherBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("schemas", &self.entries.len())
            .field("strict", &self.strict)
            .finish()
    }
}

impl<T> Default for DispatcherBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DispatcherBuilder<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            strict: false,
        }
    }

    /// Reject trailing bytes after the decoded record.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Register a decoder for the bytes following `discriminator`.
    pub fn register<F>(
        mut self,
        name: &'static str,
        discriminator: Discriminator,
        decode: F,
    ) -> CodecResult<Self>
    where
        F: Fn(&mut Reader<'_>) -> CodecResult<T> + Send + Sync + 'static,
    {
        if let Some(existing) = self.entries.get(&discriminator) {
            return Err(CodecError::DuplicateDiscriminator {
                discriminator,
                first: existing.name,
                second: name,
            });
        }
        self.entries.insert(
            discriminator,
            SchemaEntry {
                name,
                decode: Box::new(decode),
            },
        );
        Ok(self)
    }

    pub fn account<A>(self, wrap: fn(A) -> T) -> CodecResult<Self>
    where
        A: AccountSchema + 'static,
        T: 'static,
    {
        self.register(A::NAME, A::DISCRIMINATOR, move |reader| {
            A::decode(reader).map(wrap)
        })
    }

    pub fn instruction<I>(self, wrap: fn(I) -> T) -> CodecResult<Self>
    where
        I: InstructionArgs + 'static,
        T: 'static,
    {
        self.register(I::NAME, I::DISCRIMINATOR, move |reader| {
            I::decode(reader).map(wrap)
        })
    }

    pub fn event<E>(self, wrap: fn(E) -> T) -> CodecResult<Self>
    where
        E: EventSchema + 'static,
        T: 'static,
    {
        self.register(E::NAME, E::DISCRIMINATOR, move |reader| {
            E::decode(reader).map(wrap)
        })
    }

    pub fn build(self) -> Dispatcher<T> {
        tracing::debug!(
            schemas = self.entries.len(),
            strict = self.strict,
            "dispatcher built"
        );
        Dispatcher {
            entries: self.entries,
            strict: self.strict,
        }
    }
}
