//! # Sentence Type Resolver
//!
//! Maps an envelope's command word to the right typed decoder. Talker-ID
//! prefixes vary between devices (`GP`, `GN`, `GL`, ...), so only the last
//! three characters of the command word are authoritative: the resolver
//! walks a fixed, ordered table of known suffixes and the first match
//! selects the decoder.
//!
//! The set of supported kinds stays open for extension: a single fallback
//! closure can be registered per resolver and is invoked exactly once per
//! unrecognized command word. If it declines, the envelope is returned
//! unresolved as [`NmeaSentence::Generic`]. The fallback is per-instance
//! state, never global, so readers and tests cannot couple through it.

use crate::{
    envelope::Envelope,
    error::Result,
    sentences::{GGA, GLL, GSA, GSV, HDT, NmeaSentence, RMC, VTG, ZDA},
};

type Decoder = fn(&Envelope) -> Result<NmeaSentence>;

/// The known suffixes, in dispatch order.
const DECODERS: [(&str, Decoder); 8] = [
    ("GGA", |env| GGA::from_envelope(env).map(NmeaSentence::GGA)),
    ("GLL", |env| GLL::from_envelope(env).map(NmeaSentence::GLL)),
    ("GSA", |env| GSA::from_envelope(env).map(NmeaSentence::GSA)),
    ("GSV", |env| GSV::from_envelope(env).map(NmeaSentence::GSV)),
    ("RMC", |env| RMC::from_envelope(env).map(NmeaSentence::RMC)),
    ("VTG", |env| VTG::from_envelope(env).map(NmeaSentence::VTG)),
    ("HDT", |env| HDT::from_envelope(env).map(NmeaSentence::HDT)),
    ("ZDA", |env| ZDA::from_envelope(env).map(NmeaSentence::ZDA)),
];

/// Resolves envelopes to typed sentences.
///
/// A pure lookup with no state transitions of its own; the only state is
/// the optional fallback hook.
#[derive(Default)]
pub struct SentenceResolver {
    fallback: Option<Box<dyn FnMut(&Envelope) -> Option<NmeaSentence> + Send>>,
}

impl SentenceResolver {
    pub fn new() -> Self {
        SentenceResolver { fallback: None }
    }

    /// Registers the fallback decoder for unrecognized command words,
    /// replacing any previous registration.
    ///
    /// The hook is expected to be registered once and held for the
    /// resolver's lifetime. Returning `None` declines the envelope.
    pub fn set_fallback(
        &mut self,
        fallback: impl FnMut(&Envelope) -> Option<NmeaSentence> + Send + 'static,
    ) {
        self.fallback = Some(Box::new(fallback));
    }

    /// Dispatches one envelope to its decoder.
    ///
    /// Field-format errors from the selected decoder propagate; an
    /// unrecognized kind is never an error.
    pub fn resolve(&mut self, env: Envelope) -> Result<NmeaSentence> {
        let suffix = env.type_suffix();
        for (known, decoder) in &DECODERS {
            if suffix == *known {
                return decoder(&env);
            }
        }

        if let Some(fallback) = &mut self.fallback
            && let Some(sentence) = fallback(&env)
        {
            return Ok(sentence);
        }

        Ok(NmeaSentence::Generic(env))
    }
}

impl std::fmt::Debug for SentenceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceResolver")
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
