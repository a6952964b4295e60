//! Decoder configuration.

use std::{env, sync::Arc};

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;

use crate::{
    error::CodecResult,
    registry::{ProgramRegistry, ProgramSchema},
    types::{DecodedAccount, DecodedInstruction},
};

pub const ENV_LOG_EVENTS: &str = "ANCHOR_LAYOUT_LOG_EVENTS";
pub const ENV_STRICT: &str = "ANCHOR_LAYOUT_STRICT";
pub const ENV_SHOW_PAYLOAD: &str = "ANCHOR_LAYOUT_SHOW_PAYLOAD";
pub const ENV_MAX_PAYLOAD: &str = "ANCHOR_LAYOUT_MAX_PAYLOAD";

const DEFAULT_MAX_PAYLOAD_BYTES: usize = 64;

/// Settings shared by decoding and formatting.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Emit a formatted table for every decoded instruction as a
    /// `tracing` info event.
    pub log_events: bool,
    /// Reject bytes left over after a record is decoded.
    pub strict: bool,
    /// Include the raw payload (hex) in formatted output.
    pub show_payload: bool,
    /// Raw payload bytes shown before truncating.
    pub max_payload_bytes: usize,
    registry: Arc<ProgramRegistry>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            log_events: false,
            strict: false,
            show_payload: false,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            registry: Arc::new(ProgramRegistry::new()),
        }
    }
}

impl DecoderConfig {
    /// Everything on: events logged, strict decoding, payloads shown.
    pub fn debug() -> Self {
        Self {
            log_events: true,
            strict: true,
            show_payload: true,
            ..Self::default()
        }
    }

    /// Defaults overridden by `ANCHOR_LAYOUT_*` environment variables.
    ///
    /// Flags accept `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`;
    /// anything else leaves the default in place.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(default)
        };
        let defaults = Self::default();
        Self {
            log_events: flag(ENV_LOG_EVENTS, defaults.log_events),
            strict: flag(ENV_STRICT, defaults.strict),
            show_payload: flag(ENV_SHOW_PAYLOAD, defaults.show_payload),
            max_payload_bytes: lookup(ENV_MAX_PAYLOAD)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(defaults.max_payload_bytes),
            ..defaults
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    pub fn with_payload(mut self, show_payload: bool, max_payload_bytes: usize) -> Self {
        self.show_payload = show_payload;
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    /// Register program schemas.
    pub fn with_programs(mut self, programs: Vec<Box<dyn ProgramSchema>>) -> Self {
        Arc::make_mut(&mut self.registry).register_all(programs);
        self
    }

    pub fn program_registry(&self) -> &ProgramRegistry {
        &self.registry
    }

    /// Decode `ix` with the registered schema for its program.
    ///
    /// `None` when the program has no schema.
    pub fn decode_instruction(&self, ix: &Instruction) -> Option<CodecResult<DecodedInstruction>> {
        let decoded = self.registry.decode_instruction(ix, self.strict)?;
        if self.log_events {
            self.log_instruction(ix, &decoded);
        }
        Some(decoded)
    }

    pub fn decode_account(
        &self,
        owner: &Pubkey,
        data: &[u8],
    ) -> Option<CodecResult<DecodedAccount>> {
        self.registry.decode_account(owner, data, self.strict)
    }

    #[cfg(not(target_os = "solana"))]
    fn log_instruction(&self, ix: &Instruction, decoded: &CodecResult<DecodedInstruction>) {
        let formatted = crate::formatter::InstructionFormatter::new(self).format(ix, decoded);
        tracing::info!("\n{formatted}");
    }

    #[cfg(target_os = "solana")]
    fn log_instruction(&self, ix: &Instruction, decoded: &CodecResult<DecodedInstruction>) {
        match decoded {
            Ok(decoded) => tracing::info!(program_id = %ix.program_id, name = %decoded.name, "decoded"),
            Err(err) => tracing::info!(program_id = %ix.program_id, %err, "decode failed"),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
