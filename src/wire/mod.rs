//! JSON wire formats.
//!
//! | Direction | Payload                                   | Module        |
//! |-----------|-------------------------------------------|---------------|
//! | out       | `{"ldr","motion","led","mode"}` telemetry | [`telemetry`] |
//! | in        | `{"shared":{"led"}}` / `{"led"}` pushes   | [`attributes`]|
//! | out       | `{"sharedKeys":"led"}` attribute request  | [`attributes`]|
//! | out       | `{"ldr","motion"}` prediction request     | [`prediction`]|
//! | in        | `{"led"}` prediction response             | [`prediction`]|
//! | in        | `ready` / anything else (status probe)    | [`prediction`]|
//!
//! Encoders and decoders are pure functions over byte slices so they can
//! be fuzzed and tested on the host.

pub mod attributes;
pub mod prediction;
pub mod telemetry;

/// Encode a boolean as the `0`/`1` integer the dashboard and model expect.
pub(crate) fn flag(b: bool) -> u8 {
    u8::from(b)
}
