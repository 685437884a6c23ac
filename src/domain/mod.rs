// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the evaluation driver.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, traits and functions
//
// Everything the evaluation loop touches is expressed through
// this layer, which is why the loop can be unit tested against
// stand-ins with no numeric backend at all.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Host-side score/label arrays produced by detaching a batch
pub mod prediction;

// Named metric functions and their aggregate result type
pub mod metrics;

// Core abstractions (traits) that other layers implement
pub mod traits;
