//! Public library API for the tagval self-describing value codec.

/// Tagged value model, wire streams, and the decode registry.
pub mod proto;
