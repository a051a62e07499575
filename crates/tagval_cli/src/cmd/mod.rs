/// JSON encode command.
pub mod encode;
/// Node-kind summary command.
pub mod info;
/// Value tree print command.
pub mod inspect;
/// JSON description of nodes.
pub mod json;
/// Text rendering of value trees.
pub mod print;
/// Shared argument and IO helpers.
pub mod util;
