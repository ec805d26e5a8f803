//! CLI command implementations.

pub(crate) mod cacoo;

pub(crate) use cacoo::CacooCommand;
