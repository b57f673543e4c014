//! Per-slice reducers, split into `impl Store` blocks.

mod conversation;
mod preview;
mod projects;
mod user;
mod workspace;
