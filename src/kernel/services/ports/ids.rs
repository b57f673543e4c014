/// Source of opaque identifiers for messages, terminal entries, build
/// errors and new projects. Ids must be unique for the life of the store.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}
