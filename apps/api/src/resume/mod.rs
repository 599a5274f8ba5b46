// Resume editing, publishing and sharing.
// Handlers only shape requests and responses; persistence goes through `stores`.

pub mod envelope;
pub mod handlers;
pub mod pages;
pub mod share;
